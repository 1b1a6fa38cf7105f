//! Minimal directive-based text formatter.
//!
//! Supported directives: `%%` (literal percent), `%s` (text), `%c`
//! (character), `%d` (signed), `%u` (unsigned), `%x`/`%X` (unsigned hex),
//! `%f` (floating point, six decimals as printf's `%f`), and `%b` — a
//! deliberate non-standard directive rendering booleans as the literal words
//! `true`/`false`. Any other character is copied through unchanged.
//!
//! Arguments are a type-checked list instead of a variadic pack: an unknown
//! directive, a missing or mismatched argument, or leftover arguments all
//! fail explicitly rather than being dropped silently.

use std::fmt::Write;

use thiserror::Error;

/// One type-checked formatting argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    Str(&'a str),
    Char(char),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

/// Pattern/argument mismatches detected while rendering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unknown format directive '%{0}'")]
    UnknownDirective(char),

    #[error("pattern ends with a dangling '%'")]
    DanglingPercent,

    #[error("missing argument {index} for directive '%{directive}'")]
    MissingArgument { directive: char, index: usize },

    #[error("argument {index} does not match directive '%{directive}'")]
    TypeMismatch { directive: char, index: usize },

    #[error("pattern consumed {used} arguments but {supplied} were supplied")]
    ExcessArguments { used: usize, supplied: usize },
}

/// Renders `pattern` against `args` into an owned string.
pub(crate) fn render(pattern: &str, args: &[FormatArg<'_>]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut index = 0;

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        let directive = chars.next().ok_or(FormatError::DanglingPercent)?;
        if directive == '%' {
            out.push('%');
            continue;
        }

        // Unknown directives fail before any argument is consumed.
        if !matches!(directive, 's' | 'c' | 'd' | 'u' | 'x' | 'X' | 'f' | 'b') {
            return Err(FormatError::UnknownDirective(directive));
        }

        let arg = args
            .get(index)
            .ok_or(FormatError::MissingArgument { directive, index })?;
        // Write into a String is infallible.
        match (directive, arg) {
            ('s', FormatArg::Str(text)) => out.push_str(text),
            ('c', FormatArg::Char(c)) => out.push(*c),
            ('d', FormatArg::Int(v)) => {
                let _ = write!(out, "{v}");
            }
            ('u', FormatArg::Uint(v)) => {
                let _ = write!(out, "{v}");
            }
            ('x', FormatArg::Uint(v)) => {
                let _ = write!(out, "{v:x}");
            }
            ('X', FormatArg::Uint(v)) => {
                let _ = write!(out, "{v:X}");
            }
            ('f', FormatArg::Float(v)) => {
                let _ = write!(out, "{v:.6}");
            }
            ('b', FormatArg::Bool(v)) => out.push_str(if *v { "true" } else { "false" }),
            _ => return Err(FormatError::TypeMismatch { directive, index }),
        }
        index += 1;
    }

    if index < args.len() {
        return Err(FormatError::ExcessArguments {
            used: index,
            supplied: args.len(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::registry::MemoryRegistry;
    use crate::text::TextOps;

    #[test]
    fn integer_followed_by_literal_percent() {
        let mut registry = MemoryRegistry::default();
        let handle = registry.format("%d%%", &[FormatArg::Int(1)]).unwrap();
        assert_eq!(registry.string_text(handle).unwrap(), "1%");
    }

    #[test]
    fn booleans_render_as_words() {
        let mut registry = MemoryRegistry::default();
        let handle = registry
            .format(
                "b:%b, b:%b",
                &[FormatArg::Bool(true), FormatArg::Bool(false)],
            )
            .unwrap();
        assert_eq!(registry.string_text(handle).unwrap(), "b:true, b:false");
    }

    #[test]
    fn strings_interleave_with_literals() {
        let mut registry = MemoryRegistry::default();
        let handle = registry
            .format(
                "s:%s, a:%s",
                &[FormatArg::Str("ok les filles"), FormatArg::Str("Yes")],
            )
            .unwrap();
        assert_eq!(
            registry.string_text(handle).unwrap(),
            "s:ok les filles, a:Yes"
        );
    }

    #[test]
    fn hex_char_and_float_directives() {
        assert_eq!(
            render(
                "%x %X %c %f",
                &[
                    FormatArg::Uint(255),
                    FormatArg::Uint(255),
                    FormatArg::Char('@'),
                    FormatArg::Float(1.5),
                ]
            )
            .unwrap(),
            "ff FF @ 1.500000"
        );
    }

    #[test]
    fn unsigned_directive() {
        assert_eq!(render("%u", &[FormatArg::Uint(42)]).unwrap(), "42");
    }

    #[test]
    fn unknown_directive_is_an_error() {
        assert_eq!(
            render("%q", &[FormatArg::Int(1)]),
            Err(FormatError::UnknownDirective('q'))
        );
    }

    #[test]
    fn unknown_directive_wins_over_missing_argument() {
        assert_eq!(render("%q", &[]), Err(FormatError::UnknownDirective('q')));
    }

    #[test]
    fn dangling_percent_is_an_error() {
        assert_eq!(render("oops %", &[]), Err(FormatError::DanglingPercent));
    }

    #[test]
    fn missing_argument_is_an_error() {
        assert_eq!(
            render("%d %d", &[FormatArg::Int(1)]),
            Err(FormatError::MissingArgument {
                directive: 'd',
                index: 1
            })
        );
    }

    #[test]
    fn mismatched_argument_is_an_error() {
        assert_eq!(
            render("%d", &[FormatArg::Str("not a number")]),
            Err(FormatError::TypeMismatch {
                directive: 'd',
                index: 0
            })
        );
    }

    #[test]
    fn leftover_arguments_are_an_error() {
        assert_eq!(
            render("%d", &[FormatArg::Int(1), FormatArg::Int(2)]),
            Err(FormatError::ExcessArguments {
                used: 1,
                supplied: 2
            })
        );
    }
}
