//! ## minnesvakt-core::text
//! **Tracked string allocation and in-place reallocation**
//!
//! Strings are stored NUL-terminated (a heritage of the manual-allocation
//! environments this registry serves): a string of `n` characters occupies
//! an `n + 1` byte record. Reallocation and concatenation replace content in
//! the same slot, so callers keep one stable handle across content changes.

pub mod format;

use thiserror::Error;

use crate::alloc::registry::{cstring_buffer, Handle, MemoryRegistry};
use crate::error::RegistryError;
use crate::text::format::{render, FormatArg, FormatError};

/// Failures raised by tracked string operations.
#[derive(Debug, Error)]
pub enum TextError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Format(#[from] FormatError),

    /// A tracked buffer read back as text was not valid UTF-8. Only
    /// reachable through caller-filled fixed-length buffers.
    #[error("tracked buffer is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}

/// Tracked string operation surface of the registry.
pub trait TextOps {
    /// Allocates `text.len() + 1` bytes holding `text` plus terminator.
    fn new_string(&mut self, text: &str) -> Result<Handle, TextError>;

    /// Allocates `len + 1` zero-initialized bytes, reserving room for a
    /// terminator. Terminator position within the buffer is the caller's
    /// responsibility.
    fn new_string_of_len(&mut self, len: usize) -> Result<Handle, TextError>;

    /// Replaces the previous string's content with `text` in the same slot.
    /// With no previous handle this behaves as [`TextOps::new_string`].
    fn realloc_string(
        &mut self,
        text: &str,
        previous: Option<Handle>,
    ) -> Result<Handle, TextError>;

    /// Appends `suffix` to the previous string, growing the record in place:
    /// the new content lands in the same slot and the returned handle equals
    /// the previous one. With no previous handle this behaves as
    /// [`TextOps::new_string`] over `suffix`.
    fn concat_string(
        &mut self,
        suffix: &str,
        previous: Option<Handle>,
    ) -> Result<Handle, TextError>;

    /// Renders `pattern` with the type-checked `args` into a newly tracked
    /// string. See [`FormatArg`] for the directive set.
    fn format(&mut self, pattern: &str, args: &[FormatArg<'_>]) -> Result<Handle, TextError>;

    /// Releases each handle, returning the failure count. Thin wrapper over
    /// [`MemoryRegistry::release_multiple`].
    fn free_multiple(&mut self, handles: &[Option<Handle>]) -> usize;

    /// Reads a tracked string back (content up to the first NUL).
    fn string_text(&self, handle: Handle) -> Result<&str, TextError>;
}

impl TextOps for MemoryRegistry {
    fn new_string(&mut self, text: &str) -> Result<Handle, TextError> {
        let handle = self.allocate(text.len() + 1)?;
        self.bytes_mut(handle)?[..text.len()].copy_from_slice(text.as_bytes());
        Ok(handle)
    }

    fn new_string_of_len(&mut self, len: usize) -> Result<Handle, TextError> {
        Ok(self.allocate(len + 1)?)
    }

    fn realloc_string(
        &mut self,
        text: &str,
        previous: Option<Handle>,
    ) -> Result<Handle, TextError> {
        match previous {
            None => self.new_string(text),
            Some(handle) => Ok(self.replace_content(handle, cstring_buffer(text)?)?),
        }
    }

    fn concat_string(
        &mut self,
        suffix: &str,
        previous: Option<Handle>,
    ) -> Result<Handle, TextError> {
        let Some(handle) = previous else {
            return self.new_string(suffix);
        };

        // new size = previous record size + suffix length; the previous
        // record's terminator byte is replaced by the suffix and re-added.
        let previous_bytes = self.bytes(handle)?;
        let new_size = previous_bytes.len() + suffix.len();
        let mut buf = Vec::new();
        buf.try_reserve_exact(new_size)
            .map_err(|_| RegistryError::Exhausted {
                requested: new_size,
            })?;
        buf.extend_from_slice(
            &previous_bytes[..previous_bytes.len().saturating_sub(1)],
        );
        buf.extend_from_slice(suffix.as_bytes());
        buf.resize(new_size, 0);

        Ok(self.replace_content(handle, buf.into_boxed_slice())?)
    }

    fn format(&mut self, pattern: &str, args: &[FormatArg<'_>]) -> Result<Handle, TextError> {
        let rendered = render(pattern, args)?;
        self.new_string(&rendered)
    }

    fn free_multiple(&mut self, handles: &[Option<Handle>]) -> usize {
        self.release_multiple(handles)
    }

    fn string_text(&self, handle: Handle) -> Result<&str, TextError> {
        let bytes = self.bytes(handle)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(std::str::from_utf8(&bytes[..end])?)
    }
}
