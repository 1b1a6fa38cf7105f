//! Custom validators shared across configuration sections.

use validator::ValidationError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(ValidationError::new("log_level")
            .with_message("must be one of trace, debug, info, warn, error".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_levels() {
        for level in LOG_LEVELS {
            assert!(validate_log_level(level).is_ok());
        }
    }

    #[test]
    fn rejects_unknown_levels() {
        assert!(validate_log_level("verbose").is_err());
    }
}
