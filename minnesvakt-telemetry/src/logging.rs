//! ## minnesvakt-telemetry::logging
//! **Structured logging with tracing**
//!
//! `RUST_LOG` wins when set; otherwise the configured default level applies.

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Initializes the global subscriber with `default_level` as the
    /// fallback filter. Call once at process start.
    pub fn init(default_level: &str) {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_target(true)
            .init()
    }

    /// One structured line per registry lifecycle event, used by the demo
    /// driver.
    pub fn log_registry_event(event: &str, slots: usize, bytes: usize) {
        tracing::info!(slots, bytes, "registry event: {}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn registry_events_are_recorded() {
        EventLogger::log_registry_event("teardown", 7, 1024);
        assert!(logs_contain("registry event: teardown"));
    }
}
