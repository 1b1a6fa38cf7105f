//! # Minnesvakt Telemetry
//!
//! Structured logging for the tracked-memory tooling. Metrics and alerting
//! are deliberately out of scope; the registry exposes its own diagnostic
//! report through a caller-provided sink instead.

pub mod logging;

pub use logging::EventLogger;
