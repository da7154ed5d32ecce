//! Observability module.
//!
//! Structured logging for `plantpress` builds.

pub mod logging;

pub use logging::{init_logging, LogFormat};
