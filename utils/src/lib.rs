//! Logging and configuration shared by strand state tooling.

pub mod config;
pub mod logging;

pub use config::{ConfigError, StateConfig};
pub use logging::{init_logging, init_tracing, LogFormat, UnknownLogFormat};
