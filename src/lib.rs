//! Singleton Logger - a process-wide, thread-safe file logger
//!
//! One shared [`Logger`] appends `[timestamp] [LEVEL] message` lines to a
//! configurable file. Get it with [`Logger::get_instance`], point it at a file
//! with [`Logger::set_log_file`], and tear it down with [`Logger::reset_instance`].

pub mod config;
pub mod error;
pub mod logging;

pub use config::LoggerConfig;
pub use error::{LoggerError, OpenErrorKind, Result};
pub use logging::{LogLevel, Logger, LoggerLayer};
