//! Process-wide file logging
//!
//! Provides the singleton [`Logger`], the levels it writes, and a `tracing`
//! layer that routes instrumented events into the same file.

mod bridge;
mod level;
mod logger;

pub use bridge::LoggerLayer;
pub use level::{LogLevel, ParseLevelError};
pub use logger::{Logger, TIMESTAMP_FORMAT};
