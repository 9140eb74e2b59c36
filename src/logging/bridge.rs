//! `tracing` integration
//!
//! [`LoggerLayer`] forwards `tracing` events into the [`Logger`], so code that
//! is already instrumented with `tracing` macros ends up in the same log file.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use super::level::LogLevel;
use super::logger::Logger;

/// Events from this crate are never forwarded, so the logger's own
/// diagnostics can't feed back into it.
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// A `tracing` layer that writes every event as a log line
///
/// By default each event goes to whatever [`Logger::get_instance`] returns at
/// that moment, so resetting the logger is honoured. Events are dropped while
/// no log file is set.
#[derive(Debug, Default)]
pub struct LoggerLayer {
    logger: Option<Arc<Logger>>,
}

impl LoggerLayer {
    /// Create a layer writing to the process-wide logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer bound to a specific logger instance
    pub(crate) fn with_logger(logger: Arc<Logger>) -> Self {
        Self {
            logger: Some(logger),
        }
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(OWN_TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let level = LogLevel::from(*metadata.level());
        let message = visitor.finish();

        let result = match &self.logger {
            Some(logger) => logger.log(level, message),
            None => Logger::get_instance().log(level, message),
        };
        // Instrumented code must not fail because logging isn't configured
        let _ = result;
    }
}

/// Collects the `message` field and renders the rest as `key=value`
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl EventVisitor {
    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field, format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field, format_args!("{:?}", value));
        }
    }
}
