//! Process-wide file logger
//!
//! A single [`Logger`] per process appends timestamped, leveled lines to one
//! log file. The instance is created lazily by [`Logger::get_instance`] and can
//! be torn down with [`Logger::reset_instance`], after which the next access
//! builds a fresh instance.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;

use super::level::LogLevel;
use crate::config::LoggerConfig;
use crate::error::{LoggerError, Result};

/// Timestamp layout used in the line prefix (local time, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The shared instance. `OnceLock` can't be re-armed after a reset, so this is
/// a plain lock around an optional reference.
static INSTANCE: Mutex<Option<Arc<Logger>>> = Mutex::new(None);

/// Lock a mutex, recovering the guard if another thread panicked while holding it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Prefix `body` with the current timestamp and terminate the line
fn stamp_line(body: &str) -> String {
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    format!("[{}] {}\n", timestamp, body)
}

/// Where log lines currently go
///
/// `writer` is `Some` only while a file is open; `path` names that file.
#[derive(Debug, Default)]
struct LogTarget {
    path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
}

impl LogTarget {
    /// Flush and release the open writer, returning the path it was bound to
    ///
    /// The handle is dropped even when the final flush fails.
    fn close(&mut self) -> io::Result<Option<PathBuf>> {
        let path = self.path.take();
        match self.writer.take() {
            Some(mut writer) => {
                writer.flush()?;
                Ok(path)
            }
            None => Ok(None),
        }
    }
}

/// Process-wide logger writing to a single append-mode file
///
/// Obtain it with [`Logger::get_instance`]. All methods take `&self`; writes
/// are serialized by an internal lock so concurrent lines never interleave.
#[derive(Debug)]
pub struct Logger {
    target: Mutex<LogTarget>,
}

impl Logger {
    pub(crate) fn new() -> Self {
        Self {
            target: Mutex::new(LogTarget::default()),
        }
    }

    /// Get the process-wide logger, creating it on first access
    pub fn get_instance() -> Arc<Logger> {
        let mut instance = lock(&INSTANCE);
        Arc::clone(instance.get_or_insert_with(|| Arc::new(Logger::new())))
    }

    /// Shut down the process-wide logger and forget it
    ///
    /// Closes any open log file. Callers still holding the old instance will
    /// see it in the unset state. Does nothing if no instance exists.
    pub fn reset_instance() {
        let mut instance = lock(&INSTANCE);
        let Some(logger) = instance.take() else {
            return;
        };
        let closed = logger.lock_target().close();
        drop(instance);

        match closed {
            Ok(Some(path)) => {
                tracing::debug!(path = %path.display(), "Closed log file on logger reset")
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to flush log file on logger reset: {}", e),
        }
    }

    fn lock_target(&self) -> MutexGuard<'_, LogTarget> {
        lock(&self.target)
    }

    /// Direct output to `path`, closing any previously open file first
    ///
    /// The file is created if absent and appended to otherwise. On failure the
    /// logger is left with no file set.
    pub fn set_log_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let previous = {
            let mut target = self.lock_target();
            let previous = target.close()?;

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggerError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;

            target.writer = Some(BufWriter::new(file));
            target.path = Some(path.to_path_buf());
            previous
        };

        if let Some(previous) = previous {
            tracing::debug!(path = %previous.display(), "Closed log file");
        }
        tracing::debug!(path = %path.display(), "Opened log file");
        Ok(())
    }

    /// Get the path of the open log file, if any
    pub fn log_file(&self) -> Option<PathBuf> {
        self.lock_target().path.clone()
    }

    /// Check whether a log file is currently open
    pub fn is_open(&self) -> bool {
        self.lock_target().writer.is_some()
    }

    /// Append one `[timestamp] [LEVEL] message` line and flush it
    ///
    /// `level` is written as-is, so values outside [`LogLevel`] are accepted.
    /// Fails with [`LoggerError::LogFileNotSet`] if no file is open.
    pub fn log(&self, level: impl fmt::Display, message: impl fmt::Display) -> Result<()> {
        // Caller Display impls run unlocked; the timestamp is read under the lock
        let body = format!("[{}] {}", level, message);

        let mut target = self.lock_target();
        let writer = target.writer.as_mut().ok_or(LoggerError::LogFileNotSet)?;
        writer.write_all(stamp_line(&body).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Log `message` at [`LogLevel::Debug`]
    pub fn debug(&self, message: impl fmt::Display) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    /// Log `message` at [`LogLevel::Info`]
    pub fn info(&self, message: impl fmt::Display) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    /// Log `message` at [`LogLevel::Warning`]
    pub fn warning(&self, message: impl fmt::Display) -> Result<()> {
        self.log(LogLevel::Warning, message)
    }

    /// Log `message` at [`LogLevel::Error`]
    pub fn error(&self, message: impl fmt::Display) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    /// Flush buffered output to the OS (no-op when no file is open)
    pub fn flush(&self) -> Result<()> {
        if let Some(writer) = self.lock_target().writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Flush and close the log file
    ///
    /// Safe to call repeatedly; closing an already closed logger is a no-op.
    pub fn close(&self) -> Result<()> {
        let closed = self.lock_target().close()?;
        if let Some(path) = closed {
            tracing::debug!(path = %path.display(), "Closed log file");
        }
        Ok(())
    }

    /// Apply a [`LoggerConfig`]
    ///
    /// Opens the configured file (creating parent directories if asked to),
    /// or closes the current one when the config names no file.
    pub fn configure(&self, config: &LoggerConfig) -> Result<()> {
        let Some(path) = config.log_file.as_deref() else {
            return self.close();
        };

        if config.create_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| LoggerError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        self.set_log_file(path)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let target = self
            .target
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = target.close() {
            tracing::warn!("Failed to flush log file on drop: {}", e);
        }
    }
}
