//! Error types for the logger

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by logger operations
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Errors surfaced by [`Logger`](crate::logging::Logger) operations
#[derive(Error, Debug)]
pub enum LoggerError {
    /// `log` was called while no log file is open
    #[error("log file not set; call set_log_file before logging")]
    LogFileNotSet,

    /// The log file could not be opened for appending
    #[error("failed to open log file {}: {}", .path.display(), OpenErrorKind::from_io(.source).describe(.source))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Parent directories of the log file could not be created
    #[error("failed to create log directory {}: {}", .path.display(), .source)]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing or flushing the open log file failed
    #[error("failed to write log file: {0}")]
    Write(#[from] io::Error),
}

impl LoggerError {
    /// Whether this error is a usage error rather than an I/O failure
    pub fn is_precondition(&self) -> bool {
        matches!(self, LoggerError::LogFileNotSet)
    }

    /// Category of the underlying I/O failure, if any
    pub fn io_kind(&self) -> Option<OpenErrorKind> {
        match self {
            LoggerError::LogFileNotSet => None,
            LoggerError::Open { source, .. }
            | LoggerError::CreateDir { source, .. }
            | LoggerError::Write(source) => Some(OpenErrorKind::from_io(source)),
        }
    }
}

/// Categories of file errors for user-friendly messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenErrorKind {
    /// Disk is full or quota exceeded
    DiskFull,
    /// Permission denied
    PermissionDenied,
    /// File or directory not found
    NotFound,
    /// Other IO error
    Other,
}

impl OpenErrorKind {
    /// Categorize an error from opening or writing the log file
    ///
    /// std already decodes ENOSPC and EACCES into these kinds.
    pub fn from_io(e: &io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::StorageFull | io::ErrorKind::WriteZero => OpenErrorKind::DiskFull,
            io::ErrorKind::PermissionDenied => OpenErrorKind::PermissionDenied,
            io::ErrorKind::NotFound => OpenErrorKind::NotFound,
            _ => OpenErrorKind::Other,
        }
    }

    /// Get a user-friendly message for this error kind
    pub fn user_message(&self) -> &'static str {
        match self {
            OpenErrorKind::DiskFull => "disk full",
            OpenErrorKind::PermissionDenied => "permission denied",
            OpenErrorKind::NotFound => "file or directory not found",
            OpenErrorKind::Other => "I/O error",
        }
    }

    fn describe(&self, e: &io::Error) -> String {
        match self {
            OpenErrorKind::Other => e.to_string(),
            kind => kind.user_message().to_string(),
        }
    }
}
