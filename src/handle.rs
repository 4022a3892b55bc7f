//! Status-returning entry points over optional logger handles.
//!
//! These functions mirror the flat, handle-based surface of the logger: every
//! call takes an optional handle (absent = never created or already released)
//! and reports a [`Status`] instead of a `Result`. Absent handles and absent
//! payloads yield [`Status::InvalidInput`] without side effects.
//!
//! ```
//! # use text_logger::handle;
//! # use text_logger::{Severity, Status};
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("TestLog.txt");
//! let mut logger = handle::create(&path, "\n[ERR LIMIT]", Severity::Verbose, 1024, 2048);
//! assert!(logger.is_some());
//!
//! assert_eq!(handle::log_info(logger.as_mut(), Some("Info statement")), Status::Success);
//! assert_eq!(handle::flush(logger.as_mut()), Status::Success);
//! assert_eq!(handle::destroy(logger.take()), Status::Success);
//! assert_eq!(handle::destroy(logger.take()), Status::InvalidInput);
//! ```

use std::path::Path;

use tracing::debug;

use crate::clock::Clock;
use crate::config::LoggerConfig;
use crate::error::Status;
use crate::level::Severity;
use crate::logger::TextLogger;
use crate::sink::FileSink;

/// Creates a file-backed logger, or `None` if the arguments are rejected.
pub fn create(
    file_path: impl AsRef<Path>,
    end_marker: &str,
    min_level: Severity,
    buffer_capacity: usize,
    file_budget: usize,
) -> Option<TextLogger> {
    let config = LoggerConfig::new(file_path.as_ref(), end_marker)
        .min_level(min_level)
        .buffer_capacity(buffer_capacity)
        .file_budget(file_budget);
    match TextLogger::new(config) {
        Ok(logger) => Some(logger),
        Err(err) => {
            debug!(error = %err, "logger creation rejected");
            None
        }
    }
}

/// Flushes and releases the logger. Returns the final flush's status.
pub fn destroy<S: FileSink, C: Clock>(handle: Option<TextLogger<S, C>>) -> Status {
    match handle {
        Some(logger) => logger.close().into(),
        None => Status::InvalidInput,
    }
}

pub fn log_error<S: FileSink, C: Clock>(handle: Option<&mut TextLogger<S, C>>, text: Option<&str>) -> Status {
    log_with(handle, Severity::Error, text)
}

pub fn log_warn<S: FileSink, C: Clock>(handle: Option<&mut TextLogger<S, C>>, text: Option<&str>) -> Status {
    log_with(handle, Severity::Warn, text)
}

pub fn log_info<S: FileSink, C: Clock>(handle: Option<&mut TextLogger<S, C>>, text: Option<&str>) -> Status {
    log_with(handle, Severity::Info, text)
}

pub fn log_debug<S: FileSink, C: Clock>(handle: Option<&mut TextLogger<S, C>>, text: Option<&str>) -> Status {
    log_with(handle, Severity::Debug, text)
}

pub fn log_verbose<S: FileSink, C: Clock>(handle: Option<&mut TextLogger<S, C>>, text: Option<&str>) -> Status {
    log_with(handle, Severity::Verbose, text)
}

pub fn log_timestamp<S: FileSink, C: Clock>(handle: Option<&mut TextLogger<S, C>>) -> Status {
    match handle {
        Some(logger) => logger.log_timestamp().into(),
        None => Status::InvalidInput,
    }
}

pub fn flush<S: FileSink, C: Clock>(handle: Option<&mut TextLogger<S, C>>) -> Status {
    match handle {
        Some(logger) => logger.flush().into(),
        None => Status::InvalidInput,
    }
}

/// Prints the on-disk file size and the accounted byte count to stdout.
pub fn print_current_file_size<S: FileSink, C: Clock>(handle: Option<&mut TextLogger<S, C>>) -> Status {
    let Some(logger) = handle else {
        return Status::InvalidInput;
    };
    match logger.file_size() {
        Ok(report) => {
            println!("{}", report);
            Status::Success
        }
        Err(err) => err.status(),
    }
}

fn log_with<S: FileSink, C: Clock>(
    handle: Option<&mut TextLogger<S, C>>,
    severity: Severity,
    text: Option<&str>,
) -> Status {
    match (handle, text) {
        (Some(logger), Some(text)) => logger.log(severity, text).into(),
        _ => Status::InvalidInput,
    }
}
