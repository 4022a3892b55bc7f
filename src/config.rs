use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::level::Severity;

/// Default scratch buffer size in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;
/// Default file budget in bytes, end-marker included.
pub const DEFAULT_FILE_BUDGET: usize = 2048;

/// Settings of one logger context. Immutable once the logger is created.
///
/// # Examples
///
/// ```
/// # use text_logger::{LoggerConfig, Severity};
/// let config = LoggerConfig::new("./TestLog.txt", "\n[ERR LIMIT]")
///     .min_level(Severity::Info)
///     .buffer_capacity(512)
///     .file_budget(4096);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub(crate) file_path: PathBuf,
    pub(crate) end_marker: Vec<u8>,
    pub(crate) min_level: Severity,
    pub(crate) buffer_capacity: usize,
    pub(crate) file_budget: usize,
}

impl LoggerConfig {
    pub fn new(file_path: impl Into<PathBuf>, end_marker: impl Into<Vec<u8>>) -> Self {
        Self {
            file_path: file_path.into(),
            end_marker: end_marker.into(),
            min_level: Severity::Verbose,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            file_budget: DEFAULT_FILE_BUDGET,
        }
    }

    /// Least important severity that is still written.
    #[must_use]
    pub fn min_level(mut self, level: Severity) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes;
        self
    }

    /// Total bytes this logger may ever add to the file, end-marker included.
    #[must_use]
    pub fn file_budget(mut self, bytes: usize) -> Self {
        self.file_budget = bytes;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn end_marker(&self) -> &[u8] {
        &self.end_marker
    }

    pub fn level(&self) -> Severity {
        self.min_level
    }

    pub fn capacity(&self) -> usize {
        self.buffer_capacity
    }

    pub fn budget(&self) -> usize {
        self.file_budget
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("file path is empty"));
        }
        if self.end_marker.is_empty() {
            return Err(Error::InvalidInput("end-marker is empty"));
        }
        if self.buffer_capacity == 0 {
            return Err(Error::InvalidInput("buffer capacity is zero"));
        }
        if self.file_budget <= self.end_marker.len().saturating_add(1) {
            return Err(Error::InvalidInput(
                "file budget cannot hold the end-marker plus one byte",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::new("log.txt", "END");
        assert_eq!(config.level(), Severity::Verbose);
        assert_eq!(config.capacity(), DEFAULT_BUFFER_CAPACITY);
        assert_eq!(config.budget(), DEFAULT_FILE_BUDGET);
        assert_eq!(config.end_marker(), b"END");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_path_and_marker() {
        assert!(LoggerConfig::new("", "END").validate().is_err());
        assert!(LoggerConfig::new("log.txt", "").validate().is_err());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = LoggerConfig::new("log.txt", "END").buffer_capacity(0);
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_budget_boundary() {
        // "END" reserves four bytes; five is the smallest workable budget.
        assert!(LoggerConfig::new("log.txt", "END").file_budget(4).validate().is_err());
        assert!(LoggerConfig::new("log.txt", "END").file_budget(5).validate().is_ok());
    }
}
