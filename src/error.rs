use std::fmt;
use std::io;

use thiserror::Error;

/// Result type used throughout the text logger.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds reported by the logger context.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input was absent or malformed. No state was changed.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Opening, writing or measuring the backing file failed.
    ///
    /// The scratch buffer and the ledger are left as they were before the
    /// failing step.
    #[error("file error: {0}")]
    File(#[from] io::Error),

    /// The file budget is exhausted and the end-marker has been latched.
    #[error("insufficient file space")]
    InsufficientFileSpace,
}

impl Error {
    /// The status kind this error maps onto.
    pub fn status(&self) -> Status {
        match self {
            Error::InvalidInput(_) => Status::InvalidInput,
            Error::File(_) => Status::FileError,
            Error::InsufficientFileSpace => Status::InsufficientFileSpace,
        }
    }

    pub(crate) fn short_write(written: usize, expected: usize) -> Self {
        Error::File(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("short write: {} of {} bytes", written, expected),
        ))
    }
}

/// Flat status value returned by the handle-level API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    FileError,
    InvalidInput,
    InsufficientFileSpace,
}

impl Status {
    /// Numeric code, `0` for success.
    pub const fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::FileError => 1,
            Status::InvalidInput => 2,
            Status::InsufficientFileSpace => 3,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Success => "SUCCESS",
            Status::FileError => "FILE_ERROR",
            Status::InvalidInput => "INVALID_INPUT",
            Status::InsufficientFileSpace => "INSUFFICIENT_FILE_SPACE",
        };
        f.write_str(name)
    }
}

impl<T> From<Result<T>> for Status {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(err) => err.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_ordered() {
        assert_eq!(Status::Success.code(), 0);
        assert_eq!(Status::FileError.code(), 1);
        assert_eq!(Status::InvalidInput.code(), 2);
        assert_eq!(Status::InsufficientFileSpace.code(), 3);
    }

    #[test]
    fn test_status_from_result() {
        let ok: Result<()> = Ok(());
        assert_eq!(Status::from(ok), Status::Success);

        let io_err: Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone").into());
        assert_eq!(Status::from(io_err), Status::FileError);

        let full: Result<()> = Err(Error::InsufficientFileSpace);
        assert_eq!(Status::from(full), Status::InsufficientFileSpace);
    }

    #[test]
    fn test_short_write_is_file_error() {
        let err = Error::short_write(3, 10);
        assert_eq!(err.status(), Status::FileError);
        match err {
            Error::File(io) => assert_eq!(io.kind(), io::ErrorKind::WriteZero),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
