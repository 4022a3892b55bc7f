//! # Text Logger
//!
//! A bounded, buffered text logger for single-process debug instrumentation:
//!
//! * **Level filtering**: five severities, records below the threshold are dropped
//! * **Buffered writes**: records accumulate in a fixed-size scratch buffer and
//!   reach the file in one append per flush
//! * **Hard file budget**: the file never grows past its declared size; when the
//!   budget runs out a recognizable end-marker is appended exactly once
//!
//! ## On-disk format
//!
//! ```text
//! <record>    := <timestamp> <tag> <payload-bytes> '\n'
//! <timestamp> := '[' YYYY '-' MM '-' DD ' | ' HH ':' MM ':' SS '] '
//! <tag>       := '[E]: ' | '[W]: ' | '[I]: ' | '[D]: ' | '[V]: '
//! ```
//!
//! ## Main Components
//!
//! * `TextLogger`: the logger context (filtering, flush decisions, end-marker, lifecycle)
//! * `ledger`: byte accounting against the file budget
//! * `scratch`: the bounded in-memory buffer
//! * `format`: timestamp and tagged record rendering
//! * `clock` / `sink`: the wall-clock and file collaborators, both swappable
//! * `handle`: a flat, status-returning API over optional handles
//!
//! ## Quick Start
//!
//! ```
//! use text_logger::{LoggerConfig, Severity, TextLogger};
//!
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("TestLog.txt");
//! let config = LoggerConfig::new(&path, "\n[ERR LIMIT]")
//!     .min_level(Severity::Info)
//!     .buffer_capacity(1024)
//!     .file_budget(2048);
//!
//! let mut logger = TextLogger::new(config).unwrap();
//! logger.error("Error statement").unwrap();
//! logger.info("Info statement").unwrap();
//! logger.debug("dropped by the level filter").unwrap();
//! logger.close().unwrap();
//!
//! let text = std::fs::read_to_string(&path).unwrap();
//! assert_eq!(text.lines().count(), 2);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod handle;
pub mod ledger;
pub mod level;
pub mod logger;
pub mod scratch;
pub mod sink;

pub use clock::{Clock, FixedClock, LocalTime, SystemClock, TIMESTAMP_LEN};
pub use config::LoggerConfig;
pub use error::{Error, Result, Status};
pub use format::LINE_OVERHEAD;
pub use level::Severity;
pub use logger::{FileSizeReport, TextLogger};
pub use sink::{AppendHandle, FileSink, MemorySink, PathSink};
