use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::LoggerConfig;
use crate::error::{Error, Result};
use crate::format::{RecordLine, TimestampLine};
use crate::ledger::Ledger;
use crate::level::Severity;
use crate::scratch::ScratchBuffer;
use crate::sink::{AppendHandle, FileSink, PathSink};

/// Core implementation of the bounded text logger.
///
/// This module provides the [`TextLogger`] context which formats records into
/// a scratch buffer and appends them to the backing file on flush, while
/// keeping the file inside its declared budget.

/// A size-capped, level-filtered, line-oriented log stream.
///
/// Records are formatted into an in-memory scratch buffer as
/// `"[YYYY-MM-DD | HH:MM:SS] [X]: payload\n"` and appended to the file in one
/// write per flush. A flush happens when asked for, or when the next record
/// would not fit in the buffer or would meet the file budget.
///
/// Once the budget is exhausted the configured end-marker is appended to the
/// file exactly once and every later log or flush call reports
/// [`Error::InsufficientFileSpace`] without touching the file again.
///
/// # Thread Safety
///
/// A logger is owned and driven by one thread. Nothing is locked; wrap it in
/// a mutex yourself if several threads must share one.
///
/// # File Handling
///
/// The file is not held open between calls. Each flush re-opens it through the
/// [`FileSink`] for appending and closes it again before returning, on error
/// paths included.
///
/// # Examples
///
/// ```
/// # use text_logger::{FixedClock, LocalTime, LoggerConfig, MemorySink, Severity, TextLogger};
/// let file = MemorySink::new();
/// let clock = FixedClock(LocalTime::new(2024, 5, 17, 8, 30, 0));
/// let config = LoggerConfig::new("debug.log", "\n[ERR LIMIT]").min_level(Severity::Info);
///
/// let mut logger = TextLogger::with_parts(config, file.clone(), clock).unwrap();
/// logger.info("hello").unwrap();
/// logger.debug("filtered out").unwrap();
/// logger.close().unwrap();
///
/// assert_eq!(file.contents(), b"[2024-05-17 | 08:30:00] [I]: hello\n");
/// ```
pub struct TextLogger<S: FileSink = PathSink, C: Clock = SystemClock> {
    file_path: PathBuf,
    end_marker: Box<[u8]>,
    min_level: Severity,
    scratch: ScratchBuffer,
    ledger: Ledger,
    sink: S,
    clock: C,
    closed: bool,
}

impl TextLogger {
    /// Creates a logger appending to `config.file_path` and stamping records
    /// with the local system time.
    ///
    /// The file is not opened until the first flush.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let sink = PathSink::new(config.file_path.clone());
        Self::with_parts(config, sink, SystemClock)
    }
}

impl<S: FileSink, C: Clock> TextLogger<S, C> {
    /// Creates a logger writing through `sink` with timestamps from `clock`.
    ///
    /// Fails with [`Error::InvalidInput`] when the path or end-marker is
    /// empty, the buffer capacity is zero, or the file budget cannot hold the
    /// end-marker plus at least one byte.
    pub fn with_parts(config: LoggerConfig, sink: S, clock: C) -> Result<Self> {
        config.validate()?;
        let ledger = Ledger::new(config.file_budget, config.end_marker.len())?;

        debug!(
            path = %config.file_path.display(),
            level = %config.min_level,
            buffer_capacity = config.buffer_capacity,
            file_budget = ledger.budget(),
            "text logger created"
        );

        Ok(Self {
            file_path: config.file_path,
            end_marker: config.end_marker.into_boxed_slice(),
            min_level: config.min_level,
            scratch: ScratchBuffer::with_capacity(config.buffer_capacity),
            ledger,
            sink,
            clock,
            closed: false,
        })
    }

    pub fn error(&mut self, text: &str) -> Result<()> {
        self.log(Severity::Error, text)
    }

    pub fn warn(&mut self, text: &str) -> Result<()> {
        self.log(Severity::Warn, text)
    }

    pub fn info(&mut self, text: &str) -> Result<()> {
        self.log(Severity::Info, text)
    }

    pub fn debug(&mut self, text: &str) -> Result<()> {
        self.log(Severity::Debug, text)
    }

    pub fn verbose(&mut self, text: &str) -> Result<()> {
        self.log(Severity::Verbose, text)
    }

    /// Buffers one timestamped record of the given severity.
    ///
    /// Records less important than the configured minimum level are dropped
    /// and reported as success. The call may flush first to make room; any
    /// flush failure is returned and the record is not buffered.
    ///
    /// A record that passes the file budget is accounted but never written:
    /// the end-marker goes out instead and the call returns
    /// [`Error::InsufficientFileSpace`]. One that fits exactly stays buffered
    /// and the next flush reports the exhausted budget.
    pub fn log(&mut self, severity: Severity, text: &str) -> Result<()> {
        // Smaller ordinal is more important; admits() compares ranks.
        if !self.min_level.admits(severity) {
            return Ok(());
        }
        self.ensure_open()?;
        self.write_record(&RecordLine::new(severity, text.as_bytes()))
    }

    /// Buffers a bare timestamp prefix.
    ///
    /// Every record already carries its own timestamp, so calling this before
    /// a log call produces two timestamps back to back.
    pub fn log_timestamp(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.write_timestamp()
    }

    /// Appends the scratch buffer to the file in a single write.
    ///
    /// * Budget exhausted: the end-marker is written if it has not been yet,
    ///   and [`Error::InsufficientFileSpace`] is returned. Buffered bytes are
    ///   kept but never written.
    /// * Empty buffer: nothing is opened, `Ok(())`.
    /// * Buffer would push the file past its budget: the end-marker is
    ///   written instead and [`Error::InsufficientFileSpace`] is returned.
    /// * Otherwise the buffer is written and emptied. On any I/O failure or
    ///   short write the buffer is left untouched.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_open()?;

        if self.ledger.is_exhausted() {
            warn!(
                total_written = self.ledger.total_written(),
                budget = self.ledger.budget(),
                "file budget exhausted"
            );
            let mut handle = self.open()?;
            self.emit_marker(&mut handle)?;
            return Err(Error::InsufficientFileSpace);
        }

        if self.scratch.is_empty() {
            return Ok(());
        }

        let mut handle = self.open()?;
        let on_disk = handle
            .len()
            .map_err(|e| self.file_error("query length of", e))?;

        if self.ledger.would_overshoot(on_disk, self.scratch.used()) {
            warn!(
                on_disk,
                pending = self.scratch.used(),
                budget = self.ledger.budget(),
                "flush would overshoot the file budget"
            );
            self.emit_marker(&mut handle)?;
            return Err(Error::InsufficientFileSpace);
        }

        let pending = self.scratch.pending();
        let written = handle
            .append(pending)
            .map_err(|e| self.file_error("write to", e))?;
        if written != pending.len() {
            let err = Error::short_write(written, pending.len());
            error!(path = %self.file_path.display(), error = %err, "flush failed");
            return Err(err);
        }

        debug!(
            bytes = written,
            total_written = self.ledger.total_written(),
            "flushed scratch buffer"
        );
        self.scratch.clear();
        Ok(())
    }

    /// Measures the backing file and reports it next to the ledger's count.
    ///
    /// Purely observational: the ledger and buffer are not touched.
    pub fn file_size(&mut self) -> Result<FileSizeReport> {
        let mut handle = self.open()?;
        let on_disk = handle
            .len()
            .map_err(|e| self.file_error("query length of", e))?;
        drop(handle);

        let report = FileSizeReport {
            on_disk,
            total_written: self.ledger.total_written() as u64,
        };
        info!(
            on_disk = report.on_disk,
            total_written = report.total_written,
            "current file size"
        );
        Ok(report)
    }

    /// Flushes what is left and releases the logger.
    ///
    /// Storage is released whatever the flush returns; its result is handed
    /// back to the caller.
    pub fn close(mut self) -> Result<()> {
        let result = self.flush();
        self.closed = true;
        result
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn end_marker(&self) -> &[u8] {
        &self.end_marker
    }

    pub fn min_level(&self) -> Severity {
        self.min_level
    }

    pub fn buffer_capacity(&self) -> usize {
        self.scratch.capacity()
    }

    pub fn buffer_used(&self) -> usize {
        self.scratch.used()
    }

    /// Bytes buffered but not yet flushed.
    pub fn pending(&self) -> &[u8] {
        self.scratch.pending()
    }

    /// Effective budget: the raw budget minus the end-marker reservation.
    pub fn file_budget(&self) -> usize {
        self.ledger.budget()
    }

    /// Record bytes accounted since creation, end-marker excluded.
    pub fn total_written(&self) -> usize {
        self.ledger.total_written()
    }

    pub fn marker_emitted(&self) -> bool {
        self.ledger.marker_emitted()
    }

    /// Refuses further work once the end-marker is out.
    #[inline]
    fn ensure_open(&self) -> Result<()> {
        if self.ledger.marker_emitted() {
            Err(Error::InsufficientFileSpace)
        } else {
            Ok(())
        }
    }

    fn write_timestamp(&mut self) -> Result<()> {
        let stamp = TimestampLine::render(&self.clock.now());
        self.make_room(stamp.len())?;
        let mark = self.mark();
        let written = self.scratch.append(&[stamp.as_bytes()]);
        self.ledger.record(written);
        self.seal_if_overrun(mark)
    }

    fn write_record(&mut self, record: &RecordLine<'_>) -> Result<()> {
        let stamp = TimestampLine::render(&self.clock.now());
        // One decision for the whole record keeps its timestamp and line in
        // the same flush.
        self.make_room(stamp.len().saturating_add(record.len_bound()))?;
        let mark = self.mark();

        // A record larger than the whole buffer lands in an empty one and is
        // cut short there, newline kept.
        let [tag, payload, _] = record.parts();
        let written = self.scratch.append_line(&[stamp.as_bytes(), tag, payload]);
        self.ledger.record(written);
        self.seal_if_overrun(mark)
    }

    /// Flushes when the next `len_next` bytes would meet or pass either the
    /// file budget or the free space of the scratch buffer.
    fn needs_flush(&self, len_next: usize) -> bool {
        self.ledger.would_reach(len_next) || self.scratch.remaining() <= len_next
    }

    fn make_room(&mut self, len_next: usize) -> Result<()> {
        if self.needs_flush(len_next) {
            self.flush()?;
        }
        Ok(())
    }

    /// Buffer and ledger positions to roll back to.
    #[inline]
    fn mark(&self) -> (usize, usize) {
        (self.scratch.used(), self.ledger.total_written())
    }

    /// Bytes accounted past the budget can never reach the file, so the
    /// end-marker goes out in the same call. A file error undoes the call's
    /// bytes, leaving buffer and ledger as they were before it.
    fn seal_if_overrun(&mut self, (used, total_written): (usize, usize)) -> Result<()> {
        if !self.ledger.is_overrun() {
            return Ok(());
        }
        match self.flush() {
            Err(Error::File(err)) => {
                self.scratch.truncate(used);
                self.ledger.rewind(total_written);
                Err(Error::File(err))
            }
            other => other,
        }
    }

    fn emit_marker(&mut self, handle: &mut S::Handle) -> Result<()> {
        if self.ledger.marker_emitted() {
            return Ok(());
        }
        let written = handle
            .append(&self.end_marker)
            .map_err(|e| self.file_error("write end-marker to", e))?;
        if written != self.end_marker.len() {
            let err = Error::short_write(written, self.end_marker.len());
            error!(path = %self.file_path.display(), error = %err, "end-marker write failed");
            return Err(err);
        }
        self.ledger.latch_marker();
        warn!(
            path = %self.file_path.display(),
            total_written = self.ledger.total_written(),
            "end-marker written, logger is full"
        );
        Ok(())
    }

    fn open(&mut self) -> Result<S::Handle> {
        match self.sink.open_append() {
            Ok(handle) => Ok(handle),
            Err(e) => Err(self.file_error("open", e)),
        }
    }

    fn file_error(&self, op: &'static str, err: io::Error) -> Error {
        error!(path = %self.file_path.display(), error = %err, "failed to {} log file", op);
        Error::File(err)
    }
}

impl<S: FileSink, C: Clock> Drop for TextLogger<S, C> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        // Best effort; nobody is left to receive the error.
        match self.flush() {
            Ok(()) | Err(Error::InsufficientFileSpace) => {}
            Err(err) => warn!(path = %self.file_path.display(), error = %err, "final flush failed"),
        }
    }
}

impl<S: FileSink, C: Clock> fmt::Debug for TextLogger<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLogger")
            .field("file_path", &self.file_path)
            .field("min_level", &self.min_level)
            .field("buffer_used", &self.scratch.used())
            .field("buffer_capacity", &self.scratch.capacity())
            .field("total_written", &self.ledger.total_written())
            .field("file_budget", &self.ledger.budget())
            .field("marker_emitted", &self.ledger.marker_emitted())
            .finish()
    }
}

/// Result of [`TextLogger::file_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSizeReport {
    /// Length of the file as observed on disk.
    pub on_disk: u64,
    /// Bytes the logger has accounted, including those still buffered.
    pub total_written: u64,
}

impl fmt::Display for FileSizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current file size: {}\nTotal bytes stored: {}",
            self.on_disk, self.total_written
        )
    }
}
