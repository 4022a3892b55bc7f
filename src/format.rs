use std::io::Write;

use crate::clock::LocalTime;
use crate::level::Severity;

/// Extra bytes a record line carries on top of its payload: the five byte
/// severity tag plus the trailing newline.
pub const LINE_OVERHEAD: usize = 6;

/// Upper bound of a rendered timestamp for any `i32` year.
const STAMP_CAP: usize = 48;

/// A timestamp prefix rendered on the stack.
///
/// Rendering is length-limited: if the output would not fit, whatever fit is
/// kept and `len` reports exactly that much.
#[derive(Clone, Copy)]
pub struct TimestampLine {
    bytes: [u8; STAMP_CAP],
    len: usize,
}

impl TimestampLine {
    pub fn render(time: &LocalTime) -> Self {
        let mut bytes = [0u8; STAMP_CAP];
        let len = {
            let mut cursor: &mut [u8] = &mut bytes;
            // A full cursor only truncates; the bytes that fit are kept.
            let _ = write!(cursor, "{}", time);
            STAMP_CAP - cursor.len()
        };
        Self { bytes, len }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Pieces of one tagged record line: `tag || payload || '\n'`.
pub struct RecordLine<'a> {
    severity: Severity,
    payload: &'a [u8],
}

impl<'a> RecordLine<'a> {
    pub fn new(severity: Severity, payload: &'a [u8]) -> Self {
        Self { severity, payload }
    }

    /// Length bound used for the flush decision.
    #[inline]
    pub fn len_bound(&self) -> usize {
        self.payload.len().saturating_add(LINE_OVERHEAD)
    }

    pub fn parts(&self) -> [&'a [u8]; 3] {
        [self.severity.tag().as_slice(), self.payload, b"\n".as_slice()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TIMESTAMP_LEN;

    #[test]
    fn test_timestamp_layout() {
        let line = TimestampLine::render(&LocalTime::new(2024, 3, 7, 9, 5, 1));
        assert_eq!(line.as_bytes(), b"[2024-03-07 | 09:05:01] ");
        assert_eq!(line.len(), TIMESTAMP_LEN);
    }

    #[test]
    fn test_timestamp_bounds_are_fixed_width() {
        let first = TimestampLine::render(&LocalTime::new(1000, 1, 1, 0, 0, 0));
        let last = TimestampLine::render(&LocalTime::new(9999, 12, 31, 23, 59, 59));
        assert_eq!(first.as_bytes(), b"[1000-01-01 | 00:00:00] ");
        assert_eq!(last.as_bytes(), b"[9999-12-31 | 23:59:59] ");
    }

    #[test]
    fn test_extreme_year_still_fits() {
        let line = TimestampLine::render(&LocalTime::new(i32::MIN, 12, 31, 23, 59, 59));
        assert!(line.len() > TIMESTAMP_LEN);
        assert!(line.as_bytes().ends_with(b"] "));
    }

    #[test]
    fn test_record_line_parts() {
        let record = RecordLine::new(Severity::Warn, b"disk low");
        assert_eq!(record.len_bound(), 8 + LINE_OVERHEAD);
        let joined: Vec<u8> = record.parts().concat();
        assert_eq!(joined, b"[W]: disk low\n");
        assert_eq!(joined.len(), record.len_bound());
    }
}
