/// Fixed-capacity byte region holding records that have not been flushed.
///
/// The region is allocated once at its full capacity and never grows. Appends
/// are length-limited: a write that does not fit is truncated to the space
/// left, and the caller is told how many bytes actually landed.
pub struct ScratchBuffer {
    bytes: Box<[u8]>,
    used: usize,
}

impl ScratchBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity].into_boxed_slice(),
            used: 0,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.used
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Bytes waiting to be flushed.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.bytes[..self.used]
    }

    /// Copies `parts` back to back into the free space and returns the number
    /// of bytes written. Stops at capacity.
    pub fn append(&mut self, parts: &[&[u8]]) -> usize {
        let start = self.used;
        for part in parts {
            let take = part.len().min(self.remaining());
            if take == 0 {
                if part.is_empty() {
                    continue;
                }
                break;
            }
            self.bytes[self.used..self.used + take].copy_from_slice(&part[..take]);
            self.used += take;
        }
        self.used - start
    }

    /// Like [`append`](Self::append), but keeps the last free byte for a
    /// closing `'\n'` so a cut-short line still ends the record.
    pub fn append_line(&mut self, parts: &[&[u8]]) -> usize {
        if self.remaining() == 0 {
            return 0;
        }
        let start = self.used;
        let limit = self.capacity() - 1;
        for part in parts {
            let take = part.len().min(limit - self.used);
            self.bytes[self.used..self.used + take].copy_from_slice(&part[..take]);
            self.used += take;
        }
        self.bytes[self.used] = b'\n';
        self.used += 1;
        self.used - start
    }

    /// Drops pending bytes past `len`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.used = self.used.min(len);
    }

    /// Marks every pending byte as consumed.
    #[inline]
    pub fn clear(&mut self) {
        self.used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_tracks_usage() {
        let mut buf = ScratchBuffer::with_capacity(16);
        assert!(buf.is_empty());
        assert_eq!(buf.append(&[b"abc".as_slice(), b"de".as_slice()]), 5);
        assert_eq!(buf.used(), 5);
        assert_eq!(buf.remaining(), 11);
        assert_eq!(buf.pending(), b"abcde");
    }

    #[test]
    fn test_append_truncates_at_capacity() {
        let mut buf = ScratchBuffer::with_capacity(8);
        assert_eq!(buf.append(&[b"[I]: ".as_slice(), b"overflowing".as_slice(), b"\n".as_slice()]), 8);
        assert_eq!(buf.pending(), b"[I]: ove");
        assert_eq!(buf.remaining(), 0);
        assert_eq!(buf.append(&[b"more".as_slice()]), 0);
        assert_eq!(buf.used(), buf.capacity());
    }

    #[test]
    fn test_empty_parts_are_skipped() {
        let mut buf = ScratchBuffer::with_capacity(4);
        assert_eq!(buf.append(&[b"".as_slice(), b"ab".as_slice(), b"".as_slice(), b"c".as_slice()]), 3);
        assert_eq!(buf.pending(), b"abc");
    }

    #[test]
    fn test_append_line_keeps_newline_when_cut() {
        let mut buf = ScratchBuffer::with_capacity(8);
        assert_eq!(buf.append_line(&[b"[I]: ".as_slice(), b"overflowing".as_slice()]), 8);
        assert_eq!(buf.pending(), b"[I]: ov\n");
        assert_eq!(buf.append_line(&[b"more".as_slice()]), 0);

        let mut roomy = ScratchBuffer::with_capacity(16);
        assert_eq!(roomy.append_line(&[b"ab".as_slice(), b"cd".as_slice()]), 5);
        assert_eq!(roomy.pending(), b"abcd\n");
    }

    #[test]
    fn test_truncate_drops_the_tail() {
        let mut buf = ScratchBuffer::with_capacity(8);
        buf.append(&[b"abcdef".as_slice()]);
        buf.truncate(2);
        assert_eq!(buf.pending(), b"ab");
        buf.truncate(5);
        assert_eq!(buf.pending(), b"ab");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut buf = ScratchBuffer::with_capacity(4);
        buf.append(&[b"abcd".as_slice()]);
        buf.clear();
        assert_eq!(buf.used(), 0);
        assert_eq!(buf.remaining(), 4);
        assert!(buf.pending().is_empty());
    }
}
