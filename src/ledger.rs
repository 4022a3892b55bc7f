use crate::error::{Error, Result};

/// Accounting of bytes against the file budget.
///
/// The effective budget is the caller's raw budget minus the space reserved
/// for the end-marker (its length plus one). Every record byte placed in the
/// scratch buffer is counted in `total_written` at the moment it is buffered,
/// so the ledger can tell a flush is going to run out of room before any file
/// I/O happens.
#[derive(Debug, Clone)]
pub struct Ledger {
    budget: usize,
    total_written: usize,
    marker_emitted: bool,
}

impl Ledger {
    /// Reserves `marker_len + 1` bytes of `raw_budget` for the end-marker.
    ///
    /// Fails when nothing would be left for records.
    pub fn new(raw_budget: usize, marker_len: usize) -> Result<Self> {
        let reserved = marker_len.saturating_add(1);
        match raw_budget.checked_sub(reserved) {
            Some(budget) if budget > 0 => Ok(Self {
                budget,
                total_written: 0,
                marker_emitted: false,
            }),
            _ => Err(Error::InvalidInput(
                "file budget cannot hold the end-marker plus one byte",
            )),
        }
    }

    /// The effective budget all accounting is measured against.
    #[inline(always)]
    pub fn budget(&self) -> usize {
        self.budget
    }

    #[inline(always)]
    pub fn total_written(&self) -> usize {
        self.total_written
    }

    #[inline(always)]
    pub fn marker_emitted(&self) -> bool {
        self.marker_emitted
    }

    /// Budget not yet claimed; zero once the budget is met or passed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.total_written)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.total_written >= self.budget
    }

    /// Accounting has passed the budget; those bytes can never be written.
    #[inline]
    pub fn is_overrun(&self) -> bool {
        self.total_written > self.budget
    }

    /// True if the next `len_next` bytes would meet or pass the budget.
    #[inline]
    pub fn would_reach(&self, len_next: usize) -> bool {
        self.remaining() <= len_next
    }

    /// True if appending `pending` bytes to a file already `on_disk` bytes
    /// long would pass the budget.
    pub fn would_overshoot(&self, on_disk: u64, pending: usize) -> bool {
        on_disk.saturating_add(pending as u64) > self.budget as u64
    }

    #[inline]
    pub fn record(&mut self, bytes: usize) {
        self.total_written = self.total_written.saturating_add(bytes);
    }

    /// Restores an earlier `total_written`, undoing bytes recorded since.
    #[inline]
    pub fn rewind(&mut self, total_written: usize) {
        self.total_written = self.total_written.min(total_written);
    }

    /// Latches the end-marker flag. It never resets.
    #[inline]
    pub fn latch_marker(&mut self) {
        self.marker_emitted = true;
    }
}
