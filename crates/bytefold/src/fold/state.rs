//! Position bookkeeping for a single folded stream.
//!
//! A fold alternates between two modes:
//!
//! - **passthrough**: source bytes are copied and counted;
//! - **emitting delimiter**: delimiter bytes are produced one at a time while
//!   the source count stays put.
//!
//! The switch to emitting happens when the count is a non-zero multiple of the
//! fold length. After the last delimiter byte the state remembers that it just
//! finished, so the very same count does not trigger a second delimiter before
//! another source byte has been read.

use core::num::NonZeroU64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FoldState {
    bytes_consumed: u64,
    delimiter_cursor: usize,
    just_finished_delimiter: bool,
    exhausted: bool,
}

impl FoldState {
    pub(crate) fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// True when the next logical byte comes from the delimiter.
    ///
    /// Once a delimiter has started, this stays true until its last byte has
    /// been emitted.
    pub(crate) fn at_boundary(&self, fold_length: NonZeroU64) -> bool {
        self.bytes_consumed != 0
            && self.bytes_consumed % fold_length == 0
            && !self.just_finished_delimiter
    }

    /// Emit the delimiter byte under the cursor and advance.
    ///
    /// Must only be called while [`Self::at_boundary`] holds.
    pub(crate) fn emit_delimiter(&mut self, delimiter: &[u8]) -> u8 {
        debug_assert!(!delimiter.is_empty());
        let byte = delimiter[self.delimiter_cursor];
        if self.delimiter_cursor + 1 < delimiter.len() {
            self.delimiter_cursor += 1;
        } else {
            self.delimiter_cursor = 0;
            self.just_finished_delimiter = true;
        }
        byte
    }

    /// How many source bytes can be passed through before the next boundary.
    pub(crate) fn passthrough_budget(&self, fold_length: NonZeroU64) -> u64 {
        fold_length.get() - self.bytes_consumed % fold_length
    }

    /// Account for `n` source bytes that were read successfully.
    ///
    /// A zero-length read means the source is exhausted; the flag latches so
    /// later reads stop before touching the source again.
    pub(crate) fn record_source(&mut self, n: usize) {
        self.just_finished_delimiter = false;
        if n == 0 {
            self.exhausted = true;
        } else {
            self.bytes_consumed += n as u64;
        }
    }
}
