//! Block segmentation.
//!
//! Splits an input into fixed-size block ranges that are encoded
//! independently.  The sequence is lazy, finite, and restartable (the
//! returned iterator is `Clone`), covers the input exactly once in order,
//! and never overlaps.  Every range is `block_size` bytes long except
//! possibly the last, which holds the remainder.

use core::ops::Range;

/// Byte ranges of the blocks of an `len`-byte input.
///
/// `block_size` must be nonzero (guaranteed by parameter validation).
/// A zero-length input yields an empty sequence.
pub fn block_ranges(len: usize, block_size: usize) -> impl Iterator<Item = Range<usize>> + Clone {
    debug_assert!(block_size > 0);
    (0..len)
        .step_by(block_size)
        .map(move |start| start..(start + block_size).min(len))
}
