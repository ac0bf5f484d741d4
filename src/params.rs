//! Compression parameters and their validation.
//!
//! [`CompressionParams`] is the caller-facing knob set (level, block size,
//! checksum flag).  [`CompressionParams::validate`] normalizes it into an
//! immutable [`ValidatedParams`] that the rest of the engine consumes; no
//! encoding work happens before validation succeeds.

use crate::error::{Error, Result};

// ── Level range ───────────────────────────────────────────────────────────────

/// Lowest supported compression level (fastest).
pub const MIN_LEVEL: u32 = 1;
/// Highest supported compression level (best ratio).
pub const MAX_LEVEL: u32 = 9;
/// Default compression level.
pub const DEFAULT_LEVEL: u32 = 3;

// ── Block size range ──────────────────────────────────────────────────────────

/// Default block size: 64 KiB.
pub const DEFAULT_BLOCK_SIZE: u32 = 64 << 10;

/// Smallest block size the engine will actually use.  Requested sizes below
/// this are clamped up, which keeps [`crate::compress_bound`] a pure function
/// of the input length: the worst-case block count is `len / MIN_BLOCK_SIZE + 1`
/// no matter what the caller later configures.
pub const MIN_BLOCK_SIZE: u32 = 4 << 10;

/// Largest block size: the frame header stores it in a 24-bit field.
pub const MAX_BLOCK_SIZE: u32 = 0xFF_FFFF;

// ── Caller-facing parameters ──────────────────────────────────────────────────

/// Tuning parameters for one compress call.
///
/// Semantically mirrors the C-ABI `zyphrax_params_t` layout (`level`,
/// `block_size`, `checksum`); the `repr(C)` twin with a stable binary layout
/// lives in the `abi` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionParams {
    /// Effort/ratio knob, `MIN_LEVEL..=MAX_LEVEL`.  Affects only output size
    /// and speed, never round-trip fidelity.
    pub level: u32,
    /// Independent-encoding unit size in bytes.  Must be nonzero; clamped
    /// into `[MIN_BLOCK_SIZE, MAX_BLOCK_SIZE]`.
    pub block_size: u32,
    /// Append an XXH32 digest of each block's raw bytes to its header and
    /// verify it on decode.
    pub checksum: bool,
}

impl Default for CompressionParams {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            block_size: DEFAULT_BLOCK_SIZE,
            checksum: false,
        }
    }
}

impl CompressionParams {
    /// Validate and normalize, rejecting out-of-range configuration before
    /// any encoding work begins.  Pure: no side effects.
    pub fn validate(&self) -> Result<ValidatedParams> {
        if self.block_size == 0 {
            return Err(Error::Config("block size must be nonzero"));
        }
        if self.level < MIN_LEVEL || self.level > MAX_LEVEL {
            return Err(Error::Config("compression level out of range"));
        }
        Ok(ValidatedParams {
            level: self.level,
            block_size: self.block_size.clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE),
            checksum: self.checksum,
        })
    }
}

// ── Normalized parameters ─────────────────────────────────────────────────────

/// Parameters that passed validation.  Immutable for the remainder of the
/// call; constructed only via [`CompressionParams::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedParams {
    level: u32,
    block_size: u32,
    checksum: bool,
}

impl ValidatedParams {
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    #[inline]
    pub fn checksum(&self) -> bool {
        self.checksum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let p = CompressionParams::default().validate().unwrap();
        assert_eq!(p.level(), DEFAULT_LEVEL);
        assert_eq!(p.block_size(), DEFAULT_BLOCK_SIZE);
        assert!(!p.checksum());
    }

    #[test]
    fn zero_block_size_rejected() {
        let params = CompressionParams {
            block_size: 0,
            ..CompressionParams::default()
        };
        assert!(matches!(params.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn level_range_enforced() {
        for level in [0, MAX_LEVEL + 1, u32::MAX] {
            let params = CompressionParams {
                level,
                ..CompressionParams::default()
            };
            assert!(matches!(params.validate(), Err(Error::Config(_))));
        }
        for level in MIN_LEVEL..=MAX_LEVEL {
            let params = CompressionParams {
                level,
                ..CompressionParams::default()
            };
            assert_eq!(params.validate().unwrap().level(), level);
        }
    }

    #[test]
    fn block_size_clamped() {
        let small = CompressionParams {
            block_size: 1,
            ..CompressionParams::default()
        };
        assert_eq!(small.validate().unwrap().block_size(), MIN_BLOCK_SIZE);

        let big = CompressionParams {
            block_size: u32::MAX,
            ..CompressionParams::default()
        };
        assert_eq!(big.validate().unwrap().block_size(), MAX_BLOCK_SIZE);
    }
}
