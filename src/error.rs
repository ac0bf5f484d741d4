//! Error taxonomy for the zyphrax engine.
//!
//! Every public operation returns a typed error rather than a sentinel value;
//! callers can distinguish a configuration mistake from data corruption.  The
//! C-ABI shims in `abi` collapse all variants to the `0` return the binding
//! contract expects.

use thiserror::Error;

/// Errors returned by zyphrax compression and decompression.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Parameters were rejected before any encoding work started.
    /// Recoverable: supply corrected parameters.
    #[error("invalid parameters: {0}")]
    Config(&'static str),

    /// The destination buffer cannot hold the result.  `needed` is the
    /// smallest capacity known to be required at the point of failure (for
    /// decompression this is a lower bound that grows as blocks are decoded).
    /// Recoverable: re-allocate and retry.
    #[error("destination too small: need at least {needed} bytes, have {available}")]
    Capacity { needed: usize, available: usize },

    /// Decode-time structural inconsistency: the input is corrupted or was
    /// not produced by this engine.  Not retryable with the same input.
    #[error("malformed stream: {0}")]
    MalformedStream(&'static str),

    /// A block checksum did not match the decoded bytes: silent corruption
    /// of an otherwise well-formed stream.
    #[error("checksum mismatch: stored {expected:#010x}, computed {actual:#010x}")]
    Integrity { expected: u32, actual: u32 },

    /// The encoder violated its own output bound.  Unreachable given the
    /// stored-block fallback; reported rather than masked.
    #[error("internal encoder invariant violated")]
    InternalEncoder,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
