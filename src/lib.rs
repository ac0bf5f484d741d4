//! zyphrax — block-oriented lossless compression engine.
//!
//! A caller supplies a contiguous byte buffer, tuning parameters, and a
//! destination sized by [`compress_bound`]; the engine fills the destination
//! and reports the bytes written.  The input is cut into independently
//! encoded blocks (64 KiB by default), each compressed with an LZ77
//! match-finding pass and emitted behind a short header; incompressible
//! blocks fall back to a stored representation, so output never expands
//! beyond the bound.  Optional per-block XXH32 checksums detect silent
//! corruption on decode.
//!
//! ```
//! use zyphrax::{compress_bound, CompressionParams};
//!
//! let src = b"Hello Go World";
//! let mut dst = vec![0u8; compress_bound(src.len())];
//! let n = zyphrax::compress(src, &mut dst, &CompressionParams::default()).unwrap();
//!
//! let mut out = vec![0u8; src.len()];
//! let written = zyphrax::decompress(&dst[..n], &mut out).unwrap();
//! assert_eq!(&out[..written], src);
//! ```

pub mod block;
pub mod checksum;
pub mod error;
pub mod frame;
pub mod params;

#[cfg(feature = "c-abi")]
pub mod abi;

// ── Version constants ─────────────────────────────────────────────────────────
pub const ZYPHRAX_VERSION_MAJOR: u32 = 0;
pub const ZYPHRAX_VERSION_MINOR: u32 = 1;
pub const ZYPHRAX_VERSION_RELEASE: u32 = 0;
pub const ZYPHRAX_VERSION_NUMBER: u32 =
    ZYPHRAX_VERSION_MAJOR * 100 * 100 + ZYPHRAX_VERSION_MINOR * 100 + ZYPHRAX_VERSION_RELEASE;
pub const ZYPHRAX_VERSION_STRING: &str = "0.1.0";

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    ZYPHRAX_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    ZYPHRAX_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use error::{Error, Result};
pub use frame::{compress, compress_to_vec, decompress, decompress_to_vec};
pub use frame::header::compress_bound;
pub use params::{
    CompressionParams, DEFAULT_BLOCK_SIZE, DEFAULT_LEVEL, MAX_BLOCK_SIZE, MAX_LEVEL,
    MIN_BLOCK_SIZE, MIN_LEVEL,
};
