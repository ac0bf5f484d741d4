//! Per-block codec: LZ77 match finding and the byte-aligned sequence format.
//!
//! A compressed block payload is a series of *sequences*:
//!
//! ```text
//! token       u8      literal length (high nibble) | match nibble (low nibble)
//! [lit ext]   u8...   when the literal nibble is 15: 255-run extension bytes
//! literals    u8 × L
//! offset      u16 LE  back-reference distance, 1..=65535
//! [match ext] u8...   when the match nibble is 15: 255-run extension bytes
//! ```
//!
//! The match length is `match_nibble + MIN_MATCH`.  A block's final sequence
//! may stop after its literal run — the decoder knows the block is complete
//! because the block header declares the raw length.  Blocks are
//! self-contained: offsets never reach before the block start, so any block
//! decodes without state from its neighbours.

pub mod compress;
pub mod decompress;

pub use compress::compress_block;
pub use decompress::decompress_block;

/// Shortest match worth encoding (offset + token cost 3 bytes).
pub const MIN_MATCH: usize = 4;

/// Largest back-reference distance the u16 offset field can carry.
pub const MAX_DISTANCE: usize = 65_535;

/// Largest value a token nibble holds; larger lengths continue in 255-run
/// extension bytes.
pub(crate) const TOKEN_MAX: usize = 15;

/// Mask for the match nibble of a token.
pub(crate) const ML_MASK: u8 = 0x0F;
