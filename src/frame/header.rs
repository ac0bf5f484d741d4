//! Frame and block headers, byte-order helpers, and the compress-bound
//! estimator.
//!
//! # Frame header — 12 bytes, all integers little-endian
//!
//! ```text
//! offset 0   u32  magic        = 0x58594659 ("ZYFX")
//! offset 4   u32  word1        = block_size (bits 0..23) | flags << 24
//! offset 8   u32  header_check = XXH32(bytes 0..8, seed 0)
//! ```
//!
//! Flags byte: bits 0..3 carry the compression level (informational — the
//! decoder never needs it), bit 4 is the per-block checksum flag, bits 5..7
//! are reserved (written as zero, ignored on read).
//!
//! # Block header — 9 bytes, 13 when checksums are enabled
//!
//! ```text
//! u8   kind            0 = stored, 1 = compressed
//! u32  encoded_length  payload bytes that follow this header
//! u32  raw_length      bytes the payload decodes to
//! u32  checksum        XXH32(raw bytes, 0) — only when the frame flag is set
//! ```
//!
//! Stored blocks carry the raw bytes verbatim and must satisfy
//! `encoded_length == raw_length`.

use crate::checksum::block_checksum;
use crate::error::{Error, Result};
use crate::params::MIN_BLOCK_SIZE;

// ── Format constants ──────────────────────────────────────────────────────────

/// Frame magic, "ZYFX" when read as a little-endian u32.
pub const MAGIC: u32 = 0x5859_4659;

/// Size of the frame header in bytes.
pub const FRAME_HEADER_SIZE: usize = 12;

/// Size of a block header without a checksum field.
pub const BLOCK_HEADER_SIZE: usize = 9;

/// Size of the optional per-block checksum field.
pub const BLOCK_CHECKSUM_SIZE: usize = 4;

/// Worst-case per-block header overhead (checksummed header).
pub const BLOCK_HEADER_MAX: usize = BLOCK_HEADER_SIZE + BLOCK_CHECKSUM_SIZE;

const FLAG_LEVEL_MASK: u8 = 0x0F;
const FLAG_CHECKSUM: u8 = 0x10;

// ── Byte-order helpers ────────────────────────────────────────────────────────

/// Read a little-endian `u32` from `src` at byte `offset`.
/// Portable — no alignment or host-endianness assumptions.
#[inline]
pub(crate) fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
    ])
}

/// Write a little-endian `u32` into `dst` at byte `offset`.
#[inline]
pub(crate) fn write_le32(dst: &mut [u8], offset: usize, value: u32) {
    dst[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

// ── Bound estimator ───────────────────────────────────────────────────────────

/// Worst-case compressed size for a `src_size`-byte input, valid for every
/// parameter set that passes validation.
///
/// Pure in `src_size` alone: callers compute it before constructing
/// parameters.  The worst case is incompressible input cut into the smallest
/// blocks the engine will use ([`MIN_BLOCK_SIZE`]), each emitted as a stored
/// block behind a checksummed header.  Nonzero even for `src_size == 0`
/// (an empty input still produces a frame header).
#[inline]
pub fn compress_bound(src_size: usize) -> usize {
    let worst_blocks = src_size / MIN_BLOCK_SIZE as usize + 1;
    FRAME_HEADER_SIZE + src_size + worst_blocks * BLOCK_HEADER_MAX
}

// ── Frame header ──────────────────────────────────────────────────────────────

/// Parsed or to-be-written frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Compression level recorded for diagnostics; ignored on decode.
    pub level: u32,
    /// Block size the frame was cut with; fits the 24-bit header field.
    pub block_size: u32,
    /// Whether every block header carries an XXH32 digest.
    pub checksum: bool,
}

impl FrameHeader {
    /// Serialize into `dst[..FRAME_HEADER_SIZE]`.
    ///
    /// Caller guarantees `dst.len() >= FRAME_HEADER_SIZE` and that
    /// `block_size` is within the 24-bit range (parameter validation clamps).
    pub fn write(&self, dst: &mut [u8]) {
        debug_assert!(self.block_size <= 0xFF_FFFF);
        let flags =
            (self.level as u8 & FLAG_LEVEL_MASK) | if self.checksum { FLAG_CHECKSUM } else { 0 };
        write_le32(dst, 0, MAGIC);
        write_le32(dst, 4, (self.block_size & 0xFF_FFFF) | u32::from(flags) << 24);
        let check = block_checksum(&dst[..8]);
        write_le32(dst, 8, check);
    }

    /// Parse and verify the first [`FRAME_HEADER_SIZE`] bytes of a stream.
    pub fn parse(src: &[u8]) -> Result<FrameHeader> {
        if src.len() < FRAME_HEADER_SIZE {
            return Err(Error::MalformedStream("truncated frame header"));
        }
        if read_le32(src, 0) != MAGIC {
            return Err(Error::MalformedStream("bad magic"));
        }
        let stored = read_le32(src, 8);
        if block_checksum(&src[..8]) != stored {
            return Err(Error::MalformedStream("frame header checksum mismatch"));
        }
        let word1 = read_le32(src, 4);
        let flags = (word1 >> 24) as u8;
        Ok(FrameHeader {
            level: u32::from(flags & FLAG_LEVEL_MASK),
            block_size: word1 & 0xFF_FFFF,
            checksum: flags & FLAG_CHECKSUM != 0,
        })
    }
}

// ── Block header ──────────────────────────────────────────────────────────────

/// How a block's payload is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Raw bytes, verbatim — the fallback when compression would expand.
    Stored,
    /// LZ77 sequence payload.
    Compressed,
}

/// Per-block metadata preceding each payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub kind: BlockKind,
    pub encoded_length: u32,
    pub raw_length: u32,
    /// Present exactly when the frame's checksum flag is set.
    pub checksum: Option<u32>,
}

impl BlockHeader {
    /// Header size in bytes for a frame with or without checksums.
    #[inline]
    pub fn size(checksum: bool) -> usize {
        if checksum {
            BLOCK_HEADER_MAX
        } else {
            BLOCK_HEADER_SIZE
        }
    }

    /// Serialize into the front of `dst`, returning the bytes written.
    ///
    /// Caller guarantees `dst.len() >= Self::size(self.checksum.is_some())`.
    pub fn write(&self, dst: &mut [u8]) -> usize {
        dst[0] = match self.kind {
            BlockKind::Stored => 0,
            BlockKind::Compressed => 1,
        };
        write_le32(dst, 1, self.encoded_length);
        write_le32(dst, 5, self.raw_length);
        match self.checksum {
            Some(check) => {
                write_le32(dst, 9, check);
                BLOCK_HEADER_MAX
            }
            None => BLOCK_HEADER_SIZE,
        }
    }

    /// Parse a block header from the front of `src`, returning the header and
    /// the bytes consumed.  `checksum` is the frame-level presence flag.
    pub fn parse(src: &[u8], checksum: bool) -> Result<(BlockHeader, usize)> {
        let size = Self::size(checksum);
        if src.len() < size {
            return Err(Error::MalformedStream("truncated block header"));
        }
        let kind = match src[0] {
            0 => BlockKind::Stored,
            1 => BlockKind::Compressed,
            _ => return Err(Error::MalformedStream("unknown block kind")),
        };
        let encoded_length = read_le32(src, 1);
        let raw_length = read_le32(src, 5);
        let check = checksum.then(|| read_le32(src, 9));
        Ok((
            BlockHeader {
                kind,
                encoded_length,
                raw_length,
                checksum: check,
            },
            size,
        ))
    }
}
