//! Frame decompression.
//!
//! Sequentially parses block headers, validates every declared length
//! against the remaining input and the destination capacity *before*
//! copying, decodes each payload (stored or compressed), verifies the
//! optional XXH32 digest, and appends the raw bytes in block order:
//!
//! ```text
//! Start → ReadHeader → ValidateHeader → DecodePayload → ChecksumVerify
//!       → AppendOutput → (more input? ReadHeader : Done)
//! ```
//!
//! Any validation failure surfaces as a typed error; the destination
//! contents are unspecified after a failure but bytes beyond `dst.len()`
//! are never touched.

use crate::block::decompress_block;
use crate::checksum::block_checksum;
use crate::error::{Error, Result};
use crate::frame::header::{BlockHeader, BlockKind, FrameHeader, FRAME_HEADER_SIZE};

/// Decompress a frame into `dst`, returning the number of raw bytes written.
///
/// The stream is self-describing: no parameters are needed.  Fails with
/// [`Error::Capacity`] when `dst` cannot hold the declared raw bytes (the
/// reported `needed` value is a lower bound callers can re-allocate from),
/// [`Error::MalformedStream`] for structural corruption, and
/// [`Error::Integrity`] when a block checksum does not match.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let frame = FrameHeader::parse(src)?;
    let mut ip = FRAME_HEADER_SIZE;
    let mut written = 0;

    while ip < src.len() {
        // ── ReadHeader / ValidateHeader ─────────────────────────────────────
        let (header, consumed) = BlockHeader::parse(&src[ip..], frame.checksum)?;
        ip += consumed;

        let encoded_len = header.encoded_length as usize;
        let raw_len = header.raw_length as usize;
        if raw_len == 0 {
            return Err(Error::MalformedStream("empty block"));
        }
        if encoded_len > src.len() - ip {
            return Err(Error::MalformedStream("block payload exceeds input"));
        }
        if raw_len > dst.len() - written {
            return Err(Error::Capacity {
                needed: written + raw_len,
                available: dst.len(),
            });
        }

        // ── DecodePayload ───────────────────────────────────────────────────
        let payload = &src[ip..ip + encoded_len];
        let out = &mut dst[written..written + raw_len];
        match header.kind {
            BlockKind::Stored => {
                if encoded_len != raw_len {
                    return Err(Error::MalformedStream("stored block length mismatch"));
                }
                out.copy_from_slice(payload);
            }
            BlockKind::Compressed => decompress_block(payload, out)?,
        }

        // ── ChecksumVerify ──────────────────────────────────────────────────
        if let Some(expected) = header.checksum {
            let actual = block_checksum(out);
            if actual != expected {
                return Err(Error::Integrity { expected, actual });
            }
        }

        // ── AppendOutput ────────────────────────────────────────────────────
        ip += encoded_len;
        written += raw_len;
    }
    Ok(written)
}

/// Decompress into a freshly allocated vector, growing on
/// [`Error::Capacity`].
///
/// The engine assumes no particular expansion ratio; `capacity_hint` merely
/// seeds the first allocation.  Growth doubles (or jumps straight to the
/// reported `needed` lower bound), so the retry count is logarithmic.
pub fn decompress_to_vec(src: &[u8], capacity_hint: usize) -> Result<Vec<u8>> {
    let mut capacity = capacity_hint.max(64);
    loop {
        let mut out = vec![0u8; capacity];
        match decompress(src, &mut out) {
            Ok(n) => {
                out.truncate(n);
                return Ok(out);
            }
            Err(Error::Capacity { needed, .. }) => capacity = needed.max(capacity * 2),
            Err(other) => return Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::compress::compress_to_vec;
    use crate::params::CompressionParams;

    fn sample_frame(checksum: bool) -> (Vec<u8>, Vec<u8>) {
        let src = b"frame decode sample, frame decode sample".repeat(50);
        let params = CompressionParams {
            checksum,
            ..CompressionParams::default()
        };
        let frame = compress_to_vec(&src, &params).unwrap();
        (src, frame)
    }

    #[test]
    fn roundtrip_without_checksum() {
        let (src, frame) = sample_frame(false);
        let mut out = vec![0u8; src.len()];
        assert_eq!(decompress(&frame, &mut out).unwrap(), src.len());
        assert_eq!(out, src);
    }

    #[test]
    fn exact_capacity_suffices() {
        let (src, frame) = sample_frame(true);
        let mut out = vec![0u8; src.len()];
        assert_eq!(decompress(&frame, &mut out).unwrap(), src.len());
    }

    #[test]
    fn one_byte_short_is_capacity_error() {
        let (src, frame) = sample_frame(false);
        let mut out = vec![0u8; src.len() - 1];
        assert!(matches!(
            decompress(&frame, &mut out),
            Err(Error::Capacity { .. })
        ));
    }

    #[test]
    fn capacity_error_reports_usable_lower_bound() {
        let (src, frame) = sample_frame(false);
        let mut out = [0u8; 1];
        match decompress(&frame, &mut out) {
            Err(Error::Capacity { needed, available }) => {
                assert!(needed > 1);
                assert!(needed <= src.len());
                assert_eq!(available, 1);
            }
            other => panic!("expected capacity error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let (_, frame) = sample_frame(false);
        let cut = &frame[..frame.len() - 3];
        let mut out = vec![0u8; 1 << 16];
        assert!(matches!(
            decompress(cut, &mut out),
            Err(Error::MalformedStream(_))
        ));
    }

    #[test]
    fn decompress_to_vec_grows_past_bad_hint() {
        let (src, frame) = sample_frame(false);
        // Hint of 1 forces the capacity-retry path.
        let out = decompress_to_vec(&frame, 1).unwrap();
        assert_eq!(out, src);
    }
}
