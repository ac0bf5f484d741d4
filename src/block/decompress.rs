//! Block decoder — the security boundary of the engine.
//!
//! Every token, length extension, literal run, offset, and match copy is
//! validated against the remaining input and the declared raw length before
//! any byte moves.  Malformed or truncated payloads return
//! [`Error::MalformedStream`]; they never panic and never write outside
//! `dst`.

use super::{MIN_MATCH, ML_MASK, TOKEN_MAX};
use crate::error::{Error, Result};
use crate::params::MAX_BLOCK_SIZE;

/// Bounded 255-run length-extension reader.
fn read_run(src: &[u8], ip: &mut usize) -> Result<usize> {
    let mut total = 0usize;
    loop {
        let byte = *src
            .get(*ip)
            .ok_or(Error::MalformedStream("truncated length extension"))?;
        *ip += 1;
        total += byte as usize;
        if byte < 255 {
            return Ok(total);
        }
        // No legitimate length exceeds the block-size cap.
        if total > MAX_BLOCK_SIZE as usize {
            return Err(Error::MalformedStream("length extension overflow"));
        }
    }
}

/// Decode one compressed block payload into `dst`, whose length is exactly
/// the raw length the block header declared.
///
/// The caller has already bounds-checked `dst` against the destination
/// capacity; this function enforces the payload's internal consistency.
pub fn decompress_block(src: &[u8], dst: &mut [u8]) -> Result<()> {
    let src_len = src.len();
    let raw_len = dst.len();
    let mut ip = 0;
    let mut op = 0;

    while op < raw_len {
        let token = *src
            .get(ip)
            .ok_or(Error::MalformedStream("truncated sequence"))?;
        ip += 1;

        // ── Literal run ──────────────────────────────────────────────────────
        let mut lit_len = (token >> 4) as usize;
        if lit_len == TOKEN_MAX {
            lit_len += read_run(src, &mut ip)?;
        }
        if lit_len > src_len - ip {
            return Err(Error::MalformedStream("literal run exceeds input"));
        }
        if lit_len > raw_len - op {
            return Err(Error::MalformedStream("literal run exceeds declared raw length"));
        }
        dst[op..op + lit_len].copy_from_slice(&src[ip..ip + lit_len]);
        ip += lit_len;
        op += lit_len;

        // The final sequence carries no match part.
        if op == raw_len {
            break;
        }

        // ── Match ────────────────────────────────────────────────────────────
        if src_len - ip < 2 {
            return Err(Error::MalformedStream("truncated match offset"));
        }
        let offset = src[ip] as usize | (src[ip + 1] as usize) << 8;
        ip += 2;
        if offset == 0 || offset > op {
            return Err(Error::MalformedStream("match offset out of range"));
        }

        let mut match_len = (token & ML_MASK) as usize + MIN_MATCH;
        if (token & ML_MASK) as usize == TOKEN_MAX {
            match_len += read_run(src, &mut ip)?;
        }
        if match_len > raw_len - op {
            return Err(Error::MalformedStream("match exceeds declared raw length"));
        }

        // Byte-wise copy: the match may overlap its own output (offset <
        // length replicates a period).
        let start = op - offset;
        for i in 0..match_len {
            dst[op + i] = dst[start + i];
        }
        op += match_len;
    }

    // All payload bytes must belong to a sequence.
    if ip != src_len {
        return Err(Error::MalformedStream("trailing bytes after final sequence"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hand-assembled payloads; see the format description in `block`.

    #[test]
    fn literal_only_block() {
        // token: 3 literals, no match
        let payload = [0x30, b'a', b'b', b'c'];
        let mut dst = [0u8; 3];
        decompress_block(&payload, &mut dst).unwrap();
        assert_eq!(&dst, b"abc");
    }

    #[test]
    fn overlapping_match_replicates_period() {
        // 2 literals "ab", then a match offset 2 length 6 -> "abababab"
        let payload = [0x22, b'a', b'b', 0x02, 0x00];
        let mut dst = [0u8; 8];
        decompress_block(&payload, &mut dst).unwrap();
        assert_eq!(&dst, b"abababab");
    }

    #[test]
    fn rejects_zero_offset() {
        let payload = [0x22, b'a', b'b', 0x00, 0x00];
        let mut dst = [0u8; 8];
        assert_eq!(
            decompress_block(&payload, &mut dst),
            Err(Error::MalformedStream("match offset out of range"))
        );
    }

    #[test]
    fn rejects_offset_before_block_start() {
        // Only 2 bytes decoded so far, offset 3 reaches before the block.
        let payload = [0x22, b'a', b'b', 0x03, 0x00];
        let mut dst = [0u8; 8];
        assert_eq!(
            decompress_block(&payload, &mut dst),
            Err(Error::MalformedStream("match offset out of range"))
        );
    }

    #[test]
    fn rejects_truncated_literal_run() {
        // Token promises 5 literals, only 2 present.
        let payload = [0x50, b'a', b'b'];
        let mut dst = [0u8; 5];
        assert_eq!(
            decompress_block(&payload, &mut dst),
            Err(Error::MalformedStream("literal run exceeds input"))
        );
    }

    #[test]
    fn rejects_literals_beyond_declared_length() {
        // 4 literals into a block declared as 2 raw bytes.
        let payload = [0x40, b'a', b'b', b'c', b'd'];
        let mut dst = [0u8; 2];
        assert_eq!(
            decompress_block(&payload, &mut dst),
            Err(Error::MalformedStream("literal run exceeds declared raw length"))
        );
    }

    #[test]
    fn rejects_match_beyond_declared_length() {
        // Match of length 6 into a block declared as 4 raw bytes.
        let payload = [0x22, b'a', b'b', 0x02, 0x00];
        let mut dst = [0u8; 4];
        assert_eq!(
            decompress_block(&payload, &mut dst),
            Err(Error::MalformedStream("match exceeds declared raw length"))
        );
    }

    #[test]
    fn rejects_truncated_offset() {
        let payload = [0x20, b'a', b'b', 0x02];
        let mut dst = [0u8; 8];
        assert_eq!(
            decompress_block(&payload, &mut dst),
            Err(Error::MalformedStream("truncated match offset"))
        );
    }

    #[test]
    fn rejects_trailing_garbage() {
        // Complete 3-literal block followed by a stray byte.
        let payload = [0x30, b'a', b'b', b'c', 0xEE];
        let mut dst = [0u8; 3];
        assert_eq!(
            decompress_block(&payload, &mut dst),
            Err(Error::MalformedStream("trailing bytes after final sequence"))
        );
    }

    #[test]
    fn rejects_empty_payload_for_nonempty_block() {
        let mut dst = [0u8; 4];
        assert_eq!(
            decompress_block(&[], &mut dst),
            Err(Error::MalformedStream("truncated sequence"))
        );
    }

    #[test]
    fn rejects_runaway_length_extension() {
        // Literal nibble 15 followed by an endless 255 run.
        let mut payload = vec![0xF0];
        payload.extend(std::iter::repeat(0xFF).take(70_000));
        let mut dst = [0u8; 16];
        assert_eq!(
            decompress_block(&payload, &mut dst),
            Err(Error::MalformedStream("length extension overflow"))
        );
    }
}
