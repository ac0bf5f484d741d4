//! Frame compression: validate parameters, write the frame header, then
//! encode each block with the stored-representation fallback.
//!
//! With the `multithread` feature, blocks of a multi-block frame are encoded
//! in parallel and concatenated in input order; output bytes are identical
//! to the sequential path for any destination at least
//! [`compress_bound`](crate::compress_bound) bytes long.

use crate::block::compress_block;
use crate::checksum::block_checksum;
use crate::error::{Error, Result};
use crate::frame::header::{compress_bound, BlockHeader, BlockKind, FrameHeader, FRAME_HEADER_SIZE};
use crate::frame::segment::block_ranges;
use crate::params::{CompressionParams, ValidatedParams};

/// Compress `src` into `dst`, returning the frame length in bytes.
///
/// Never writes past `dst.len()`.  A destination of
/// [`compress_bound`](crate::compress_bound)`(src.len())` bytes always
/// suffices; smaller destinations may fail with [`Error::Capacity`], in
/// which case the destination contents are unspecified.
///
/// An empty `src` produces a bare frame header (a valid empty frame).
pub fn compress(src: &[u8], dst: &mut [u8], params: &CompressionParams) -> Result<usize> {
    let params = params.validate()?;

    if dst.len() < FRAME_HEADER_SIZE {
        return Err(Error::Capacity {
            needed: compress_bound(src.len()),
            available: dst.len(),
        });
    }
    FrameHeader {
        level: params.level(),
        block_size: params.block_size(),
        checksum: params.checksum(),
    }
    .write(dst);
    let mut written = FRAME_HEADER_SIZE;

    #[cfg(feature = "multithread")]
    {
        use rayon::prelude::*;
        let ranges: Vec<_> = block_ranges(src.len(), params.block_size() as usize).collect();
        if ranges.len() > 1 {
            let blocks: Vec<Vec<u8>> = ranges
                .into_par_iter()
                .map(|range| encode_block_owned(&src[range], &params))
                .collect();
            for block in &blocks {
                if block.len() > dst.len() - written {
                    return Err(Error::Capacity {
                        needed: compress_bound(src.len()),
                        available: dst.len(),
                    });
                }
                dst[written..written + block.len()].copy_from_slice(block);
                written += block.len();
            }
            return Ok(written);
        }
    }

    for range in block_ranges(src.len(), params.block_size() as usize) {
        match write_block(&src[range], &mut dst[written..], &params) {
            Ok(n) => written += n,
            Err(Error::Capacity { .. }) => {
                return Err(Error::Capacity {
                    needed: compress_bound(src.len()),
                    available: dst.len(),
                });
            }
            Err(other) => return Err(other),
        }
    }
    Ok(written)
}

/// Compress into a freshly allocated, exactly sized vector.
pub fn compress_to_vec(src: &[u8], params: &CompressionParams) -> Result<Vec<u8>> {
    let mut out = vec![0u8; compress_bound(src.len())];
    let n = compress(src, &mut out, params)?;
    out.truncate(n);
    Ok(out)
}

/// Encode one block (header + payload) into the front of `dst`.
///
/// The compressed form is kept only when it is strictly smaller than the raw
/// block; otherwise the block is stored verbatim.
fn write_block(raw: &[u8], dst: &mut [u8], params: &ValidatedParams) -> Result<usize> {
    let header_len = BlockHeader::size(params.checksum());
    let check = params.checksum().then(|| block_checksum(raw));

    // Compressing is only worthwhile below the stored size.
    let target = raw.len() - 1;
    let available = dst.len().saturating_sub(header_len);
    let limit = available.min(target);

    let attempt = if limit == 0 {
        None
    } else {
        compress_block(raw, &mut dst[header_len..header_len + limit], params.level())
    };

    match attempt {
        Some(encoded) => {
            if encoded > limit {
                return Err(Error::InternalEncoder);
            }
            BlockHeader {
                kind: BlockKind::Compressed,
                encoded_length: encoded as u32,
                raw_length: raw.len() as u32,
                checksum: check,
            }
            .write(&mut dst[..header_len]);
            Ok(header_len + encoded)
        }
        None => {
            let needed = header_len + raw.len();
            if dst.len() < needed {
                return Err(Error::Capacity {
                    needed,
                    available: dst.len(),
                });
            }
            BlockHeader {
                kind: BlockKind::Stored,
                encoded_length: raw.len() as u32,
                raw_length: raw.len() as u32,
                checksum: check,
            }
            .write(&mut dst[..header_len]);
            dst[header_len..needed].copy_from_slice(raw);
            Ok(needed)
        }
    }
}

/// Parallel-path twin of [`write_block`]: encode into an owned buffer sized
/// for the stored fallback, so it never fails.  Produces byte-identical
/// blocks to the sequential path.
#[cfg(feature = "multithread")]
fn encode_block_owned(raw: &[u8], params: &ValidatedParams) -> Vec<u8> {
    let header_len = BlockHeader::size(params.checksum());
    let check = params.checksum().then(|| block_checksum(raw));
    let mut buf = vec![0u8; header_len + raw.len()];
    let target = raw.len() - 1;

    match compress_block(raw, &mut buf[header_len..header_len + target], params.level()) {
        Some(encoded) => {
            BlockHeader {
                kind: BlockKind::Compressed,
                encoded_length: encoded as u32,
                raw_length: raw.len() as u32,
                checksum: check,
            }
            .write(&mut buf[..header_len]);
            buf.truncate(header_len + encoded);
        }
        None => {
            BlockHeader {
                kind: BlockKind::Stored,
                encoded_length: raw.len() as u32,
                raw_length: raw.len() as u32,
                checksum: check,
            }
            .write(&mut buf[..header_len]);
            buf[header_len..].copy_from_slice(raw);
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::decompress::decompress;

    #[test]
    fn empty_input_emits_bare_header() {
        let mut dst = vec![0u8; compress_bound(0)];
        let n = compress(&[], &mut dst, &CompressionParams::default()).unwrap();
        assert_eq!(n, FRAME_HEADER_SIZE);

        let mut out = [0u8; 8];
        assert_eq!(decompress(&dst[..n], &mut out).unwrap(), 0);
    }

    #[test]
    fn incompressible_block_falls_back_to_stored() {
        // Distinct ascending bytes: no 4-byte match anywhere.
        let src: Vec<u8> = (0..=255u8).collect();
        let frame = compress_to_vec(&src, &CompressionParams::default()).unwrap();
        // Frame header + one stored block header + verbatim payload.
        assert_eq!(frame.len(), FRAME_HEADER_SIZE + 9 + src.len());
        assert_eq!(&frame[FRAME_HEADER_SIZE + 9..], &src[..]);
    }

    #[test]
    fn frame_never_exceeds_bound() {
        let inputs: Vec<Vec<u8>> = vec![
            (0..=255u8).cycle().take(100_000).collect(),
            vec![0u8; 70_000],
            b"mixed content mixed content 1234567890".repeat(300),
        ];
        for src in &inputs {
            for level in [1, 5, 9] {
                for checksum in [false, true] {
                    let params = CompressionParams {
                        level,
                        block_size: 4096,
                        checksum,
                    };
                    let frame = compress_to_vec(src, &params).unwrap();
                    assert!(frame.len() <= compress_bound(src.len()));
                }
            }
        }
    }

    #[test]
    fn undersized_destination_is_capacity_error() {
        let src = vec![7u8; 1000];
        let mut dst = vec![0u8; 4];
        assert!(matches!(
            compress(&src, &mut dst, &CompressionParams::default()),
            Err(Error::Capacity { .. })
        ));
    }
}
