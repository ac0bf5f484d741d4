//! E2E Suite 02: error taxonomy and corruption detection.
//!
//! Exercises every public error variant from the outside: configuration
//! rejection, capacity reporting, structural stream corruption, and
//! checksum-detected payload corruption.

use rand::{RngCore, SeedableRng};

use zyphrax::frame::header::{BlockHeader, BlockKind, FrameHeader, FRAME_HEADER_SIZE};
use zyphrax::{
    compress, compress_bound, compress_to_vec, decompress, decompress_to_vec, CompressionParams,
    Error,
};

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

/// Frame header followed by hand-built blocks, for crafting malformed
/// streams the encoder would never produce.
fn craft_frame(checksum: bool, blocks: &[(BlockHeader, &[u8])]) -> Vec<u8> {
    let mut frame = vec![0u8; FRAME_HEADER_SIZE];
    FrameHeader {
        level: 3,
        block_size: 65_536,
        checksum,
    }
    .write(&mut frame);
    for (header, payload) in blocks {
        let mut buf = [0u8; 13];
        let n = header.write(&mut buf);
        frame.extend_from_slice(&buf[..n]);
        frame.extend_from_slice(payload);
    }
    frame
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn out_of_range_level_is_config_error() {
    let mut dst = vec![0u8; compress_bound(4)];
    for level in [0, 10, 255] {
        let params = CompressionParams {
            level,
            ..CompressionParams::default()
        };
        assert!(
            matches!(compress(b"data", &mut dst, &params), Err(Error::Config(_))),
            "level {level} accepted"
        );
    }
}

#[test]
fn zero_block_size_is_config_error() {
    let params = CompressionParams {
        block_size: 0,
        ..CompressionParams::default()
    };
    let mut dst = vec![0u8; compress_bound(4)];
    assert!(matches!(
        compress(b"data", &mut dst, &params),
        Err(Error::Config(_))
    ));
}

/// Validation happens before any output is produced.
#[test]
fn config_error_writes_nothing() {
    let params = CompressionParams {
        level: 0,
        ..CompressionParams::default()
    };
    let mut dst = vec![0xAB; 64];
    let _ = compress(b"data", &mut dst, &params);
    assert!(dst.iter().all(|&b| b == 0xAB));
}

// ─────────────────────────────────────────────────────────────────────────────
// Capacity errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn undersized_compress_destination_reports_needed() {
    let src = random_bytes(10_000, 1);
    let mut dst = vec![0u8; 16];
    match compress(&src, &mut dst, &CompressionParams::default()) {
        Err(Error::Capacity { needed, available }) => {
            assert_eq!(needed, compress_bound(src.len()));
            assert_eq!(available, 16);
        }
        other => panic!("expected capacity error, got {other:?}"),
    }
}

#[test]
fn undersized_decompress_destination_reports_lower_bound() {
    let src = random_bytes(10_000, 2);
    let frame = compress_to_vec(&src, &CompressionParams::default()).unwrap();
    let mut out = vec![0u8; 100];
    match decompress(&frame, &mut out) {
        Err(Error::Capacity { needed, available }) => {
            assert!(needed > 100);
            assert!(needed <= src.len());
            assert_eq!(available, 100);
        }
        other => panic!("expected capacity error, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Structural corruption
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_and_short_inputs_are_malformed() {
    let mut out = [0u8; 16];
    for len in 0..FRAME_HEADER_SIZE {
        assert_eq!(
            decompress(&vec![0u8; len], &mut out),
            Err(Error::MalformedStream("truncated frame header"))
        );
    }
}

#[test]
fn wrong_magic_is_rejected() {
    let src = b"compressible compressible compressible";
    let mut frame = compress_to_vec(src, &CompressionParams::default()).unwrap();
    frame[0] ^= 0x01;
    let mut out = [0u8; 64];
    assert_eq!(
        decompress(&frame, &mut out),
        Err(Error::MalformedStream("bad magic"))
    );
}

#[test]
fn corrupted_frame_flags_trip_header_checksum() {
    let src = b"compressible compressible compressible";
    let mut frame = compress_to_vec(src, &CompressionParams::default()).unwrap();
    frame[7] ^= 0x10; // flags byte, covered by the header digest
    let mut out = [0u8; 64];
    assert_eq!(
        decompress(&frame, &mut out),
        Err(Error::MalformedStream("frame header checksum mismatch"))
    );
}

#[test]
fn truncated_block_payload_is_malformed() {
    let src = random_bytes(5000, 3);
    let frame = compress_to_vec(&src, &CompressionParams::default()).unwrap();
    let mut out = vec![0u8; src.len()];
    for cut in [frame.len() - 1, frame.len() - 100, FRAME_HEADER_SIZE + 5] {
        assert!(
            matches!(
                decompress(&frame[..cut], &mut out),
                Err(Error::MalformedStream(_))
            ),
            "truncation at {cut} not detected"
        );
    }
}

#[test]
fn trailing_garbage_after_last_block_is_malformed() {
    let src = b"some payload that round-trips fine on its own";
    let mut frame = compress_to_vec(src, &CompressionParams::default()).unwrap();
    frame.extend_from_slice(&[0xEE; 9]);
    let mut out = [0u8; 128];
    assert_eq!(
        decompress(&frame, &mut out),
        Err(Error::MalformedStream("unknown block kind"))
    );
}

#[test]
fn stored_block_length_mismatch_is_malformed() {
    let header = BlockHeader {
        kind: BlockKind::Stored,
        encoded_length: 5,
        raw_length: 7,
        checksum: None,
    };
    let frame = craft_frame(false, &[(header, b"hello")]);
    let mut out = [0u8; 32];
    assert_eq!(
        decompress(&frame, &mut out),
        Err(Error::MalformedStream("stored block length mismatch"))
    );
}

#[test]
fn zero_length_block_is_malformed() {
    let header = BlockHeader {
        kind: BlockKind::Stored,
        encoded_length: 0,
        raw_length: 0,
        checksum: None,
    };
    let frame = craft_frame(false, &[(header, b"")]);
    let mut out = [0u8; 32];
    assert_eq!(
        decompress(&frame, &mut out),
        Err(Error::MalformedStream("empty block"))
    );
}

#[test]
fn block_payload_longer_than_input_is_malformed() {
    let header = BlockHeader {
        kind: BlockKind::Stored,
        encoded_length: 1000,
        raw_length: 1000,
        checksum: None,
    };
    let frame = craft_frame(false, &[(header, b"short")]);
    let mut out = [0u8; 2048];
    assert_eq!(
        decompress(&frame, &mut out),
        Err(Error::MalformedStream("block payload exceeds input"))
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Checksum-detected corruption
// ─────────────────────────────────────────────────────────────────────────────

fn checksummed_frame(src: &[u8]) -> Vec<u8> {
    let params = CompressionParams {
        checksum: true,
        ..CompressionParams::default()
    };
    compress_to_vec(src, &params).unwrap()
}

/// Random input lands in a stored block, so a payload flip changes the
/// decoded bytes deterministically and the digest must catch it.
#[test]
fn stored_payload_flip_is_integrity_error() {
    let src = random_bytes(1000, 4);
    let mut frame = checksummed_frame(&src);
    // First payload byte: frame header, then a 13-byte checksummed block header.
    frame[FRAME_HEADER_SIZE + 13] ^= 0x80;
    let mut out = vec![0u8; src.len()];
    assert!(matches!(
        decompress(&frame, &mut out),
        Err(Error::Integrity { .. })
    ));
}

#[test]
fn stored_digest_flip_is_integrity_error() {
    let src = random_bytes(1000, 5);
    let mut frame = checksummed_frame(&src);
    // Digest field sits at bytes 9..13 of the block header.
    frame[FRAME_HEADER_SIZE + 9] ^= 0x01;
    let mut out = vec![0u8; src.len()];
    match decompress(&frame, &mut out) {
        Err(Error::Integrity { expected, actual }) => assert_ne!(expected, actual),
        other => panic!("expected integrity error, got {other:?}"),
    }
}

/// Every single-bit flip anywhere in a checksummed frame either fails
/// with a typed error or still decodes to the exact original. Silent
/// corruption is never acceptable.
#[test]
fn no_single_bit_flip_corrupts_silently() {
    let src: Vec<u8> = b"abcdefgh abcdefgh abcdefgh 0123456789 end"
        .iter()
        .copied()
        .cycle()
        .take(500)
        .collect();
    let frame = checksummed_frame(&src);
    let mut out = vec![0u8; src.len() + 64];

    for byte in 0..frame.len() {
        for bit in 0..8 {
            let mut flipped = frame.clone();
            flipped[byte] ^= 1 << bit;
            match decompress(&flipped, &mut out) {
                Ok(n) => assert_eq!(
                    &out[..n],
                    &src[..],
                    "silent corruption at byte {byte} bit {bit}"
                ),
                Err(_) => {}
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn errors_render_actionable_messages() {
    let err = compress_to_vec(
        b"x",
        &CompressionParams {
            level: 42,
            ..CompressionParams::default()
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("invalid parameters"));

    let err = decompress_to_vec(&[0u8; 3], 64).unwrap_err();
    assert!(err.to_string().contains("malformed stream"));
}
