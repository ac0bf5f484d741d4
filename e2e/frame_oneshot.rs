//! E2E Suite 01: one-shot frame API.
//!
//! Validates the whole-buffer contract: round-trip fidelity, bound
//! soundness, determinism, stored-block behaviour on incompressible input,
//! and the empty-input edge case.

use rand::{RngCore, SeedableRng};

use zyphrax::frame::FRAME_HEADER_SIZE;
use zyphrax::{
    compress, compress_bound, compress_to_vec, decompress, decompress_to_vec, CompressionParams,
};

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

fn mixed_text(len: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, 0123456789. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference scenarios
// ─────────────────────────────────────────────────────────────────────────────

/// 14-byte input, default params: compress returns a byte count and the
/// output round-trips exactly through a capacity-14 destination.
#[test]
fn hello_go_world_scenario() {
    let src = b"Hello Go World";
    assert_eq!(src.len(), 14);

    let mut frame = vec![0u8; compress_bound(src.len())];
    let n = compress(src, &mut frame, &CompressionParams::default()).unwrap();
    assert!(n > 0);

    let mut out = vec![0u8; 14];
    let written = decompress(&frame[..n], &mut out).unwrap();
    assert_eq!(written, 14);
    assert_eq!(&out, src);
}

/// 100 000 repeated 'A's collapse dramatically and round-trip exactly.
#[test]
fn highly_redundant_input_scenario() {
    let src = vec![b'A'; 100_000];
    let frame = compress_to_vec(&src, &CompressionParams::default()).unwrap();
    assert!(
        frame.len() < src.len() / 20,
        "expected dramatic shrink, got {} bytes",
        frame.len()
    );

    let out = decompress_to_vec(&frame, src.len()).unwrap();
    assert_eq!(out, src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip across the parameter space
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn roundtrip_all_levels_and_block_sizes() {
    let src = mixed_text(150_000);
    for level in 1..=9 {
        for block_size in [1, 4096, 65_536, 1 << 20] {
            for checksum in [false, true] {
                let params = CompressionParams {
                    level,
                    block_size,
                    checksum,
                };
                let frame = compress_to_vec(&src, &params).unwrap();
                let out = decompress_to_vec(&frame, src.len()).unwrap();
                assert_eq!(
                    out, src,
                    "round-trip failed: level={level} block_size={block_size} checksum={checksum}"
                );
            }
        }
    }
}

#[test]
fn roundtrip_random_data() {
    for &len in &[1usize, 13, 4096, 65_537, 200_000] {
        let src = random_bytes(len, len as u64);
        let frame = compress_to_vec(&src, &CompressionParams::default()).unwrap();
        let out = decompress_to_vec(&frame, len).unwrap();
        assert_eq!(out, src, "random round-trip failed at len {len}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bound soundness and expansion cap
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn output_never_exceeds_bound() {
    for &len in &[0usize, 1, 100, 4095, 4096, 4097, 70_000, 300_000] {
        let src = random_bytes(len, 42 + len as u64);
        for level in [1, 3, 9] {
            for checksum in [false, true] {
                let params = CompressionParams {
                    level,
                    block_size: 4096,
                    checksum,
                };
                let frame = compress_to_vec(&src, &params).unwrap();
                assert!(
                    frame.len() <= compress_bound(len),
                    "bound violated: len={len} level={level} checksum={checksum}"
                );
            }
        }
    }
}

/// Incompressible input expands by at most the fixed per-block framing.
#[test]
fn incompressible_expansion_is_bounded_by_framing() {
    let src = random_bytes(200_000, 7);
    let frame = compress_to_vec(&src, &CompressionParams::default()).unwrap();
    let blocks = src.len().div_ceil(65_536);
    // Frame header + a 9-byte header per stored block.
    assert!(frame.len() <= FRAME_HEADER_SIZE + src.len() + blocks * 9);
}

// ─────────────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn identical_input_and_params_give_identical_output() {
    let src = mixed_text(80_000);
    for level in [1, 5, 9] {
        let params = CompressionParams {
            level,
            block_size: 8192,
            checksum: true,
        };
        let first = compress_to_vec(&src, &params).unwrap();
        let second = compress_to_vec(&src, &params).unwrap();
        assert_eq!(first, second, "nondeterministic output at level {level}");
    }
}

/// Blocks are self-contained, so a multi-block frame must be byte-identical
/// to the frame header followed by each chunk's standalone encoding in input
/// order.  Each chunk fits a single block, which always encodes on the
/// sequential path; with `--features multithread` this pins the parallel
/// path's output to it.
#[test]
fn multi_block_frame_matches_per_block_encoding() {
    let src = mixed_text(300_000);
    let params = CompressionParams {
        level: 5,
        block_size: 4096,
        checksum: true,
    };
    let combined = compress_to_vec(&src, &params).unwrap();

    let mut expected = combined[..FRAME_HEADER_SIZE].to_vec();
    for chunk in src.chunks(4096) {
        let single = compress_to_vec(chunk, &params).unwrap();
        expected.extend_from_slice(&single[FRAME_HEADER_SIZE..]);
    }
    assert_eq!(combined, expected);

    let out = decompress_to_vec(&combined, src.len()).unwrap();
    assert_eq!(out, src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Edges
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_roundtrips_through_bare_frame() {
    let frame = compress_to_vec(&[], &CompressionParams::default()).unwrap();
    assert_eq!(frame.len(), FRAME_HEADER_SIZE);
    assert!(frame.len() <= compress_bound(0));

    let mut out = [0u8; 4];
    assert_eq!(decompress(&frame, &mut out).unwrap(), 0);
}

/// A destination of exactly compress_bound bytes is always enough.
#[test]
fn exact_bound_destination_always_suffices() {
    for &len in &[1usize, 4096, 100_000] {
        let src = random_bytes(len, 999 + len as u64);
        let mut dst = vec![0u8; compress_bound(len)];
        let params = CompressionParams {
            level: 9,
            block_size: 1, // clamped up to the engine minimum
            checksum: true,
        };
        let n = compress(&src, &mut dst, &params).unwrap();
        assert!(n <= dst.len());

        let out = decompress_to_vec(&dst[..n], len).unwrap();
        assert_eq!(out, src);
    }
}

/// Decompressing into a destination larger than needed reports the true
/// decoded size, not the capacity.
#[test]
fn oversized_destination_reports_true_size() {
    let src = mixed_text(10_000);
    let frame = compress_to_vec(&src, &CompressionParams::default()).unwrap();
    let mut out = vec![0u8; src.len() * 3];
    let written = decompress(&frame, &mut out).unwrap();
    assert_eq!(written, src.len());
    assert_eq!(&out[..written], &src[..]);
}
