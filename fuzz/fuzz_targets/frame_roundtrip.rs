#![no_main]
use libfuzzer_sys::fuzz_target;

use zyphrax::{compress_to_vec, decompress_to_vec, CompressionParams, DEFAULT_BLOCK_SIZE};

fuzz_target!(|data: &[u8]| {
    // First byte steers the parameters so the fuzzer explores every level,
    // both block-size regimes, and both checksum settings.
    let (knobs, payload) = match data.split_first() {
        Some((knobs, payload)) => (*knobs, payload),
        None => return,
    };
    let params = CompressionParams {
        level: u32::from(knobs % 9) + 1,
        block_size: if knobs & 0x40 != 0 { 4096 } else { DEFAULT_BLOCK_SIZE },
        checksum: knobs & 0x80 != 0,
    };

    // Valid parameters and a bound-sized destination: any Err here is a bug.
    let compressed = match compress_to_vec(payload, &params) {
        Ok(frame) => frame,
        Err(err) => panic!(
            "frame round-trip: compression failed for {} bytes: {err}",
            payload.len()
        ),
    };

    // An Err here means our own compressed output is unreadable — that is a bug.
    let recovered = match decompress_to_vec(&compressed, payload.len()) {
        Ok(bytes) => bytes,
        Err(err) => panic!(
            "frame round-trip: decompression of self-compressed data failed \
             (input {} bytes, compressed {} bytes): {err}",
            payload.len(),
            compressed.len()
        ),
    };

    assert_eq!(
        recovered,
        payload,
        "frame round-trip mismatch: {} bytes in, {} bytes back",
        payload.len(),
        recovered.len()
    );
});
