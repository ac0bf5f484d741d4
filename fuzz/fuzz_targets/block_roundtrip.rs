#![no_main]
use libfuzzer_sys::fuzz_target;

use zyphrax::block::{compress_block, decompress_block};

fuzz_target!(|data: &[u8]| {
    let (knobs, payload) = match data.split_first() {
        Some((knobs, payload)) => (*knobs, payload),
        None => return,
    };
    if payload.is_empty() {
        return;
    }
    let level = u32::from(knobs % 9) + 1;

    // Ample scratch: with room to spare the encoder must always fit, even on
    // incompressible input (one all-literal sequence plus extension bytes).
    let mut encoded = vec![0u8; payload.len() * 2 + 64];
    let n = match compress_block(payload, &mut encoded, level) {
        Some(n) => n,
        None => panic!(
            "block round-trip: {} bytes did not fit {} bytes of scratch at level {level}",
            payload.len(),
            payload.len() * 2 + 64
        ),
    };

    // Decompress back into a buffer of the exact original length.
    let mut recovered = vec![0u8; payload.len()];
    decompress_block(&encoded[..n], &mut recovered)
        .expect("block round-trip: decoding self-compressed payload failed");

    assert_eq!(
        recovered,
        payload,
        "block round-trip mismatch at level {level}: {} bytes in, {} encoded",
        payload.len(),
        n
    );
});
