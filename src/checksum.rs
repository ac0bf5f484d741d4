//! Block integrity digest — thin wrapper around the `xxhash-rust` XXH32
//! implementation.
//!
//! XXH32 is fast, deterministic, and order-sensitive; it detects corruption
//! but is not cryptographic.  The same digest is computed on encode (over a
//! block's raw bytes, stored in the block header) and on decode (over the
//! reconstructed bytes, compared against the stored value).

/// One-shot XXH32 with seed 0, the only configuration the frame format uses.
///
/// Parity vector: `block_checksum(b"") == 0x02CC_5D05`.
#[inline]
pub fn block_checksum(data: &[u8]) -> u32 {
    xxhash_rust::xxh32::xxh32(data, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_parity_vector() {
        assert_eq!(block_checksum(b""), 0x02CC_5D05);
    }

    #[test]
    fn deterministic() {
        let data = b"zyphrax block payload";
        assert_eq!(block_checksum(data), block_checksum(data));
    }

    #[test]
    fn order_sensitive() {
        assert_ne!(block_checksum(b"ab"), block_checksum(b"ba"));
    }

    #[test]
    fn single_byte_sensitivity() {
        let mut data = vec![0x5Au8; 4096];
        let base = block_checksum(&data);
        data[2048] ^= 0x01;
        assert_ne!(block_checksum(&data), base);
    }
}
