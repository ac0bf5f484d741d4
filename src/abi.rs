//! C-ABI shims — export the three symbols existing bindings link against.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! The produced `target/release/libzyphrax.a` replaces the C library in the
//! binding link step.  Per the boundary contract, every typed error
//! collapses to a `0` return; the Rust API keeps the full taxonomy.

use std::slice;

use crate::frame::{compress, decompress};
use crate::params::CompressionParams;

/// `zyphrax_params_t` twin.  The binary layout (three consecutive `u32`
/// fields, 12 bytes) is ABI-stable; existing callers depend on it.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ZyphraxParams {
    /// Compression level, 1–9.
    pub level: u32,
    /// Block size in bytes.
    pub block_size: u32,
    /// Nonzero enables per-block checksums.  The C header declares this
    /// field as a digest-type selector; here every nonzero value selects
    /// XXH32, the only digest the frame format carries.
    pub checksum: u32,
}

impl Default for ZyphraxParams {
    fn default() -> Self {
        Self {
            level: crate::params::DEFAULT_LEVEL,
            block_size: crate::params::DEFAULT_BLOCK_SIZE,
            checksum: 0,
        }
    }
}

impl From<ZyphraxParams> for CompressionParams {
    fn from(params: ZyphraxParams) -> Self {
        CompressionParams {
            level: params.level,
            block_size: params.block_size,
            checksum: params.checksum != 0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// size_t zyphrax_compress_bound(size_t src_size);
//
// Worst-case compressed size for src_size input bytes.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub extern "C" fn zyphrax_compress_bound(src_size: usize) -> usize {
    crate::frame::header::compress_bound(src_size)
}

// ─────────────────────────────────────────────────────────────────────────────
// size_t zyphrax_compress(const uint8_t *src, size_t src_size,
//                         uint8_t *dst, size_t dst_cap,
//                         const zyphrax_params_t *params);
//
// Returns compressed size, or 0 on error.  NULL params selects defaults.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn zyphrax_compress(
    src: *const u8,
    src_size: usize,
    dst: *mut u8,
    dst_cap: usize,
    params: *const ZyphraxParams,
) -> usize {
    if dst.is_null() || (src.is_null() && src_size > 0) {
        return 0;
    }
    let src_slice = if src_size == 0 {
        &[][..]
    } else {
        slice::from_raw_parts(src, src_size)
    };
    let dst_slice = slice::from_raw_parts_mut(dst, dst_cap);
    let rust_params: CompressionParams = if params.is_null() {
        ZyphraxParams::default().into()
    } else {
        (*params).into()
    };
    compress(src_slice, dst_slice, &rust_params).unwrap_or(0)
}

// ─────────────────────────────────────────────────────────────────────────────
// size_t zyphrax_decompress(const uint8_t *src, size_t src_size,
//                           uint8_t *dst, size_t dst_cap);
//
// Returns decompressed size, or 0 on error.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn zyphrax_decompress(
    src: *const u8,
    src_size: usize,
    dst: *mut u8,
    dst_cap: usize,
) -> usize {
    if src.is_null() || dst.is_null() {
        return 0;
    }
    let src_slice = slice::from_raw_parts(src, src_size);
    let dst_slice = slice::from_raw_parts_mut(dst, dst_cap);
    decompress(src_slice, dst_slice).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Callers hard-code the 12-byte struct layout.
    #[test]
    fn params_layout_is_stable() {
        assert_eq!(std::mem::size_of::<ZyphraxParams>(), 12);
        assert_eq!(std::mem::align_of::<ZyphraxParams>(), 4);
    }

    #[test]
    fn abi_roundtrip() {
        let src = b"hello hello hello hello hello hello";
        let bound = zyphrax_compress_bound(src.len());
        let mut compressed = vec![0u8; bound];
        let n = unsafe {
            zyphrax_compress(
                src.as_ptr(),
                src.len(),
                compressed.as_mut_ptr(),
                compressed.len(),
                std::ptr::null(),
            )
        };
        assert!(n > 0);

        let mut out = vec![0u8; src.len()];
        let written = unsafe {
            zyphrax_decompress(compressed.as_ptr(), n, out.as_mut_ptr(), out.len())
        };
        assert_eq!(written, src.len());
        assert_eq!(&out[..], &src[..]);
    }

    /// All nonzero digest-type selectors collapse to XXH32: the produced
    /// frames are identical and carry verifiable checksums.
    #[test]
    fn nonzero_checksum_selectors_all_mean_xxh32() {
        let src = b"selector equivalence payload, selector equivalence payload";
        let frames: Vec<Vec<u8>> = [1u32, 2, 7]
            .iter()
            .map(|&checksum| {
                let params = ZyphraxParams {
                    level: 3,
                    block_size: 65_536,
                    checksum,
                };
                let mut dst = vec![0u8; zyphrax_compress_bound(src.len())];
                let n = unsafe {
                    zyphrax_compress(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst.len(), &params)
                };
                assert!(n > 0, "selector {checksum} rejected");
                dst.truncate(n);
                dst
            })
            .collect();
        assert!(frames.windows(2).all(|pair| pair[0] == pair[1]));

        // The checksummed frame decodes and verifies.
        let mut out = vec![0u8; src.len()];
        let written = unsafe {
            zyphrax_decompress(frames[0].as_ptr(), frames[0].len(), out.as_mut_ptr(), out.len())
        };
        assert_eq!(written, src.len());
        assert_eq!(&out[..], &src[..]);
    }

    #[test]
    fn invalid_params_return_zero() {
        let src = b"payload";
        let mut dst = vec![0u8; zyphrax_compress_bound(src.len())];
        let bad = ZyphraxParams {
            level: 99,
            block_size: 65_536,
            checksum: 0,
        };
        let n = unsafe {
            zyphrax_compress(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst.len(), &bad)
        };
        assert_eq!(n, 0);
    }

    #[test]
    fn null_pointers_return_zero() {
        let mut dst = [0u8; 64];
        let n = unsafe { zyphrax_compress(std::ptr::null(), 4, dst.as_mut_ptr(), 64, std::ptr::null()) };
        assert_eq!(n, 0);
        let n = unsafe { zyphrax_decompress(std::ptr::null(), 4, dst.as_mut_ptr(), 64) };
        assert_eq!(n, 0);
    }
}
