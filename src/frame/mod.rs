//! Whole-buffer frame engine.
//!
//! A *frame* is the complete output of one compress call: a 12-byte frame
//! header followed by an ordered run of independently encoded blocks, each
//! behind its own header.  The frame is self-describing — `decompress` needs
//! only the stream and a large enough destination, no external metadata.
//!
//! All operations are synchronous and stateless across calls: the engine
//! borrows the caller's buffers for the duration of one call and keeps no
//! process-wide mutable state, so concurrent calls on disjoint buffers are
//! safe without locking.

pub mod compress;
pub mod decompress;
pub mod header;
pub mod segment;

pub use compress::{compress, compress_to_vec};
pub use decompress::{decompress, decompress_to_vec};
pub use header::{compress_bound, FRAME_HEADER_SIZE, MAGIC};
