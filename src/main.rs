//! Binary entry point for the `zyphrax` command-line tool.
//!
//! One-shot file compression and decompression: the whole input is read into
//! memory, transformed, and written out, with a short ratio/time report on
//! stdout.  Decompression discovers the output size by retrying on
//! [`zyphrax::Error::Capacity`] — the engine itself assumes no expansion
//! ratio.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use zyphrax::{compress_to_vec, decompress_to_vec, CompressionParams};

#[derive(Parser, Debug)]
#[command(name = "zyphrax", version, about = "Block-oriented lossless compression")]
struct Args {
    /// Decompress instead of compress.
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Compression level, 1 (fastest) to 9 (best ratio).
    #[arg(short = 'l', long, default_value_t = zyphrax::DEFAULT_LEVEL)]
    level: u32,

    /// Block size in bytes.
    #[arg(short = 'B', long = "block-size", default_value_t = zyphrax::DEFAULT_BLOCK_SIZE)]
    block_size: u32,

    /// Append per-block checksums and verify them on decompression.
    #[arg(short = 'C', long)]
    checksum: bool,

    /// Input file.
    input: PathBuf,

    /// Output file.
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = fs::read(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let start = Instant::now();
    let output = if args.decompress {
        let out = decompress_to_vec(&input, input.len().saturating_mul(4))
            .with_context(|| format!("cannot decompress {}", args.input.display()))?;
        println!("Decompressed {} -> {} bytes", input.len(), out.len());
        out
    } else {
        let params = CompressionParams {
            level: args.level,
            block_size: args.block_size,
            checksum: args.checksum,
        };
        let out = compress_to_vec(&input, &params)
            .with_context(|| format!("cannot compress {}", args.input.display()))?;
        let ratio = if input.is_empty() {
            100.0
        } else {
            out.len() as f64 * 100.0 / input.len() as f64
        };
        println!("Compressed {} -> {} bytes ({:.2}%)", input.len(), out.len(), ratio);
        out
    };
    let elapsed = start.elapsed();

    fs::write(&args.output, &output)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    println!("Time: {:.3}s", elapsed.as_secs_f64());
    Ok(())
}
