//! E2E Suite 03: command-line binary.
//!
//! Drives the compiled `zyphrax` binary end to end through temporary files:
//! compress, decompress, verify the bytes, and check the failure exit paths.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn zyphrax(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zyphrax"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to launch binary")
}

fn run_ok(args: &[&str], dir: &Path) -> String {
    let out = zyphrax(args, dir);
    assert!(
        out.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn file_roundtrip_with_defaults() {
    let dir = TempDir::new().unwrap();
    let original: Vec<u8> = b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(50_000)
        .collect();
    fs::write(dir.path().join("input.txt"), &original).unwrap();

    let stdout = run_ok(&["input.txt", "input.zx"], dir.path());
    assert!(stdout.contains("Compressed 50000 ->"));

    let stdout = run_ok(&["-d", "input.zx", "restored.txt"], dir.path());
    assert!(stdout.contains("-> 50000 bytes"));

    let restored = fs::read(dir.path().join("restored.txt")).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn file_roundtrip_with_tuned_flags() {
    let dir = TempDir::new().unwrap();
    let original: Vec<u8> = (0..60_000u32).flat_map(|i| i.to_le_bytes()).collect();
    fs::write(dir.path().join("data.bin"), &original).unwrap();

    run_ok(
        &["-l", "9", "-B", "8192", "-C", "data.bin", "data.zx"],
        dir.path(),
    );
    run_ok(&["-d", "data.zx", "data.out"], dir.path());

    let restored = fs::read(dir.path().join("data.out")).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn empty_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty"), b"").unwrap();

    run_ok(&["empty", "empty.zx"], dir.path());
    run_ok(&["-d", "empty.zx", "empty.out"], dir.path());

    assert_eq!(fs::read(dir.path().join("empty.out")).unwrap(), b"");
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure paths
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let out = zyphrax(&["no-such-file", "out.zx"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no-such-file"));
}

#[test]
fn out_of_range_level_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("input"), b"data").unwrap();
    let out = zyphrax(&["-l", "42", "input", "out.zx"], dir.path());
    assert!(!out.status.success());
}

#[test]
fn decompressing_garbage_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("garbage"), b"this is not a zyphrax frame").unwrap();
    let out = zyphrax(&["-d", "garbage", "out.txt"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot decompress"));
}
