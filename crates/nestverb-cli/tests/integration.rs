//! Integration tests for nestverb-cli.
//!
//! Tests cover the binary invocation and end-to-end file processing.

use nestverb_io::{StereoSamples, WavSpec, read_wav_stereo, write_wav_stereo};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

/// Helper to get the path to the `nestverb` binary built by cargo.
fn nestverb_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nestverb"))
}

fn run(args: &[&str]) -> Output {
    nestverb_bin()
        .args(args)
        .output()
        .expect("failed to run nestverb")
}

fn write_click(path: &Path, len: usize) {
    let mut mono = vec![0.0; len];
    mono[0] = 0.5;
    let spec = WavSpec {
        sample_rate: 48000,
        bits_per_sample: 24,
    };
    write_wav_stereo(path, &StereoSamples::from_mono(mono), spec).unwrap();
}

// ---------------------------------------------------------------------------
// nestverb info
// ---------------------------------------------------------------------------

#[test]
fn cli_info_lists_groups() {
    let output = run(&["info", "tapered"]);
    assert!(output.status.success(), "nestverb info failed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Tapered lattice"));
    assert!(stdout.contains("120 per channel"));
    for group in [
        "time.*",
        "inner_feed.*",
        "lowpass_cutoff.*",
        "time_lfo_amount.*",
        "d4_feed.*",
        "seed",
        "smoothness",
        "time_lfo_lowpass",
    ] {
        assert!(stdout.contains(group), "info should list '{group}'");
    }
    assert!(!stdout.contains("time.119"), "groups are folded by default");
}

#[test]
fn cli_info_all_lists_every_slot() {
    let output = run(&["info", "flat", "--all"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("time.15"));
    assert!(stdout.contains("d1_feed.0"));
    assert!(!stdout.contains("d2_feed.0"), "flat tree has a single level");
}

// ---------------------------------------------------------------------------
// nestverb process
// ---------------------------------------------------------------------------

#[test]
fn cli_process_renders_tail() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dry.wav");
    let output_path = dir.path().join("wet.wav");
    write_click(&input, 4800);

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        output_path.to_str().unwrap(),
        "--topology",
        "flat",
        "--max-time",
        "0.02",
        "--param",
        "time=0.01",
        "--param",
        "dry=0",
        "--param",
        "wet=1",
        "--tail",
        "0.1",
    ]);
    assert!(
        output.status.success(),
        "nestverb process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (rendered, spec) = read_wav_stereo(&output_path).unwrap();
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.bits_per_sample, 24, "bit depth follows the input");
    assert_eq!(rendered.len(), 4800 + 4800);
    assert!(rendered.peak() > 0.0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Stats:"));
}

#[test]
fn cli_process_is_deterministic() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dry.wav");
    write_click(&input, 2400);

    let render = |name: &str| {
        let path = dir.path().join(name);
        let output = run(&[
            "process",
            input.to_str().unwrap(),
            path.to_str().unwrap(),
            "-t",
            "flat",
            "--max-time",
            "0.02",
            "-p",
            "time=0.005",
            "-p",
            "seed=42",
            "--bit-depth",
            "32",
            "--tail",
            "0",
        ]);
        assert!(output.status.success());
        read_wav_stereo(&path).unwrap().0
    };

    assert_eq!(render("a.wav"), render("b.wav"));
}

#[test]
fn cli_process_rejects_unknown_param() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dry.wav");
    let output_path = dir.path().join("wet.wav");
    write_click(&input, 480);

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        output_path.to_str().unwrap(),
        "-t",
        "flat",
        "-p",
        "loudness=3",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loudness"), "error names the key: {stderr}");
    assert!(!output_path.exists());
}

#[test]
fn cli_process_missing_input_fails() {
    let dir = tempdir().unwrap();
    let output = run(&[
        "process",
        dir.path().join("missing.wav").to_str().unwrap(),
        dir.path().join("out.wav").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// nestverb impulse
// ---------------------------------------------------------------------------

#[test]
fn cli_impulse_writes_response() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ir.wav");

    let output = run(&[
        "impulse",
        path.to_str().unwrap(),
        "-t",
        "flat",
        "--max-time",
        "0.02",
        "-p",
        "time=0.004",
        "-p",
        "dry=0",
        "-p",
        "wet=1",
        "--length",
        "0.5",
        "--input",
        "both",
    ]);
    assert!(
        output.status.success(),
        "nestverb impulse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Coherence"));
    assert!(stdout.contains("Left"));
    assert!(stdout.contains("Right"));

    let (ir, spec) = read_wav_stereo(&path).unwrap();
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(ir.len(), 24000);
    assert!(ir.peak() > 0.0);
}

#[test]
fn cli_impulse_rejects_zero_length() {
    let output = run(&["impulse", "-t", "flat", "--length", "0"]);
    assert!(!output.status.success());
}
