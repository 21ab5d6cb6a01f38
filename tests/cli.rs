mod common;

use std::process::{Command, Output};

use common::*;

fn mp3dur(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mp3dur"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run mp3dur")
}

#[test]
fn test_json_report_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), "ep1.mp3", &cbr_stream(2297));

    let out = mp3dur(&["--format", "json", path.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["summary"]["total"], 1);
    assert_eq!(report["summary"]["ok"], 1);
    let file = &report["files"][0];
    assert_eq!(file["status"], "OK");
    assert_eq!(file["duration"], "00:01:00");
    assert_eq!(file["source"], "frame_sum");
    assert_eq!(file["frames"], 2297);
}

#[test]
fn test_failed_file_exits_2_and_keeps_going() {
    let dir = tempfile::tempdir().unwrap();
    write_temp(dir.path(), "a.mp3", b"%PDF-1.7 not audio");
    write_temp(dir.path(), "b.mp3", &vbr_stream_with_xing(100));

    let out = mp3dur(&["--format", "csv", dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "{}", stdout);
    assert!(lines[1].starts_with("ERROR,"));
    assert!(lines[2].starts_with("OK,"));
    assert!(lines[2].contains(",xing,100,"));

    // The failure is also logged at the default level
    assert!(String::from_utf8_lossy(&out.stderr).contains("unexpected frame"));
}

#[test]
fn test_output_file_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), "ep.mp3", &cbr_stream(10));
    let report = dir.path().join("report.csv");

    let out = mp3dur(&["-q", "-o", report.to_str().unwrap(), path.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let text = std::fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("status,filepath,length_bytes,duration"));
}

#[test]
fn test_config_file_disables_fast_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), "vbr.mp3", &vbr_stream_with_xing(50));
    let config = dir.path().join("mp3dur.toml");
    std::fs::write(&config, "[scan]\nvbr_fast_path = false\n").unwrap();

    let out = mp3dur(&[
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
        path.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["files"][0]["source"], "frame_sum");
    assert_eq!(report["files"][0]["frames"], 51);
}

#[test]
fn test_bad_config_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), "ep.mp3", &cbr_stream(1));
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "colour = true\n").unwrap();

    let out = mp3dur(&["--config", config.to_str().unwrap(), path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid config"), "{}", stderr);
    // The parser's own message follows the context
    assert!(stderr.contains("unknown field `colour`"), "{}", stderr);
}

#[test]
fn test_missing_config_shows_cause() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(dir.path(), "ep.mp3", &cbr_stream(1));
    let config = dir.path().join("absent.toml");

    let out = mp3dur(&["--config", config.to_str().unwrap(), path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot read config"), "{}", stderr);
    assert!(stderr.contains("absent.toml: "), "{}", stderr);
}

#[test]
fn test_empty_directory_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let out = mp3dur(&[dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no MP3 files found"));
}

#[test]
fn test_completions() {
    let out = mp3dur(&["--completions", "bash"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("mp3dur"));
}
