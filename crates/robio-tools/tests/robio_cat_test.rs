//! End-to-end checks for the `robio-cat` binary.

use std::fs::File;
use std::io::Write;
use std::os::fd::OwnedFd;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use robio_tools::structured_log::validate_log_file;

fn run_cat(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_robio-cat"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    let payload = input.to_vec();
    let feeder = std::thread::spawn(move || {
        // Dribble the input so the child sees short reads on the pipe.
        for chunk in payload.chunks(7) {
            // The child may exit early on bad arguments; stop feeding then.
            if stdin.write_all(chunk).is_err() {
                break;
            }
        }
    });
    let out = child.wait_with_output().unwrap();
    feeder.join().unwrap();
    out
}

/// Run with caller-chosen stdin and stdout; stderr is captured.
fn run_cat_with(args: &[&str], stdin: Stdio, stdout: Stdio) -> Output {
    Command::new(env!("CARGO_BIN_EXE_robio-cat"))
        .args(args)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::piped())
        .output()
        .unwrap()
}

/// A socket whose peer is already gone: every write fails with `EPIPE`.
fn broken_stdout() -> Stdio {
    let (ours, theirs) = UnixStream::pair().unwrap();
    drop(theirs);
    Stdio::from(OwnedFd::from(ours))
}

fn last_log_entry(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(content.lines().last().unwrap()).unwrap()
}

fn sample() -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..500 {
        data.extend_from_slice(format!("line {i}: {}\n", "x".repeat(i % 37)).as_bytes());
    }
    data.extend_from_slice(b"unterminated tail");
    data
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("robio-cat-{}-{name}", std::process::id()))
}

#[test]
fn raw_mode_copies_stdin() {
    let data = sample();
    let out = run_cat(&[], &data);
    assert!(out.status.success());
    assert_eq!(out.stdout, data);
}

#[test]
fn buffered_mode_with_small_buffer() {
    let data = sample();
    let out = run_cat(&["--mode", "buffered", "--bufsize", "13", "--chunk", "5"], &data);
    assert!(out.status.success());
    assert_eq!(out.stdout, data);
}

#[test]
fn lines_mode_handles_long_lines() {
    let data = sample();
    let out = run_cat(&["--mode", "lines", "--chunk", "8", "--bufsize", "64"], &data);
    assert!(out.status.success());
    assert_eq!(out.stdout, data);
}

#[test]
fn empty_input_is_success() {
    let out = run_cat(&["--mode", "lines"], b"");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn invalid_chunk_fails() {
    let out = run_cat(&["--mode", "lines", "--chunk", "1"], b"abc\n");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid argument"));
}

#[test]
fn run_log_is_valid_jsonl() {
    let log = scratch_path("run.jsonl");
    let data = sample();
    let out = run_cat(
        &["--mode", "buffered", "--log", log.to_str().unwrap()],
        &data,
    );
    assert!(out.status.success());
    assert_eq!(validate_log_file(&log).unwrap(), 2);

    let last = last_log_entry(&log);
    assert_eq!(last["event"], "copy_done");
    assert_eq!(last["bytes"], data.len() as u64);
    assert_eq!(last["mode"], "buffered");
    std::fs::remove_file(&log).unwrap();
}

#[test]
fn write_error_exits_one() {
    let log = scratch_path("write-error.jsonl");
    let input = File::open(std::env::current_exe().unwrap()).unwrap();
    let out = run_cat_with(
        &["--log", log.to_str().unwrap()],
        Stdio::from(input),
        broken_stdout(),
    );
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("write error: Broken pipe"), "{stderr}");

    assert_eq!(validate_log_file(&log).unwrap(), 2);
    let last = last_log_entry(&log);
    assert_eq!(last["event"], "rio_error");
    assert_eq!(last["op"], "rio_writen");
    assert_eq!(last["errno"], 32);
    assert_eq!(last["exit_code"], 1);
    std::fs::remove_file(&log).unwrap();
}

#[test]
fn read_error_exits_one() {
    let dir = File::open(std::env::temp_dir()).unwrap();
    let out = run_cat_with(&["--mode", "lines"], Stdio::from(dir), Stdio::piped());
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("rio_readlineb error: Is a directory"), "{stderr}");
}

#[test]
fn unopenable_log_fails() {
    let log = scratch_path("missing-dir").join("run.jsonl");
    let out = run_cat(&["--log", log.to_str().unwrap()], b"abc\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("log error"), "{stderr}");
}

#[test]
fn huge_bufsize_is_rejected_not_fatal() {
    let out = run_cat(
        &["--mode", "buffered", "--bufsize", "99999999999999999"],
        b"hi\n",
    );
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid argument"), "{stderr}");
}

#[test]
fn huge_chunk_is_rejected_not_fatal() {
    let out = run_cat(&["--chunk", "99999999999999999"], b"hi\n");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid argument"), "{stderr}");
}
