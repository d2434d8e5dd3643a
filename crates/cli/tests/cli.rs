//! Command-line tests that need no S3 server
//!
//! Every case here fails (or finishes) before a request is sent. The endpoint
//! points at a closed local port so a stray request errors out fast.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Scratch HOME with an empty config file
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("s3cli.yaml"), "").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_s3cli"))
            .args(args)
            .env_clear()
            .env("HOME", self.dir.path())
            .env("S3CLI_CONFIG", self.path("s3cli.yaml"))
            .env("S3CLI_ENDPOINT", "http://127.0.0.1:1")
            .env("S3CLI_BUCKET", "data")
            .arg("--no-progress")
            .output()
            .expect("Failed to execute s3cli command")
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_upload_without_infile() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["upload", "--s3path", "a.txt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--infile must be specified"));
}

#[test]
fn test_upload_without_s3path() {
    let sandbox = Sandbox::new();
    let source = sandbox.path("a.txt");
    std::fs::write(&source, "x").unwrap();

    let output = sandbox.run(&["upload", "--infile", source.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--s3path must be specified"));
}

#[test]
fn test_download_without_outfile() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["download", "--s3path", "a.txt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--outfile must be specified"));
}

#[test]
fn test_delete_without_s3path() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["delete"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--s3path must be specified"));
}

#[test]
fn test_missing_explicit_config_file() {
    let sandbox = Sandbox::new();
    let missing = sandbox.path("nonexistent.yaml");

    let output = sandbox.run(&["--config", missing.to_str().unwrap(), "list"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_malformed_config_file() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path("s3cli.yaml"), "endpoint: [unclosed\n").unwrap();

    let output = sandbox.run(&["list"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unreachable_endpoint_is_network_error() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["list"]);
    assert_eq!(output.status.code(), Some(3), "{}", stderr(&output));
}

#[test]
fn test_completions_bash() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("s3cli"));
}
