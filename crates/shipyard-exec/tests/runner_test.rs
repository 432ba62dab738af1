//! Exercises the real runner against `sh`, so these only run on Unix hosts.
#![cfg(unix)]

use shipyard_exec::{Invocation, ProcessRunner, RealRunner, RunnerError};
use tempfile::TempDir;

#[tokio::test]
async fn captures_exit_code_and_output() {
    let tmp = TempDir::new().unwrap();
    let inv = Invocation::new("sh", tmp.path()).args(["-c", "echo hello; echo oops >&2; exit 3"]);

    let out = RealRunner.run(&inv).await.unwrap();

    assert_eq!(out.code, Some(3));
    assert!(out.output.contains("hello"));
    assert!(out.output.contains("oops"));
}

#[tokio::test]
async fn runs_in_working_directory() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("marker.txt"), "x").unwrap();
    let inv = Invocation::new("sh", tmp.path()).args(["-c", "ls"]);

    let out = RealRunner.run(&inv).await.unwrap().ensure_code(0).unwrap();

    assert!(out.output.contains("marker.txt"));
}

#[tokio::test]
async fn appends_command_and_output_to_log() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("log.txt");
    std::fs::write(&log, "-> doing git pull\n").unwrap();

    let inv = Invocation::new("sh", tmp.path())
        .args(["-c", "echo pulled"])
        .log_to(&log);
    RealRunner.run(&inv).await.unwrap();

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.starts_with("-> doing git pull\n"));
    assert!(content.contains("> sh -c \"echo pulled\"\n"));
    assert!(content.ends_with("pulled\n"));
}

#[tokio::test]
async fn missing_program_is_spawn_error() {
    let tmp = TempDir::new().unwrap();
    let inv = Invocation::new("definitely-not-a-real-tool-7f3a", tmp.path());

    let result = RealRunner.run(&inv).await;

    assert!(matches!(result, Err(RunnerError::Spawn { .. })));
}
