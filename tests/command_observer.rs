// tests/command_observer.rs

#![cfg(unix)]

mod common;
use crate::common::{init_tracing, write_with_mtime};

use std::error::Error;
use std::sync::Arc;

use tempfile::TempDir;

use scanwatch::exec::CommandObserver;
use scanwatch::watch::{Observer, Watcher};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn successful_command_runs_in_workdir() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let observer = CommandObserver::new("marker", "touch ran.marker", vec![], dir.path());

    observer.on_updated()?;

    assert!(dir.path().join("ran.marker").exists());
    Ok(())
}

#[test]
fn non_zero_exit_is_an_update_failure() -> TestResult {
    let dir = TempDir::new()?;
    let observer = CommandObserver::new("failing", "exit 3", vec![], dir.path());

    let err = observer.on_updated().expect_err("command should fail");

    assert!(err.to_string().contains("exited with code 3"));
    Ok(())
}

#[test]
fn command_runs_when_watched_file_changes() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let input = dir.path().join("input.txt");
    write_with_mtime(&input, 1_000)?;

    let observer = Arc::new(CommandObserver::new(
        "append",
        "echo run >> runs.log",
        vec![input.clone()],
        dir.path(),
    ));
    let mut w = Watcher::new();
    w.register(observer);

    assert!(!w.scan().changed);
    assert!(!dir.path().join("runs.log").exists());

    write_with_mtime(&input, 2_000)?;
    let report = w.scan();
    assert!(report.changed);
    assert!(report.failures.is_empty());

    let log = std::fs::read_to_string(dir.path().join("runs.log"))?;
    assert_eq!(log.lines().count(), 1);
    Ok(())
}
