// tests/runtime_loop.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use scanwatch::engine::{RunSummary, Runtime, RuntimeEvent, RuntimeOptions};
use scanwatch::errors::ScanwatchError;
use scanwatch::fs::mock::MockFileSystem;
use scanwatch::types::FailurePolicy;
use scanwatch::watch::{Observer, Watcher};
use scanwatch_test_utils::RecordingObserver;

type TestResult = Result<(), Box<dyn Error>>;

fn options(max_scans: Option<u64>) -> RuntimeOptions {
    RuntimeOptions {
        interval: Duration::from_millis(5),
        max_scans,
        ..RuntimeOptions::default()
    }
}

#[tokio::test]
async fn stops_after_max_scans() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.touch("a.txt");
    let mut watcher = Watcher::with_fs(fs);
    let n = RecordingObserver::new("n", ["a.txt"]);
    watcher.register(n.clone());

    let (_tx, rx) = mpsc::channel(1);
    let summary = timeout(
        Duration::from_secs(5),
        Runtime::new(watcher, options(Some(3)), rx).run(),
    )
    .await??;

    assert_eq!(
        summary,
        RunSummary {
            scans: 3,
            notifications: 0,
            failures: 0
        }
    );
    assert_eq!(n.updates(), 0);
    Ok(())
}

#[tokio::test]
async fn notifies_changes_found_by_its_scans() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.touch("a.txt");
    let mut watcher = Watcher::with_fs(fs.clone());
    let n = RecordingObserver::new("n", ["a.txt"]);
    watcher.register(n.clone());
    watcher.scan();

    fs.touch("a.txt");
    let (_tx, rx) = mpsc::channel(1);
    let summary = timeout(
        Duration::from_secs(5),
        Runtime::new(watcher, options(Some(2)), rx).run(),
    )
    .await??;

    assert_eq!(summary.notifications, 1);
    assert_eq!(n.updates(), 1);
    Ok(())
}

#[tokio::test]
async fn shutdown_event_stops_the_loop() -> TestResult {
    init_tracing();
    let watcher = Watcher::with_fs(MockFileSystem::new());
    let (tx, rx) = mpsc::channel(1);
    tx.send(RuntimeEvent::ShutdownRequested).await?;

    let mut opts = options(None);
    opts.interval = Duration::from_secs(3600);
    let summary = timeout(Duration::from_secs(5), Runtime::new(watcher, opts, rx).run()).await??;

    // The first tick is immediate, so at most one scan ran before shutdown.
    assert!(summary.scans <= 1);
    Ok(())
}

#[tokio::test]
async fn closed_event_channel_stops_the_loop() -> TestResult {
    init_tracing();
    let watcher = Watcher::with_fs(MockFileSystem::new());
    let (tx, rx) = mpsc::channel::<RuntimeEvent>(1);
    drop(tx);

    let mut opts = options(None);
    opts.interval = Duration::from_secs(3600);
    let summary = timeout(Duration::from_secs(5), Runtime::new(watcher, opts, rx).run()).await??;

    assert!(summary.scans <= 1);
    Ok(())
}

#[tokio::test]
async fn run_on_start_updates_everyone_first() -> TestResult {
    init_tracing();
    let mut watcher = Watcher::with_fs(MockFileSystem::new());
    let a = RecordingObserver::new("a", ["a.txt"]);
    let b = RecordingObserver::new("b", ["b.txt"]);
    watcher.register(a.clone());
    watcher.register(b.clone());

    let mut opts = options(Some(1));
    opts.run_on_start = true;
    let (_tx, rx) = mpsc::channel(1);
    let summary = timeout(Duration::from_secs(5), Runtime::new(watcher, opts, rx).run()).await??;

    assert_eq!(summary.notifications, 2);
    assert_eq!(a.updates(), 1);
    assert_eq!(b.updates(), 1);
    Ok(())
}

#[tokio::test]
async fn exit_policy_stops_on_first_failure() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.touch("a.txt");
    let mut watcher = Watcher::with_fs(fs.clone());
    let n = RecordingObserver::new("broken", ["a.txt"]);
    n.fail_with("nope");
    watcher.register(n.clone());
    watcher.scan();
    fs.touch("a.txt");

    let mut opts = options(Some(10));
    opts.on_failure = FailurePolicy::Exit;
    let (_tx, rx) = mpsc::channel(1);
    let result = timeout(Duration::from_secs(5), Runtime::new(watcher, opts, rx).run()).await?;

    match result {
        Err(ScanwatchError::ObserverFailures { count, first }) => {
            assert_eq!(count, 1);
            assert!(first.contains("nope"));
        }
        other => panic!("Expected ObserverFailures, got: {:?}", other),
    }
    assert_eq!(n.updates(), 1);
    Ok(())
}

#[tokio::test]
async fn log_policy_keeps_polling_after_failures() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.touch("a.txt");
    let mut watcher = Watcher::with_fs(fs.clone());
    let n = RecordingObserver::new("broken", ["a.txt"]);
    n.fail_with("nope");
    watcher.register(n.clone());
    watcher.scan();
    fs.touch("a.txt");

    let (_tx, rx) = mpsc::channel(1);
    let summary = timeout(
        Duration::from_secs(5),
        Runtime::new(watcher, options(Some(3)), rx).run(),
    )
    .await??;

    assert_eq!(summary.scans, 3);
    assert_eq!(summary.failures, 1);
    Ok(())
}

#[derive(Debug)]
struct SlowObserver {
    delay: Duration,
}

impl Observer for SlowObserver {
    fn paths(&self) -> Vec<PathBuf> {
        vec![PathBuf::from("slow.txt")]
    }

    fn on_updated(&self) -> anyhow::Result<()> {
        std::thread::sleep(self.delay);
        Ok(())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

#[tokio::test]
async fn slow_observer_does_not_stall_other_tasks() -> TestResult {
    init_tracing();
    let mut watcher = Watcher::with_fs(MockFileSystem::new());
    watcher.register(Arc::new(SlowObserver {
        delay: Duration::from_millis(500),
    }));

    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = {
        let ticks = ticks.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(10)).await;
                ticks.fetch_add(1, Ordering::SeqCst);
            }
        })
    };

    let mut opts = options(Some(1));
    opts.run_on_start = true;
    let (_tx, rx) = mpsc::channel(1);
    let summary = timeout(Duration::from_secs(5), Runtime::new(watcher, opts, rx).run()).await??;
    counter.abort();

    assert_eq!(summary.notifications, 1);
    // The default test runtime is single-threaded: the counter only advances
    // while the update runs off the async worker.
    let seen = ticks.load(Ordering::SeqCst);
    assert!(seen >= 10, "counter task only ran {seen} times during a 500ms update");
    Ok(())
}
