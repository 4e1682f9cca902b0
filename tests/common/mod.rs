#![allow(dead_code)]

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Once;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Create `path` (if needed) and set its modification time to `secs` after
/// the epoch, so tests never depend on filesystem timestamp granularity.
pub fn write_with_mtime(path: &Path, secs: u64) -> io::Result<()> {
    if !path.exists() {
        File::create(path)?;
    }
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_modified(mtime(secs))
}

pub fn mtime(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}
