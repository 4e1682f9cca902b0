// src/fs/mod.rs

//! File metadata access.
//!
//! The scan engine never touches `std::fs` directly; it asks a
//! [`MetadataProvider`] for the modification time of each declared path.
//! [`RealFileSystem`] is used in production, [`mock::MockFileSystem`] in tests.

use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use tracing::trace;

pub mod mock;

/// Result of querying a single path.
///
/// A failed query (permission denied, transient IO error, ...) is reported as
/// [`FileStat::Absent`], the same as a missing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileStat {
    /// The path exists and was last modified at the given time.
    Exists(SystemTime),
    /// The path does not exist, or could not be queried.
    #[default]
    Absent,
}

/// Source of file metadata for the scan engine.
pub trait MetadataProvider: Send + Sync + Debug {
    /// Return the current metadata for `path`.
    ///
    /// Must not fail: errors collapse into [`FileStat::Absent`].
    fn stat(&self, path: &Path) -> FileStat;
}

impl<T: MetadataProvider + ?Sized> MetadataProvider for &T {
    fn stat(&self, path: &Path) -> FileStat {
        (**self).stat(path)
    }
}

impl<T: MetadataProvider + ?Sized> MetadataProvider for Arc<T> {
    fn stat(&self, path: &Path) -> FileStat {
        (**self).stat(path)
    }
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl MetadataProvider for RealFileSystem {
    fn stat(&self, path: &Path) -> FileStat {
        match fs::metadata(path).and_then(|meta| meta.modified()) {
            Ok(modified) => FileStat::Exists(modified),
            Err(err) if err.kind() == ErrorKind::NotFound => FileStat::Absent,
            Err(err) => {
                trace!(?path, error = %err, "stat failed; treating path as absent");
                FileStat::Absent
            }
        }
    }
}
