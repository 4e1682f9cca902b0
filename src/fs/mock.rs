// src/fs/mock.rs

use super::{FileStat, MetadataProvider};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy)]
pub enum MockEntry {
    File(SystemTime),
    /// The path exists but every stat call on it fails (e.g. permission denied).
    Unreadable,
}

/// In-memory metadata provider.
///
/// Timestamps come from a logical clock that advances by one second on every
/// [`touch`](MockFileSystem::touch), so two touches never share a timestamp.
/// Clones share the same state, which lets a test keep a handle while the
/// watcher owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    clock: Arc<AtomicU64>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn tick(&self) -> SystemTime {
        let secs = self.clock.fetch_add(1, Ordering::SeqCst) + 1;
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    /// Create the file, or bump its modification time if it exists.
    pub fn touch(&self, path: impl AsRef<Path>) -> SystemTime {
        let modified = self.tick();
        self.set_modified(path, modified);
        modified
    }

    /// Create the file (or overwrite its entry) with an explicit timestamp.
    pub fn set_modified(&self, path: impl AsRef<Path>, modified: SystemTime) {
        self.entries()
            .insert(path.as_ref().to_path_buf(), MockEntry::File(modified));
    }

    /// Make every stat on `path` fail until it is touched or removed.
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.entries()
            .insert(path.as_ref().to_path_buf(), MockEntry::Unreadable);
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        self.entries().remove(path.as_ref()).is_some()
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.entries().contains_key(path.as_ref())
    }
}

impl MetadataProvider for MockFileSystem {
    fn stat(&self, path: &Path) -> FileStat {
        match self.entries().get(path) {
            Some(MockEntry::File(modified)) => FileStat::Exists(*modified),
            Some(MockEntry::Unreadable) | None => FileStat::Absent,
        }
    }
}
