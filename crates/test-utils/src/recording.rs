use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use scanwatch::watch::Observer;

/// An observer that:
/// - declares whatever paths the test last gave it
/// - counts how often it was updated
/// - optionally fails every update with a fixed message.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    name: String,
    paths: Mutex<Vec<PathBuf>>,
    updates: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl RecordingObserver {
    pub fn new<I, P>(name: &str, paths: I) -> Arc<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Arc::new(Self {
            name: name.to_string(),
            paths: Mutex::new(paths.into_iter().map(Into::into).collect()),
            ..Self::default()
        })
    }

    pub fn set_paths<I, P>(&self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        *self.paths.lock().unwrap() = paths.into_iter().map(Into::into).collect();
    }

    /// Make every following update fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Number of `on_updated` calls so far, including failed ones.
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl Observer for RecordingObserver {
    fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }

    fn on_updated(&self) -> anyhow::Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().as_deref() {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
