// src/watch/observer.rs

//! Observers and the identity-keyed registry that tracks them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Something that depends on a set of files and reacts when they change.
///
/// Observers are shared as [`ObserverRef`] handles and identified by the
/// address of their allocation, never by value. Implementations that need to
/// mutate state on update use interior mutability.
pub trait Observer: Send + Sync {
    /// Paths that should be checked on the next scan.
    ///
    /// May return different values between scans, but should stay the same
    /// between a scan and the `on_updated` call it causes.
    fn paths(&self) -> Vec<PathBuf>;

    /// Called when at least one of the paths last returned by [`paths`]
    /// has changed, or unconditionally by `Watcher::update_all`.
    ///
    /// [`paths`]: Observer::paths
    fn on_updated(&self) -> anyhow::Result<()>;

    /// Human-readable name used in logs and failure reports.
    fn name(&self) -> &str {
        "observer"
    }
}

/// Shared handle to a registered observer.
pub type ObserverRef = Arc<dyn Observer>;

/// Stable handle assigned to an observer when it is registered.
///
/// Ids are handed out in registration order and never reused by the same
/// registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

fn identity<O: Observer + ?Sized>(observer: &Arc<O>) -> usize {
    Arc::as_ptr(observer) as *const () as usize
}

/// Set of registered observers.
///
/// Registering the same `Arc` twice is a no-op that returns the existing id.
/// The registry keeps a strong reference to every observer, so an allocation
/// (and therefore its identity) cannot be recycled while it is registered.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: BTreeMap<ObserverId, ObserverRef>,
    ids: HashMap<usize, ObserverId>,
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.observers.iter().map(|(id, o)| (id, o.name())))
            .finish()
    }
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: ObserverRef) -> ObserverId {
        let key = identity(&observer);
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }

        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.ids.insert(key, id);
        self.observers.insert(id, observer);
        id
    }

    /// Remove `observer`, returning its id if it was registered.
    pub fn unregister<O: Observer + ?Sized>(&mut self, observer: &Arc<O>) -> Option<ObserverId> {
        let id = self.ids.remove(&identity(observer))?;
        self.observers.remove(&id);
        Some(id)
    }

    /// Remove an observer by id, handing back the registry's reference.
    pub fn remove(&mut self, id: ObserverId) -> Option<ObserverRef> {
        let observer = self.observers.remove(&id)?;
        self.ids.remove(&identity(&observer));
        Some(observer)
    }

    pub fn id_of<O: Observer + ?Sized>(&self, observer: &Arc<O>) -> Option<ObserverId> {
        self.ids.get(&identity(observer)).copied()
    }

    pub fn get(&self, id: ObserverId) -> Option<&ObserverRef> {
        self.observers.get(&id)
    }

    /// Iterate observers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ObserverId, &ObserverRef)> {
        self.observers.iter().map(|(id, o)| (*id, o))
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
