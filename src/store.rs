//! Holders for the caller's current snapshots.
//!
//! The edit core is stateless; a builder UI keeps "the current forest"
//! somewhere. `SharedLayoutStore` is that somewhere when several threads
//! (or several documents) are involved: each edit runs against the latest
//! snapshot under a write lock, and the last writer wins.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::LayoutResult;
use crate::hash::Fingerprint;
use crate::node::Forest;
use crate::render::{self, RenderConfig};

// =============================================================================
// Layout Key
// =============================================================================

/// Name of a stored layout (e.g. a page route).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutKey(Arc<str>);

impl LayoutKey {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayoutKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Layout Entry
// =============================================================================

/// A stored snapshot with version tracking.
#[derive(Debug, Clone)]
pub struct LayoutEntry {
    pub forest: Forest,
    /// Bumped on every commit that changes content.
    pub version: u64,
    pub fingerprint: Fingerprint,
}

impl LayoutEntry {
    /// Create a new entry with version 0.
    pub fn new(forest: Forest) -> Self {
        let fingerprint = forest.fingerprint();
        Self { forest, version: 0, fingerprint }
    }

    /// Replace the snapshot. Returns whether the content changed.
    pub fn commit(&mut self, forest: Forest) -> bool {
        let fingerprint = forest.fingerprint();
        if fingerprint == self.fingerprint {
            return false;
        }
        self.forest = forest;
        self.fingerprint = fingerprint;
        self.version += 1;
        true
    }
}

impl Default for LayoutEntry {
    fn default() -> Self {
        Self::new(Forest::new())
    }
}

// =============================================================================
// Layout Store
// =============================================================================

/// Non-thread-safe layout store.
pub type LayoutStore = FxHashMap<LayoutKey, LayoutEntry>;

/// Thread-safe shared layout store.
///
/// Uses `parking_lot::RwLock` for better performance under contention.
#[derive(Debug, Clone, Default)]
pub struct SharedLayoutStore {
    inner: Arc<RwLock<LayoutStore>>,
}

impl SharedLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a closure with read access to the store.
    pub fn with_read<R>(&self, f: impl FnOnce(&LayoutStore) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with write access to the store.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut LayoutStore) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Get a clone of a stored entry (cheap: forests share structure).
    pub fn get(&self, key: &LayoutKey) -> Option<LayoutEntry> {
        self.with_read(|s| s.get(key).cloned())
    }

    /// Current snapshot for `key`, if stored.
    pub fn current(&self, key: &LayoutKey) -> Option<Forest> {
        self.with_read(|s| s.get(key).map(|e| e.forest.clone()))
    }

    /// Insert or replace an entry.
    pub fn insert(&self, key: LayoutKey, entry: LayoutEntry) {
        self.with_write(|s| {
            s.insert(key, entry);
        });
    }

    /// Apply an edit to the latest snapshot for `key` and commit it.
    ///
    /// A missing key starts from an empty forest and is only stored once
    /// the edit changes it. On error nothing is committed. Returns the entry's version after the edit.
    pub fn edit<F>(&self, key: &LayoutKey, f: F) -> LayoutResult<u64>
    where
        F: FnOnce(&Forest) -> LayoutResult<Forest>,
    {
        self.with_write(|s| {
            let current = s.get(key).map(|e| e.forest.clone()).unwrap_or_default();
            let next = f(&current)?;
            match s.get_mut(key) {
                Some(entry) => {
                    if entry.commit(next) {
                        tracing::debug!(key = %key, version = entry.version, "committed layout edit");
                    }
                    Ok(entry.version)
                }
                None => {
                    let mut entry = LayoutEntry::default();
                    if !entry.commit(next) {
                        return Ok(entry.version);
                    }
                    tracing::debug!(key = %key, version = entry.version, "created layout");
                    let version = entry.version;
                    s.insert(key.clone(), entry);
                    Ok(version)
                }
            }
        })
    }

    /// Remove an entry from the store.
    pub fn remove(&self, key: &LayoutKey) -> Option<LayoutEntry> {
        self.with_write(|s| s.remove(key))
    }

    /// Check if the store contains a key.
    pub fn contains(&self, key: &LayoutKey) -> bool {
        self.with_read(|s| s.contains_key(key))
    }

    pub fn len(&self) -> usize {
        self.with_read(|s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all entries from the store.
    pub fn clear(&self) {
        self.with_write(|s| s.clear());
    }

    /// Render every stored layout, sorted by key.
    pub fn render_all(&self, config: &RenderConfig) -> Vec<(LayoutKey, String)> {
        let mut snapshots: Vec<(LayoutKey, Forest)> = self.with_read(|s| {
            s.iter().map(|(k, e)| (k.clone(), e.forest.clone())).collect()
        });
        snapshots.sort_by(|a, b| a.0.cmp(&b.0));
        render_snapshots(snapshots, config)
    }
}

#[cfg(feature = "parallel")]
fn render_snapshots(snapshots: Vec<(LayoutKey, Forest)>, config: &RenderConfig) -> Vec<(LayoutKey, String)> {
    use rayon::prelude::*;
    snapshots
        .into_par_iter()
        .map(|(key, forest)| {
            let html = render::render_forest(&forest, config);
            (key, html)
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn render_snapshots(snapshots: Vec<(LayoutKey, Forest)>, config: &RenderConfig) -> Vec<(LayoutKey, String)> {
    snapshots
        .into_iter()
        .map(|(key, forest)| {
            let html = render::render_forest(&forest, config);
            (key, html)
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
