//! Resolution cache
//!
//! Two unbounded tiers that live as long as the owning resolver:
//!
//! - **source tier**: [`SourceDescriptor`] to extracted/loaded table. A
//!   linked stylesheet URL is fetched at most once until invalidated, even
//!   if the remote content changes.
//! - **name tier**: qualified name (`btn`, `#main`) to the resolved entry or
//!   an explicit not-found marker, merged across all sources.
//!
//! Each tier sits behind its own mutex. Locks are held only for the map
//! operation itself, never across an await, so concurrent misses for the
//! same name may both do the work and the last write wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use insight_css::{DefinitionTable, RuleEntry};
use log::debug;
use rustc_hash::FxHashMap;

use crate::source::SourceDescriptor;

/// Name-tier value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameLookup {
    Found(RuleEntry),
    /// No source defines the name
    NotFound,
}

impl NameLookup {
    pub fn entry(&self) -> Option<&RuleEntry> {
        match self {
            NameLookup::Found(entry) => Some(entry),
            NameLookup::NotFound => None,
        }
    }
}

impl From<Option<&RuleEntry>> for NameLookup {
    fn from(entry: Option<&RuleEntry>) -> Self {
        match entry {
            Some(entry) => NameLookup::Found(entry.clone()),
            None => NameLookup::NotFound,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResolutionCache {
    sources: Mutex<FxHashMap<SourceDescriptor, Arc<DefinitionTable>>>,
    names: Mutex<FxHashMap<String, NameLookup>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, descriptor: &SourceDescriptor) -> Option<Arc<DefinitionTable>> {
        let hit = lock(&self.sources).get(descriptor).cloned();
        if hit.is_some() {
            debug!("Source cache hit: {}", descriptor);
        }
        hit
    }

    pub fn store_source(&self, descriptor: SourceDescriptor, table: Arc<DefinitionTable>) {
        debug!("Caching {} definitions for {}", table.len(), descriptor);
        lock(&self.sources).insert(descriptor, table);
    }

    pub fn name(&self, key: &str) -> Option<NameLookup> {
        lock(&self.names).get(key).cloned()
    }

    pub fn store_name(&self, key: impl Into<String>, lookup: NameLookup) {
        lock(&self.names).insert(key.into(), lookup);
    }

    /// Drop one source table. Name-tier results derived from it are dropped
    /// too, since any of them may have come from this source.
    pub fn invalidate_source(&self, descriptor: &SourceDescriptor) -> bool {
        let removed = lock(&self.sources).remove(descriptor).is_some();
        if removed {
            lock(&self.names).clear();
        }
        removed
    }

    pub fn invalidate_name(&self, key: &str) -> bool {
        lock(&self.names).remove(key).is_some()
    }

    /// Empty both tiers
    pub fn clear(&self) {
        lock(&self.sources).clear();
        lock(&self.names).clear();
    }

    pub fn source_count(&self) -> usize {
        lock(&self.sources).len()
    }

    pub fn name_count(&self) -> usize {
        lock(&self.names).len()
    }
}
