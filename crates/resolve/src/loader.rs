//! Bundled and project-custom table loading
//!
//! Linked stylesheets are fetched and extracted by the resolver; the
//! loaders here only deal with prebuilt snapshot tables.

use std::path::PathBuf;

use async_trait::async_trait;
use insight_css::{load_snapshot, CssError, DefinitionTable};
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{SourceError, SourceResult};
use crate::source::SourceDescriptor;

/// Supplies tables for [`SourceDescriptor::BundledFramework`] and
/// [`SourceDescriptor::ProjectCustom`]
#[async_trait]
pub trait TableLoader: Send + Sync {
    async fn load(&self, descriptor: &SourceDescriptor) -> SourceResult<DefinitionTable>;
}

/// Loads snapshot JSON files from disk. A missing file is an empty table.
#[derive(Debug, Clone, Default)]
pub struct SnapshotLoader {
    bundled: FxHashMap<String, PathBuf>,
    custom: Option<PathBuf>,
}

impl SnapshotLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundled(mut self, id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.bundled.insert(id.into(), path.into());
        self
    }

    pub fn with_custom(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom = Some(path.into());
        self
    }

    fn path_for(&self, descriptor: &SourceDescriptor) -> Option<&PathBuf> {
        match descriptor {
            SourceDescriptor::BundledFramework(id) => self.bundled.get(id),
            SourceDescriptor::ProjectCustom => self.custom.as_ref(),
            SourceDescriptor::LinkedStylesheet(_) => None,
        }
    }
}

#[async_trait]
impl TableLoader for SnapshotLoader {
    async fn load(&self, descriptor: &SourceDescriptor) -> SourceResult<DefinitionTable> {
        let path = match self.path_for(descriptor) {
            Some(path) => path.clone(),
            // No custom snapshot configured is the same as an empty one
            None if *descriptor == SourceDescriptor::ProjectCustom => {
                return Ok(DefinitionTable::new())
            }
            None => return Err(SourceError::Unconfigured(descriptor.clone())),
        };

        let result = tokio::task::spawn_blocking(move || load_snapshot(&path))
            .await
            .map_err(|e| SourceError::Task {
                descriptor: descriptor.clone(),
                reason: e.to_string(),
            })?;

        match result {
            Ok(table) => Ok(table),
            Err(CssError::SnapshotNotFound { path }) => {
                debug!("{}: no snapshot at {}", descriptor, path.display());
                Ok(DefinitionTable::new())
            }
            Err(error) => Err(SourceError::Snapshot {
                descriptor: descriptor.clone(),
                error,
            }),
        }
    }
}

/// In-memory tables, for hosts that ship their snapshots compiled in
#[derive(Debug, Clone, Default)]
pub struct StaticTables {
    tables: FxHashMap<SourceDescriptor, DefinitionTable>,
}

impl StaticTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, descriptor: SourceDescriptor, table: DefinitionTable) -> Self {
        self.tables.insert(descriptor, table);
        self
    }
}

#[async_trait]
impl TableLoader for StaticTables {
    async fn load(&self, descriptor: &SourceDescriptor) -> SourceResult<DefinitionTable> {
        Ok(self.tables.get(descriptor).cloned().unwrap_or_default())
    }
}
