//! Definition aggregation
//!
//! Shallow last-applied-wins merge of per-layer tables. Rule text is never
//! combined: a higher layer's entry replaces a lower layer's entry outright.

use std::sync::Arc;

use insight_css::DefinitionTable;
use log::debug;
use rustc_hash::FxHashMap;

use crate::source::{Layer, Precedence};

/// Tables gathered for one resolution, keyed by layer
pub type LayerTables = FxHashMap<Layer, Arc<DefinitionTable>>;

/// Merges layer tables in precedence order
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    precedence: Precedence,
}

impl Aggregator {
    pub fn new(precedence: Precedence) -> Self {
        Self { precedence }
    }

    pub fn precedence(&self) -> &Precedence {
        &self.precedence
    }

    /// Merge `tables` lowest layer first. Layers without a table contribute
    /// nothing; tables for layers outside the precedence are ignored.
    pub fn merge(&self, tables: &LayerTables) -> DefinitionTable {
        let mut merged = DefinitionTable::new();
        for layer in self.precedence.layers() {
            if let Some(table) = tables.get(layer) {
                merged.overlay(table);
            }
        }

        for layer in tables.keys() {
            if !self.precedence.contains(layer) {
                debug!("Ignoring table for {:?}, not in precedence", layer);
            }
        }

        merged
    }
}
