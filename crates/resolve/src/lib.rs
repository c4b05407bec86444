//! CSS Insight Resolution
//!
//! Locates class/id tokens under a cursor, merges definition sources by
//! precedence and resolves tokens to rule text for hover and completion.

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod loader;
pub mod locator;
pub mod render;
pub mod resolver;
pub mod source;

mod error;

pub use aggregator::{Aggregator, LayerTables};
pub use cache::{NameLookup, ResolutionCache};
pub use config::{BundledSource, InsightConfig, DEFAULT_CONFIG_FILE};
pub use error::{ConfigError, ConfigResult, SourceError, SourceResult};
pub use loader::{SnapshotLoader, StaticTables, TableLoader};
pub use locator::{linked_stylesheets, locate_tokens, TokenQuery};
pub use render::{format_entry, format_hover, CompletionItem};
pub use resolver::{Document, NameResolver};
pub use source::{Layer, Precedence, SourceDescriptor};
