//! CSS Insight rule tables
//!
//! Extracts class and id rules from raw stylesheet text and stores them
//! in flat name-to-rule tables.

mod error;
mod extractor;
mod snapshot;
mod table;

pub use error::{CssError, CssResult};
pub use extractor::{PatternExtractor, RuleExtractor};
pub use snapshot::{load_snapshot, parse_snapshot, save_snapshot, to_snapshot_json};
pub use table::{DefinitionTable, RuleEntry, RuleKind};
