//! Definition snapshots
//!
//! A snapshot is a flat JSON object mapping a table key to its rule text.
//! Id keys keep their `#` prefix:
//!
//! ```json
//! { "btn": ".btn { color: red; }", "#main": "#main { width: 100%; }" }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::{CssError, CssResult};
use crate::table::{DefinitionTable, RuleEntry, RuleKind};

/// Parse snapshot JSON into a table. Entries with an empty name or empty
/// rule text are skipped.
pub fn parse_snapshot(json: &str) -> CssResult<DefinitionTable> {
    let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
    let mut table = DefinitionTable::new();

    for (key, rule_text) in raw {
        let (kind, name) = RuleKind::split_key(&key);
        match RuleEntry::new(name, kind, rule_text) {
            Some(entry) => {
                table.insert(entry);
            }
            None => warn!("{}", CssError::invalid_entry(&key, "empty name or rule")),
        }
    }

    Ok(table)
}

/// Serialize a table as pretty snapshot JSON, keys sorted
pub fn to_snapshot_json(table: &DefinitionTable) -> CssResult<String> {
    let raw: BTreeMap<&str, &str> = table
        .iter()
        .map(|(key, entry)| (key, entry.rule_text()))
        .collect();
    Ok(serde_json::to_string_pretty(&raw)?)
}

/// Read a snapshot file from disk
pub fn load_snapshot(path: &Path) -> CssResult<DefinitionTable> {
    let json = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CssError::SnapshotNotFound { path: path.to_path_buf() },
        _ => CssError::Io(e),
    })?;
    let table = parse_snapshot(&json)?;
    debug!("Loaded {} definitions from {}", table.len(), path.display());
    Ok(table)
}

/// Write a snapshot file to disk, creating parent directories
pub fn save_snapshot(table: &DefinitionTable, path: &Path) -> CssResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_snapshot_json(table)?)?;
    debug!("Saved {} definitions to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{PatternExtractor, RuleExtractor};

    #[test]
    fn test_parse_classes_and_ids() {
        let json = r##"{ "btn": ".btn { color: red; }", "#main": "#main { width: 100%; }" }"##;
        let table = parse_snapshot(json).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(RuleKind::Class, "btn").unwrap().name(), "btn");
        let main = table.lookup(RuleKind::Id, "main").unwrap();
        assert_eq!(main.kind(), RuleKind::Id);
        assert_eq!(main.name(), "main");
    }

    #[test]
    fn test_parse_skips_empty_rules() {
        let json = r##"{ "ghost": "", "#": "#{}", "ok": ".ok{}" }"##;
        let table = parse_snapshot(json).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.get("ok").is_some());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(parse_snapshot("[1, 2]"), Err(CssError::InvalidSnapshot(_))));
        assert!(matches!(parse_snapshot("{ \"a\": 1 }"), Err(CssError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_save_and_load_extracted_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("framework.json");
        let table = PatternExtractor::new().extract(".btn { color: red; } #nav { top: 0; }");

        save_snapshot(&table, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();

        assert_eq!(loaded, table);
        let json = fs::read_to_string(&path).unwrap();
        assert!(json.find("\"#nav\"").unwrap() < json.find("\"btn\"").unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CssError::SnapshotNotFound { .. }));
    }
}
