//! Rule extraction
//!
//! Lexical scan for `.name { ... }` and `#name { ... }` blocks. This is not
//! a CSS parser: comments, at-rules and nesting are not understood, and
//! malformed input yields best-effort matches.
//!
//! Selectors are matched by bare identifier. Only the simple selector that
//! directly precedes `{` gets an entry, so `.btn.primary { ... }` and
//! `.btn, .primary { ... }` both produce an entry for `primary` alone, with
//! rule text starting at `.primary`.

use std::sync::OnceLock;

use log::trace;
use regex::Regex;

use crate::table::{DefinitionTable, RuleEntry, RuleKind};

const CLASS_RULE: &str = r"\.([A-Za-z0-9_-]+)\s*\{[^}]*\}";
const ID_RULE: &str = r"#([A-Za-z0-9_-]+)\s*\{[^}]*\}";

/// Turns raw stylesheet text into a [`DefinitionTable`]
pub trait RuleExtractor: Send + Sync {
    fn extract(&self, css: &str) -> DefinitionTable;
}

/// Regex-based extractor for class and id rules
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    fn class_rule() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(CLASS_RULE).expect("class rule pattern"))
    }

    fn id_rule() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(ID_RULE).expect("id rule pattern"))
    }

    /// Scan `css` with one pattern, inserting matches in textual order so the
    /// last block for a name wins.
    fn scan(re: &Regex, kind: RuleKind, css: &str, table: &mut DefinitionTable) {
        for caps in re.captures_iter(css) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Some(entry) = RuleEntry::new(name.as_str(), kind, whole.as_str()) {
                if let Some(previous) = table.insert(entry) {
                    trace!("{} redefined, keeping later block", previous.display_name());
                }
            }
        }
    }
}

impl RuleExtractor for PatternExtractor {
    fn extract(&self, css: &str) -> DefinitionTable {
        let mut table = DefinitionTable::new();
        Self::scan(Self::class_rule(), RuleKind::Class, css, &mut table);
        Self::scan(Self::id_rule(), RuleKind::Id, css, &mut table);
        trace!("Extracted {} rules from {} bytes", table.len(), css.len());
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(css: &str) -> DefinitionTable {
        PatternExtractor::new().extract(css)
    }

    #[test]
    fn test_simple_class_rule() {
        let table = extract(".btn { color: red; }");

        let entry = table.get("btn").unwrap();
        assert_eq!(entry.kind(), RuleKind::Class);
        assert_eq!(entry.rule_text(), ".btn { color: red; }");
    }

    #[test]
    fn test_id_rule() {
        let table = extract("#main-header{height:4rem}");

        let entry = table.lookup(RuleKind::Id, "main-header").unwrap();
        assert_eq!(entry.rule_text(), "#main-header{height:4rem}");
        assert!(table.get("main-header").is_none());
    }

    #[test]
    fn test_empty_braces_are_captured() {
        let table = extract(".spacer {}");
        assert_eq!(table.get("spacer").unwrap().rule_text(), ".spacer {}");
    }

    #[test]
    fn test_last_occurrence_wins() {
        let css = ".btn { color: red; }\n.card { padding: 0; }\n.btn { color: blue; }";
        let table = extract(css);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("btn").unwrap().rule_text(), ".btn { color: blue; }");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let css = ".a { x: 1; } #b { y: 2; } .c{}";
        assert_eq!(extract(css), extract(css));
    }

    #[test]
    fn test_compound_selector_keys_last_simple_selector() {
        let table = extract(".btn.primary { color: white; }");

        assert!(table.get("btn").is_none());
        assert_eq!(
            table.get("primary").unwrap().rule_text(),
            ".primary { color: white; }"
        );
    }

    #[test]
    fn test_selector_list_keys_last_selector() {
        let table = extract(".a, .b { margin: 0; }");

        assert!(table.get("a").is_none());
        assert_eq!(table.get("b").unwrap().rule_text(), ".b { margin: 0; }");
    }

    #[test]
    fn test_hex_colors_are_not_ids() {
        let table = extract("p { color: #fff; } .x { background: #000; }");

        assert_eq!(table.len(), 1);
        assert!(table.get("#fff").is_none());
        assert!(table.get("x").is_some());
    }

    #[test]
    fn test_multiline_rule() {
        let css = ".card {\n  padding: 1rem;\n  border: 1px solid;\n}\n";
        let table = extract(css);
        assert_eq!(
            table.get("card").unwrap().rule_text(),
            ".card {\n  padding: 1rem;\n  border: 1px solid;\n}"
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
        assert!(extract("body { margin: 0 }").is_empty());
    }
}
