//! Hover and completion output

use insight_css::{DefinitionTable, RuleEntry, RuleKind};

/// Markdown for one resolved entry: bold sigil-prefixed name, then the rule
/// in a css code fence. Always ends with a line break.
pub fn format_entry(entry: &RuleEntry) -> String {
    format!(
        "**{}**\n```css\n{}\n```\n",
        entry.display_name(),
        entry.rule_text()
    )
}

/// Concatenated entries in token order, or `None` when nothing resolved
pub fn format_hover(entries: &[RuleEntry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    Some(entries.iter().map(format_entry).collect())
}

/// One completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// Table key: bare class name, or `#`-prefixed id
    pub label: String,
    /// Rule text shown as detail
    pub detail: String,
    pub kind: RuleKind,
}

impl CompletionItem {
    /// Every entry of `table`, ordered by key
    pub fn from_table(table: &DefinitionTable) -> Vec<CompletionItem> {
        table
            .sorted()
            .into_iter()
            .map(|(key, entry)| CompletionItem {
                label: key.to_string(),
                detail: entry.rule_text().to_string(),
                kind: entry.kind(),
            })
            .collect()
    }
}
