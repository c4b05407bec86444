//! Definition tables
//!
//! A [`DefinitionTable`] maps a qualified selector key to the rule that
//! defines it. Class keys are the bare class name, id keys carry a leading
//! `#` so that `.main` and `#main` never collide.

use std::fmt;

use rustc_hash::FxHashMap;

/// Selector kind a rule was matched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `.name { ... }`
    Class,
    /// `#name { ... }`
    Id,
}

impl RuleKind {
    /// Sigil used when rendering a name of this kind
    pub fn sigil(self) -> char {
        match self {
            RuleKind::Class => '.',
            RuleKind::Id => '#',
        }
    }

    /// Build the table key for a bare name
    pub fn qualify(self, name: &str) -> String {
        match self {
            RuleKind::Class => name.to_string(),
            RuleKind::Id => format!("#{}", name),
        }
    }

    /// Split a table key into its kind and bare name
    pub fn split_key(key: &str) -> (RuleKind, &str) {
        match key.strip_prefix('#') {
            Some(name) => (RuleKind::Id, name),
            None => (RuleKind::Class, key),
        }
    }
}

/// One selector and its rule body, tied to a single class or id name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    name: String,
    kind: RuleKind,
    rule_text: String,
}

impl RuleEntry {
    /// Create an entry. Returns `None` for an empty name or empty rule text,
    /// absence is never represented by an empty string.
    pub fn new(name: impl Into<String>, kind: RuleKind, rule_text: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let rule_text = rule_text.into();
        if name.is_empty() || rule_text.is_empty() {
            return None;
        }
        Some(Self { name, kind, rule_text })
    }

    /// Bare name without sigil
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Verbatim rule text, selector and braces included
    pub fn rule_text(&self) -> &str {
        &self.rule_text
    }

    /// Key this entry is stored under in a [`DefinitionTable`]
    pub fn key(&self) -> String {
        self.kind.qualify(&self.name)
    }

    /// Name with its sigil, e.g. `.btn` or `#main`
    pub fn display_name(&self) -> String {
        format!("{}{}", self.kind.sigil(), self.name)
    }
}

impl fmt::Display for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.display_name(), self.rule_text)
    }
}

/// Flat mapping from qualified name to rule entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionTable {
    entries: FxHashMap<String, RuleEntry>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry with the same key.
    /// Returns the replaced entry.
    pub fn insert(&mut self, entry: RuleEntry) -> Option<RuleEntry> {
        self.entries.insert(entry.key(), entry)
    }

    /// Look up by qualified key (`btn`, `#main`)
    pub fn get(&self, key: &str) -> Option<&RuleEntry> {
        self.entries.get(key)
    }

    /// Look up by kind and bare name
    pub fn lookup(&self, kind: RuleKind, name: &str) -> Option<&RuleEntry> {
        match kind {
            RuleKind::Class => self.entries.get(name),
            RuleKind::Id => self.entries.get(&kind.qualify(name)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `other` into this table. Entries of `other` win.
    pub fn overlay(&mut self, other: &DefinitionTable) {
        for (key, entry) in &other.entries {
            self.entries.insert(key.clone(), entry.clone());
        }
    }

    /// Iterate entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries ordered by key
    pub fn sorted(&self) -> Vec<(&str, &RuleEntry)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl FromIterator<RuleEntry> for DefinitionTable {
    fn from_iter<I: IntoIterator<Item = RuleEntry>>(iter: I) -> Self {
        let mut table = DefinitionTable::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}
