//! Token location
//!
//! Finds the `class="…"`, `className="…"` or `id="…"` attribute under a
//! cursor and splits it into name tokens. Also lists the stylesheets a
//! document links to.

use std::sync::OnceLock;

use insight_css::RuleKind;
use regex::Regex;

/// Whole attribute in group 1, name in group 2, raw value in group 3.
/// The name must follow whitespace or `<` so `data-id` is not `id`.
const ATTRIBUTE: &str = r#"(?:^|[\s<])((className|class|id)="([^"]*)")"#;
const LINK_TAG: &str = r"(?i)<link\b[^>]*>";
const TAG_ATTRIBUTE: &str =
    r#"(?i)(?:^|\s)(rel|href)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#;

fn attribute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ATTRIBUTE).expect("attribute pattern"))
}

fn link_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LINK_TAG).expect("link tag pattern"))
}

fn tag_attribute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TAG_ATTRIBUTE).expect("tag attribute pattern"))
}

/// Names found in the attribute under the cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenQuery {
    /// Whole matched attribute, e.g. `class="btn primary"`
    pub raw_attribute_text: String,
    pub class_names: Vec<String>,
    pub id_names: Vec<String>,
}

impl TokenQuery {
    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty() && self.id_names.is_empty()
    }

    /// Class tokens then id tokens, each in attribute order
    pub fn tokens(&self) -> impl Iterator<Item = (RuleKind, &str)> {
        self.class_names
            .iter()
            .map(|name| (RuleKind::Class, name.as_str()))
            .chain(self.id_names.iter().map(|name| (RuleKind::Id, name.as_str())))
    }
}

/// Byte index of a character offset. `offset == char count` maps to the end.
fn byte_index(text: &str, offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(offset)
}

/// Locate the attribute containing or touching the zero-based character
/// `offset`. Returns `None` when the offset is out of bounds or no
/// recognised attribute covers it.
pub fn locate_tokens(text: &str, offset: usize) -> Option<TokenQuery> {
    let cursor = byte_index(text, offset)?;

    let caps = attribute_re().captures_iter(text).find(|caps| {
        caps.get(1)
            .map(|m| m.start() <= cursor && cursor <= m.end())
            .unwrap_or(false)
    })?;

    let whole = caps.get(1)?.as_str();
    let attribute = caps.get(2)?.as_str();
    let value = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

    let mut query = TokenQuery {
        raw_attribute_text: whole.to_string(),
        ..TokenQuery::default()
    };

    if attribute == "id" {
        // Ids are a single token, never whitespace-split
        if !value.is_empty() {
            query.id_names.push(value.to_string());
        }
    } else {
        query.class_names = value.split_whitespace().map(str::to_string).collect();
    }

    Some(query)
}

/// Hrefs of `<link>` tags whose `rel` lists `stylesheet`, in document order.
/// Duplicates are kept.
pub fn linked_stylesheets(text: &str) -> Vec<String> {
    link_tag_re()
        .find_iter(text)
        .filter_map(|tag| {
            let mut is_stylesheet = false;
            let mut href = None;

            for caps in tag_attribute_re().captures_iter(tag.as_str()) {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
                    Some("rel") => {
                        is_stylesheet = value
                            .split_whitespace()
                            .any(|rel| rel.eq_ignore_ascii_case("stylesheet"));
                    }
                    Some("href") => href = Some(value.to_string()),
                    _ => {}
                }
            }

            href.filter(|h| is_stylesheet && !h.trim().is_empty())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_tokens_split_on_whitespace_runs() {
        let text = r#"<div class="btn  primary">"#;
        let query = locate_tokens(text, 14).unwrap();

        assert_eq!(query.class_names, vec!["btn", "primary"]);
        assert!(query.id_names.is_empty());
        assert_eq!(query.raw_attribute_text, r#"class="btn  primary""#);
    }

    #[test]
    fn test_id_is_single_token() {
        let query = locate_tokens(r#"<h1 id="main-header">"#, 9).unwrap();
        assert_eq!(query.id_names, vec!["main-header"]);

        let query = locate_tokens(r#"<h1 id="main header">"#, 9).unwrap();
        assert_eq!(query.id_names, vec!["main header"]);
        assert!(query.class_names.is_empty());
    }

    #[test]
    fn test_class_name_attribute() {
        let text = r#"<Button className="btn btn-lg" />"#;
        let query = locate_tokens(text, 20).unwrap();

        assert_eq!(query.class_names, vec!["btn", "btn-lg"]);
        assert!(query.raw_attribute_text.starts_with("className="));
    }

    #[test]
    fn test_offset_adjacent_to_attribute() {
        let text = r#"<div class="btn">"#;
        // `c` of class and the character right after the closing quote
        assert!(locate_tokens(text, 5).is_some());
        assert!(locate_tokens(text, 16).is_some());
        assert!(locate_tokens(text, 2).is_none());
    }

    #[test]
    fn test_picks_attribute_under_cursor() {
        let text = r#"<div class="a" id="b"><span class="c d"></span></div>"#;

        assert_eq!(locate_tokens(text, 12).unwrap().class_names, vec!["a"]);
        assert_eq!(locate_tokens(text, 19).unwrap().id_names, vec!["b"]);
        assert_eq!(locate_tokens(text, 36).unwrap().class_names, vec!["c", "d"]);
    }

    #[test]
    fn test_prefixed_attributes_are_ignored() {
        let text = r#"<tr data-id="row-7" data-class="striped" class="row">"#;

        assert!(locate_tokens(text, 14).is_none());
        assert!(locate_tokens(text, 33).is_none());
        let query = locate_tokens(text, 48).unwrap();
        assert_eq!(query.class_names, vec!["row"]);
        assert!(query.id_names.is_empty());
    }

    #[test]
    fn test_character_offsets_not_bytes() {
        let text = "<p>ünïcödé</p><div class=\"btn\">";
        let offset = text.chars().position(|c| c == 'b').unwrap();
        assert_eq!(locate_tokens(text, offset).unwrap().class_names, vec!["btn"]);
    }

    #[test]
    fn test_out_of_bounds_and_empty_values() {
        let text = r#"<div class="">"#;
        assert!(locate_tokens(text, 500).is_none());
        assert!(locate_tokens(text, 12).unwrap().is_empty());
        assert!(locate_tokens(r#"<i id="">"#, 5).unwrap().is_empty());
        assert!(locate_tokens("", 0).is_none());
    }

    #[test]
    fn test_tokens_order() {
        let query = TokenQuery {
            raw_attribute_text: String::new(),
            class_names: vec!["a".into(), "b".into()],
            id_names: vec!["c".into()],
        };
        let tokens: Vec<_> = query.tokens().collect();
        assert_eq!(
            tokens,
            vec![(RuleKind::Class, "a"), (RuleKind::Class, "b"), (RuleKind::Id, "c")]
        );
    }

    #[test]
    fn test_linked_stylesheets() {
        let html = r#"
            <link rel="stylesheet" href="https://cdn.example.com/a.css">
            <link href='css/site.css' rel='stylesheet' />
            <link rel="icon" href="favicon.ico">
            <LINK REL="Stylesheet" HREF="https://cdn.example.com/a.css">
            <link rel="preload stylesheet" href=theme.css>
            <link rel="stylesheet">
            <link rel="stylesheet" data-href="ignored.css" href="real.css">
        "#;

        assert_eq!(
            linked_stylesheets(html),
            vec![
                "https://cdn.example.com/a.css",
                "css/site.css",
                "https://cdn.example.com/a.css",
                "theme.css",
                "real.css",
            ]
        );
    }

    #[test]
    fn test_no_links() {
        assert!(linked_stylesheets("<div class=\"x\"></div>").is_empty());
    }
}
