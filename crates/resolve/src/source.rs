//! Definition sources and their precedence

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Where a definition table came from. Used as the source-tier cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceDescriptor {
    /// Checked-in framework snapshot, by id (e.g. `bootstrap`)
    BundledFramework(String),
    /// Project-local custom snapshot
    ProjectCustom,
    /// Stylesheet linked from the open document
    LinkedStylesheet(Url),
}

impl SourceDescriptor {
    /// Merge layer this source contributes to
    pub fn layer(&self) -> Layer {
        match self {
            SourceDescriptor::BundledFramework(id) => Layer::Bundled(id.clone()),
            SourceDescriptor::ProjectCustom => Layer::ProjectCustom,
            SourceDescriptor::LinkedStylesheet(_) => Layer::DocumentLinked,
        }
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::BundledFramework(id) => write!(f, "bundled:{}", id),
            SourceDescriptor::ProjectCustom => write!(f, "custom"),
            SourceDescriptor::LinkedStylesheet(url) => write!(f, "linked:{}", url),
        }
    }
}

/// One slot in the merge order. All linked stylesheets of a document share
/// the [`Layer::DocumentLinked`] slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Bundled(String),
    ProjectCustom,
    DocumentLinked,
}

/// Merge order, lowest precedence first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Precedence {
    layers: Vec<Layer>,
}

impl Precedence {
    /// Build from an explicit order. Repeated layers keep their first position.
    pub fn new(layers: impl IntoIterator<Item = Layer>) -> Self {
        let mut ordered: Vec<Layer> = Vec::new();
        for layer in layers {
            if !ordered.contains(&layer) {
                ordered.push(layer);
            }
        }
        Self { layers: ordered }
    }

    /// Bundled frameworks in the given order, then project custom, then
    /// document-linked stylesheets
    pub fn standard<S: AsRef<str>>(bundled: &[S]) -> Self {
        Self::new(
            bundled
                .iter()
                .map(|id| Layer::Bundled(id.as_ref().to_string()))
                .chain([Layer::ProjectCustom, Layer::DocumentLinked]),
        )
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn contains(&self, layer: &Layer) -> bool {
        self.layers.contains(layer)
    }

    /// Ids of bundled layers, in merge order
    pub fn bundled_ids(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Bundled(id) => Some(id.as_str()),
            _ => None,
        })
    }
}

impl Default for Precedence {
    fn default() -> Self {
        Self::standard(&["bootstrap", "tailwind"])
    }
}
