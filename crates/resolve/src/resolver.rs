//! Name resolution
//!
//! Ties the pieces together: locate the tokens under the cursor, answer
//! from the name tier when possible, otherwise gather every source table
//! (source tier first, loader/fetcher+extractor on a miss), merge them by
//! precedence and record the outcome for each name.

use std::sync::Arc;

use insight_css::{DefinitionTable, PatternExtractor, RuleEntry, RuleExtractor};
use insight_net::{resolve_href, HttpClient, NetResult, StylesheetFetcher};
use log::{debug, warn};
use url::Url;

use crate::aggregator::{Aggregator, LayerTables};
use crate::cache::{NameLookup, ResolutionCache};
use crate::config::InsightConfig;
use crate::error::SourceError;
use crate::loader::TableLoader;
use crate::locator::{linked_stylesheets, locate_tokens, TokenQuery};
use crate::render::{format_hover, CompletionItem};
use crate::source::{Layer, Precedence, SourceDescriptor};

/// Open document as seen by the resolver
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    text: &'a str,
    base_url: Option<&'a Url>,
}

impl<'a> Document<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, base_url: None }
    }

    /// URL relative stylesheet links are resolved against
    pub fn with_base_url(mut self, base_url: &'a Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn base_url(&self) -> Option<&'a Url> {
        self.base_url
    }
}

pub struct NameResolver {
    aggregator: Aggregator,
    cache: Arc<ResolutionCache>,
    extractor: Arc<dyn RuleExtractor>,
    loader: Arc<dyn TableLoader>,
    fetcher: Arc<dyn StylesheetFetcher>,
}

impl NameResolver {
    pub fn new(
        precedence: Precedence,
        loader: Arc<dyn TableLoader>,
        fetcher: Arc<dyn StylesheetFetcher>,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(precedence),
            cache: Arc::new(ResolutionCache::new()),
            extractor: Arc::new(PatternExtractor::new()),
            loader,
            fetcher,
        }
    }

    /// Resolver over the configured snapshot files and a real HTTP client
    pub fn from_config(config: &InsightConfig) -> NetResult<Self> {
        let client = HttpClient::with_config(config.client_config())?;
        Ok(Self::new(
            config.precedence(),
            Arc::new(config.snapshot_loader()),
            Arc::new(client),
        ))
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn RuleExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Share a cache between resolvers
    pub fn with_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Hover markdown for the attribute under `offset`, or `None` when the
    /// cursor is not in a class/id attribute or no token resolves
    pub async fn hover(&self, document: &Document<'_>, offset: usize) -> Option<String> {
        let query = locate_tokens(document.text(), offset)?;
        debug!("Hover query: {}", query.raw_attribute_text);
        let entries = self.resolve(document, &query).await;
        format_hover(&entries)
    }

    /// Resolve every token of `query` in order, skipping unknown names.
    /// Outcomes are only recorded in the name tier when every source was
    /// available, so a failed source is retried on the next request.
    pub async fn resolve(&self, document: &Document<'_>, query: &TokenQuery) -> Vec<RuleEntry> {
        let mut merged: Option<Gathered> = None;
        let mut resolved = Vec::new();

        for (kind, name) in query.tokens() {
            let key = kind.qualify(name);
            let lookup = match self.cache.name(&key) {
                Some(lookup) => {
                    debug!("Name cache hit: {}", key);
                    lookup
                }
                None => {
                    if merged.is_none() {
                        merged = Some(self.gather(document).await);
                    }
                    let Some(gathered) = merged.as_ref() else {
                        continue;
                    };
                    let lookup = NameLookup::from(gathered.table.lookup(kind, name));
                    if gathered.complete {
                        self.cache.store_name(key, lookup.clone());
                    } else {
                        debug!("Not caching {}: a source was unavailable", key);
                    }
                    lookup
                }
            };

            if let NameLookup::Found(entry) = lookup {
                resolved.push(entry);
            }
        }

        resolved
    }

    /// Every known definition, ordered by key
    pub async fn completions(&self, document: &Document<'_>) -> Vec<CompletionItem> {
        CompletionItem::from_table(&self.definitions(document).await)
    }

    /// Merged table for `document` across all layers of the precedence
    pub async fn definitions(&self, document: &Document<'_>) -> DefinitionTable {
        self.gather(document).await.table
    }

    async fn gather(&self, document: &Document<'_>) -> Gathered {
        let mut tables = LayerTables::default();
        let mut complete = true;

        for layer in self.aggregator.precedence().layers() {
            let loaded = match layer {
                Layer::Bundled(id) => {
                    self.source_table(&SourceDescriptor::BundledFramework(id.clone()))
                        .await
                }
                Layer::ProjectCustom => self.source_table(&SourceDescriptor::ProjectCustom).await,
                Layer::DocumentLinked => self.linked_table(document).await,
            };
            complete &= loaded.available;
            tables.insert(layer.clone(), loaded.table);
        }

        Gathered {
            table: self.aggregator.merge(&tables),
            complete,
        }
    }

    /// All stylesheets the document links to, later links overriding earlier
    async fn linked_table(&self, document: &Document<'_>) -> Loaded {
        let mut linked = DefinitionTable::new();
        let mut available = true;

        for href in linked_stylesheets(document.text()) {
            let url = match resolve_href(document.base_url(), &href) {
                Ok(url) => url,
                Err(error) => {
                    warn!("{}", SourceError::InvalidLink { href, error });
                    continue;
                }
            };
            let loaded = self
                .source_table(&SourceDescriptor::LinkedStylesheet(url))
                .await;
            available &= loaded.available;
            linked.overlay(&loaded.table);
        }

        Loaded {
            table: Arc::new(linked),
            available,
        }
    }

    /// Source-tier lookup, loading on a miss. An unavailable source is
    /// logged and contributes an empty table without being cached. A
    /// source missing from the configuration never becomes available, so
    /// it is cached as empty and reported once.
    async fn source_table(&self, descriptor: &SourceDescriptor) -> Loaded {
        if let Some(table) = self.cache.source(descriptor) {
            return Loaded {
                table,
                available: true,
            };
        }

        let loaded = match descriptor {
            SourceDescriptor::LinkedStylesheet(url) => self
                .fetcher
                .fetch(url)
                .await
                .map(|css| self.extractor.extract(&css))
                .map_err(|error| SourceError::Fetch {
                    descriptor: descriptor.clone(),
                    error,
                }),
            _ => self.loader.load(descriptor).await,
        };

        match loaded {
            Ok(table) => {
                let table = Arc::new(table);
                self.cache.store_source(descriptor.clone(), Arc::clone(&table));
                Loaded {
                    table,
                    available: true,
                }
            }
            Err(err @ SourceError::Unconfigured(_)) => {
                warn!("{}", err);
                let table = Arc::new(DefinitionTable::new());
                self.cache.store_source(descriptor.clone(), Arc::clone(&table));
                Loaded {
                    table,
                    available: true,
                }
            }
            Err(err) => {
                warn!("Source unavailable: {}", err);
                Loaded {
                    table: Arc::new(DefinitionTable::new()),
                    available: false,
                }
            }
        }
    }
}

/// One source's table and whether it was actually obtained
struct Loaded {
    table: Arc<DefinitionTable>,
    available: bool,
}

/// Merged table and whether every source contributed
struct Gathered {
    table: DefinitionTable,
    complete: bool,
}
