//! Resolution error types

use std::path::PathBuf;

use insight_css::CssError;
use insight_net::NetError;
use thiserror::Error;

use crate::source::SourceDescriptor;

/// Source loading result type
pub type SourceResult<T> = Result<T, SourceError>;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A definition source could not contribute. Never fatal: the resolver logs
/// it and continues with the remaining sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{descriptor}: {error}")]
    Snapshot {
        descriptor: SourceDescriptor,
        #[source]
        error: CssError,
    },

    #[error("{descriptor}: {error}")]
    Fetch {
        descriptor: SourceDescriptor,
        #[source]
        error: NetError,
    },

    #[error("Invalid stylesheet link '{href}': {error}")]
    InvalidLink {
        href: String,
        #[source]
        error: NetError,
    },

    #[error("{0}: source is not configured")]
    Unconfigured(SourceDescriptor),

    #[error("{descriptor}: loader task failed: {reason}")]
    Task {
        descriptor: SourceDescriptor,
        reason: String,
    },
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {error}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Invalid config {}: {error}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = SourceError::Fetch {
            descriptor: SourceDescriptor::LinkedStylesheet(
                url::Url::parse("https://cdn.example.com/a.css").unwrap(),
            ),
            error: NetError::HttpError { status: 404 },
        };
        assert_eq!(err.to_string(), "linked:https://cdn.example.com/a.css: HTTP error: 404");
    }

    #[test]
    fn test_unconfigured_display() {
        let err = SourceError::Unconfigured(SourceDescriptor::BundledFramework("bulma".into()));
        assert_eq!(err.to_string(), "bundled:bulma: source is not configured");
    }
}
