//! Configuration
//!
//! Read from `css-insight.json`. Every field is optional:
//!
//! ```json
//! {
//!   "bundled": [{ "id": "bootstrap", "path": "data/bootstrap-classes.json" }],
//!   "custom": "custom-classes.json",
//!   "precedence": [{ "bundled": "bootstrap" }, "project_custom", "document_linked"],
//!   "timeout_secs": 10
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use insight_net::ClientConfig;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::loader::SnapshotLoader;
use crate::source::Precedence;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "css-insight.json";

/// A checked-in framework snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundledSource {
    pub id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Framework snapshots, lowest precedence first unless `precedence` says otherwise
    pub bundled: Vec<BundledSource>,
    /// Project custom snapshot
    pub custom: Option<PathBuf>,
    /// Explicit merge order; derived from `bundled` when absent
    pub precedence: Option<Precedence>,
    /// Linked stylesheet request timeout
    pub timeout_secs: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            bundled: vec![
                BundledSource {
                    id: "bootstrap".into(),
                    path: PathBuf::from("data/bootstrap-classes.json"),
                },
                BundledSource {
                    id: "tailwind".into(),
                    path: PathBuf::from("data/tailwind-classes.json"),
                },
            ],
            custom: Some(PathBuf::from("custom-classes.json")),
            precedence: None,
            timeout_secs: ClientConfig::default().timeout_secs,
        }
    }
}

impl InsightConfig {
    /// Load from `path`. A missing file yields the defaults. Relative
    /// snapshot paths are resolved against the file's directory.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    error,
                })
            }
        };

        let config: Self = serde_json::from_str(&json).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;

        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(config.relative_to(dir)),
            _ => Ok(config),
        }
    }

    /// Rebase relative snapshot paths onto `dir`
    pub fn relative_to(mut self, dir: &Path) -> Self {
        for source in &mut self.bundled {
            if source.path.is_relative() {
                source.path = dir.join(&source.path);
            }
        }
        if let Some(custom) = self.custom.as_mut() {
            if custom.is_relative() {
                *custom = dir.join(&*custom);
            }
        }
        self
    }

    /// Effective merge order
    pub fn precedence(&self) -> Precedence {
        match &self.precedence {
            Some(precedence) => precedence.clone(),
            None => {
                let ids: Vec<&str> = self.bundled.iter().map(|s| s.id.as_str()).collect();
                Precedence::standard(&ids[..])
            }
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout_secs: self.timeout_secs,
        }
    }

    /// Snapshot loader for the configured files
    pub fn snapshot_loader(&self) -> SnapshotLoader {
        let loader = self
            .bundled
            .iter()
            .fold(SnapshotLoader::new(), |loader, source| {
                loader.with_bundled(source.id.clone(), source.path.clone())
            });
        match &self.custom {
            Some(path) => loader.with_custom(path.clone()),
            None => loader,
        }
    }
}
