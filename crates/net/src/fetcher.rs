//! Linked stylesheet retrieval

use async_trait::async_trait;
use log::{debug, warn};
use url::Url;

use crate::client::HttpClient;
use crate::error::{NetError, NetResult};

/// Retrieves raw stylesheet text for a URL
#[async_trait]
pub trait StylesheetFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> NetResult<String>;
}

#[async_trait]
impl StylesheetFetcher for HttpClient {
    async fn fetch(&self, url: &Url) -> NetResult<String> {
        match url.scheme() {
            "http" | "https" => {
                let response = self.get(url).await?;
                if !response.is_success() {
                    return Err(NetError::HttpError { status: response.status });
                }
                if !response.is_stylesheet() {
                    warn!(
                        "{} served as {:?}, extracting anyway",
                        url,
                        response.content_type()
                    );
                }
                Ok(response.text_lossy())
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| NetError::InvalidUrl(url.to_string()))?;
                debug!("Reading stylesheet: {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
            other => Err(NetError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Resolve a `<link>` href against the document URL, if any
pub fn resolve_href(base: Option<&Url>, href: &str) -> NetResult<Url> {
    let href = href.trim();
    if href.is_empty() {
        return Err(NetError::InvalidUrl("empty href".into()));
    }

    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => Ok(base.join(href)?),
            // Protocol-relative CDN links are common in templates
            None if href.starts_with("//") => Ok(Url::parse(&format!("https:{}", href))?),
            None => Err(NetError::InvalidUrl(format!("relative href without base: {}", href))),
        },
        Err(e) => Err(e.into()),
    }
}
