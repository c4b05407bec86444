//! HTTP client implementation

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, USER_AGENT};
use url::Url;

use crate::error::{NetError, NetResult};
use crate::response::Response;

/// Default user agent string
const DEFAULT_USER_AGENT: &str = concat!("css-insight/", env!("CARGO_PKG_VERSION"));

/// Default timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of redirects to follow
const MAX_REDIRECTS: usize = 10;

/// HTTP client for fetching stylesheets
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> NetResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("text/css,*/*;q=0.1"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| NetError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch a URL using GET
    pub async fn get(&self, url: &Url) -> NetResult<Response> {
        info!("Fetching: {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let final_url = response.url().clone();
        let status = response.status().as_u16();

        debug!("Response status: {}", status);

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|val| (k.as_str().to_lowercase(), val.to_string()))
            })
            .collect();

        let body = response.bytes().await?.to_vec();

        debug!("Received {} bytes", body.len());

        Ok(Response::new(final_url, status, headers, body))
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Copy)]
pub struct ClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
