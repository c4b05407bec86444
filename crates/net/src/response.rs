//! HTTP response representation

use std::collections::HashMap;
use url::Url;

/// Fetched stylesheet response
#[derive(Debug)]
pub struct Response {
    /// Final URL after redirects
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Response headers, lowercased names
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(url: Url, status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            url,
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the Content-Type header
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(|s| s.as_str())
    }

    /// Whether the server labelled the body as CSS. Absent Content-Type
    /// counts as CSS, many static hosts omit it.
    pub fn is_stylesheet(&self) -> bool {
        self.content_type()
            .map(|ct| ct.to_ascii_lowercase().contains("text/css"))
            .unwrap_or(true)
    }

    /// Get the body as a UTF-8 string, replacing invalid characters
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
