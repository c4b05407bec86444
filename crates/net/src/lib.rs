//! CSS Insight Network Layer
//!
//! Fetches linked stylesheets over HTTP(S) or from the local filesystem.

mod client;
mod error;
mod fetcher;
mod response;

pub use client::{ClientConfig, HttpClient};
pub use error::{NetError, NetResult};
pub use fetcher::{resolve_href, StylesheetFetcher};
pub use response::Response;
