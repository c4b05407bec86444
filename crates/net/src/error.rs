//! Stylesheet fetch error types

use thiserror::Error;

/// Network operation result type
pub type NetResult<T> = Result<T, NetError>;

/// Errors raised while retrieving a linked stylesheet
#[derive(Debug, Error)]
pub enum NetError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for NetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetError::Timeout
        } else {
            NetError::RequestFailed(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetError {
    fn from(err: url::ParseError) -> Self {
        NetError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_maps_to_invalid_url() {
        let err: NetError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, NetError::InvalidUrl(_)));
    }

    #[test]
    fn test_reqwest_error_maps_to_request_failed() {
        let err = reqwest::Client::new().get("http://").build().unwrap_err();
        assert!(!err.is_timeout());
        assert!(matches!(NetError::from(err), NetError::RequestFailed(_)));
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(format!("{}", NetError::HttpError { status: 404 }), "HTTP error: 404");
    }
}
