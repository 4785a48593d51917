//! # Fetch Errors
//!
//! The single error kind surfaced by the data source gateway. Callers treat
//! every variant the same way; the variants only make log lines clearer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, IO)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body could not be decoded as the expected payload
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// URL of the request that failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_should_name_url_and_code() {
        let error = FetchError::Status {
            url: "http://localhost/api/movies".to_string(),
            status: 503,
        };

        assert_eq!(
            error.to_string(),
            "http://localhost/api/movies responded with HTTP 503"
        );
        assert_eq!(error.url(), "http://localhost/api/movies");
    }

    #[test]
    fn decode_error_should_keep_source() {
        let source = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let error = FetchError::Decode {
            url: "http://localhost/api/movies".to_string(),
            source,
        };

        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().starts_with("unexpected response body"));
    }
}
