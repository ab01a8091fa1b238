//! Error types shared by every crate that talks to SWAPI.
//!
//! There are only two ways an aggregation can fail:
//! - the request itself failed (transport error or non-success status)
//! - the body came back but does not have the shape we expect
//!
//! Both carry the URL that was being fetched so the caller can tell which
//! of the `2 + films` requests aborted the run.

use thiserror::Error;

/// Errors that can occur while fetching and decoding SWAPI resources
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapiError {
    /// Network failure (`status` is `None`) or non-success HTTP status
    #[error("Failed to fetch {url}{}: {reason}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Fetch {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Response body did not parse into the expected entity shape
    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl SwapiError {
    /// Transport-level failure with no HTTP status
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        SwapiError::Fetch {
            url: url.into(),
            status: None,
            reason: reason.to_string(),
        }
    }

    /// The server answered, but not with a 2xx
    pub fn status(url: impl Into<String>, status: u16, reason: impl ToString) -> Self {
        SwapiError::Fetch {
            url: url.into(),
            status: Some(status),
            reason: reason.to_string(),
        }
    }

    pub fn decode(url: impl Into<String>, reason: impl ToString) -> Self {
        SwapiError::Decode {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, SwapiError::Fetch { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, SwapiError::Decode { .. })
    }

    /// The URL whose request failed
    pub fn url(&self) -> &str {
        match self {
            SwapiError::Fetch { url, .. } | SwapiError::Decode { url, .. } => url,
        }
    }
}

/// Convenience type alias for Results across the workspace
pub type Result<T> = std::result::Result<T, SwapiError>;
