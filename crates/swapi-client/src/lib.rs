//! SWAPI client for fetching raw entities over HTTP.
//!
//! This crate provides the network side of the aggregation. It handles:
//! - The `ResourceFetcher` seam, so the aggregator can run against a mock
//! - A reqwest-backed `HttpFetcher` with timeout and user agent config
//! - Typed fetches that split decode failures from transport failures
//!
//! URLs are treated as opaque strings. Whatever the API embeds in a
//! response body is fetched verbatim.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use swapi_model::{Result, SwapiError};

pub mod config;
pub mod http;

pub use config::{ClientConfig, DEFAULT_PERSON_URL};
pub use http::HttpFetcher;

/// Anything that can GET a URL and hand back the response body.
///
/// Implementations must map every failure to `SwapiError::Fetch`. Decoding
/// is left to `fetch_entity` so every fetcher reports `Decode` the same way.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch `url` and return the raw body of a 2xx response
    async fn get(&self, url: &str) -> Result<String>;
}

/// Fetch `url` and decode the body as `T`.
pub async fn fetch_entity<T: DeserializeOwned>(
    fetcher: &dyn ResourceFetcher,
    url: &str,
) -> Result<T> {
    let body = fetcher.get(url).await?;
    debug!("Fetched {} ({} bytes)", url, body.len());
    decode(url, &body)
}

/// Decode a response body, tagging failures with the URL it came from
pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        error!("Failed to decode response from {}: {}", url, e);
        SwapiError::decode(url, e)
    })
}
