//! reqwest-backed fetcher.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::ResourceFetcher;
use swapi_model::SwapiError;

/// Fetches SWAPI resources over HTTP.
///
/// Wraps a single `reqwest::Client`, so every request made through one
/// fetcher shares the same connection pool. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from `config`.
    ///
    /// Only fails if the TLS backend cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self> {
        info!(
            "Building HTTP client (timeout: {:?}, user agent: {})",
            config.timeout, config.user_agent
        );
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> swapi_model::Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                SwapiError::transport(url, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request to {} returned HTTP {}", url, status);
            let reason = status.canonical_reason().unwrap_or("unexpected status");
            return Err(SwapiError::status(url, status.as_u16(), reason));
        }

        response
            .text()
            .await
            .map_err(|e| SwapiError::transport(url, e))
    }
}
