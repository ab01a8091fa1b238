//! HTTP client configuration.

use std::time::Duration;

/// The person the aggregation targets when nothing else is given
pub const DEFAULT_PERSON_URL: &str = "https://swapi.dev/api/people/1";

/// Settings for the reqwest client behind `HttpFetcher`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-request timeout, connect through body
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("swapi-agg/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
