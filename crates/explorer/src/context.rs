//! Process-wide explorer context.
//!
//! Built once at startup and handed to whatever needs network access, so
//! there is no module-level connection object. Cloning is cheap; clones
//! share the HTTP connection pool.

use std::sync::Arc;

use reqwest::Client;

use crate::config::ResolverConfig;

#[derive(Clone, Debug)]
pub struct ExplorerContext {
    config: Arc<ResolverConfig>,
    http: Client,
}

impl ExplorerContext {
    pub fn new(config: ResolverConfig) -> Self {
        let http = Client::builder()
            .timeout(config.provider_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            config: Arc::new(config),
            http,
        }
    }

    /// Context configured from `SOLANTICS_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ResolverConfig::from_env())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Shared HTTP client for network-backed providers.
    pub fn http(&self) -> &Client {
        &self.http
    }
}
