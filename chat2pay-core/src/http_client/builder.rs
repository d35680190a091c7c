use crate::error::{Error, Result};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;

use super::auth::TokenProvider;
use super::config::HttpConfig;

/// HTTP client for the Chat2Pay backend.
///
/// Cloning is cheap; clones share the connection pool and token provider.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpConfig,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_token_provider", &self.token_provider.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The proxy URL is invalid
    /// - The HTTP client cannot be built
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(proxy_config) = &config.proxy {
            let mut proxy = reqwest::Proxy::all(&proxy_config.url)
                .map_err(|e| Error::network(format!("Invalid proxy URL: {e}")))?;

            if let (Some(username), Some(password)) =
                (&proxy_config.username, &proxy_config.password)
            {
                proxy = proxy.basic_auth(username, password);
            }
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token_provider: None,
        })
    }

    /// Attaches a token provider consulted before every request.
    #[must_use]
    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Replaces the token provider.
    pub fn set_token_provider(&mut self, provider: Option<Arc<dyn TokenProvider>>) {
        self.token_provider = provider;
    }

    /// Returns a reference to current HTTP configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn token_provider(&self) -> Option<&Arc<dyn TokenProvider>> {
        self.token_provider.as_ref()
    }
}
