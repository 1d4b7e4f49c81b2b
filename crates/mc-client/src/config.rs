//! Connection settings for a Mimecast tenant.

use crate::retry::RetryConfig;
use std::time::Duration;

/// Global gateway host. Regional tenants override it with their grid's host.
pub const DEFAULT_BASE_URL: &str = "https://us-api.mimecast.com";

/// `pageSize` sent with every paginated listing.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// `None` turns transport retries off entirely.
    pub retry: Option<RetryConfig>,
    pub page_size: u32,
    /// Whole-request deadline, per attempt.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    /// Emit a debug event for every request and response.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: Some(RetryConfig::default()),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Defaults pointed at another gateway host.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self::builder().with_base_url(base_url).build()
    }
}

/// Step-by-step construction of a [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Trailing slashes are dropped so paths can be appended as-is.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.config.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = Some(retry);
        self
    }

    pub fn without_retry(mut self) -> Self {
        self.config.retry = None;
        self
    }

    /// Values of zero are raised to one; the gateway rejects an empty page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = page_size.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.config.connect_timeout = connect_timeout;
        self
    }

    pub fn with_pool(mut self, idle_timeout: Duration, max_idle_per_host: usize) -> Self {
        self.config.pool_idle_timeout = idle_timeout;
        self.config.pool_max_idle_per_host = max_idle_per_host;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_tracing(mut self, enable_tracing: bool) -> Self {
        self.config.enable_tracing = enable_tracing;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
