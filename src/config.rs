use std::env;
use std::num::NonZeroUsize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4200/assets/data/";
/// TCP connection establishment timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Whole-request timeout covering connect + response body.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(11);
pub const DEFAULT_RELATED_LIMIT: usize = 6;
pub const DEFAULT_FEATURED_COUNT: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Catalog settings.
///
/// Configuration via environment variables (all optional):
/// - `MONSTERBOX_BASE_URL`: directory URL holding `articles-index.json`
/// - `MONSTERBOX_CONNECT_TIMEOUT_SECS` / `MONSTERBOX_TIMEOUT_SECS`: HTTP timeouts
/// - `MONSTERBOX_PAGE_SIZE`: articles per listing page
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub page_size: NonZeroUsize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(base_url) = get("MONSTERBOX_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(v) = get("MONSTERBOX_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout =
                Duration::from_secs(parse_positive("MONSTERBOX_CONNECT_TIMEOUT_SECS", v)?.get() as u64);
        }
        if let Some(v) = get("MONSTERBOX_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_positive("MONSTERBOX_TIMEOUT_SECS", v)?.get() as u64);
        }
        if let Some(v) = get("MONSTERBOX_PAGE_SIZE") {
            config.page_size = parse_positive("MONSTERBOX_PAGE_SIZE", v)?;
        }
        Ok(config)
    }
}

fn parse_positive(var: &'static str, value: String) -> Result<NonZeroUsize, ConfigError> {
    value
        .parse::<NonZeroUsize>()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}
