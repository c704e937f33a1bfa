use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8082/api/v1";
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

pub const ENDPOINT_VAR: &str = "STOREFRONT_ENDPOINT";
pub const DEBOUNCE_VAR: &str = "STOREFRONT_DEBOUNCE_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Base URL of the storefront service, without a trailing slash.
    pub endpoint: String,
    /// How long search input has to be quiet before a search is sent.
    pub debounce_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidDelay {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{var} must not be empty")]
    EmptyEndpoint { var: &'static str },
}

impl StorefrontConfig {
    /// Defaults, overridden by `STOREFRONT_ENDPOINT` and `STOREFRONT_DEBOUNCE_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            let endpoint = endpoint.trim().trim_end_matches('/');
            if endpoint.is_empty() {
                return Err(ConfigError::EmptyEndpoint { var: ENDPOINT_VAR });
            }
            config.endpoint = endpoint.to_string();
        }

        if let Some(value) = lookup(DEBOUNCE_VAR) {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidDelay {
                    var: DEBOUNCE_VAR,
                    value: value.clone(),
                    source,
                })?;
            config.debounce_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }
}
