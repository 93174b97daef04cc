//! Configuration options for the FoodShare client

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the backend origin
pub const ENV_ORIGIN: &str = "FOODSHARE_API_ORIGIN";
/// Environment variable overriding the API path prefix
pub const ENV_PREFIX: &str = "FOODSHARE_API_PREFIX";
/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT: &str = "FOODSHARE_TIMEOUT_SECS";

/// Configuration options for the FoodShare client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Scheme, host and port of the backend
    pub origin: String,

    /// Path prefix under which the API is mounted
    pub api_prefix: String,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Value sent in the User-Agent header
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            origin: "http://localhost:6069".to_string(),
            api_prefix: "/api".to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            user_agent: format!("foodshare-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Build options from the process environment
    ///
    /// `FOODSHARE_API_ORIGIN` is required so that no environment ends up
    /// talking to a default host by accident.
    pub fn from_env() -> Result<Self> {
        let origin = env::var(ENV_ORIGIN)
            .map_err(|_| Error::config(format!("{} must be set", ENV_ORIGIN)))?;
        let mut options = Self::default().with_origin(&origin);

        if let Ok(prefix) = env::var(ENV_PREFIX) {
            options = options.with_api_prefix(&prefix);
        }

        if let Ok(secs) = env::var(ENV_TIMEOUT) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("{} must be a whole number of seconds", ENV_TIMEOUT)))?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(options)
    }

    /// Set the backend origin
    pub fn with_origin(mut self, value: &str) -> Self {
        self.origin = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the API path prefix
    pub fn with_api_prefix(mut self, value: &str) -> Self {
        let trimmed = value.trim_matches('/');
        self.api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the User-Agent header value
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }

    /// Origin joined with the API prefix, e.g. `http://localhost:6069/api`
    pub fn base_url(&self) -> String {
        format!("{}{}", self.origin, self.api_prefix)
    }
}
