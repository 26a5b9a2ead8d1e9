//! Client configuration for the directory service.

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default directory service URL
pub const DEFAULT_API_URL: &str = "https://api.eatsavvy.org";

/// Connection settings for [`DirectoryClient`](crate::DirectoryClient)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the directory service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent as `Authorization`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read `EATSAVVY_API_URL` and `EATSAVVY_API_KEY`, falling back to defaults
    pub fn from_env() -> Self {
        let base_url = env::var("EATSAVVY_API_URL").unwrap_or_else(|_| default_base_url());
        let api_key = env::var("EATSAVVY_API_KEY").ok().filter(|k| !k.is_empty());

        Self {
            base_url,
            api_key,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Check the settings before building a client
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SdkError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(SdkError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
