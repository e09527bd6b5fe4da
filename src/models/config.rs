//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP fetching behavior for problem and contest pages
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Local receivers tasks are delivered to
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Grants for the permission-gated fetch
    #[serde(default)]
    pub permissions: PermissionConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration without blocking the async runtime.
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.max_concurrent == 0 {
            return Err(AppError::validation("fetcher.max_concurrent must be > 0"));
        }
        if self.delivery.timeout_secs == 0 {
            return Err(AppError::validation("delivery.timeout_secs must be > 0"));
        }
        if self.delivery.all_ports().any(|port| port == 0) {
            return Err(AppError::validation("delivery ports must be > 0"));
        }
        for pattern in &self.permissions.granted_origins {
            crate::parsers::MatchPattern::new(pattern)?;
        }
        Ok(())
    }
}

/// HTTP client settings used to fetch judge pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum problem pages fetched at once for a contest
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Delay between contest problem fetches in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Receiver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Ports of the well-known local receivers
    #[serde(default = "defaults::ports")]
    pub ports: Vec<u16>,

    /// Extra ports configured by the user
    #[serde(default)]
    pub custom_ports: Vec<u16>,

    /// Per-receiver send timeout in seconds
    #[serde(default = "defaults::delivery_timeout")]
    pub timeout_secs: u64,
}

impl DeliveryConfig {
    /// Every configured port, custom ports last, without duplicates.
    pub fn all_ports(&self) -> impl Iterator<Item = u16> + '_ {
        let mut seen = Vec::new();
        self.ports
            .iter()
            .chain(self.custom_ports.iter())
            .copied()
            .filter(move |port| {
                if seen.contains(port) {
                    false
                } else {
                    seen.push(*port);
                    true
                }
            })
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            ports: defaults::ports(),
            custom_ports: Vec::new(),
            timeout_secs: defaults::delivery_timeout(),
        }
    }
}

/// Origins the permission-gated fetch may reach.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PermissionConfig {
    /// Match patterns of granted origins
    #[serde(default)]
    pub granted_origins: Vec<String>,
}

mod defaults {
    // Fetcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; judge-companion/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn request_delay() -> u64 {
        0
    }

    // Delivery defaults
    pub fn ports() -> Vec<u16> {
        vec![1327, 4244, 6174, 10042, 10043, 10045, 27121]
    }
    pub fn delivery_timeout() -> u64 {
        5
    }
}
