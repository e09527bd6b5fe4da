// src/services/hosts.rs

//! Local receivers ("hosts") that accept task payloads.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{Config, DeliveryConfig};

/// A local tool listening for tasks.
#[async_trait]
pub trait Host: Send + Sync {
    /// Where the host lives, for logging.
    fn address(&self) -> String;

    /// Send one serialized payload.
    async fn send(&self, payload: &str) -> Result<()>;
}

/// Resolves the set of hosts for one delivery attempt.
#[async_trait]
pub trait HostSource: Send + Sync {
    async fn hosts(&self) -> Result<Vec<Box<dyn Host>>>;
}

/// A receiver listening for `POST /` on a localhost port.
pub struct HttpHost {
    port: u16,
    client: Client,
    timeout: Duration,
}

impl HttpHost {
    pub fn new(port: u16, client: Client, timeout: Duration) -> Self {
        Self {
            port,
            client,
            timeout,
        }
    }
}

#[async_trait]
impl Host for HttpHost {
    fn address(&self) -> String {
        format!("http://localhost:{}/", self.port)
    }

    async fn send(&self, payload: &str) -> Result<()> {
        let address = self.address();
        let response = self
            .client
            .post(&address)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .body(payload.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(address, format!("receiver answered {status}")));
        }
        Ok(())
    }
}

/// Hosts built from the delivery configuration.
///
/// When a config path is set the file is re-read on every call, so port
/// changes apply to the next task without a restart.
pub struct ConfiguredHosts {
    client: Client,
    config_path: Option<PathBuf>,
    fallback: DeliveryConfig,
}

impl ConfiguredHosts {
    pub fn new(client: Client, fallback: DeliveryConfig) -> Self {
        Self {
            client,
            config_path: None,
            fallback,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    async fn current_config(&self) -> DeliveryConfig {
        match &self.config_path {
            Some(path) => match Config::load_async(path).await {
                Ok(config) => config.delivery,
                Err(e) => {
                    log::debug!("Using startup delivery config, reload of {:?} failed: {}", path, e);
                    self.fallback.clone()
                }
            },
            None => self.fallback.clone(),
        }
    }
}

#[async_trait]
impl HostSource for ConfiguredHosts {
    async fn hosts(&self) -> Result<Vec<Box<dyn Host>>> {
        let config = self.current_config().await;
        let timeout = Duration::from_secs(config.timeout_secs);

        Ok(config
            .all_ports()
            .map(|port| Box::new(HttpHost::new(port, self.client.clone(), timeout)) as Box<dyn Host>)
            .collect())
    }
}
