// src/pipeline/relay.rs

//! Relay an external file to the requesting origin.

use std::sync::Arc;

use crate::error::Result;
use crate::models::PermissionConfig;
use crate::services::{PermissionedFetcher, SignalSink, relay_file};
use crate::utils::http::PageFetcher;

/// Fetch `link` under the configured grants and signal the result.
///
/// Only an invalid grant pattern is an error; fetch failures and missing
/// grants reach the origin as `RequestFailed`.
pub async fn run_relay(
    permissions: &PermissionConfig,
    fetcher: Arc<dyn PageFetcher>,
    link: &str,
    origin: &dyn SignalSink,
) -> Result<()> {
    let gated = PermissionedFetcher::new(&permissions.granted_origins, fetcher)?;
    if !gated.is_granted(link) {
        log::warn!("No grant covers {}", link);
    }
    relay_file(&gated, link, origin).await;
    Ok(())
}
