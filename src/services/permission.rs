// src/services/permission.rs

//! Permission-gated fetching and relaying of external resources.
//!
//! Some judges serve sample files from another origin. Fetching those needs
//! an explicit grant; without one the request is refused before any I/O.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::parsers::MatchPattern;
use crate::services::delivery::{Signal, SignalSink};
use crate::utils::http::PageFetcher;

/// Fetcher that only reaches URLs covered by a granted pattern.
pub struct PermissionedFetcher {
    grants: Vec<MatchPattern>,
    fetcher: Arc<dyn PageFetcher>,
}

impl PermissionedFetcher {
    pub fn new(granted_origins: &[String], fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let grants = granted_origins
            .iter()
            .map(|pattern| MatchPattern::new(pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { grants, fetcher })
    }

    pub fn is_granted(&self, url: &str) -> bool {
        self.grants.iter().any(|grant| grant.matches(url))
    }

    /// Fetch `url`, or fail with [`AppError::PermissionDenied`] without a grant.
    pub async fn fetch_with_permission(&self, url: &str) -> Result<String> {
        if !self.is_granted(url) {
            return Err(AppError::PermissionDenied {
                url: url.to_string(),
            });
        }
        self.fetcher.fetch(url).await
    }
}

/// Fetch `link` and relay its content to `origin`.
///
/// Any failure, including a missing grant, becomes [`Signal::RequestFailed`].
pub async fn relay_file(fetcher: &PermissionedFetcher, link: &str, origin: &dyn SignalSink) {
    match fetcher.fetch_with_permission(link).await {
        Ok(content) => origin.notify(Signal::FileResult { content }),
        Err(e) => {
            log::warn!("Relay of {} failed: {}", link, e);
            origin.notify(Signal::RequestFailed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;

    const GRANT: &str = "https://codejam.googleapis.com/dashboard/get_file/*";
    const FILE: &str = "https://codejam.googleapis.com/dashboard/get_file/abc123";

    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl PageFetcher for CountingFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::fetch(url, "status 500"))
            } else {
                Ok("sample data".to_string())
            }
        }
    }

    fn gated(grants: &[&str], inner: Arc<CountingFetcher>) -> PermissionedFetcher {
        let grants: Vec<String> = grants.iter().map(|g| g.to_string()).collect();
        PermissionedFetcher::new(&grants, inner).unwrap()
    }

    #[tokio::test]
    async fn denied_without_grant_and_no_fetch() {
        let inner = Arc::new(CountingFetcher::default());
        let fetcher = gated(&[], inner.clone());

        let err = fetcher.fetch_with_permission(FILE).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied { .. }));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn relay_sends_content_when_granted() {
        let inner = Arc::new(CountingFetcher::default());
        let fetcher = gated(&[GRANT], inner.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        relay_file(&fetcher, FILE, &tx).await;
        assert_eq!(
            rx.recv().await,
            Some(Signal::FileResult {
                content: "sample data".to_string()
            })
        );
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn relay_reports_request_failed() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let denied = gated(&[], Arc::new(CountingFetcher::default()));
        relay_file(&denied, FILE, &tx).await;
        assert_eq!(rx.recv().await, Some(Signal::RequestFailed));

        let broken = gated(
            &[GRANT],
            Arc::new(CountingFetcher {
                fail: true,
                ..CountingFetcher::default()
            }),
        );
        relay_file(&broken, FILE, &tx).await;
        assert_eq!(rx.recv().await, Some(Signal::RequestFailed));
    }

    #[test]
    fn invalid_grant_is_rejected() {
        let result = PermissionedFetcher::new(
            &["codejam.googleapis.com".to_string()],
            Arc::new(CountingFetcher::default()),
        );
        assert!(result.is_err());
    }
}
