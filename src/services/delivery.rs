// src/services/delivery.rs

//! Task delivery.
//!
//! Sends a payload to every host independently. A host that fails is logged
//! and skipped; the origin only ever learns that all attempts finished.

use futures::future;
use tokio::sync::mpsc::UnboundedSender;

use crate::services::hosts::HostSource;

/// Messages sent back to whoever requested an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Every delivery attempt for one task has settled.
    TaskSent,
    /// The relayed resource's content.
    FileResult { content: String },
    /// The relayed resource could not be fetched.
    RequestFailed,
}

/// Receives signals for the origin of a request.
pub trait SignalSink: Send + Sync {
    fn notify(&self, signal: Signal);
}

impl SignalSink for UnboundedSender<Signal> {
    fn notify(&self, signal: Signal) {
        if self.send(signal).is_err() {
            log::debug!("Signal dropped, origin is gone");
        }
    }
}

/// Attempt counts for one delivery, kept for logging only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub failed: usize,
}

/// Fans payloads out to the current host set.
pub struct Delivery {
    source: Box<dyn HostSource>,
}

impl Delivery {
    pub fn new(source: impl HostSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Send `payload` to every host and then signal `origin` exactly once.
    pub async fn deliver(&self, payload: &str, origin: &dyn SignalSink) {
        let report = self.send_all(payload).await;
        log::info!(
            "Delivered to {}/{} receivers",
            report.attempted - report.failed,
            report.attempted
        );
        origin.notify(Signal::TaskSent);
    }

    async fn send_all(&self, payload: &str) -> DeliveryReport {
        let hosts = match self.source.hosts().await {
            Ok(hosts) => hosts,
            Err(e) => {
                log::warn!("Could not resolve receivers: {}", e);
                return DeliveryReport::default();
            }
        };

        let attempts = hosts.iter().map(|host| async move {
            match host.send(payload).await {
                Ok(()) => {
                    log::debug!("Sent task to {}", host.address());
                    true
                }
                Err(e) => {
                    log::debug!("Receiver {} unavailable: {}", host.address(), e);
                    false
                }
            }
        });

        let outcomes = future::join_all(attempts).await;
        DeliveryReport {
            attempted: outcomes.len(),
            failed: outcomes.iter().filter(|ok| !**ok).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;
    use crate::error::{AppError, Result};
    use crate::services::hosts::Host;

    #[derive(Clone)]
    struct CountingHost {
        id: usize,
        fails: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Host for CountingHost {
        fn address(&self) -> String {
            format!("fake://{}", self.id)
        }

        async fn send(&self, _payload: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fails {
                Err(AppError::fetch(self.address(), "connection refused"))
            } else {
                Ok(())
            }
        }
    }

    struct FixedHosts(Vec<CountingHost>);

    #[async_trait]
    impl HostSource for FixedHosts {
        async fn hosts(&self) -> Result<Vec<Box<dyn Host>>> {
            Ok(self
                .0
                .iter()
                .cloned()
                .map(|h| Box::new(h) as Box<dyn Host>)
                .collect())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl HostSource for BrokenSource {
        async fn hosts(&self) -> Result<Vec<Box<dyn Host>>> {
            Err(AppError::config("no receivers"))
        }
    }

    fn host(id: usize, fails: bool) -> CountingHost {
        CountingHost {
            id,
            fails,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[tokio::test]
    async fn failing_receiver_does_not_block_others() {
        let hosts = vec![host(1, false), host(2, true), host(3, false)];
        let delivery = Delivery::new(FixedHosts(hosts.clone()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        delivery.deliver("{}", &tx).await;
        drop(tx);

        assert_eq!(rx.recv().await, Some(Signal::TaskSent));
        assert_eq!(rx.recv().await, None);
        for h in &hosts {
            assert_eq!(h.calls.load(Ordering::SeqCst), 1, "host {}", h.id);
        }
    }

    #[tokio::test]
    async fn report_counts_failures() {
        let delivery = Delivery::new(FixedHosts(vec![host(1, true), host(2, false)]));
        let report = delivery.send_all("{}").await;
        assert_eq!(report, DeliveryReport { attempted: 2, failed: 1 });
    }

    #[tokio::test]
    async fn unresolvable_hosts_still_signal_completion() {
        let delivery = Delivery::new(BrokenSource);
        let (tx, mut rx) = mpsc::unbounded_channel();

        delivery.deliver("{}", &tx).await;
        drop(tx);

        assert_eq!(rx.recv().await, Some(Signal::TaskSent));
        assert_eq!(rx.recv().await, None);
    }
}
