//! HTTP-backed proposal feed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::interval;

use starboard_core::error::{Result, StarboardError};
use starboard_core::proposal::{Proposal, ProposalFeed};
use starboard_core::stream::{Publisher, Subscription};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Proposal feed reading `GET {base}/proposals`.
///
/// The remote collection has no push channel over plain HTTP, so live
/// updates are approximated by an optional background poll; subscribers
/// always receive the latest fetched list immediately on attach.
pub struct HttpProposalFeed {
    client: Client,
    base_url: String,
    proposals: Publisher<Option<Vec<Proposal>>>,
    polling: AtomicBool,
}

impl HttpProposalFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            proposals: Publisher::new(),
            polling: AtomicBool::new(false),
        }
    }

    /// Performs the first fetch.
    ///
    /// A failure here publishes the absent marker so consumers can show
    /// their initial-load error state; later refresh failures are
    /// reported to the refresh caller instead.
    pub async fn initialize(&self) {
        match self.fetch().await {
            Ok(proposals) => self.proposals.send(Some(proposals)),
            Err(err) => {
                tracing::warn!("initial proposal load failed: {}", err);
                self.proposals.send(None);
            }
        }
    }

    /// Starts a background re-fetch loop.
    ///
    /// Poll failures are logged and skipped; the next tick tries again.
    /// The poller holds the feed alive for the lifetime of the process.
    pub fn start_polling(self: &Arc<Self>, interval_secs: u64) {
        if self.polling.swap(true, Ordering::SeqCst) {
            tracing::warn!("[ProposalFeed] poller already running, skipping");
            return;
        }

        let feed = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(interval_secs));
            // The first tick completes immediately; `initialize` already
            // covered that fetch.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(err) = feed.refresh().await {
                    tracing::warn!("[ProposalFeed] poll failed: {}", err);
                }
            }
        });
    }

    async fn fetch(&self) -> Result<Vec<Proposal>> {
        let url = format!("{}/proposals", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| StarboardError::feed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StarboardError::feed(format!("feed returned {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StarboardError::feed(format!("failed to read feed body: {}", e)))?;
        let proposals = serde_json::from_str(&body)?;
        Ok(proposals)
    }
}

#[async_trait]
impl ProposalFeed for HttpProposalFeed {
    fn subscribe(&self) -> Subscription<Option<Vec<Proposal>>> {
        self.proposals.subscribe()
    }

    async fn refresh(&self) -> Result<()> {
        let proposals = self.fetch().await?;
        self.proposals.send(Some(proposals));
        Ok(())
    }
}
