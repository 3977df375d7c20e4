//! HTTP-backed profile document store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::task::JoinHandle;
use tokio::time::interval;

use starboard_core::error::{Result, StarboardError};
use starboard_core::profile::{ProfileDocumentStore, UserProfile};
use starboard_core::stream::{Publisher, Subscription};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Profile document store reading and writing `{base}/users/{id}`.
///
/// `get`/`set` map directly onto GET/PUT of the full document. Live
/// updates combine a per-user poll loop with a local write-through echo:
/// a successful `set` is published to subscribers immediately, so a star
/// toggled on this device is observed without waiting for the next poll.
pub struct HttpProfileDocumentStore {
    client: Client,
    base_url: String,
    poll_interval: Duration,
    publishers: Mutex<HashMap<String, Arc<Publisher<Result<UserProfile>>>>>,
    pollers: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl HttpProfileDocumentStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            publishers: Mutex::new(HashMap::new()),
            pollers: Mutex::new(HashMap::new()),
        }
    }

    /// Overrides the poll interval for remote-change detection.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn document_url(&self, user_id: &str) -> String {
        format!("{}/users/{}", self.base_url, user_id)
    }

    fn publishers(&self) -> MutexGuard<'_, HashMap<String, Arc<Publisher<Result<UserProfile>>>>> {
        self.publishers.lock().unwrap()
    }

    fn publisher(&self, user_id: &str) -> Arc<Publisher<Result<UserProfile>>> {
        self.publishers()
            .entry(user_id.to_string())
            .or_default()
            .clone()
    }

    /// Spawns the poll loop for `user_id` if it is not already running.
    fn ensure_poller(&self, user_id: &str) {
        let mut pollers = self.pollers.lock().unwrap();
        if pollers.contains_key(user_id) {
            return;
        }

        let client = self.client.clone();
        let url = self.document_url(user_id);
        let publisher = self.publisher(user_id);
        let poll_interval = self.poll_interval;
        let handle = tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            let mut last: Option<UserProfile> = None;
            loop {
                ticker.tick().await;
                match fetch_document(&client, &url).await {
                    Ok(profile) => {
                        if last.as_ref() == Some(&profile) {
                            continue;
                        }
                        last = Some(profile.clone());
                        publisher.send(Ok(profile));
                    }
                    Err(err) => {
                        tracing::warn!("[ProfileStore] poll failed: {}", err);
                        last = None;
                        publisher.send(Err(err));
                    }
                }
            }
        });
        pollers.insert(user_id.to_string(), handle);
    }
}

async fn fetch_document(client: &Client, url: &str) -> Result<UserProfile> {
    let response = client
        .get(url)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(|e| StarboardError::data_access(format!("request failed: {}", e)))?;

    // A user who has never starred anything has no document yet.
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(UserProfile::empty());
    }

    let status = response.status();
    if !status.is_success() {
        return Err(StarboardError::data_access(format!(
            "document read returned {}",
            status
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| StarboardError::data_access(format!("failed to read document body: {}", e)))?;
    let profile = serde_json::from_str(&body)?;
    Ok(profile)
}

#[async_trait]
impl ProfileDocumentStore for HttpProfileDocumentStore {
    async fn get(&self, user_id: &str) -> Result<UserProfile> {
        fetch_document(&self.client, &self.document_url(user_id)).await
    }

    async fn set(&self, user_id: &str, profile: &UserProfile) -> Result<()> {
        let response = self
            .client
            .put(self.document_url(user_id))
            .timeout(REQUEST_TIMEOUT)
            .json(profile)
            .send()
            .await
            .map_err(|e| StarboardError::data_access(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StarboardError::data_access(format!(
                "document write returned {}",
                status
            )));
        }

        // Write-through echo for local subscribers.
        self.publisher(user_id).send(Ok(profile.clone()));
        Ok(())
    }

    fn subscribe(&self, user_id: &str) -> Subscription<Result<UserProfile>> {
        let subscription = self.publisher(user_id).subscribe();
        self.ensure_poller(user_id);
        subscription
    }
}

impl Drop for HttpProfileDocumentStore {
    fn drop(&mut self) {
        for poller in self.pollers.lock().unwrap().values() {
            poller.abort();
        }
    }
}
