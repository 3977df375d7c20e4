//! List presentation state machine.
//!
//! `ListPresentation` folds catalog updates and user intents into a
//! renderable view state. All mutable state lives inside one spawned
//! driver task (the serialized execution context); public operations send
//! intents over a channel and the platform shell observes snapshots
//! through a `watch` receiver. Suspending work (feed refresh, the
//! minimum-duration delay, star toggles) is spawned off the driver and
//! re-enters it as internal events, so the driver never blocks while a
//! remote call is in flight.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use starboard_core::error::Result;
use starboard_core::proposal::EnrichedProposal;
use starboard_core::search::{self, Suggestion};
use starboard_core::stream::Subscription;

use crate::auth_session::AuthSession;
use crate::catalog::ProposalCatalog;

/// Minimum user-visible duration of a pull-to-refresh.
pub const DEFAULT_MIN_REFRESH_DELAY: Duration = Duration::from_secs(1);

/// Item predicate fixed for the lifetime of one presenter instance
/// (e.g. "all" vs "starred-only").
pub type ItemFilter = Arc<dyn Fn(&EnrichedProposal) -> bool + Send + Sync>;

/// UX acknowledgment callback fired on an authenticated star tap
/// (haptics on platforms that have them).
pub type FeedbackCallback = Arc<dyn Fn() + Send + Sync>;

/// The three top-level presentation states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresentationState {
    /// Initial state, and the state while an empty feed has never
    /// produced content
    Loading,
    /// The feed failed on initial or retry load; full-screen error
    Error,
    /// Content is on screen and survives subsequent catalog updates
    Success(Content),
}

/// The data-source side of `Success`.
///
/// `filtered_items` and `suggestions` are derived on demand and never
/// stored, so they can not drift from `all_items` + `search_query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Every item that passed the instance filter, unsearched
    pub all_items: Vec<EnrichedProposal>,
    /// The live search query
    pub search_query: String,
}

impl Content {
    fn new(all_items: Vec<EnrichedProposal>) -> Self {
        Self {
            all_items,
            search_query: String::new(),
        }
    }

    /// Items matching the current query.
    pub fn filtered_items(&self) -> Vec<EnrichedProposal> {
        search::search(&self.all_items, &self.search_query)
    }

    /// Search suggestions for the current query.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        search::suggestions(&self.all_items, &self.search_query)
    }
}

/// Snapshot rendered by the platform shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListViewState {
    pub state: PresentationState,
    /// A guest tapped star; the shell should present the sign-in sheet
    pub auth_required: bool,
    /// A pull-to-refresh failed; the shell should present a transient
    /// alert without leaving the current state
    pub network_error: bool,
}

impl ListViewState {
    fn initial() -> Self {
        Self {
            state: PresentationState::Loading,
            auth_required: false,
            network_error: false,
        }
    }
}

enum Intent {
    QueryChanged(String),
    StarTapped(EnrichedProposal),
    Refresh { done: oneshot::Sender<()> },
    Retry,
    DismissAuthPrompt,
    DismissNetworkError,
}

enum InternalEvent {
    RefreshFinished {
        result: Result<()>,
        done: oneshot::Sender<()>,
    },
    RetryFinished(Result<()>),
}

/// Drives one proposal list (all or starred-only) for the platform shell.
///
/// Construct one instance per list view; several instances may share one
/// [`ProposalCatalog`]. The instance filter is fixed at construction.
pub struct ListPresentation {
    auth: Arc<AuthSession>,
    catalog: Arc<ProposalCatalog>,
    filter: ItemFilter,
    feedback: Option<FeedbackCallback>,
    min_refresh_delay: Duration,
    intent_tx: mpsc::UnboundedSender<Intent>,
    state_rx: watch::Receiver<ListViewState>,
    wiring: Mutex<Wiring>,
}

/// One-time wiring taken by the first `on_appear`; `driver` present means
/// the subscription is established.
struct Wiring {
    intent_rx: Option<mpsc::UnboundedReceiver<Intent>>,
    state_tx: Option<watch::Sender<ListViewState>>,
    driver: Option<JoinHandle<()>>,
}

impl ListPresentation {
    pub fn new(auth: Arc<AuthSession>, catalog: Arc<ProposalCatalog>, filter: ItemFilter) -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ListViewState::initial());
        Self {
            auth,
            catalog,
            filter,
            feedback: None,
            min_refresh_delay: DEFAULT_MIN_REFRESH_DELAY,
            intent_tx,
            state_rx,
            wiring: Mutex::new(Wiring {
                intent_rx: Some(intent_rx),
                state_tx: Some(state_tx),
                driver: None,
            }),
        }
    }

    /// Installs the UX acknowledgment callback.
    pub fn with_feedback(mut self, feedback: FeedbackCallback) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Overrides the refresh duration floor.
    pub fn with_min_refresh_delay(mut self, delay: Duration) -> Self {
        self.min_refresh_delay = delay;
        self
    }

    fn wiring(&self) -> MutexGuard<'_, Wiring> {
        // Held only for Option takes; no await point ever runs under it.
        self.wiring.lock().unwrap()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ListViewState {
        self.state_rx.borrow().clone()
    }

    /// Watch receiver the shell renders from.
    pub fn watch(&self) -> watch::Receiver<ListViewState> {
        self.state_rx.clone()
    }

    /// Wires the catalog subscription and starts the driver.
    ///
    /// Idempotent: the first call takes the wiring, every later call is a
    /// no-op, so the subscription is established exactly once per
    /// instance no matter how often the shell reports appearance.
    pub fn on_appear(&self) {
        let mut wiring = self.wiring();
        let (Some(intent_rx), Some(state_tx)) = (wiring.intent_rx.take(), wiring.state_tx.take())
        else {
            return;
        };
        let driver = Driver {
            auth: self.auth.clone(),
            catalog: self.catalog.clone(),
            filter: self.filter.clone(),
            feedback: self.feedback.clone(),
            min_refresh_delay: self.min_refresh_delay,
            view: ListViewState::initial(),
        };
        let updates = self.catalog.observe();
        wiring.driver = Some(tokio::spawn(driver.run(intent_rx, state_tx, updates)));
    }

    /// Replaces the search query. No-op unless content is on screen.
    pub fn on_change_query(&self, query: impl Into<String>) {
        let _ = self.intent_tx.send(Intent::QueryChanged(query.into()));
    }

    /// Handles a star tap: toggles when signed in, otherwise raises the
    /// `auth_required` flag without touching any remote document.
    pub fn on_tap_star(&self, proposal: &EnrichedProposal) {
        let _ = self.intent_tx.send(Intent::StarTapped(proposal.clone()));
    }

    /// Pull-to-refresh. Resolves once both the feed re-fetch and the
    /// minimum-duration delay have elapsed; a failure raises the
    /// `network_error` flag and leaves the state untouched.
    ///
    /// Call after `on_appear`; the shell can only trigger a refresh from
    /// a presented list.
    pub async fn on_refresh(&self) {
        if self.wiring().driver.is_none() {
            return;
        }
        let (done, finished) = oneshot::channel();
        if self.intent_tx.send(Intent::Refresh { done }).is_err() {
            return;
        }
        let _ = finished.await;
    }

    /// Retry from the full-screen error state: back to `Loading`, then a
    /// re-fetch decides between `Success` and `Error`.
    pub fn on_tap_retry(&self) {
        let _ = self.intent_tx.send(Intent::Retry);
    }

    /// The shell dismissed the sign-in sheet.
    pub fn on_dismiss_auth_prompt(&self) {
        let _ = self.intent_tx.send(Intent::DismissAuthPrompt);
    }

    /// The shell dismissed the network error alert.
    pub fn on_dismiss_network_error(&self) {
        let _ = self.intent_tx.send(Intent::DismissNetworkError);
    }
}

impl Drop for ListPresentation {
    fn drop(&mut self) {
        if let Some(driver) = self.wiring().driver.take() {
            driver.abort();
        }
    }
}

/// The serialized execution context: sole owner of the view state.
struct Driver {
    auth: Arc<AuthSession>,
    catalog: Arc<ProposalCatalog>,
    filter: ItemFilter,
    feedback: Option<FeedbackCallback>,
    min_refresh_delay: Duration,
    view: ListViewState,
}

impl Driver {
    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<Intent>,
        state_tx: watch::Sender<ListViewState>,
        updates: Subscription<Option<Vec<EnrichedProposal>>>,
    ) {
        let (internal_tx, mut internal_rx) = mpsc::unbounded_channel();
        let mut updates = Some(updates);
        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.handle_intent(intent, &internal_tx),
                    None => return,
                },
                event = internal_rx.recv() => {
                    // Never `None`: the driver holds a sender.
                    if let Some(event) = event {
                        self.handle_internal(event);
                    }
                },
                update = Self::next_update(&mut updates) => {
                    self.apply_catalog_update(update);
                },
            }
            state_tx.send_replace(self.view.clone());
        }
    }

    /// Receives the next catalog update, parking forever once the catalog
    /// is gone so the select loop keeps serving intents.
    async fn next_update(
        updates: &mut Option<Subscription<Option<Vec<EnrichedProposal>>>>,
    ) -> Option<Vec<EnrichedProposal>> {
        match updates {
            Some(subscription) => match subscription.recv().await {
                Some(update) => update,
                None => {
                    *updates = None;
                    std::future::pending().await
                }
            },
            None => std::future::pending().await,
        }
    }

    fn handle_intent(&mut self, intent: Intent, internal_tx: &mpsc::UnboundedSender<InternalEvent>) {
        match intent {
            Intent::QueryChanged(query) => {
                if let PresentationState::Success(content) = &mut self.view.state {
                    content.search_query = query;
                }
            }
            Intent::StarTapped(proposal) => {
                if self.auth.current_identity().is_some() {
                    if let Some(feedback) = &self.feedback {
                        feedback();
                    }
                    let catalog = self.catalog.clone();
                    tokio::spawn(async move {
                        if let Err(err) = catalog.toggle_star(&proposal).await {
                            tracing::warn!("star toggle failed for {}: {}", proposal.id(), err);
                        }
                    });
                } else {
                    self.view.auth_required = true;
                }
            }
            Intent::Refresh { done } => {
                let catalog = self.catalog.clone();
                let delay = self.min_refresh_delay;
                let internal_tx = internal_tx.clone();
                tokio::spawn(async move {
                    let (_, result) = tokio::join!(tokio::time::sleep(delay), catalog.refresh());
                    let _ = internal_tx.send(InternalEvent::RefreshFinished { result, done });
                });
            }
            Intent::Retry => {
                if self.view.state != PresentationState::Error {
                    return;
                }
                self.view.state = PresentationState::Loading;
                let catalog = self.catalog.clone();
                let internal_tx = internal_tx.clone();
                tokio::spawn(async move {
                    let result = catalog.refresh().await;
                    let _ = internal_tx.send(InternalEvent::RetryFinished(result));
                });
            }
            Intent::DismissAuthPrompt => self.view.auth_required = false,
            Intent::DismissNetworkError => self.view.network_error = false,
        }
    }

    fn handle_internal(&mut self, event: InternalEvent) {
        match event {
            InternalEvent::RefreshFinished { result, done } => {
                if let Err(err) = result {
                    tracing::warn!("refresh failed: {}", err);
                    self.view.network_error = true;
                }
                let _ = done.send(());
            }
            InternalEvent::RetryFinished(result) => {
                if result.is_err() {
                    self.view.state = PresentationState::Error;
                }
                // On success the next catalog emission carries the state
                // to `Success`.
            }
        }
    }

    /// Folds one catalog emission into the state machine.
    ///
    /// The empty-list check runs on the unfiltered emission: a feed that
    /// has produced nothing yet reads as still-loading, while a
    /// starred-only view of a non-empty feed may legitimately show an
    /// empty `Success`.
    fn apply_catalog_update(&mut self, update: Option<Vec<EnrichedProposal>>) {
        match update {
            None => self.view.state = PresentationState::Error,
            Some(items) => {
                let was_empty = items.is_empty();
                let filtered: Vec<EnrichedProposal> = items
                    .into_iter()
                    .filter(|item| (self.filter)(item))
                    .collect();
                if let PresentationState::Success(content) = &mut self.view.state {
                    content.all_items = filtered;
                } else if was_empty {
                    self.view.state = PresentationState::Loading;
                } else {
                    self.view.state = PresentationState::Success(Content::new(filtered));
                }
            }
        }
    }
}
