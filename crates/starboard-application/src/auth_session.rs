//! Auth session tracking and identity-gated observation.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use starboard_core::auth::AuthProvider;
use starboard_core::identity::Identity;
use starboard_core::stream::Subscription;

/// Tracks the current signed-in identity as a continuously observable
/// value.
///
/// `AuthSession` registers exactly one listener with the external provider
/// at construction and forwards its emissions into a `watch` channel.
/// Dropping the session aborts the forwarding task, so no provider
/// callback is observed after teardown.
///
/// Downstream components gate remote access behind authentication through
/// [`AuthSession::bind_to_identity`], the single point where "which remote
/// stream am I reading" follows the identity.
pub struct AuthSession {
    provider: Arc<dyn AuthProvider>,
    identity_rx: watch::Receiver<Option<Identity>>,
    forward_task: JoinHandle<()>,
}

impl AuthSession {
    /// Creates a session bound to `provider`.
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (identity_tx, identity_rx) = watch::channel(provider.current_identity());
        let mut changes = provider.identity_changes();
        let forward_task = tokio::spawn(async move {
            while let Some(identity) = changes.recv().await {
                identity_tx.send_replace(identity);
            }
        });
        Self {
            provider,
            identity_rx,
            forward_task,
        }
    }

    /// Returns the identity signed in right now, if any.
    pub fn current_identity(&self) -> Option<Identity> {
        self.identity_rx.borrow().clone()
    }

    /// Returns a watch receiver over the identity value.
    pub fn identity_watch(&self) -> watch::Receiver<Option<Identity>> {
        self.identity_rx.clone()
    }

    /// Signs the current identity out via the provider.
    ///
    /// # Panics
    ///
    /// Panics if the provider rejects the sign-out. A failing sign-out is
    /// unreachable in a correctly configured app, and there is no state
    /// the caller could meaningfully continue with.
    pub fn sign_out(&self) {
        if let Err(err) = self.provider.sign_out() {
            panic!("sign-out must not fail: {err}");
        }
    }

    /// Re-subscribes `when_present` every time the identity changes and
    /// emits `when_absent` immediately while no identity is present.
    ///
    /// The switch runs as a spawned task: while signed in it forwards the
    /// inner subscription created for that identity; on any identity
    /// change the inner subscription is dropped and rebuilt. The task
    /// exits once the returned subscription is dropped or the session is
    /// torn down.
    pub fn bind_to_identity<T, F>(&self, when_absent: T, when_present: F) -> Subscription<T>
    where
        T: Clone + Send + 'static,
        F: Fn(Identity) -> Subscription<T> + Send + 'static,
    {
        let mut identity_rx = self.identity_rx.clone();
        let (tx, out) = Subscription::channel();
        tokio::spawn(async move {
            loop {
                let identity = identity_rx.borrow_and_update().clone();
                match identity {
                    None => {
                        if tx.send(when_absent.clone()).is_err() {
                            return;
                        }
                        tokio::select! {
                            changed = identity_rx.changed() => {
                                if changed.is_err() {
                                    return;
                                }
                            }
                            _ = tx.closed() => return,
                        }
                    }
                    Some(identity) => {
                        let mut inner = when_present(identity);
                        loop {
                            tokio::select! {
                                changed = identity_rx.changed() => {
                                    if changed.is_err() {
                                        return;
                                    }
                                    break;
                                }
                                item = inner.recv() => match item {
                                    Some(value) => {
                                        if tx.send(value).is_err() {
                                            return;
                                        }
                                    }
                                    None => {
                                        // Inner stream ended; nothing more to
                                        // forward until the identity changes.
                                        tokio::select! {
                                            changed = identity_rx.changed() => {
                                                if changed.is_err() {
                                                    return;
                                                }
                                                break;
                                            }
                                            _ = tx.closed() => return,
                                        }
                                    }
                                },
                            }
                        }
                        // Inner subscription dropped here before re-binding.
                    }
                }
            }
        });
        out
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        self.forward_task.abort();
    }
}
