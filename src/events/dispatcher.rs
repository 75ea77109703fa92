use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use super::{AuthLifecycleEvent, SubscriberRegistry};
use crate::state::AuthStateStore;

/// Best-effort broadcast of lifecycle events to registered subscribers.
///
/// Dispatch never fails: each subscriber callback runs inside its own
/// failure boundary, and one callback's error cannot abort the others,
/// skip the state refresh, or reach the dispatcher's caller. Callback
/// errors are deliberately not logged either; they are the subscriber's
/// concern, not the dispatcher's.
pub struct AuthEventDispatcher {
    store: Arc<AuthStateStore>,
    registry: Arc<SubscriberRegistry>,
}

impl AuthEventDispatcher {
    pub fn new(store: Arc<AuthStateStore>, registry: Arc<SubscriberRegistry>) -> Self {
        Self { store, registry }
    }

    /// Fan a lifecycle event out to every currently registered
    /// subscriber.
    ///
    /// For events that change what the provider reports (`SignIn`,
    /// `SignInFailure`, `SignOut`) the auth state is refreshed first,
    /// before any subscriber is notified. The registry is snapshotted at
    /// dispatch time; subscribers added mid-dispatch are not picked up.
    /// Resolves once every callback has settled.
    pub async fn dispatch(&self, event: AuthLifecycleEvent) {
        // Snapshot at entry; subscribers registered while the refresh
        // is in flight are not part of this dispatch
        let subscribers = self.registry.snapshot().await;

        if event.refreshes_state() {
            self.store.refresh_auth_state().await;
        }

        debug!(
            event = ?event,
            subscribers = subscribers.len(),
            "Dispatching lifecycle event"
        );

        let notifications: Vec<_> = subscribers
            .iter()
            .filter_map(|subscriber| subscriber.callback_for(event))
            .map(|callback| callback())
            .collect();

        for result in join_all(notifications).await {
            // Settle-all barrier; callback failures are discarded
            let _ = result;
        }
    }
}
