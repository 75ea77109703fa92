//! Lifecycle coordinator.
//!
//! Bridges the identity provider's raw event bus to the canonical
//! lifecycle events, drives the one-time initialization of the auth
//! state store, and exposes a stable `{is_initialized,
//! is_authenticated}` view for the UI layer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, trace};

use crate::events::{AuthEventDispatcher, AuthLifecycleEvent};
use crate::hub::{AuthHub, HubEvent, HubListenerHandle};
use crate::state::{AuthStateStore, AuthStatus};

/// Hub channel the identity provider emits auth events on
pub const AUTH_CHANNEL: &str = "auth";

/// Mapping from provider-specific raw event names to canonical events.
///
/// Supplied at construction so the dispatcher core stays
/// provider-agnostic; raw names differ between provider SDK versions.
#[derive(Debug, Clone)]
pub struct EventMapping {
    entries: HashMap<String, AuthLifecycleEvent>,
}

impl EventMapping {
    /// Empty mapping; every raw event is ignored until entries are added
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace a raw-name mapping
    pub fn with_entry(mut self, raw: &str, event: AuthLifecycleEvent) -> Self {
        self.entries.insert(raw.to_string(), event);
        self
    }

    /// Canonical event for a raw provider event name, if mapped
    pub fn resolve(&self, raw: &str) -> Option<AuthLifecycleEvent> {
        self.entries.get(raw).copied()
    }
}

impl Default for EventMapping {
    /// Covers both raw vocabularies seen across provider SDK versions
    fn default() -> Self {
        Self::empty()
            .with_entry("signIn", AuthLifecycleEvent::SignIn)
            .with_entry("signedIn", AuthLifecycleEvent::SignIn)
            .with_entry("signInWithRedirect", AuthLifecycleEvent::SignIn)
            .with_entry("signIn_failure", AuthLifecycleEvent::SignInFailure)
            .with_entry(
                "signInWithRedirect_failure",
                AuthLifecycleEvent::SignInFailure,
            )
            .with_entry("signOut", AuthLifecycleEvent::SignOut)
            .with_entry("signedOut", AuthLifecycleEvent::SignOut)
            .with_entry("codeFlow", AuthLifecycleEvent::StartSignIn)
    }
}

/// Options for starting the coordinator
#[derive(Debug, Clone, Default)]
pub struct InitializeOptions {
    /// External gate: initialization only runs when this is set
    pub can_initialize: bool,
    /// Identity provider region recorded on initialization
    pub region: Option<String>,
}

/// Composes the state store and event dispatcher over the raw hub
pub struct LifecycleCoordinator {
    store: Arc<AuthStateStore>,
    dispatcher: Arc<AuthEventDispatcher>,
    hub: AuthHub,
    mapping: Arc<EventMapping>,
}

impl LifecycleCoordinator {
    pub fn new(
        store: Arc<AuthStateStore>,
        dispatcher: Arc<AuthEventDispatcher>,
        hub: AuthHub,
    ) -> Self {
        Self {
            store,
            dispatcher,
            hub,
            mapping: Arc::new(EventMapping::default()),
        }
    }

    /// Replace the raw-to-canonical event mapping
    pub fn with_event_mapping(mut self, mapping: EventMapping) -> Self {
        self.mapping = Arc::new(mapping);
        self
    }

    /// Subscribe to the raw event bus and run one-time initialization.
    ///
    /// The hub subscription lives as long as the returned handle; raw
    /// events are mapped to canonical events and dispatched on the
    /// runtime. Initialization runs only when `can_initialize` is set
    /// and the store has never been initialized; the initialized state
    /// is terminal for the coordinator's lifetime.
    pub async fn start(&self, options: InitializeOptions) -> CoordinatorHandle {
        let dispatcher = Arc::clone(&self.dispatcher);
        let mapping = Arc::clone(&self.mapping);
        let listener = self.hub.listen(AUTH_CHANNEL, move |event: HubEvent| {
            match mapping.resolve(&event.name) {
                Some(canonical) => {
                    let dispatcher = Arc::clone(&dispatcher);
                    tokio::spawn(async move {
                        dispatcher.dispatch(canonical).await;
                    });
                }
                None => {
                    trace!(raw_event = %event.name, "Ignoring unmapped provider event");
                }
            }
        });

        if options.can_initialize && !self.store.is_initialized() {
            info!("Running one-time authentication initialization");
            self.store
                .initialize_auth_state(options.region.as_deref())
                .await;
        }

        CoordinatorHandle {
            status: self.store.watch(),
            listener: Some(listener),
        }
    }
}

/// Live coordinator subscription.
///
/// Dropping the handle releases the hub subscription; in-flight
/// dispatches run to completion, only new raw events stop arriving.
pub struct CoordinatorHandle {
    status: watch::Receiver<AuthStatus>,
    listener: Option<HubListenerHandle>,
}

impl CoordinatorHandle {
    pub fn is_initialized(&self) -> bool {
        self.status.borrow().is_initialized
    }

    pub fn is_authenticated(&self) -> bool {
        self.status.borrow().is_authenticated
    }

    /// Subscribe to status changes
    pub fn watch(&self) -> watch::Receiver<AuthStatus> {
        self.status.clone()
    }

    /// Release the hub subscription explicitly
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.unsubscribe();
        }
    }
}

impl Drop for CoordinatorHandle {
    fn drop(&mut self) {
        self.release();
    }
}
