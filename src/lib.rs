//! Client-side authentication lifecycle coordination.
//!
//! Wraps a remote identity provider behind a state store plus a
//! lifecycle event subscription mechanism, so application modules can
//! react to sign-in/sign-out transitions without coupling to the
//! provider SDK. The provider itself is a trait seam; raw provider
//! events arrive on an in-process hub and are mapped to the four
//! canonical lifecycle events before being fanned out to subscribers.

use std::sync::Arc;

// Export modules
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod hub;
pub mod provider;
pub mod state;

pub use config::{apply_config_adapter, resolve_redirect_url, AuthConfig, OAuthConfig};
pub use coordinator::{
    CoordinatorHandle, EventMapping, InitializeOptions, LifecycleCoordinator, AUTH_CHANNEL,
};
pub use error::AuthError;
pub use events::{
    AuthEventDispatcher, AuthEventSubscriber, AuthLifecycleEvent, SubscriberRegistry,
};
pub use hub::{AuthHub, HubEvent, HubListenerHandle, ListenerToken};
pub use provider::{
    DeleteUserOutput, IdentityProvider, SignOutOptions, SignUpOutcome, SocialProvider, UserRecord,
};
pub use state::{AuthStateStore, AuthStatus};

/// Top-level composition of the authentication coordination layer.
///
/// Owns the state store, subscriber registry, dispatcher and lifecycle
/// coordinator as explicit, shareable containers; there is no ambient
/// global state.
pub struct AuthClient {
    store: Arc<AuthStateStore>,
    registry: Arc<SubscriberRegistry>,
    dispatcher: Arc<AuthEventDispatcher>,
    coordinator: LifecycleCoordinator,
    hub: AuthHub,
}

impl AuthClient {
    /// Create a client over the given identity provider with a private
    /// hub and the default raw event vocabulary
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::with_hub(provider, AuthHub::new())
    }

    /// Create a client listening on an externally owned hub, so the
    /// provider SDK glue can push raw events onto it
    pub fn with_hub(provider: Arc<dyn IdentityProvider>, hub: AuthHub) -> Self {
        let store = Arc::new(AuthStateStore::new(provider));
        let registry = Arc::new(SubscriberRegistry::new());
        let dispatcher = Arc::new(AuthEventDispatcher::new(
            Arc::clone(&store),
            Arc::clone(&registry),
        ));
        let coordinator = LifecycleCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&dispatcher),
            hub.clone(),
        );

        Self {
            store,
            registry,
            dispatcher,
            coordinator,
            hub,
        }
    }

    /// Replace the raw-to-canonical event mapping
    pub fn with_event_mapping(mut self, mapping: EventMapping) -> Self {
        self.coordinator = self.coordinator.with_event_mapping(mapping);
        self
    }

    /// Subscribe to the raw event bus and run the gated one-time
    /// initialization; the returned handle projects
    /// `{is_initialized, is_authenticated}` and tears the hub
    /// subscription down when dropped
    pub async fn initialize_authentication(&self, options: InitializeOptions) -> CoordinatorHandle {
        self.coordinator.start(options).await
    }

    /// The state store: status snapshot plus every provider-backed
    /// action
    pub fn state(&self) -> Arc<AuthStateStore> {
        Arc::clone(&self.store)
    }

    /// Snapshot of the current authentication status
    pub fn status(&self) -> AuthStatus {
        self.store.status()
    }

    /// The subscriber registry's `{subscribe, unsubscribe}` surface
    pub fn subscribers(&self) -> Arc<SubscriberRegistry> {
        Arc::clone(&self.registry)
    }

    /// Direct access to the lifecycle event dispatcher
    pub fn dispatcher(&self) -> Arc<AuthEventDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// The raw event hub this client listens on
    pub fn hub(&self) -> AuthHub {
        self.hub.clone()
    }
}
