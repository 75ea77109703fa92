//! Canonical authentication lifecycle events and their subscribers.
//!
//! The dispatcher's internal vocabulary is the four-variant
//! [`AuthLifecycleEvent`]; provider-specific raw event names are mapped
//! onto it by the lifecycle coordinator. Subscribers are records of
//! optional per-event callbacks so a module can register interest in
//! only the events it cares about.

use std::sync::Arc;

use anyhow::Result;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub mod dispatcher;
pub mod registry;


pub use dispatcher::AuthEventDispatcher;
pub use registry::SubscriberRegistry;

/// Canonical lifecycle event, decoupled from any provider's event names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthLifecycleEvent {
    /// A redirect sign-in flow has started
    StartSignIn,
    /// A sign-in completed successfully
    SignIn,
    /// A sign-in attempt failed
    SignInFailure,
    /// The user signed out
    SignOut,
}

impl AuthLifecycleEvent {
    /// Whether dispatching this event refreshes the auth state first.
    ///
    /// Everything except `StartSignIn` changes what the provider reports
    /// for the current user, so the store is re-synced before
    /// subscribers are notified.
    pub fn refreshes_state(&self) -> bool {
        !matches!(self, AuthLifecycleEvent::StartSignIn)
    }
}

/// Boxed async callback invoked on a lifecycle event
pub type SubscriberCallback = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// A subscriber's interest in lifecycle events.
///
/// Each callback is optional; absent callbacks are skipped at dispatch
/// time. Return values are ignored by the dispatcher, so failing and
/// succeeding callbacks are treated alike.
#[derive(Default)]
pub struct AuthEventSubscriber {
    on_start_sign_in: Option<SubscriberCallback>,
    on_sign_in: Option<SubscriberCallback>,
    on_sign_in_failure: Option<SubscriberCallback>,
    on_sign_out: Option<SubscriberCallback>,
}

impl AuthEventSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start_sign_in<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        self.on_start_sign_in = Some(Arc::new(move || Box::pin(callback())));
        self
    }

    pub fn on_sign_in<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        self.on_sign_in = Some(Arc::new(move || Box::pin(callback())));
        self
    }

    pub fn on_sign_in_failure<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        self.on_sign_in_failure = Some(Arc::new(move || Box::pin(callback())));
        self
    }

    pub fn on_sign_out<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        self.on_sign_out = Some(Arc::new(move || Box::pin(callback())));
        self
    }

    /// Wrap into the shared handle the registry holds
    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// The callback registered for a given event, if any
    pub fn callback_for(&self, event: AuthLifecycleEvent) -> Option<&SubscriberCallback> {
        match event {
            AuthLifecycleEvent::StartSignIn => self.on_start_sign_in.as_ref(),
            AuthLifecycleEvent::SignIn => self.on_sign_in.as_ref(),
            AuthLifecycleEvent::SignInFailure => self.on_sign_in_failure.as_ref(),
            AuthLifecycleEvent::SignOut => self.on_sign_out.as_ref(),
        }
    }
}
