//! In-process raw authentication event bus.
//!
//! Stands in for the identity provider SDK's event hub: adapters push
//! raw, provider-vocabulary events onto a named channel, and listeners
//! registered on that channel are invoked with each event. Teardown is
//! available both as an unsubscribe handle returned by [`AuthHub::listen`]
//! and as an explicit [`AuthHub::remove`] call, matching the two forms
//! provider SDKs expose.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use uuid::Uuid;

/// Type for hub listener tokens
pub type ListenerToken = Uuid;

/// A raw event as emitted by the identity provider SDK
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubEvent {
    /// Provider-specific event name (e.g. "signedIn", "signOut")
    pub name: String,
    /// Arbitrary JSON payload with event details
    pub payload: Value,
    /// Timestamp when the event was created
    pub timestamp: DateTime<Utc>,
}

impl HubEvent {
    pub fn new(name: &str, payload: Value) -> Self {
        Self {
            name: name.to_string(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

type HubHandler = Arc<dyn Fn(HubEvent) + Send + Sync>;

/// Channel-keyed listener table for raw provider events
#[derive(Clone, Default)]
pub struct AuthHub {
    channels: Arc<DashMap<String, Vec<(ListenerToken, HubHandler)>>>,
}

impl AuthHub {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
        }
    }

    /// Register a listener on a channel.
    ///
    /// Returns a handle whose `unsubscribe` releases the registration;
    /// the embedded token can also be passed to [`AuthHub::remove`].
    pub fn listen<F>(&self, channel: &str, handler: F) -> HubListenerHandle
    where
        F: Fn(HubEvent) + Send + Sync + 'static,
    {
        let token = Uuid::new_v4();
        self.channels
            .entry(channel.to_string())
            .or_default()
            .push((token, Arc::new(handler)));

        debug!(channel = %channel, listener = %token, "Registered hub listener");

        HubListenerHandle {
            hub: self.clone(),
            channel: channel.to_string(),
            token,
        }
    }

    /// Remove a listener by token. Returns whether anything was removed.
    pub fn remove(&self, channel: &str, token: ListenerToken) -> bool {
        let removed = match self.channels.get_mut(channel) {
            Some(mut listeners) => {
                let before = listeners.len();
                listeners.retain(|(id, _)| *id != token);
                before != listeners.len()
            }
            None => false,
        };

        if removed {
            debug!(channel = %channel, listener = %token, "Removed hub listener");
        } else {
            debug!(
                channel = %channel,
                listener = %token,
                "Attempted to remove non-existent hub listener"
            );
        }

        removed
    }

    /// Deliver an event to every listener currently on the channel, in
    /// registration order.
    pub fn dispatch(&self, channel: &str, event: HubEvent) {
        // Snapshot under the shard lock, invoke outside it so handlers
        // may re-enter the hub
        let listeners: Vec<HubHandler> = match self.channels.get(channel) {
            Some(listeners) => listeners.iter().map(|(_, h)| Arc::clone(h)).collect(),
            None => Vec::new(),
        };

        trace!(
            channel = %channel,
            event = %event.name,
            listeners = listeners.len(),
            "Dispatching raw hub event"
        );

        for handler in listeners {
            handler(event.clone());
        }
    }

    /// Number of listeners on a channel
    pub fn listener_count(&self, channel: &str) -> usize {
        self.channels.get(channel).map_or(0, |l| l.len())
    }
}

/// Handle returned by [`AuthHub::listen`]
pub struct HubListenerHandle {
    hub: AuthHub,
    channel: String,
    token: ListenerToken,
}

impl HubListenerHandle {
    /// The token this registration is keyed under
    pub fn token(&self) -> ListenerToken {
        self.token
    }

    /// The channel this registration listens on
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Release the registration
    pub fn unsubscribe(self) -> bool {
        self.hub.remove(&self.channel, self.token)
    }
}
