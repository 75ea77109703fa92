use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::AuthEventSubscriber;

/// Ordered collection of lifecycle event subscribers.
///
/// Insertion order is preserved and duplicates are allowed: registering
/// the same handle twice keeps two entries, and unregistering removes
/// every entry pointing at the same subscriber. The registry holds
/// shared references only; ownership stays with whoever registered.
#[derive(Default)]
pub struct SubscriberRegistry {
    subscribers: RwLock<Vec<Arc<AuthEventSubscriber>>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber. No uniqueness check.
    pub async fn subscribe(&self, subscriber: Arc<AuthEventSubscriber>) {
        let mut subscribers = self.subscribers.write().await;
        subscribers.push(subscriber);
        debug!(subscribers = subscribers.len(), "Registered lifecycle event subscriber");
    }

    /// Remove every entry referring to the same subscriber. No-op when
    /// absent.
    pub async fn unsubscribe(&self, subscriber: &Arc<AuthEventSubscriber>) {
        let mut subscribers = self.subscribers.write().await;
        subscribers.retain(|entry| !Arc::ptr_eq(entry, subscriber));
        debug!(subscribers = subscribers.len(), "Unregistered lifecycle event subscriber");
    }

    /// Insertion-ordered copy of the current subscriber list
    pub async fn snapshot(&self) -> Vec<Arc<AuthEventSubscriber>> {
        self.subscribers.read().await.clone()
    }

    /// Number of registered entries
    pub async fn count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}
