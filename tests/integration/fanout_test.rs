//! Fan-out behaviour across multiple subscribers, including failure
//! isolation and duplicate registration, through the composed client.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::anyhow;

use authsync::{AuthEventSubscriber, AuthLifecycleEvent};

use crate::test_harness::{EventCounters, TestEnvironment};

#[tokio::test]
async fn test_failing_subscriber_does_not_affect_others() {
    let env = TestEnvironment::new();
    let registry = env.client.subscribers();

    let counters = EventCounters::new();
    registry
        .subscribe(
            AuthEventSubscriber::new()
                .on_sign_in(|| async { Err(anyhow!("subscriber failure")) })
                .build(),
        )
        .await;
    registry.subscribe(counters.subscriber()).await;

    // Dispatch directly; resolves despite the failing subscriber
    env.client
        .dispatcher()
        .dispatch(AuthLifecycleEvent::SignIn)
        .await;

    assert_eq!(counters.sign_in.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_duplicate_registration_notifies_twice() {
    let env = TestEnvironment::new();
    let registry = env.client.subscribers();

    let counters = EventCounters::new();
    let subscriber = counters.subscriber();
    registry.subscribe(Arc::clone(&subscriber)).await;
    registry.subscribe(Arc::clone(&subscriber)).await;

    env.client
        .dispatcher()
        .dispatch(AuthLifecycleEvent::SignOut)
        .await;

    assert_eq!(counters.sign_out.load(Ordering::SeqCst), 2);

    // Unregistering removes both entries
    registry.unsubscribe(&subscriber).await;
    env.client
        .dispatcher()
        .dispatch(AuthLifecycleEvent::SignOut)
        .await;

    assert_eq!(counters.sign_out.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_dispatch_reaches_every_subscriber() {
    let env = TestEnvironment::new();
    let registry = env.client.subscribers();

    let mut all_counters = Vec::new();
    for _ in 0..5 {
        let counters = EventCounters::new();
        registry.subscribe(counters.subscriber()).await;
        all_counters.push(counters);
    }

    env.client
        .dispatcher()
        .dispatch(AuthLifecycleEvent::StartSignIn)
        .await;

    for counters in &all_counters {
        assert_eq!(counters.start_sign_in.load(Ordering::SeqCst), 1);
    }
    // StartSignIn never touches the provider
    assert_eq!(env.provider.counts().current_user.load(Ordering::SeqCst), 0);
}
