//! Integration test harness for the authentication coordination layer.
//! Provides a composed client over the scripted provider plus a
//! counting lifecycle event subscriber.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use authsync::provider::test::ScriptedProvider;
use authsync::{AuthClient, AuthEventSubscriber, AuthHub, UserRecord};

/// Initialize tracing output for tests (idempotent)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Per-event invocation counters shared with the test body
#[derive(Default)]
pub struct EventCounters {
    pub start_sign_in: AtomicUsize,
    pub sign_in: AtomicUsize,
    pub sign_in_failure: AtomicUsize,
    pub sign_out: AtomicUsize,
}

impl EventCounters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Subscriber with all four capabilities, each bumping its counter
    pub fn subscriber(self: &Arc<Self>) -> Arc<AuthEventSubscriber> {
        let start = Arc::clone(self);
        let sign_in = Arc::clone(self);
        let failure = Arc::clone(self);
        let sign_out = Arc::clone(self);

        AuthEventSubscriber::new()
            .on_start_sign_in(move || {
                let counters = Arc::clone(&start);
                async move {
                    counters.start_sign_in.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .on_sign_in(move || {
                let counters = Arc::clone(&sign_in);
                async move {
                    counters.sign_in.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .on_sign_in_failure(move || {
                let counters = Arc::clone(&failure);
                async move {
                    counters.sign_in_failure.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .on_sign_out(move || {
                let counters = Arc::clone(&sign_out);
                async move {
                    counters.sign_out.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .build()
    }
}

/// Test environment composing the client over a scripted provider
pub struct TestEnvironment {
    pub client: AuthClient,
    pub provider: Arc<ScriptedProvider>,
    pub hub: AuthHub,
}

impl TestEnvironment {
    /// Environment with no signed-in user
    pub fn new() -> Self {
        Self::with_provider(ScriptedProvider::new())
    }

    /// Environment with an established session
    pub fn with_user(user: UserRecord) -> Self {
        Self::with_provider(ScriptedProvider::with_user(user))
    }

    fn with_provider(provider: ScriptedProvider) -> Self {
        init_tracing();
        let provider = Arc::new(provider);
        let hub = AuthHub::new();
        let client = AuthClient::with_hub(
            Arc::clone(&provider) as Arc<dyn authsync::IdentityProvider>,
            hub.clone(),
        );
        Self {
            client,
            provider,
            hub,
        }
    }
}
