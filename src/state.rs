//! Authentication state store.
//!
//! Owns the `{is_initialized, is_authenticated, user, region}` record
//! and every action that touches the remote identity provider. The
//! record is only mutated through the store's own actions; observers
//! read snapshots or subscribe to the watch channel.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::AuthError;
use crate::provider::{
    IdentityProvider, SignOutOptions, SignUpOutcome, SocialProvider, UserRecord,
};

/// Current authentication status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether one-time initialization has completed
    pub is_initialized: bool,
    /// Whether a user is currently signed in
    pub is_authenticated: bool,
    /// The signed-in user, when there is one
    pub user: Option<UserRecord>,
    /// Identity provider region supplied at initialization
    pub region: Option<String>,
}

/// State container for authentication status and provider-backed actions
pub struct AuthStateStore {
    provider: Arc<dyn IdentityProvider>,
    status: watch::Sender<AuthStatus>,
}

impl AuthStateStore {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (status, _) = watch::channel(AuthStatus::default());
        Self { provider, status }
    }

    /// Snapshot of the current status
    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    /// Subscribe to status changes
    pub fn watch(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Pure read of the authenticated flag
    pub fn is_authenticated(&self) -> bool {
        self.status.borrow().is_authenticated
    }

    /// Pure read of the initialized flag
    pub fn is_initialized(&self) -> bool {
        self.status.borrow().is_initialized
    }

    /// Re-query the provider for the current user and fold the outcome
    /// into the status record.
    ///
    /// Infallible: a failed or empty lookup downgrades to the
    /// not-authenticated state. Performs exactly one state update.
    pub async fn refresh_auth_state(&self) {
        match self.provider.current_user().await {
            Ok(Some(user)) => {
                self.status.send_modify(|status| {
                    status.user = Some(user);
                    status.is_authenticated = true;
                });
            }
            Ok(None) => {
                debug!("No current user, clearing authenticated state");
                self.status.send_modify(|status| {
                    status.user = None;
                    status.is_authenticated = false;
                });
            }
            Err(e) => {
                debug!(error = %e, "Current user lookup failed, clearing authenticated state");
                self.status.send_modify(|status| {
                    status.user = None;
                    status.is_authenticated = false;
                });
            }
        }
    }

    /// Refresh, then mark the store initialized with the given region.
    ///
    /// Idempotent; the coordinator guards against repeated effective
    /// initialization via `is_initialized`.
    pub async fn initialize_auth_state(&self, region: Option<&str>) {
        self.refresh_auth_state().await;

        self.status.send_modify(|status| {
            status.is_initialized = true;
            status.region = region.map(str::to_string);
        });

        info!(region = region.unwrap_or("none"), "Authentication state initialized");
    }

    /// Start the hosted-UI redirect sign-in flow
    pub async fn sign_in_with_hosted_ui(&self) -> Result<()> {
        self.provider.sign_in_with_redirect(None).await
    }

    /// Start the redirect sign-in flow pre-selecting Google
    pub async fn sign_in_with_google(&self) -> Result<()> {
        self.provider
            .sign_in_with_redirect(Some(SocialProvider::Google))
            .await
    }

    /// Start the redirect sign-in flow pre-selecting Apple
    pub async fn sign_in_with_apple(&self) -> Result<()> {
        self.provider
            .sign_in_with_redirect(Some(SocialProvider::Apple))
            .await
    }

    /// Sign out the current session
    pub async fn sign_out(&self, options: SignOutOptions) -> Result<()> {
        self.provider.sign_out(options).await
    }

    /// Sign in with username and password
    pub async fn sign_in_with_username(&self, username: &str, password: &str) -> Result<()> {
        self.provider.sign_in(username, password).await
    }

    /// Create a new account
    pub async fn sign_up_with_username(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SignUpOutcome> {
        self.provider.sign_up(username, password).await
    }

    /// Confirm a new account with the delivered code
    pub async fn confirm_sign_up_with_username(&self, username: &str, code: &str) -> Result<()> {
        self.provider.confirm_sign_up(username, code).await
    }

    /// Resend the account confirmation code
    pub async fn resend_sign_up_with_username(&self, username: &str) -> Result<()> {
        self.provider.resend_sign_up_code(username).await
    }

    /// Start password recovery
    pub async fn forgot_password_with_username(&self, username: &str) -> Result<()> {
        self.provider.reset_password(username).await
    }

    /// Complete password recovery
    pub async fn forgot_password_submit_with_username(
        &self,
        username: &str,
        code: &str,
        password: &str,
    ) -> Result<()> {
        self.provider
            .confirm_reset_password(username, code, password)
            .await
    }

    /// Delete the signed-in user's account.
    ///
    /// Requires a current user with an access token. The authenticated
    /// flag is only cleared once the provider confirms the deletion.
    pub async fn delete_account(&self) -> Result<()> {
        let (user, region) = {
            let status = self.status.borrow();
            (status.user.clone(), status.region.clone())
        };

        let user = user.ok_or(AuthError::NotAuthenticated)?;
        let access_token = user.access_token.ok_or(AuthError::MissingAccessToken)?;

        let output = self
            .provider
            .delete_user(&access_token, region.as_deref())
            .await?;
        if !output.is_success() {
            return Err(AuthError::AccountDeletion.into());
        }

        self.status.send_modify(|status| {
            status.is_authenticated = false;
        });

        info!("User account deleted");
        Ok(())
    }
}
