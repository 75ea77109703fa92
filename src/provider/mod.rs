use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;


/// User record returned by the identity provider for the currently
/// signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    /// Sign-in username
    pub username: String,

    /// Provider-assigned user identifier
    pub user_id: String,

    /// Access token for the current session, when one is attached
    pub access_token: Option<String>,

    /// Additional provider-specific attributes (email, phone, ...)
    pub attributes: HashMap<String, Value>,

    /// When the current session was established
    pub issued_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: &str, user_id: &str) -> Self {
        Self {
            username: username.to_string(),
            user_id: user_id.to_string(),
            access_token: None,
            attributes: HashMap::new(),
            issued_at: Utc::now(),
        }
    }

    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    /// Get a typed value from the attribute map
    pub fn get_attribute<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<T> {
        match self.attributes.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| anyhow!("Failed to deserialize attribute '{}': {}", key, e)),
            None => Err(anyhow!("Attribute '{}' not found", key)),
        }
    }
}

/// Outcome of a sign-up request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpOutcome {
    /// Whether the account still needs confirmation (code entry)
    pub needs_confirmation: bool,
    /// Where the confirmation code was delivered, when known
    pub code_delivery_destination: Option<String>,
}

/// Options for signing out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignOutOptions {
    /// Invalidate the session on every device, not just this one
    pub global: bool,
}

/// Social identity providers supported by the redirect sign-in flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialProvider {
    Google,
    Apple,
}

impl SocialProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Apple => "Apple",
        }
    }
}

/// Response from the provider's delete-user operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserOutput {
    /// HTTP status code reported by the provider
    pub http_status: u16,
}

impl DeleteUserOutput {
    pub fn is_success(&self) -> bool {
        self.http_status == 200
    }
}

/// Common trait for remote identity providers.
///
/// The coordination layer treats the provider as an opaque remote
/// service: every method maps 1:1 onto a provider SDK operation, and
/// errors are surfaced unchanged.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Get the currently authenticated user, if any
    async fn current_user(&self) -> Result<Option<UserRecord>>;

    /// Create a new account
    async fn sign_up(&self, username: &str, password: &str) -> Result<SignUpOutcome>;

    /// Confirm a new account with the emailed/texted code
    async fn confirm_sign_up(&self, username: &str, confirmation_code: &str) -> Result<()>;

    /// Resend the account confirmation code
    async fn resend_sign_up_code(&self, username: &str) -> Result<()>;

    /// Start password recovery
    async fn reset_password(&self, username: &str) -> Result<()>;

    /// Complete password recovery with the recovery code
    async fn confirm_reset_password(
        &self,
        username: &str,
        confirmation_code: &str,
        new_password: &str,
    ) -> Result<()>;

    /// Start a redirect-based (hosted UI) sign-in flow, optionally
    /// pre-selecting a social provider
    async fn sign_in_with_redirect(&self, provider: Option<SocialProvider>) -> Result<()>;

    /// Sign in with username and password
    async fn sign_in(&self, username: &str, password: &str) -> Result<()>;

    /// Sign out the current session
    async fn sign_out(&self, options: SignOutOptions) -> Result<()>;

    /// Delete the user owning the given access token
    async fn delete_user(&self, access_token: &str, region: Option<&str>)
        -> Result<DeleteUserOutput>;
}
