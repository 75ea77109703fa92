//! Identity provider configuration adapter.
//!
//! Resolves the single redirect URL allowed for the current platform by
//! prefix-matching the comma-separated allow-list against the current
//! URL. The current URL must start with one of the allowed prefixes;
//! a missing match is a non-fatal diagnostic and initialization
//! proceeds with no redirect URL.

use serde::{Deserialize, Serialize};
use tracing::error;

/// OAuth section of the provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Comma-separated allow-list of sign-in redirect URLs
    pub redirect_sign_in: String,
    /// Comma-separated allow-list of sign-out redirect URLs
    pub redirect_sign_out: String,
    /// Hosted UI domain
    pub domain: Option<String>,
    /// OAuth scopes requested on redirect sign-in
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Top-level provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity provider region
    pub region: Option<String>,
    /// OAuth/redirect settings
    pub oauth: OAuthConfig,
    /// Resolved redirect URL, written by the adapter
    pub resolved_redirect_url: Option<String>,
}

/// First allowed redirect URL that is a prefix of the current URL
pub fn resolve_redirect_url(oauth: &OAuthConfig, current_url: &str) -> Option<String> {
    oauth
        .redirect_sign_in
        .split(',')
        .map(str::trim)
        .filter(|allowed| !allowed.is_empty())
        .find(|allowed| current_url.starts_with(allowed))
        .map(str::to_string)
}

/// Resolve the redirect URL for the current platform and fold it into
/// the configuration. Logs a diagnostic when nothing matches.
pub fn apply_config_adapter(config: &mut AuthConfig, current_url: &str) {
    let redirect_url = resolve_redirect_url(&config.oauth, current_url);
    if redirect_url.is_none() {
        error!(current_url = %current_url, "Redirect url was not found.");
    }

    config.resolved_redirect_url = redirect_url;
}
