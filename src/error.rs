use thiserror::Error;

/// Error types for the authentication coordination layer.
///
/// Provider-level failures (sign-in, sign-up, password recovery) are not
/// wrapped: pass-through actions surface the provider's own error
/// unchanged so the caller can decide on UI feedback.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The account deletion call returned a non-success response
    #[error("Could not delete user account!")]
    AccountDeletion,

    /// An operation required a signed-in user and there is none
    #[error("User does not exist.")]
    NotAuthenticated,

    /// The current user record carries no access token
    #[error("No access token available for the current user")]
    MissingAccessToken,
}
