//! Identity-provider capability consumed by the auth flow.
//!
//! DESIGN
//! ======
//! The flow treats the managed identity service as an opaque set of one-shot
//! async calls. Each call resolves to a success payload or a
//! [`ProviderError`]; nothing here retries, caches tokens, or times out on
//! its own. Browser futures are not `Send`, so the trait is `?Send`.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::{Deserialize, Serialize};

/// Identity record returned by the provider for the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Stable provider subject identifier.
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a username/password sign-in attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Tokens were issued; the session can be fetched.
    SignedIn,
    /// The provider wants another step first (e.g. `NEW_PASSWORD_REQUIRED`).
    NextStep(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user_confirmed: bool,
    pub user_sub: Option<String>,
}

/// Third-party identity services reachable through the hosted sign-in page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
}

impl FederatedProvider {
    /// Path segment used by the server's redirect endpoint.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
        }
    }
}

/// Failure reported by an identity-provider call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider processed the request and refused it.
    #[error("{message}")]
    Rejected { code: String, message: String },
    /// The request never produced a provider answer.
    #[error("{0}")]
    Transport(String),
    /// No federated sign-in is waiting to be completed.
    #[error("no federated sign-in to complete")]
    NoPendingRedirect,
    /// The identity service is not configured or reachable from here.
    #[error("identity service unavailable")]
    Unavailable,
}

impl ProviderError {
    /// Human-readable message, or `None` when the provider supplied nothing usable.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        let text = self.to_string();
        if text.trim().is_empty() { None } else { Some(text) }
    }

    /// Provider error code (e.g. `NotAuthorizedException`), when known.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } if !code.is_empty() => Some(code),
            _ => None,
        }
    }
}

/// Async identity operations used by the store and the flow controller.
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider {
    /// Sign in with username and password.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when credentials are rejected or the call fails.
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInOutcome, ProviderError>;

    /// Register a new account with an email attribute.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when registration is refused or the call fails.
    async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<SignUpOutcome, ProviderError>;

    /// Confirm a registration with the emailed code.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for wrong or expired codes and transport failures.
    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), ProviderError>;

    /// Ask the provider to send a password-reset code.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the user is unknown or the call fails.
    async fn reset_password(&self, username: &str) -> Result<(), ProviderError>;

    /// Set a new password using a reset code.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for wrong codes, weak passwords, or transport failures.
    async fn confirm_reset_password(&self, username: &str, code: &str, new_password: &str) -> Result<(), ProviderError>;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the provider could not be reached.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Fetch the user bound to the current session.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when there is no session.
    async fn current_user(&self) -> Result<IdentityUser, ProviderError>;

    /// Hand control to the federated sign-in page. Control normally leaves the app.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the redirect cannot be started.
    async fn sign_in_with_redirect(&self, provider: FederatedProvider) -> Result<(), ProviderError>;

    /// Finish a federated sign-in the browser just returned from.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NoPendingRedirect`] when there is nothing to complete.
    async fn complete_federated_sign_in(&self) -> Result<IdentityUser, ProviderError>;
}
