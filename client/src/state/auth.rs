//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AuthStore` is created by the root component and provided through
//! context as `RwSignal<AuthStore>`. Route guards, the header, and the auth
//! modal read it; only the auth flow and the sign-out action write it.
//!
//! INVARIANTS
//! ==========
//! `is_authenticated()` is exactly `user().is_some()`. `is_loading()` is true
//! from construction until the first `initialize` finishes and never again.
//!
//! Async callers never hold a copy of the store across an await: the
//! provider work runs first (`check_session`, `AuthFlow::submit`) and only
//! its result is merged into the shared store (`finish_initialize`,
//! `SubmitOutcome::apply`, `set_user`). A sign-in that lands while the
//! initial check is still pending therefore survives it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::identity::{IdentityProvider, IdentityUser, ProviderError};
use crate::state::auth_flow::FlowError;

/// What a protected view should render for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessGate {
    /// The initial session check is still running.
    Loading,
    /// Checked, and nobody is signed in.
    Denied,
    Granted,
}

/// Result of the initial session lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCheck {
    pub user: Option<IdentityUser>,
    /// Error reported by a federated redirect that came back failed.
    pub redirect_error: Option<FlowError>,
}

/// Current session: the signed-in user (if any) and the initial-load flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthStore {
    user: Option<IdentityUser>,
    loading: bool,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStore {
    #[must_use]
    pub fn new() -> Self {
        Self { user: None, loading: true }
    }

    /// Resolve the existing session, if any.
    ///
    /// A pending federated redirect is completed first; when there is none
    /// (or it fails) the regular current-user lookup runs. Lookup failures
    /// mean "no session". Runs once; later calls return at once.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when a federated redirect came back with an
    /// error. The store is still marked as loaded.
    pub async fn initialize(&mut self, provider: &dyn IdentityProvider) -> Result<(), FlowError> {
        if !self.loading {
            return Ok(());
        }
        let check = Self::check_session(provider).await;
        self.finish_initialize(check.user);
        check.redirect_error.map_or(Ok(()), Err)
    }

    /// Provider half of [`AuthStore::initialize`]; touches no store.
    pub async fn check_session(provider: &dyn IdentityProvider) -> SessionCheck {
        match provider.complete_federated_sign_in().await {
            Ok(user) => SessionCheck { user: Some(user), redirect_error: None },
            Err(err) => {
                let redirect_error = match err {
                    ProviderError::NoPendingRedirect | ProviderError::Unavailable => None,
                    other => Some(FlowError::from_provider(&other, "Google sign in failed")),
                };
                SessionCheck { user: provider.current_user().await.ok(), redirect_error }
            }
        }
    }

    /// Record the result of the initial session check and clear `loading`.
    ///
    /// A user signed in while the check was pending is kept. No-op once the
    /// store has loaded.
    pub fn finish_initialize(&mut self, found: Option<IdentityUser>) {
        if !self.loading {
            return;
        }
        if self.user.is_none() {
            self.user = found;
        }
        self.loading = false;
    }

    pub fn set_user(&mut self, user: Option<IdentityUser>) {
        self.user = user;
    }

    /// Sign out through the provider and drop the session on success.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the provider call fails; the session is kept.
    pub async fn sign_out(&mut self, provider: &dyn IdentityProvider) -> Result<(), FlowError> {
        Self::revoke(provider).await?;
        self.user = None;
        Ok(())
    }

    /// Provider half of [`AuthStore::sign_out`]; touches no store.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the provider call fails.
    pub async fn revoke(provider: &dyn IdentityProvider) -> Result<(), FlowError> {
        provider
            .sign_out()
            .await
            .map_err(|e| FlowError::from_provider(&e, "Sign out failed"))
    }

    #[must_use]
    pub fn user(&self) -> Option<&IdentityUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Gate decision for authenticated-only views.
    #[must_use]
    pub fn access_gate(&self) -> AccessGate {
        if self.loading {
            AccessGate::Loading
        } else if self.user.is_some() {
            AccessGate::Granted
        } else {
            AccessGate::Denied
        }
    }

    /// Name shown in the header for the signed-in user.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}
