//! Sign-in / sign-up / confirm / forgot-password state machine.
//!
//! DESIGN
//! ======
//! `AuthMode` is a tagged enum: the confirm step carries the username it
//! applies to and whether it confirms a registration or a password reset, so
//! a confirm step without a pending username cannot be built. The form is a
//! plain record owned by the flow and wiped on every mode switch.
//!
//! ERROR HANDLING
//! ==============
//! Local validation runs before any provider call. Provider failures become a
//! `FlowError` carrying the provider's message (or a per-action fallback),
//! are remembered as `last_error`, and leave the mode unchanged so the user
//! can retry or switch modes. Nothing is retried automatically.

#[cfg(test)]
#[path = "auth_flow_test.rs"]
mod auth_flow_test;

use crate::net::identity::{FederatedProvider, IdentityProvider, IdentityUser, ProviderError, SignInOutcome};
use crate::state::auth::AuthStore;

/// What a confirmation code is being used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmPurpose {
    Registration,
    PasswordReset,
}

/// Active step of the auth modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
    ForgotPassword,
    Confirm { pending_username: String, purpose: ConfirmPurpose },
}

impl AuthMode {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Create Account",
            Self::ForgotPassword => "Reset Password",
            Self::Confirm { .. } => "Verify Account",
        }
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Create Account",
            Self::ForgotPassword => "Send Reset Code",
            Self::Confirm { .. } => "Verify",
        }
    }

    #[must_use]
    pub fn pending_username(&self) -> Option<&str> {
        match self {
            Self::Confirm { pending_username, .. } => Some(pending_username),
            _ => None,
        }
    }
}

/// Transient form fields for the modal. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialEntry {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub code: String,
    /// Only used when confirming a password reset.
    pub new_password: String,
}

impl CredentialEntry {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Failure of a flow action, displayed as-is to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Rejected locally; the provider was not called.
    #[error("{0}")]
    Validation(&'static str),
    /// The provider call failed.
    #[error("{0}")]
    Provider(String),
}

impl FlowError {
    /// Wrap a provider failure, falling back to `fallback` when it has no message.
    #[must_use]
    pub fn from_provider(err: &ProviderError, fallback: &str) -> Self {
        Self::Provider(err.user_message().unwrap_or_else(|| fallback.to_owned()))
    }
}

/// Successful result of [`AuthFlow::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Session established for this user; the caller should close the modal.
    SignedIn(IdentityUser),
    /// Account registered; now waiting for the emailed code.
    Registered,
    /// Registration confirmed; the user signs in next.
    Confirmed,
    /// Reset code sent; now waiting for the code and new password.
    ResetCodeSent,
    /// Password replaced; the user signs in next.
    PasswordReset,
}

impl SubmitOutcome {
    /// Toast text for the outcome.
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match self {
            Self::SignedIn(_) => "Signed in successfully!",
            Self::Registered => "Account created! Please check your email for verification code.",
            Self::Confirmed => "Account confirmed! You can now sign in.",
            Self::ResetCodeSent => "Password reset code sent to your email.",
            Self::PasswordReset => "Password updated! You can now sign in.",
        }
    }

    #[must_use]
    pub fn closes_modal(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    /// Merge the outcome into the session store. Only a sign-in changes it.
    pub fn apply(&self, store: &mut AuthStore) {
        if let Self::SignedIn(user) = self {
            store.set_user(Some(user.clone()));
        }
    }
}

const MSG_SIGN_IN_FIELDS: &str = "Enter your username and password.";
const MSG_SIGN_UP_FIELDS: &str = "Fill in username, email, and password.";
const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
const MSG_CODE_REQUIRED: &str = "Enter the code from your email.";
const MSG_NEW_PASSWORD_REQUIRED: &str = "Enter the code and a new password.";
const MSG_USERNAME_REQUIRED: &str = "Enter your username.";

/// Controller behind the auth modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFlow {
    mode: AuthMode,
    /// Bound directly to the modal inputs.
    pub form: CredentialEntry,
    submitting: bool,
    last_error: Option<String>,
}

impl AuthFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in a given mode (e.g. "Sign up" in the header opens sign-up).
    #[must_use]
    pub fn with_mode(mode: AuthMode) -> Self {
        Self { mode, ..Self::default() }
    }

    #[must_use]
    pub fn mode(&self) -> &AuthMode {
        &self.mode
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Move to `mode`, wiping every form field and the last error.
    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.form.clear();
        self.last_error = None;
        self.mode = mode;
    }

    /// Write back a flow snapshot taken in `started_in` once its provider
    /// call settles. If the mode changed meanwhile the snapshot is stale and
    /// is dropped; only the submitting flag is reset.
    pub fn settle(&mut self, started_in: &AuthMode, finished: AuthFlow) {
        if self.mode == *started_in {
            *self = finished;
        } else {
            self.submitting = false;
        }
    }

    /// Submit the form for the active mode. The session store is not
    /// touched; merge a sign-in with [`SubmitOutcome::apply`].
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] on local validation failure or provider
    /// failure. The mode is left unchanged in both cases.
    pub async fn submit(&mut self, provider: &dyn IdentityProvider) -> Result<SubmitOutcome, FlowError> {
        self.submitting = true;
        self.last_error = None;
        let result = self.run_submit(provider).await;
        self.submitting = false;
        if let Err(err) = &result {
            self.last_error = Some(err.to_string());
        }
        result
    }

    /// Start a federated sign-in. On success control normally leaves the
    /// page; the session is picked up by the next store initialization.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the redirect could not be started.
    pub async fn sign_in_with_federated(
        &mut self,
        provider: &dyn IdentityProvider,
        federated: FederatedProvider,
    ) -> Result<(), FlowError> {
        self.last_error = None;
        let result = provider
            .sign_in_with_redirect(federated)
            .await
            .map_err(|e| FlowError::from_provider(&e, "Google sign in failed"));
        if let Err(err) = &result {
            self.last_error = Some(err.to_string());
        }
        result
    }

    async fn run_submit(&mut self, provider: &dyn IdentityProvider) -> Result<SubmitOutcome, FlowError> {
        match self.mode.clone() {
            AuthMode::SignIn => self.submit_sign_in(provider).await,
            AuthMode::SignUp => self.submit_sign_up(provider).await,
            AuthMode::ForgotPassword => self.submit_forgot_password(provider).await,
            AuthMode::Confirm { pending_username, purpose: ConfirmPurpose::Registration } => {
                self.submit_confirm_registration(provider, &pending_username)
                    .await
            }
            AuthMode::Confirm { pending_username, purpose: ConfirmPurpose::PasswordReset } => {
                self.submit_confirm_reset(provider, &pending_username)
                    .await
            }
        }
    }

    async fn submit_sign_in(&mut self, provider: &dyn IdentityProvider) -> Result<SubmitOutcome, FlowError> {
        let username = self.form.username.trim().to_owned();
        let password = self.form.password.clone();
        if username.is_empty() || password.is_empty() {
            return Err(FlowError::Validation(MSG_SIGN_IN_FIELDS));
        }

        let outcome = provider
            .sign_in(&username, &password)
            .await
            .map_err(|e| FlowError::from_provider(&e, "Sign in failed"))?;
        if let SignInOutcome::NextStep(step) = outcome {
            return Err(FlowError::Provider(format!("Additional sign-in step required: {step}")));
        }

        let user = provider
            .current_user()
            .await
            .map_err(|e| FlowError::from_provider(&e, "Sign in failed"))?;
        self.form.clear();
        Ok(SubmitOutcome::SignedIn(user))
    }

    async fn submit_sign_up(&mut self, provider: &dyn IdentityProvider) -> Result<SubmitOutcome, FlowError> {
        let username = self.form.username.trim().to_owned();
        let email = self.form.email.trim().to_owned();
        let password = self.form.password.clone();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(FlowError::Validation(MSG_SIGN_UP_FIELDS));
        }
        if password != self.form.confirm_password {
            return Err(FlowError::Validation(MSG_PASSWORD_MISMATCH));
        }

        provider
            .sign_up(&username, &email, &password)
            .await
            .map_err(|e| FlowError::from_provider(&e, "Sign up failed"))?;
        self.switch_mode(AuthMode::Confirm { pending_username: username, purpose: ConfirmPurpose::Registration });
        Ok(SubmitOutcome::Registered)
    }

    async fn submit_forgot_password(&mut self, provider: &dyn IdentityProvider) -> Result<SubmitOutcome, FlowError> {
        let username = self.form.username.trim().to_owned();
        if username.is_empty() {
            return Err(FlowError::Validation(MSG_USERNAME_REQUIRED));
        }

        provider
            .reset_password(&username)
            .await
            .map_err(|e| FlowError::from_provider(&e, "Password reset failed"))?;
        self.switch_mode(AuthMode::Confirm { pending_username: username, purpose: ConfirmPurpose::PasswordReset });
        Ok(SubmitOutcome::ResetCodeSent)
    }

    async fn submit_confirm_registration(
        &mut self,
        provider: &dyn IdentityProvider,
        username: &str,
    ) -> Result<SubmitOutcome, FlowError> {
        let code = self.form.code.trim().to_owned();
        if code.is_empty() {
            return Err(FlowError::Validation(MSG_CODE_REQUIRED));
        }

        provider
            .confirm_sign_up(username, &code)
            .await
            .map_err(|e| FlowError::from_provider(&e, "Verification failed"))?;
        self.switch_mode(AuthMode::SignIn);
        Ok(SubmitOutcome::Confirmed)
    }

    async fn submit_confirm_reset(
        &mut self,
        provider: &dyn IdentityProvider,
        username: &str,
    ) -> Result<SubmitOutcome, FlowError> {
        let code = self.form.code.trim().to_owned();
        let new_password = self.form.new_password.clone();
        if code.is_empty() || new_password.is_empty() {
            return Err(FlowError::Validation(MSG_NEW_PASSWORD_REQUIRED));
        }
        if new_password != self.form.confirm_password {
            return Err(FlowError::Validation(MSG_PASSWORD_MISMATCH));
        }

        provider
            .confirm_reset_password(username, &code, &new_password)
            .await
            .map_err(|e| FlowError::from_provider(&e, "Password reset failed"))?;
        self.switch_mode(AuthMode::SignIn);
        Ok(SubmitOutcome::PasswordReset)
    }
}
