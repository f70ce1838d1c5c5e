//! Identity: server-side adapter to the hosted user directory.
//!
//! DESIGN
//! ======
//! The browser never talks to Cognito directly. Every auth action goes
//! through `/api/auth/*`, which calls an [`IdentityService`]. Tokens stay on
//! the server side of the wire in HttpOnly cookies. The trait is the seam
//! for tests: route tests swap in a scripted mock.
//!
//! ERROR HANDLING
//! ==============
//! Provider rejections keep their exception name so the browser can branch
//! on it; transport failures collapse to a generic 502.

pub mod cognito;
pub mod pkce;
pub mod types;

pub use types::{
    CodeDelivery, FederatedProvider, IdentityError, SignInResult, SignUpResult, TokenSet, UserProfile,
};

/// Operations the auth routes need from a user directory.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Username/password sign-in.
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResult, IdentityError>;

    /// Trade a refresh token for a fresh access token.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, IdentityError>;

    async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<SignUpResult, IdentityError>;

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), IdentityError>;

    /// Send a password reset code.
    async fn forgot_password(&self, username: &str) -> Result<CodeDelivery, IdentityError>;

    async fn confirm_forgot_password(
        &self,
        username: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;

    /// Revoke every token issued to the user behind `access_token`.
    async fn global_sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    async fn get_user(&self, access_token: &str) -> Result<UserProfile, IdentityError>;

    /// Hosted UI URL that starts a federated sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::HostedUiUnavailable`] when no hosted UI
    /// domain is configured.
    fn authorize_url(
        &self,
        provider: FederatedProvider,
        state: &str,
        code_challenge: &str,
    ) -> Result<String, IdentityError>;

    /// Hosted UI logout URL, when a hosted UI domain is configured.
    fn logout_url(&self) -> Option<String>;

    /// Exchange the hosted UI authorization code (PKCE) for tokens.
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<TokenSet, IdentityError>;
}
