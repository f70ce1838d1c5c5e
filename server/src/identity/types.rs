//! Identity types: provider-neutral results and errors.

use axum::http::StatusCode;
use serde::Serialize;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by identity operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The identity provider refused the request. `kind` is the provider's
    /// exception name with any namespace prefix removed.
    #[error("{message}")]
    Rejected { kind: String, message: String },

    /// The HTTP request to the identity provider failed.
    #[error("identity request failed: {0}")]
    Request(String),

    /// The provider response body could not be deserialized.
    #[error("identity response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// Federated sign-in needs a hosted UI domain.
    #[error("hosted sign-in is not configured")]
    HostedUiUnavailable,

    #[error("unsupported identity provider: {0}")]
    UnsupportedProvider(String),
}

impl IdentityError {
    #[must_use]
    pub fn rejected(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected { kind: kind.into(), message: message.into() }
    }

    /// Machine-readable code returned to the browser.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Rejected { kind, .. } => kind,
            Self::Request(_) => "IdentityRequestFailed",
            Self::Parse(_) => "IdentityResponseInvalid",
            Self::HttpClientBuild(_) => "IdentityClientBuild",
            Self::HostedUiUnavailable => "HostedUiUnavailable",
            Self::UnsupportedProvider(_) => "UnsupportedProvider",
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejected { kind, .. } => status_for_kind(kind),
            Self::Request(_) | Self::Parse(_) => StatusCode::BAD_GATEWAY,
            Self::HttpClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HostedUiUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::UnsupportedProvider(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message safe to show an end user. Transport details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Request(_) | Self::Parse(_) | Self::HttpClientBuild(_) => {
                "Identity service is unreachable. Please try again.".into()
            }
            other => other.to_string(),
        }
    }

    /// True when the access token is no longer accepted.
    #[must_use]
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Self::Rejected { kind, .. } if kind == "NotAuthorizedException")
    }
}

fn status_for_kind(kind: &str) -> StatusCode {
    match kind {
        "NotAuthorizedException" | "invalid_grant" | "invalid_client" | "unauthorized_client" => {
            StatusCode::UNAUTHORIZED
        }
        "UserNotConfirmedException" | "PasswordResetRequiredException" => StatusCode::FORBIDDEN,
        "UserNotFoundException" | "ResourceNotFoundException" => StatusCode::NOT_FOUND,
        "UsernameExistsException" | "AliasExistsException" => StatusCode::CONFLICT,
        "LimitExceededException" | "TooManyRequestsException" | "TooManyFailedAttemptsException" => {
            StatusCode::TOO_MANY_REQUESTS
        }
        "CodeMismatchException"
        | "ExpiredCodeException"
        | "InvalidPasswordException"
        | "InvalidParameterException"
        | "invalid_request" => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Tokens issued on sign-in, refresh, or authorization code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    /// Absent on refresh; the caller keeps the one it already has.
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInResult {
    Tokens(TokenSet),
    /// Provider wants another step (MFA, new password, ...).
    Challenge(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpResult {
    pub user_confirmed: bool,
    pub user_sub: Option<String>,
}

/// Where a verification code was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeDelivery {
    pub destination: Option<String>,
    pub medium: Option<String>,
}

/// Signed-in user as returned to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// External identity providers reachable through the hosted UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
}

impl FederatedProvider {
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "google" => Some(Self::Google),
            _ => None,
        }
    }

    /// Name the hosted UI expects in `identity_provider`.
    #[must_use]
    pub fn provider_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
