//! Auth routes: password flows, federated sign-in, cookie-backed sessions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser posts credentials here; these handlers call the identity
//! service and keep the resulting tokens in HttpOnly cookies, so no token
//! ever reaches page script. `/api/auth/me` transparently refreshes an
//! expired access token when a refresh cookie is present.
//!
//! ERROR HANDLING
//! ==============
//! Failures answer `{ "error": <user message>, "code": <provider code> }`
//! with the status from [`IdentityError::status_code`]. A missing identity
//! backend is a 503 for every endpoint except sign-out.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::Duration;

use crate::identity::pkce;
use crate::identity::{FederatedProvider, IdentityError, IdentityService, SignInResult, TokenSet, UserProfile};
use crate::state::AppState;

pub(crate) const ACCESS_COOKIE: &str = "prompter_access";
pub(crate) const REFRESH_COOKIE: &str = "prompter_refresh";
pub(crate) const OAUTH_STATE_COOKIE: &str = "prompter_oauth_state";
pub(crate) const OAUTH_VERIFIER_COOKIE: &str = "prompter_oauth_verifier";
const REFRESH_COOKIE_DAYS: i64 = 30;
const OAUTH_COOKIE_MINUTES: i64 = 10;

// =============================================================================
// RESPONSES
// =============================================================================

fn json_error(status: StatusCode, message: &str, code: &str) -> Response {
    (status, Json(json!({ "error": message, "code": code }))).into_response()
}

fn unavailable() -> Response {
    json_error(StatusCode::SERVICE_UNAVAILABLE, "Authentication is not configured", "IdentityUnavailable")
}

fn not_signed_in() -> Response {
    json_error(StatusCode::UNAUTHORIZED, "Not signed in", "NotAuthorizedException")
}

fn identity_error(action: &'static str, err: &IdentityError) -> Response {
    match err {
        IdentityError::Rejected { kind, .. } => tracing::info!(action, code = %kind, "identity request rejected"),
        IdentityError::UnsupportedProvider(_) | IdentityError::HostedUiUnavailable => {
            tracing::warn!(action, error = %err, "identity request not supported");
        }
        other => tracing::error!(action, error = %other, "identity request failed"),
    }
    json_error(err.status_code(), &err.user_message(), err.code())
}

fn ok() -> Response {
    Json(json!({ "ok": true })).into_response()
}

fn identity(state: &AppState) -> Option<Arc<dyn IdentityService>> {
    state.identity.clone()
}

// =============================================================================
// COOKIES
// =============================================================================

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expiring_cookie(name: &'static str, value: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    let mut cookie = base_cookie(name, value, secure);
    cookie.set_max_age(max_age);
    cookie
}

fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    expiring_cookie(name, String::new(), secure, Duration::ZERO)
}

fn cookie_value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(Cookie::value).filter(|v| !v.is_empty())
}

pub(crate) fn with_session(jar: CookieJar, tokens: &TokenSet, secure: bool) -> CookieJar {
    let access = if tokens.expires_in > 0 {
        expiring_cookie(ACCESS_COOKIE, tokens.access_token.clone(), secure, Duration::seconds(tokens.expires_in))
    } else {
        base_cookie(ACCESS_COOKIE, tokens.access_token.clone(), secure)
    };
    let jar = jar.add(access);
    match &tokens.refresh_token {
        Some(refresh) => jar.add(expiring_cookie(
            REFRESH_COOKIE,
            refresh.clone(),
            secure,
            Duration::days(REFRESH_COOKIE_DAYS),
        )),
        None => jar,
    }
}

pub(crate) fn clear_session(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(removal_cookie(ACCESS_COOKIE, secure))
        .add(removal_cookie(REFRESH_COOKIE, secure))
}

fn clear_oauth(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(removal_cookie(OAUTH_STATE_COOKIE, secure))
        .add(removal_cookie(OAUTH_VERIFIER_COOKIE, secure))
}

// =============================================================================
// PASSWORD FLOWS
// =============================================================================

#[derive(Deserialize)]
pub struct SignInRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct SignInResponse {
    signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_step: Option<String>,
}

/// `POST /api/auth/sign-in`: password sign-in; sets session cookies.
pub async fn sign_in(State(state): State<AppState>, jar: CookieJar, Json(body): Json<SignInRequest>) -> Response {
    let Some(identity) = identity(&state) else {
        return unavailable();
    };
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Username and password are required", "InvalidParameterException");
    }

    let tokens = match identity.sign_in(username, &body.password).await {
        Ok(SignInResult::Tokens(tokens)) => tokens,
        Ok(SignInResult::Challenge(step)) => {
            tracing::info!(challenge = %step, "sign-in needs another step");
            return Json(SignInResponse { signed_in: false, user: None, next_step: Some(step) }).into_response();
        }
        Err(e) => return identity_error("sign_in", &e),
    };

    let user = match identity.get_user(&tokens.access_token).await {
        Ok(user) => user,
        Err(e) => return identity_error("get_user", &e),
    };

    tracing::info!(user_id = %user.user_id, "signed in");
    let jar = with_session(jar, &tokens, state.cookie_secure);
    (jar, Json(SignInResponse { signed_in: true, user: Some(user), next_step: None })).into_response()
}

#[derive(Deserialize)]
pub struct SignUpRequest {
    username: String,
    email: String,
    password: String,
}

/// `POST /api/auth/sign-up`: register; a verification code is sent unless
/// the pool auto-confirms.
pub async fn sign_up(State(state): State<AppState>, Json(body): Json<SignUpRequest>) -> Response {
    let Some(identity) = identity(&state) else {
        return unavailable();
    };
    let username = body.username.trim();
    let email = body.email.trim();
    if username.is_empty() || email.is_empty() || body.password.is_empty() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "Username, email and password are required",
            "InvalidParameterException",
        );
    }

    match identity.sign_up(username, email, &body.password).await {
        Ok(result) => {
            tracing::info!(confirmed = result.user_confirmed, "account registered");
            Json(result).into_response()
        }
        Err(e) => identity_error("sign_up", &e),
    }
}

#[derive(Deserialize)]
pub struct ConfirmSignUpRequest {
    username: String,
    code: String,
}

/// `POST /api/auth/confirm-sign-up`
pub async fn confirm_sign_up(State(state): State<AppState>, Json(body): Json<ConfirmSignUpRequest>) -> Response {
    let Some(identity) = identity(&state) else {
        return unavailable();
    };
    if body.username.trim().is_empty() || body.code.trim().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Verification code is required", "InvalidParameterException");
    }

    match identity.confirm_sign_up(body.username.trim(), body.code.trim()).await {
        Ok(()) => ok(),
        Err(e) => identity_error("confirm_sign_up", &e),
    }
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    username: String,
}

/// `POST /api/auth/reset-password`: send a reset code.
pub async fn reset_password(State(state): State<AppState>, Json(body): Json<ResetPasswordRequest>) -> Response {
    let Some(identity) = identity(&state) else {
        return unavailable();
    };
    if body.username.trim().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Username is required", "InvalidParameterException");
    }

    match identity.forgot_password(body.username.trim()).await {
        Ok(delivery) => Json(json!({ "delivery": delivery })).into_response(),
        Err(e) => identity_error("reset_password", &e),
    }
}

#[derive(Deserialize)]
pub struct ConfirmResetPasswordRequest {
    username: String,
    code: String,
    new_password: String,
}

/// `POST /api/auth/confirm-reset-password`
pub async fn confirm_reset_password(
    State(state): State<AppState>,
    Json(body): Json<ConfirmResetPasswordRequest>,
) -> Response {
    let Some(identity) = identity(&state) else {
        return unavailable();
    };
    if body.username.trim().is_empty() || body.code.trim().is_empty() || body.new_password.is_empty() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "Code and new password are required",
            "InvalidParameterException",
        );
    }

    match identity
        .confirm_forgot_password(body.username.trim(), body.code.trim(), &body.new_password)
        .await
    {
        Ok(()) => ok(),
        Err(e) => identity_error("confirm_reset_password", &e),
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// `POST /api/auth/sign-out`: revoke tokens (best effort) and clear cookies.
///
/// `logout_url` is present when a hosted UI is configured; visiting it also
/// ends the hosted UI's own session.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> Response {
    let identity = identity(&state);
    if let (Some(identity), Some(access)) = (&identity, cookie_value(&jar, ACCESS_COOKIE)) {
        if let Err(e) = identity.global_sign_out(access).await {
            tracing::warn!(error = %e, "global sign-out failed; clearing cookies anyway");
        }
    }
    let logout_url = identity.and_then(|i| i.logout_url());
    let jar = clear_session(jar, state.cookie_secure);
    let body = match logout_url {
        Some(url) => json!({ "ok": true, "logout_url": url }),
        None => json!({ "ok": true }),
    };
    (jar, Json(body)).into_response()
}

/// `GET /api/auth/me`: current user, refreshing the access token if needed.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(identity) = identity(&state) else {
        return unavailable();
    };

    if let Some(access) = cookie_value(&jar, ACCESS_COOKIE) {
        match identity.get_user(access).await {
            Ok(user) => return Json(user).into_response(),
            Err(e) if e.is_not_authorized() => {}
            Err(e) => return identity_error("get_user", &e),
        }
    }

    let Some(refresh_token) = cookie_value(&jar, REFRESH_COOKIE).map(str::to_owned) else {
        return not_signed_in();
    };

    let mut tokens = match identity.refresh(&refresh_token).await {
        Ok(tokens) => tokens,
        Err(e) if e.is_not_authorized() => {
            tracing::debug!("refresh token rejected; clearing session");
            return (clear_session(jar, state.cookie_secure), not_signed_in()).into_response();
        }
        Err(e) => return identity_error("refresh", &e),
    };
    if tokens.refresh_token.is_none() {
        tokens.refresh_token = Some(refresh_token);
    }

    match identity.get_user(&tokens.access_token).await {
        Ok(user) => (with_session(jar, &tokens, state.cookie_secure), Json(user)).into_response(),
        Err(e) => identity_error("get_user", &e),
    }
}

// =============================================================================
// FEDERATED
// =============================================================================

/// Land back on the app root with an error the client shows as a toast.
fn redirect_with_error(error: &str, description: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs([("error", error), ("error_description", description)])
        .finish();
    Redirect::temporary(&format!("/?{query}")).into_response()
}

/// `GET /auth/federated/{provider}`: start hosted UI sign-in with state + PKCE.
pub async fn federated_start(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(provider) = FederatedProvider::from_slug(&slug) else {
        return identity_error("federated_start", &IdentityError::UnsupportedProvider(slug));
    };
    let Some(identity) = identity(&state) else {
        return redirect_with_error("unavailable", "Sign in is not available right now.");
    };

    let oauth_state = pkce::generate_state();
    let pkce = pkce::generate_pkce();
    let url = match identity.authorize_url(provider, &oauth_state, &pkce.challenge) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(error = %e, provider = provider.provider_name(), "federated sign-in unavailable");
            return redirect_with_error(
                "unavailable",
                &format!("{} sign in is not available right now.", provider.provider_name()),
            );
        }
    };

    let secure = state.cookie_secure;
    let ttl = Duration::minutes(OAUTH_COOKIE_MINUTES);
    let jar = CookieJar::new()
        .add(expiring_cookie(OAUTH_STATE_COOKIE, oauth_state, secure, ttl))
        .add(expiring_cookie(OAUTH_VERIFIER_COOKIE, pkce.verifier, secure, ttl));
    (jar, Redirect::temporary(&url)).into_response()
}

#[derive(Deserialize)]
pub struct FederatedCompleteRequest {
    code: String,
    state: String,
}

/// `POST /api/auth/federated/complete`: verify state, exchange the code,
/// set session cookies.
pub async fn federated_complete(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<FederatedCompleteRequest>,
) -> Response {
    let Some(identity) = identity(&state) else {
        return unavailable();
    };
    let secure = state.cookie_secure;

    // Verify OAuth CSRF state from cookie.
    let expected_state = cookie_value(&jar, OAUTH_STATE_COOKIE).unwrap_or_default();
    let verifier = cookie_value(&jar, OAUTH_VERIFIER_COOKIE).map(str::to_owned);
    let Some(verifier) = verifier.filter(|_| !expected_state.is_empty() && expected_state == body.state) else {
        tracing::warn!("federated sign-in state mismatch");
        let jar = clear_oauth(jar, secure);
        let response = json_error(
            StatusCode::UNAUTHORIZED,
            "Sign in link expired or is invalid. Please try again.",
            "InvalidState",
        );
        return (jar, response).into_response();
    };
    let jar = clear_oauth(jar, secure);

    let tokens = match identity.exchange_code(&body.code, &verifier).await {
        Ok(tokens) => tokens,
        Err(e) => return (jar, identity_error("exchange_code", &e)).into_response(),
    };
    let user = match identity.get_user(&tokens.access_token).await {
        Ok(user) => user,
        Err(e) => return (jar, identity_error("get_user", &e)).into_response(),
    };

    tracing::info!(user_id = %user.user_id, "federated sign-in complete");
    (with_session(jar, &tokens, secure), Json(user)).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
