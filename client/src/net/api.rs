//! Browser adapter that implements [`IdentityProvider`] over the server's
//! `/api/auth/*` endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with `ProviderError::Unavailable`
//! since these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses carry `{"error": message, "code": type}`; those become
//! `ProviderError::Rejected`. Bodies without that shape and network failures
//! become `ProviderError::Transport`. Nothing panics during hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::identity::{FederatedProvider, IdentityProvider, IdentityUser, ProviderError, SignInOutcome, SignUpOutcome};
#[cfg(any(test, feature = "hydrate"))]
use serde::Deserialize;

#[cfg(any(test, feature = "hydrate"))]
fn auth_endpoint(action: &str) -> String {
    format!("/api/auth/{action}")
}

#[cfg(any(test, feature = "hydrate"))]
fn federated_start_path(provider: FederatedProvider) -> String {
    format!("/auth/federated/{}", provider.slug())
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// Turn a non-2xx response into a provider error.
#[cfg(any(test, feature = "hydrate"))]
fn error_from_response(status: u16, body: &str) -> ProviderError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return ProviderError::Rejected { code: parsed.code.unwrap_or_default(), message: parsed.error };
    }
    if status == 503 {
        return ProviderError::Unavailable;
    }
    ProviderError::Transport(request_failed_message(status))
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct SignInResponse {
    signed_in: bool,
    #[serde(default)]
    next_step: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
impl SignInResponse {
    fn into_outcome(self) -> SignInOutcome {
        match self.next_step {
            Some(step) if !self.signed_in => SignInOutcome::NextStep(step),
            _ => SignInOutcome::SignedIn,
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    user_confirmed: bool,
    #[serde(default)]
    user_sub: Option<String>,
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Deserialize)]
struct Ack {
    ok: bool,
}

/// What the hosted sign-in page left in the query string on return.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, PartialEq, Eq)]
enum RedirectQuery {
    Code { code: String, state: String },
    Error { message: String },
}

#[cfg(any(test, feature = "hydrate"))]
fn classify_redirect(
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
) -> Option<RedirectQuery> {
    if let Some(error) = error.filter(|e| !e.is_empty()) {
        let message = error_description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(error);
        return Some(RedirectQuery::Error { message });
    }
    let code = code.filter(|c| !c.is_empty())?;
    Some(RedirectQuery::Code { code, state: state.unwrap_or_default() })
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ProviderError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(error_from_response(status, &body));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ProviderError::Transport(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn post_json<T: serde::de::DeserializeOwned>(path: &str, payload: &serde_json::Value) -> Result<T, ProviderError> {
    let resp = gloo_net::http::Request::post(path)
        .json(payload)
        .map_err(|e| ProviderError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ProviderError::Transport(e.to_string()))?;
    read_json(resp).await
}

#[cfg(feature = "hydrate")]
async fn post_ack(path: &str, payload: &serde_json::Value) -> Result<(), ProviderError> {
    let ack: Ack = post_json(path, payload).await?;
    if ack.ok {
        Ok(())
    } else {
        Err(ProviderError::Transport(format!("{path} was not acknowledged")))
    }
}

/// Drop `?code=...&state=...` from the address bar so a reload does not
/// replay a spent authorization code.
#[cfg(feature = "hydrate")]
fn strip_redirect_query(window: &web_sys::Window) {
    let path = window
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_owned());
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
}

/// [`IdentityProvider`] backed by the same-origin server API.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiIdentity;

#[async_trait::async_trait(?Send)]
impl IdentityProvider for ApiIdentity {
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInOutcome, ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "username": username, "password": password });
            let resp: SignInResponse = post_json(&auth_endpoint("sign-in"), &payload).await?;
            Ok(resp.into_outcome())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            Err(ProviderError::Unavailable)
        }
    }

    async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<SignUpOutcome, ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "username": username, "email": email, "password": password });
            let resp: SignUpResponse = post_json(&auth_endpoint("sign-up"), &payload).await?;
            Ok(SignUpOutcome { user_confirmed: resp.user_confirmed, user_sub: resp.user_sub })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, email, password);
            Err(ProviderError::Unavailable)
        }
    }

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "username": username, "code": code });
            post_ack(&auth_endpoint("confirm-sign-up"), &payload).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, code);
            Err(ProviderError::Unavailable)
        }
    }

    async fn reset_password(&self, username: &str) -> Result<(), ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "username": username });
            let _: serde_json::Value = post_json(&auth_endpoint("reset-password"), &payload).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = username;
            Err(ProviderError::Unavailable)
        }
    }

    async fn confirm_reset_password(&self, username: &str, code: &str, new_password: &str) -> Result<(), ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "username": username, "code": code, "new_password": new_password });
            post_ack(&auth_endpoint("confirm-reset-password"), &payload).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, code, new_password);
            Err(ProviderError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            post_ack(&auth_endpoint("sign-out"), &serde_json::json!({})).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ProviderError::Unavailable)
        }
    }

    async fn current_user(&self) -> Result<IdentityUser, ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&auth_endpoint("me"))
                .send()
                .await
                .map_err(|e| ProviderError::Transport(e.to_string()))?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ProviderError::Unavailable)
        }
    }

    async fn sign_in_with_redirect(&self, provider: FederatedProvider) -> Result<(), ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window().ok_or(ProviderError::Unavailable)?;
            window
                .location()
                .assign(&federated_start_path(provider))
                .map_err(|_| ProviderError::Transport(format!("could not open {} sign in", provider.label())))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = provider;
            Err(ProviderError::Unavailable)
        }
    }

    async fn complete_federated_sign_in(&self) -> Result<IdentityUser, ProviderError> {
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window().ok_or(ProviderError::Unavailable)?;
            let search = window
                .location()
                .search()
                .map_err(|_| ProviderError::NoPendingRedirect)?;
            let params =
                web_sys::UrlSearchParams::new_with_str(&search).map_err(|_| ProviderError::NoPendingRedirect)?;
            let query = classify_redirect(
                params.get("code"),
                params.get("state"),
                params.get("error"),
                params.get("error_description"),
            )
            .ok_or(ProviderError::NoPendingRedirect)?;
            strip_redirect_query(&window);

            match query {
                RedirectQuery::Error { message } => {
                    Err(ProviderError::Rejected { code: "FederatedSignInError".to_owned(), message })
                }
                RedirectQuery::Code { code, state } => {
                    let payload = serde_json::json!({ "code": code, "state": state });
                    post_json(&auth_endpoint("federated/complete"), &payload).await
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ProviderError::NoPendingRedirect)
        }
    }
}
