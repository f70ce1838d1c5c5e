//! Amazon Cognito user pool client.
//!
//! Thin HTTP wrapper over the Cognito Identity Provider JSON API (public app
//! client, no secret hash) and the hosted UI `/oauth2/token` endpoint.
//! Pure request building and response parsing live in free functions for
//! testability.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use super::types::{
    CodeDelivery, FederatedProvider, IdentityError, SignInResult, SignUpResult, TokenSet, UserProfile,
};
use super::IdentityService;
use crate::config::CognitoConfig;

const AMZ_JSON: &str = "application/x-amz-json-1.1";
const AMZ_TARGET_HEADER: &str = "X-Amz-Target";
const AMZ_TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

// =============================================================================
// CLIENT
// =============================================================================

pub struct CognitoClient {
    http: reqwest::Client,
    config: CognitoConfig,
}

impl CognitoClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: CognitoConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &CognitoConfig {
        &self.config
    }

    async fn call<B, T>(&self, operation: &str, body: &B) -> Result<T, IdentityError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_string(body).map_err(|e| IdentityError::Parse(e.to_string()))?;
        tracing::debug!(operation, "cognito request");

        let response = self
            .http
            .post(self.config.api_endpoint())
            .header(CONTENT_TYPE, AMZ_JSON)
            .header(AMZ_TARGET_HEADER, target_header(operation))
            .body(payload)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(parse_error(status.as_u16(), &text));
        }
        serde_json::from_str(&text).map_err(|e| IdentityError::Parse(e.to_string()))
    }

    async fn initiate_auth(&self, flow: &str, params: BTreeMap<&str, &str>) -> Result<InitiateAuthResponse, IdentityError> {
        let body = InitiateAuthRequest { auth_flow: flow, client_id: &self.config.client_id, auth_parameters: params };
        self.call("InitiateAuth", &body).await
    }
}

#[async_trait::async_trait]
impl IdentityService for CognitoClient {
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResult, IdentityError> {
        let params = BTreeMap::from([("USERNAME", username), ("PASSWORD", password)]);
        let response = self.initiate_auth("USER_PASSWORD_AUTH", params).await?;
        sign_in_result(response)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, IdentityError> {
        let params = BTreeMap::from([("REFRESH_TOKEN", refresh_token)]);
        let response = self.initiate_auth("REFRESH_TOKEN_AUTH", params).await?;
        match sign_in_result(response)? {
            SignInResult::Tokens(tokens) => Ok(tokens),
            SignInResult::Challenge(name) => Err(IdentityError::Parse(format!("unexpected challenge on refresh: {name}"))),
        }
    }

    async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<SignUpResult, IdentityError> {
        let body = SignUpRequest {
            client_id: &self.config.client_id,
            username,
            password,
            user_attributes: vec![AttributeRef { name: "email", value: email }],
        };
        let response: SignUpResponse = self.call("SignUp", &body).await?;
        Ok(SignUpResult { user_confirmed: response.user_confirmed, user_sub: response.user_sub })
    }

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), IdentityError> {
        let body = ConfirmSignUpRequest { client_id: &self.config.client_id, username, confirmation_code: code };
        let _: IgnoredAny = self.call("ConfirmSignUp", &body).await?;
        Ok(())
    }

    async fn forgot_password(&self, username: &str) -> Result<CodeDelivery, IdentityError> {
        let body = ForgotPasswordRequest { client_id: &self.config.client_id, username };
        let response: ForgotPasswordResponse = self.call("ForgotPassword", &body).await?;
        Ok(response.code_delivery_details.map(CodeDelivery::from).unwrap_or_default())
    }

    async fn confirm_forgot_password(
        &self,
        username: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let body = ConfirmForgotPasswordRequest {
            client_id: &self.config.client_id,
            username,
            confirmation_code: code,
            password: new_password,
        };
        let _: IgnoredAny = self.call("ConfirmForgotPassword", &body).await?;
        Ok(())
    }

    async fn global_sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let _: IgnoredAny = self.call("GlobalSignOut", &AccessTokenRequest { access_token }).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<UserProfile, IdentityError> {
        let response: GetUserResponse = self.call("GetUser", &AccessTokenRequest { access_token }).await?;
        Ok(profile_from_user(response))
    }

    fn authorize_url(
        &self,
        provider: FederatedProvider,
        state: &str,
        code_challenge: &str,
    ) -> Result<String, IdentityError> {
        authorize_url_for(&self.config, provider, state, code_challenge)
    }

    fn logout_url(&self) -> Option<String> {
        logout_url_for(&self.config)
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<TokenSet, IdentityError> {
        let domain = self.config.domain.as_deref().ok_or(IdentityError::HostedUiUnavailable)?;
        tracing::debug!("cognito authorization code exchange");

        let response = self
            .http
            .post(format!("{domain}/oauth2/token"))
            .header(CONTENT_TYPE, FORM_URLENCODED)
            .body(token_form(&self.config, code, code_verifier))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(parse_error(status.as_u16(), &text));
        }
        parse_token_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: BTreeMap<&'a str, &'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    refresh_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeRef<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    user_attributes: Vec<AttributeRef<'a>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpResponse {
    #[serde(default)]
    user_confirmed: bool,
    user_sub: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmSignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ForgotPasswordRequest<'a> {
    client_id: &'a str,
    username: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ForgotPasswordResponse {
    code_delivery_details: Option<CodeDeliveryDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CodeDeliveryDetails {
    destination: Option<String>,
    delivery_medium: Option<String>,
}

impl From<CodeDeliveryDetails> for CodeDelivery {
    fn from(details: CodeDeliveryDetails) -> Self {
        Self { destination: details.destination, medium: details.delivery_medium }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmForgotPasswordRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AccessTokenRequest<'a> {
    access_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserResponse {
    username: String,
    #[serde(default)]
    user_attributes: Vec<Attribute>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Attribute {
    name: String,
    value: Option<String>,
}

#[derive(Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
}

/// Error body shared by the JSON API (`__type`) and the OAuth endpoints (`error`).
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

// =============================================================================
// PURE HELPERS
// =============================================================================

fn target_header(operation: &str) -> String {
    format!("{AMZ_TARGET_PREFIX}.{operation}")
}

/// Classify a non-success response body.
///
/// `__type` may carry a namespace (`com.amazonaws...#CodeMismatchException`)
/// or a trailing `:` suffix; both are stripped.
fn parse_error(status: u16, body: &str) -> IdentityError {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return IdentityError::Request(format!("status {status}: {}", body.chars().take(200).collect::<String>()));
    };

    if let Some(raw) = parsed.kind.as_deref() {
        let kind = raw.rsplit('#').next().unwrap_or(raw);
        let kind = kind.split(':').next().unwrap_or(kind).trim();
        let message = parsed.message.unwrap_or_else(|| kind.to_owned());
        return IdentityError::rejected(kind, message);
    }
    if let Some(error) = parsed.error {
        let message = parsed
            .error_description
            .unwrap_or_else(|| oauth_error_message(&error).to_owned());
        return IdentityError::rejected(error, message);
    }
    IdentityError::Request(format!("status {status} without error type"))
}

fn oauth_error_message(error: &str) -> &'static str {
    match error {
        "invalid_grant" => "Authorization code is invalid or expired",
        "invalid_client" | "unauthorized_client" => "This app is not allowed to sign in with that provider",
        _ => "Sign in with the external provider failed",
    }
}

fn sign_in_result(response: InitiateAuthResponse) -> Result<SignInResult, IdentityError> {
    if let Some(result) = response.authentication_result {
        return Ok(SignInResult::Tokens(TokenSet {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            expires_in: result.expires_in,
        }));
    }
    match response.challenge_name {
        Some(challenge) => Ok(SignInResult::Challenge(challenge)),
        None => Err(IdentityError::Parse("InitiateAuth returned neither tokens nor a challenge".into())),
    }
}

/// The pool's `sub` attribute is the stable user id; `Username` is the
/// fallback for pools that do not return it.
fn profile_from_user(response: GetUserResponse) -> UserProfile {
    let attribute = |key: &str| {
        response
            .user_attributes
            .iter()
            .find(|a| a.name == key)
            .and_then(|a| a.value.clone())
    };
    let user_id = attribute("sub").unwrap_or_else(|| response.username.clone());
    let email = attribute("email");
    UserProfile { user_id, username: response.username, email }
}

fn authorize_url_for(
    config: &CognitoConfig,
    provider: FederatedProvider,
    state: &str,
    code_challenge: &str,
) -> Result<String, IdentityError> {
    let domain = config.domain.as_deref().ok_or(IdentityError::HostedUiUnavailable)?;
    let scope = config.scope_param();
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs([
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_sign_in.as_str()),
            ("identity_provider", provider.provider_name()),
            ("scope", scope.as_str()),
            ("state", state),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
        ])
        .finish();
    Ok(format!("{domain}/oauth2/authorize?{query}"))
}

fn logout_url_for(config: &CognitoConfig) -> Option<String> {
    let domain = config.domain.as_deref()?;
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs([("client_id", config.client_id.as_str()), ("logout_uri", config.redirect_sign_out.as_str())])
        .finish();
    Some(format!("{domain}/logout?{query}"))
}

fn token_form(config: &CognitoConfig, code: &str, code_verifier: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs([
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("redirect_uri", config.redirect_sign_in.as_str()),
            ("code_verifier", code_verifier),
        ])
        .finish()
}

fn parse_token_response(body: &str) -> Result<TokenSet, IdentityError> {
    let parsed: OAuthTokenResponse = serde_json::from_str(body).map_err(|e| IdentityError::Parse(e.to_string()))?;
    Ok(TokenSet {
        access_token: parsed.access_token,
        refresh_token: parsed.refresh_token,
        expires_in: parsed.expires_in,
    })
}

#[cfg(test)]
#[path = "cognito_test.rs"]
mod tests;
