//! Server configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Identity settings are optional as a whole: when the Cognito variables are
//! absent the server still renders the site and serves the catalog, and the
//! auth endpoints answer 503. Parsing is split into small helpers so tests
//! can exercise them without a live user pool.

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SCOPES: &str = "openid email profile aws.cognito.signin.user.admin";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/";
pub const DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing config: env var {var} not set")]
    Missing { var: &'static str },

    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Cognito user pool settings for a public app client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
    /// Hosted UI base URL, `https://` included, no trailing slash.
    pub domain: Option<String>,
    pub scopes: Vec<String>,
    pub redirect_sign_in: String,
    pub redirect_sign_out: String,
    pub timeouts: IdentityTimeouts,
}

impl CognitoConfig {
    /// Build typed Cognito config from environment variables.
    ///
    /// Required:
    /// - `COGNITO_USER_POOL_ID` (e.g. `us-east-1_AbC123`)
    /// - `COGNITO_CLIENT_ID`
    ///
    /// Optional:
    /// - `COGNITO_REGION`: derived from the pool id when absent
    /// - `COGNITO_DOMAIN`: hosted UI domain; federated sign-in is off without it
    /// - `COGNITO_SCOPES`: space or comma separated, default `openid email profile aws.cognito.signin.user.admin`
    /// - `COGNITO_REDIRECT_SIGN_IN` / `COGNITO_REDIRECT_SIGN_OUT`: default `http://localhost:3000/`
    /// - `COGNITO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `COGNITO_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, ConfigError> {
        let user_pool_id = env_required("COGNITO_USER_POOL_ID")?;
        let client_id = env_required("COGNITO_CLIENT_ID")?;
        let region = resolve_region(env_optional("COGNITO_REGION").as_deref(), &user_pool_id)?;
        let domain = env_optional("COGNITO_DOMAIN").map(|d| normalize_domain(&d));
        let scopes = parse_scopes(env_optional("COGNITO_SCOPES").as_deref().unwrap_or(DEFAULT_SCOPES));
        if scopes.is_empty() {
            return Err(ConfigError::Parse("COGNITO_SCOPES must list at least one scope".into()));
        }
        let redirect_sign_in = env_optional("COGNITO_REDIRECT_SIGN_IN").unwrap_or_else(|| DEFAULT_REDIRECT_URI.into());
        let redirect_sign_out =
            env_optional("COGNITO_REDIRECT_SIGN_OUT").unwrap_or_else(|| redirect_sign_in.clone());
        let timeouts = IdentityTimeouts {
            request_secs: env_parse_u64("COGNITO_REQUEST_TIMEOUT_SECS", DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("COGNITO_CONNECT_TIMEOUT_SECS", DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { region, user_pool_id, client_id, domain, scopes, redirect_sign_in, redirect_sign_out, timeouts })
    }

    /// Regional endpoint for the Cognito JSON API.
    #[must_use]
    pub fn api_endpoint(&self) -> String {
        format!("https://cognito-idp.{}.amazonaws.com/", self.region)
    }

    #[must_use]
    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }

    /// Cookies are `Secure` when forced via `COOKIE_SECURE` or when the app
    /// itself is served over https.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        env_bool("COOKIE_SECURE").unwrap_or_else(|| self.redirect_sign_in.starts_with("https://"))
    }
}

pub fn port_from_env() -> Result<u16, ConfigError> {
    match env_optional("PORT") {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Parse(format!("invalid PORT: {raw}"))),
    }
}

/// `COOKIE_SECURE` when no identity config is available to infer it.
#[must_use]
pub fn cookie_secure_fallback() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_required(key: &'static str) -> Result<String, ConfigError> {
    env_optional(key).ok_or(ConfigError::Missing { var: key })
}

/// Pool ids are `<region>_<suffix>`; an explicit region must agree with it.
fn resolve_region(explicit: Option<&str>, user_pool_id: &str) -> Result<String, ConfigError> {
    let Some((pool_region, suffix)) = user_pool_id.split_once('_') else {
        return Err(ConfigError::Parse(format!("malformed COGNITO_USER_POOL_ID: {user_pool_id}")));
    };
    if pool_region.is_empty() || suffix.is_empty() {
        return Err(ConfigError::Parse(format!("malformed COGNITO_USER_POOL_ID: {user_pool_id}")));
    }
    match explicit {
        Some(region) if region != pool_region => Err(ConfigError::Parse(format!(
            "COGNITO_REGION {region} does not match user pool region {pool_region}"
        ))),
        _ => Ok(pool_region.to_owned()),
    }
}

fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
