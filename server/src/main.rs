mod config;
mod identity;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::identity::IdentityService;
use crate::identity::cognito::CognitoClient;

/// Build the identity backend (non-fatal: auth routes answer 503 if config is missing).
fn identity_from_env() -> (Option<Arc<dyn IdentityService>>, bool) {
    let config = match config::CognitoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "identity provider not configured; auth routes disabled");
            return (None, config::cookie_secure_fallback());
        }
    };
    let cookie_secure = config.cookie_secure();

    match CognitoClient::new(config) {
        Ok(client) => {
            let cfg = client.config();
            tracing::info!(
                region = %cfg.region,
                user_pool_id = %cfg.user_pool_id,
                hosted_ui = cfg.domain.is_some(),
                "identity provider initialized"
            );
            (Some(Arc::new(client)), cookie_secure)
        }
        Err(e) => {
            tracing::error!(error = %e, "identity client build failed; auth routes disabled");
            (None, cookie_secure)
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = config::port_from_env().expect("invalid PORT");
    let (identity, cookie_secure) = identity_from_env();
    let state = state::AppState::new(identity, cookie_secure);

    let app = routes::app(state).expect("router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "prompter listening");
    axum::serve(listener, app).await.expect("server failed");
}
