//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API and stitches it with Leptos SSR rendering
//! under a single Axum router. Page routes (`/`, `/responses`) are rendered
//! by the client crate; its compiled WASM/CSS bundle is served from `/pkg`
//! and other site assets (provider logos) from the site root.

pub mod auth;
pub mod catalog;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes. Auth routes rely on same-origin cookies, so CORS is
/// only opened for the read-only catalog.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog_routes = Router::new()
        .route("/api/catalog/models", get(catalog::list_models))
        .route("/api/catalog/models/{id}", get(catalog::get_model))
        .route("/api/catalog/providers", get(catalog::list_providers))
        .route("/api/catalog/use-cases", get(catalog::list_use_cases))
        .route("/api/catalog/pricing", get(catalog::list_pricing))
        .route("/api/catalog/responses", get(catalog::list_responses))
        .layer(cors);

    Router::new()
        .route("/api/auth/sign-in", post(auth::sign_in))
        .route("/api/auth/sign-up", post(auth::sign_up))
        .route("/api/auth/confirm-sign-up", post(auth::confirm_sign_up))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/confirm-reset-password", post(auth::confirm_reset_password))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/federated/complete", post(auth::federated_complete))
        .route("/auth/federated/{provider}", get(auth::federated_start))
        .route("/healthz", get(healthz))
        .with_state(state)
        .merge(catalog_routes)
}

/// API routes + Leptos SSR + static bundle.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback_service(ServeDir::new(site_root_path))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
