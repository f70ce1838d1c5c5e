//! Catalog routes: read-only JSON views of the static tables.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use catalog::{Model, ModelSort, PlaceholderResponse, ProviderInfo, UseCase};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub struct ModelQuery {
    provider: Option<String>,
    sort: Option<String>,
    q: Option<String>,
}

fn parse_sort(raw: Option<&str>) -> Result<ModelSort, String> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("" | "all") => Ok(ModelSort::All),
        Some("price") => Ok(ModelSort::Price),
        Some("context") => Ok(ModelSort::Context),
        Some("provider") => Ok(ModelSort::Provider),
        Some(other) => Err(format!("unknown sort '{other}' (expected all, price, context or provider)")),
    }
}

/// Search, then provider filter, then sort.
fn select_models(query: &ModelQuery) -> Result<Vec<Model>, String> {
    let sort = parse_sort(query.sort.as_deref())?;
    let provider = query.provider.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let matched: Vec<Model> = catalog::search_models(query.q.as_deref().unwrap_or_default(), &[])
        .into_iter()
        .filter(|m| provider.is_none_or(|p| m.provider.eq_ignore_ascii_case(p)))
        .copied()
        .collect();
    Ok(catalog::sort_models(&matched, sort))
}

/// `GET /api/catalog/models[?provider=&sort=&q=]`
pub async fn list_models(Query(query): Query<ModelQuery>) -> Response {
    match select_models(&query) {
        Ok(models) => Json(models).into_response(),
        Err(message) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message, "code": "InvalidSort" }))).into_response()
        }
    }
}

/// `GET /api/catalog/models/{id}`
pub async fn get_model(Path(id): Path<String>) -> Response {
    match catalog::model_by_id(&id) {
        Some(model) => Json(model).into_response(),
        None => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "Model not found", "code": "NotFound" }))).into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    name: &'static str,
    gradient: &'static str,
    logo: Option<&'static str>,
    model_count: usize,
}

fn provider_summary(name: &'static str) -> ProviderSummary {
    let ProviderInfo { gradient, logo, .. } = catalog::provider_info(name);
    ProviderSummary { name, gradient, logo, model_count: catalog::models_by_provider(name).len() }
}

/// `GET /api/catalog/providers`: providers in table order with model counts.
pub async fn list_providers() -> Json<Vec<ProviderSummary>> {
    Json(catalog::providers().into_iter().map(provider_summary).collect())
}

#[derive(Debug, Serialize)]
pub struct UseCaseView {
    #[serde(flatten)]
    use_case: &'static UseCase,
    models: Vec<&'static Model>,
}

/// `GET /api/catalog/use-cases`: presets with their models resolved.
pub async fn list_use_cases() -> Json<Vec<UseCaseView>> {
    let views = catalog::all_use_cases()
        .iter()
        .map(|use_case| UseCaseView { use_case, models: catalog::models_for_use_case(use_case) })
        .collect();
    Json(views)
}

/// `GET /api/catalog/pricing`
pub async fn list_pricing() -> Json<&'static [catalog::PricingPlan]> {
    Json(catalog::pricing_plans())
}

#[derive(Debug, Serialize)]
pub struct ResponsesView {
    prompt: &'static str,
    responses: &'static [PlaceholderResponse],
    total_cost: f64,
}

/// `GET /api/catalog/responses`: the sample side-by-side comparison.
pub async fn list_responses() -> Json<ResponsesView> {
    let responses = catalog::placeholder_responses();
    Json(ResponsesView {
        prompt: catalog::PLACEHOLDER_PROMPT,
        responses,
        total_cost: catalog::estimated_total_cost(responses),
    })
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
