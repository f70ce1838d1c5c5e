//! Static catalogs for the Prompter landing site.
//!
//! This crate is UI-framework agnostic so the Leptos client can render it
//! directly and the server can expose it as JSON. Every table is a
//! `&'static` slice loaded once; there are no mutation paths and accessors
//! keep table order unless a caller asks for a specific sort.

pub mod models;
pub mod pricing;
pub mod providers;
pub mod responses;
pub mod use_cases;

pub use models::{
    Model, ModelSort, SimplifiedModel, all_models, group_by_provider, model_by_id, models_by_provider,
    parse_context_window, parse_price, providers, search_models, simplified_models, sort_models,
};
pub use pricing::{PricingPlan, pricing_plans};
pub use providers::{ProviderInfo, provider_info};
pub use responses::{PLACEHOLDER_PROMPT, PlaceholderResponse, estimated_total_cost, placeholder_responses};
pub use use_cases::{UseCase, all_use_cases, models_for_use_case, use_case_by_id};
