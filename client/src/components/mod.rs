//! Reusable Leptos components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page sections and modals. Components read shared state from context and
//! never call the network directly except through `net::api::ApiIdentity`.

pub mod auth_modal;
pub mod footer;
pub mod header;
pub mod hero;
pub mod model_selector;
pub mod models_section;
pub mod pricing_section;
pub mod protected_route;
pub mod responses_section;
pub mod toast;
pub mod use_case_modal;
