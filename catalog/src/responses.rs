//! Placeholder responses for the side-by-side responses view.
//!
//! No model is ever invoked; the responses page renders these fixed entries.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlaceholderResponse {
    pub id: u32,
    pub model_id: &'static str,
    pub body: &'static str,
    pub response_time_secs: f64,
    /// USD.
    pub cost: f64,
}

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut \
labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip \
ex ea commodo consequat.";

const LOREM_LONG: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt \
ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip \
ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla \
pariatur.";

const LOREM_FULL: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt \
ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip \
ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla \
pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est \
laborum.";

/// Prompt prefilled in the responses view composer.
pub const PLACEHOLDER_PROMPT: &str = LOREM;

static RESPONSES: &[PlaceholderResponse] = &[
    PlaceholderResponse { id: 1, model_id: "claude-sonnet-3.5", body: LOREM_LONG, response_time_secs: 6.32, cost: 0.53 },
    PlaceholderResponse { id: 2, model_id: "claude-opus-4", body: LOREM_FULL, response_time_secs: 8.45, cost: 0.78 },
    PlaceholderResponse { id: 3, model_id: "llama-3-70b", body: LOREM, response_time_secs: 4.21, cost: 0.42 },
    PlaceholderResponse { id: 4, model_id: "gpt-4o", body: LOREM_LONG, response_time_secs: 7.89, cost: 0.65 },
];

#[must_use]
pub fn placeholder_responses() -> &'static [PlaceholderResponse] {
    RESPONSES
}

/// Sum of the per-response costs.
#[must_use]
pub fn estimated_total_cost(responses: &[PlaceholderResponse]) -> f64 {
    responses.iter().map(|r| r.cost).sum()
}
