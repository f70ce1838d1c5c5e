//! Curated use cases that preselect a set of models for the prompt composer.

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod use_cases_test;

use serde::Serialize;

use crate::models::{Model, model_by_id};

/// A named preset of up to four models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct UseCase {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub model_ids: &'static [&'static str],
    pub credits_per_prompt: u32,
}

static USE_CASES: &[UseCase] = &[
    UseCase {
        id: "coding",
        title: "Coding assistant",
        description: "Write, review, and debug code across languages.",
        model_ids: &["claude-sonnet-4", "gpt-4o", "llama-3-codellama", "gemini-1.5-pro"],
        credits_per_prompt: 800,
    },
    UseCase {
        id: "creative-writing",
        title: "Creative writing",
        description: "Stories, copy, and long-form drafts with a distinct voice.",
        model_ids: &["claude-opus-4", "gpt-4-turbo", "gemini-1.5-pro-latest", "llama-3-70b"],
        credits_per_prompt: 800,
    },
    UseCase {
        id: "research",
        title: "Research & analysis",
        description: "Summarize documents and reason over long context.",
        model_ids: &["claude-opus-3.5", "gpt-4o", "gemini-1.5-pro", "llama-3-405b"],
        credits_per_prompt: 800,
    },
    UseCase {
        id: "customer-support",
        title: "Customer support",
        description: "Fast, friendly answers for high-volume conversations.",
        model_ids: &["claude-haiku-3", "gpt-4o-mini", "gemini-1.5-flash", "llama-3-8b"],
        credits_per_prompt: 800,
    },
    UseCase {
        id: "vision",
        title: "Image understanding",
        description: "Describe, classify, and extract data from images.",
        model_ids: &["gpt-4-vision", "gemini-vision", "gpt-4o", "claude-sonnet-3.5"],
        credits_per_prompt: 800,
    },
    UseCase {
        id: "budget",
        title: "Budget friendly",
        description: "The most affordable models for quick experiments.",
        model_ids: &["gpt-3.5-turbo", "claude-haiku-3", "gemini-nano", "llama-3-1b"],
        credits_per_prompt: 800,
    },
];

#[must_use]
pub fn all_use_cases() -> &'static [UseCase] {
    USE_CASES
}

#[must_use]
pub fn use_case_by_id(id: &str) -> Option<&'static UseCase> {
    USE_CASES.iter().find(|u| u.id == id)
}

/// Resolve a use case's model ids, silently skipping ids missing from the model table.
#[must_use]
pub fn models_for_use_case(use_case: &UseCase) -> Vec<&'static Model> {
    use_case.model_ids.iter().filter_map(|id| model_by_id(id)).collect()
}
