//! Language-model catalog and lookup helpers.
//!
//! Prices are per million tokens and kept as display strings (`"$4.00"`);
//! context windows likewise (`"200k"`, `"1M"`). [`parse_price`] and
//! [`parse_context_window`] turn them into numbers for sorting.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use std::cmp::Ordering;

use serde::Serialize;

/// One entry of the model table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Model {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: &'static str,
    pub input_price: &'static str,
    pub output_price: &'static str,
    pub context_window: &'static str,
    pub description: &'static str,
    /// Only available on paid packs.
    pub pro: bool,
}

/// Minimal projection used by pickers that only need identity fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SimplifiedModel {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: &'static str,
}

/// Ordering options offered by the models section filter menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelSort {
    /// Table order.
    #[default]
    All,
    /// Cheapest input price first.
    Price,
    /// Largest context window first.
    Context,
    /// Provider name, alphabetical. Stable within a provider.
    Provider,
}

impl ModelSort {
    pub const ALL: [Self; 4] = [Self::All, Self::Price, Self::Context, Self::Provider];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Models",
            Self::Price => "Sort by Price",
            Self::Context => "Sort by Context",
            Self::Provider => "Sort by Provider",
        }
    }
}

const fn model(
    id: &'static str,
    name: &'static str,
    provider: &'static str,
    prices: (&'static str, &'static str),
    context_window: &'static str,
    description: &'static str,
    pro: bool,
) -> Model {
    Model { id, name, provider, input_price: prices.0, output_price: prices.1, context_window, description, pro }
}

static MODELS: &[Model] = &[
    model("claude-sonnet-3.5", "Claude Sonnet 3.5", "Anthropic", ("$4.00", "$20.00"), "200k", "Balanced performance and speed", false),
    model("claude-opus-4", "Claude Opus 4", "Anthropic", ("$15.00", "$75.00"), "200k", "Most capable model", true),
    model("claude-haiku-3", "Claude Haiku 3", "Anthropic", ("$0.25", "$1.25"), "200k", "Fastest and most affordable", false),
    model("claude-sonnet-4", "Claude Sonnet 4", "Anthropic", ("$8.00", "$40.00"), "200k", "Next generation Sonnet", true),
    model("claude-opus-3.5", "Claude Opus 3.5", "Anthropic", ("$12.00", "$60.00"), "200k", "Enhanced reasoning capabilities", true),
    model("gpt-4o", "GPT-4o", "OpenAI", ("$5.00", "$15.00"), "128k", "Fast and multimodal", true),
    model("gpt-4-turbo", "GPT-4 Turbo", "OpenAI", ("$10.00", "$30.00"), "128k", "Latest GPT-4 model", false),
    model("gpt-3.5-turbo", "GPT-3.5 Turbo", "OpenAI", ("$0.50", "$1.50"), "16k", "Cost-effective and reliable", false),
    model("gpt-4o-mini", "GPT-4o Mini", "OpenAI", ("$0.15", "$0.60"), "128k", "Compact and efficient", false),
    model("gpt-4-turbo-preview", "GPT-4 Turbo Preview", "OpenAI", ("$8.00", "$24.00"), "128k", "Latest preview features", false),
    model("gpt-4-vision", "GPT-4 Vision", "OpenAI", ("$10.00", "$30.00"), "128k", "Multimodal with vision", true),
    model("llama-3-70b", "LLaMA 3 70B", "Meta", ("$0.90", "$0.90"), "8k", "Open source excellence", false),
    model("llama-3-8b", "LLaMA 3 8B", "Meta", ("$0.20", "$0.20"), "8k", "Fast and efficient", false),
    model("llama-3-400b", "LLaMA 3 400B", "Meta", ("$2.50", "$2.50"), "32k", "Largest open model", true),
    model("llama-3-1b", "LLaMA 3 1B", "Meta", ("$0.05", "$0.05"), "8k", "Ultra-lightweight model", false),
    model("llama-3-405b", "LLaMA 3 405B", "Meta", ("$3.00", "$3.00"), "32k", "Latest large model", true),
    model("llama-3-codellama", "Code Llama 3", "Meta", ("$1.50", "$1.50"), "16k", "Specialized for coding", false),
    model("gemini-1.5-pro", "Gemini 1.5 Pro", "Google", ("$3.50", "$10.50"), "1M", "Million-token context", true),
    model("gemini-1.5-flash", "Gemini 1.5 Flash", "Google", ("$0.75", "$2.25"), "1M", "Fast with long context", false),
    model("gemini-pro", "Gemini Pro", "Google", ("$1.50", "$4.50"), "32k", "Balanced performance", false),
    model("gemini-1.5-pro-latest", "Gemini 1.5 Pro Latest", "Google", ("$4.00", "$12.00"), "1M", "Latest with enhanced features", true),
    model("gemini-nano", "Gemini Nano", "Google", ("$0.25", "$0.75"), "32k", "On-device processing", false),
    model("gemini-vision", "Gemini Vision", "Google", ("$2.00", "$6.00"), "32k", "Multimodal with vision", true),
];

/// Every model in table order.
#[must_use]
pub fn all_models() -> &'static [Model] {
    MODELS
}

#[must_use]
pub fn model_by_id(id: &str) -> Option<&'static Model> {
    MODELS.iter().find(|m| m.id == id)
}

/// Models of one provider in table order. Matching is exact.
#[must_use]
pub fn models_by_provider(provider: &str) -> Vec<&'static Model> {
    MODELS.iter().filter(|m| m.provider == provider).collect()
}

#[must_use]
pub fn simplified_models() -> Vec<SimplifiedModel> {
    MODELS
        .iter()
        .map(|m| SimplifiedModel { id: m.id, name: m.name, provider: m.provider })
        .collect()
}

/// Distinct provider names in order of first appearance.
#[must_use]
pub fn providers() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for m in MODELS {
        if !out.contains(&m.provider) {
            out.push(m.provider);
        }
    }
    out
}

/// Group models by provider, keeping both group order and in-group order.
#[must_use]
pub fn group_by_provider(models: &[Model]) -> Vec<(&'static str, Vec<Model>)> {
    let mut groups: Vec<(&'static str, Vec<Model>)> = Vec::new();
    for m in models {
        match groups.iter_mut().find(|(p, _)| *p == m.provider) {
            Some((_, bucket)) => bucket.push(*m),
            None => groups.push((m.provider, vec![*m])),
        }
    }
    groups
}

/// Return a sorted copy. Entries whose price or context cannot be parsed sort last.
#[must_use]
pub fn sort_models(models: &[Model], sort: ModelSort) -> Vec<Model> {
    let mut out = models.to_vec();
    match sort {
        ModelSort::All => {}
        ModelSort::Price => out.sort_by(|a, b| {
            let pa = parse_price(a.input_price).unwrap_or(f64::INFINITY);
            let pb = parse_price(b.input_price).unwrap_or(f64::INFINITY);
            pa.total_cmp(&pb)
        }),
        ModelSort::Context => out.sort_by(|a, b| {
            match (parse_context_window(a.context_window), parse_context_window(b.context_window)) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
        ModelSort::Provider => out.sort_by(|a, b| a.provider.cmp(b.provider)),
    }
    out
}

/// Case-insensitive search over model name and provider.
///
/// `excluded` holds ids already taken by other selection slots; those are
/// left out so a model cannot occupy two slots.
#[must_use]
pub fn search_models(query: &str, excluded: &[&str]) -> Vec<&'static Model> {
    let needle = query.trim().to_lowercase();
    MODELS
        .iter()
        .filter(|m| !excluded.contains(&m.id))
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.provider.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Parse a display price such as `"$4.00"`.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().trim_start_matches('$').replace(',', "").parse::<f64>().ok()
}

/// Parse a context window such as `"200k"` or `"1M"` into a token count.
#[must_use]
pub fn parse_context_window(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let split = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let (digits, suffix) = raw.split_at(split);
    let base = digits.parse::<u64>().ok()?;
    let multiplier = match suffix {
        "" => 1,
        "k" | "K" => 1_000,
        "m" | "M" => 1_000_000,
        _ => return None,
    };
    base.checked_mul(multiplier)
}
