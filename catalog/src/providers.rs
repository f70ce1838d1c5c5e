//! Display metadata for model providers.

use serde::Serialize;

/// Badge gradient and logo for a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub name: &'static str,
    /// Tailwind-style gradient classes (`from-… to-…`).
    pub gradient: &'static str,
    pub logo: Option<&'static str>,
}

const DEFAULT_GRADIENT: &str = "from-purple-400 to-cyan-400";

static PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo { name: "Anthropic", gradient: "from-orange-500 to-red-500", logo: Some("/images/anthropic.png") },
    ProviderInfo { name: "OpenAI", gradient: "from-green-500 to-teal-500", logo: Some("/images/openAI.png") },
    ProviderInfo { name: "Meta", gradient: "from-blue-500 to-purple-500", logo: Some("/images/meta.png") },
    ProviderInfo { name: "Google", gradient: "from-blue-500 to-indigo-500", logo: Some("/images/google.png") },
    ProviderInfo { name: "Mistral AI", gradient: "from-purple-500 to-pink-500", logo: None },
    ProviderInfo { name: "Cohere", gradient: "from-emerald-500 to-cyan-500", logo: None },
    ProviderInfo { name: "Perplexity", gradient: "from-violet-500 to-purple-500", logo: None },
    ProviderInfo { name: "DeepSeek", gradient: "from-yellow-500 to-orange-500", logo: None },
];

/// Look up provider metadata. Unknown providers get a neutral gradient and no logo.
#[must_use]
pub fn provider_info(name: &str) -> ProviderInfo {
    PROVIDERS
        .iter()
        .find(|p| p.name == name)
        .copied()
        .unwrap_or(ProviderInfo { name: "", gradient: DEFAULT_GRADIENT, logo: None })
}
