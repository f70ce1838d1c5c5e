//! Credit packs shown in the pricing section.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PricingPlan {
    pub name: &'static str,
    pub price: &'static str,
    pub credits: Option<&'static str>,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub button_text: &'static str,
    /// Primary-styled call to action (the free tier uses an outline button).
    pub primary: bool,
    /// Corner badge, e.g. a savings callout.
    pub badge: Option<&'static str>,
}

static PLANS: &[PricingPlan] = &[
    PricingPlan {
        name: "Free",
        price: "$0",
        credits: None,
        description: "Perfect for trying out the platform.",
        features: &["One free prompt to 4 models", "Bring your own auth tokens", "Access to basic models"],
        button_text: "Get started",
        primary: false,
        badge: None,
    },
    PricingPlan {
        name: "Starter pack",
        price: "$10",
        credits: Some("1000 credits"),
        description: "For regular users and small teams.",
        features: &[
            "Covers ~1000 tokens across 4 models",
            "All premium models",
            "Bring your own auth tokens",
            "No recurring subscription",
        ],
        button_text: "Get started",
        primary: true,
        badge: None,
    },
    PricingPlan {
        name: "Pro pack",
        price: "$25",
        credits: Some("3500 credits"),
        description: "For power users and larger teams.",
        features: &[
            "Covers ~3000 tokens across 4 models",
            "All premium models",
            "Bring your own auth tokens",
            "No recurring subscription",
            "Priority support",
        ],
        button_text: "Get started",
        primary: true,
        badge: Some("Save 29%"),
    },
];

#[must_use]
pub fn pricing_plans() -> &'static [PricingPlan] {
    PLANS
}
