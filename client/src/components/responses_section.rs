//! Side-by-side responses view.
//!
//! No model is called; the cards show the catalog's placeholder responses
//! under whatever prompt is currently in the composer.

use leptos::prelude::*;

use crate::state::composer::ComposerState;
use crate::util::format::{format_cost, format_seconds};

#[component]
pub fn ResponsesSection() -> impl IntoView {
    let composer = expect_context::<RwSignal<ComposerState>>();
    let prompt = move || {
        composer.with(|c| {
            let trimmed = c.prompt.trim();
            if trimmed.is_empty() { catalog::PLACEHOLDER_PROMPT.to_owned() } else { trimmed.to_owned() }
        })
    };
    let responses = catalog::placeholder_responses();

    view! {
        <section class="responses-section">
            <div class="responses-section__prompt">
                <span class="responses-section__label">"Prompt"</span>
                <p>{prompt}</p>
            </div>
            <div class="responses-section__grid">
                {responses
                    .iter()
                    .map(|response| {
                        let model = catalog::model_by_id(response.model_id);
                        let name = model.map_or(response.model_id, |m| m.name);
                        let gradient = model
                            .map_or_else(|| catalog::provider_info(""), |m| catalog::provider_info(m.provider))
                            .gradient;
                        view! {
                            <article class="response-card">
                                <header class=format!("response-card__header bg-gradient-to-r {gradient}")>
                                    <h3>{name}</h3>
                                </header>
                                <p class="response-card__body">{response.body}</p>
                                <footer class="response-card__meta">
                                    <span>{format_seconds(response.response_time_secs)}</span>
                                    <span>{format_cost(response.cost)}</span>
                                </footer>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
            <p class="responses-section__total">
                "Total cost: " {format_cost(catalog::estimated_total_cost(responses))}
            </p>
        </section>
    }
}
