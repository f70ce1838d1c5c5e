//! Modal listing preset use cases; picking one fills the composer slots.

use leptos::prelude::*;

use crate::state::composer::ComposerState;

#[component]
pub fn UseCaseModal(on_close: Callback<()>) -> impl IntoView {
    let composer = expect_context::<RwSignal<ComposerState>>();

    view! {
        <div class="use-case-modal__backdrop" on:click=move |_| on_close.run(())>
            <div class="use-case-modal" on:click=move |ev| ev.stop_propagation()>
                <div class="use-case-modal__header">
                    <h2>"Choose a use case"</h2>
                    <button class="use-case-modal__close" on:click=move |_| on_close.run(()) title="Close">
                        "✕"
                    </button>
                </div>
                <div class="use-case-modal__grid">
                    {catalog::all_use_cases()
                        .iter()
                        .map(|use_case| {
                            let model_ids = use_case.model_ids;
                            let names = catalog::models_for_use_case(use_case)
                                .iter()
                                .map(|m| m.name)
                                .collect::<Vec<_>>()
                                .join(", ");
                            view! {
                                <button
                                    class="use-case-card"
                                    on:click=move |_| {
                                        composer.update(|c| c.apply_use_case(model_ids));
                                        on_close.run(());
                                    }
                                >
                                    <h3>{use_case.title}</h3>
                                    <p>{use_case.description}</p>
                                    <p class="use-case-card__models">{names}</p>
                                    <span class="use-case-card__credits">
                                        {format!("{} credits / prompt", use_case.credits_per_prompt)}
                                    </span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}
