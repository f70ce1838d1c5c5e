//! Landing hero with the prompt composer.
//!
//! Submitting sends signed-in users to the responses view; everyone else is
//! asked to create an account first.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::model_selector::ModelSelector;
use crate::state::auth::AuthStore;
use crate::state::auth_flow::AuthMode;
use crate::state::composer::{ComposerState, MAX_SELECTED_MODELS};
use crate::state::ui::UiState;
use crate::util::format::format_cost;

#[component]
pub fn Hero() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthStore>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let composer = expect_context::<RwSignal<ComposerState>>();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !composer.with(ComposerState::can_submit) {
            return;
        }
        if auth.with(AuthStore::is_authenticated) {
            navigate("/responses", NavigateOptions::default());
        } else {
            ui.update(|u| u.open_auth(AuthMode::SignUp));
        }
    };

    view! {
        <section class="hero">
            <h1 class="hero__title">"Compare every leading AI model with a single prompt"</h1>
            <p class="hero__subtitle">
                "Send one prompt to up to four models and read their answers side by side."
            </p>
            <form class="hero__composer" on:submit=on_submit>
                <textarea
                    class="hero__prompt"
                    placeholder="Ask anything..."
                    prop:value=move || composer.with(|c| c.prompt.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        composer.update(|c| c.prompt = value);
                    }
                ></textarea>
                <div class="hero__slots">
                    {(0..MAX_SELECTED_MODELS)
                        .map(|index| view! { <ModelSelector index=index/> })
                        .collect_view()}
                </div>
                <div class="hero__footer">
                    <button
                        type="button"
                        class="btn btn--outline"
                        on:click=move |_| ui.update(|u| u.use_case_modal_open = true)
                    >
                        "Use cases"
                    </button>
                    <span class="hero__cost">
                        "Estimated cost: "
                        {move || format_cost(composer.with(ComposerState::estimated_cost))}
                    </span>
                    <button
                        type="submit"
                        class="btn btn--primary"
                        disabled=move || !composer.with(ComposerState::can_submit)
                    >
                        "Compare responses"
                    </button>
                </div>
            </form>
        </section>
    }
}
