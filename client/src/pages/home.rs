//! Landing page: hero composer, model catalog, pricing.

use leptos::prelude::*;

use crate::components::hero::Hero;
use crate::components::models_section::ModelsSection;
use crate::components::pricing_section::PricingSection;
use crate::components::use_case_modal::UseCaseModal;
use crate::state::ui::UiState;

#[component]
pub fn HomePage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let close_use_cases = Callback::new(move |()| ui.update(|u| u.use_case_modal_open = false));

    view! {
        <Hero/>
        <ModelsSection/>
        <PricingSection/>
        <Show when=move || ui.with(|u| u.use_case_modal_open)>
            <UseCaseModal on_close=close_use_cases/>
        </Show>
    }
}
