//! Credit pack cards.

use catalog::PricingPlan;
use leptos::prelude::*;

use crate::state::auth::AuthStore;
use crate::state::auth_flow::AuthMode;
use crate::state::ui::UiState;

#[component]
pub fn PricingSection() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthStore>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_choose = move |plan: &'static PricingPlan| {
        if auth.with_untracked(AuthStore::is_authenticated) {
            ui.update(|u| u.notify(format!("{} selected. Checkout opens soon.", plan.name)));
        } else {
            ui.update(|u| u.open_auth(AuthMode::SignUp));
        }
    };

    view! {
        <section id="pricing" class="pricing-section">
            <h2>"Simple, credit-based pricing"</h2>
            <p class="pricing-section__subtitle">"Buy credits once and spend them on any model."</p>
            <div class="pricing-section__grid">
                {catalog::pricing_plans()
                    .iter()
                    .map(|plan| {
                        let button_class = if plan.primary { "btn btn--primary" } else { "btn btn--outline" };
                        view! {
                            <article class="pricing-card" class:pricing-card--primary=plan.primary>
                                {plan.badge.map(|badge| view! { <span class="pricing-card__badge">{badge}</span> })}
                                <h3>{plan.name}</h3>
                                <p class="pricing-card__price">{plan.price}</p>
                                {plan.credits.map(|credits| view! { <p class="pricing-card__credits">{credits}</p> })}
                                <p class="pricing-card__description">{plan.description}</p>
                                <ul class="pricing-card__features">
                                    {plan.features.iter().map(|feature| view! { <li>{*feature}</li> }).collect_view()}
                                </ul>
                                <button class=button_class on:click=move |_| on_choose(plan)>
                                    {plan.button_text}
                                </button>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
