//! Model catalog grid with the sort/filter menu.

use catalog::{Model, ModelSort};
use leptos::prelude::*;

use crate::state::ui::UiState;
use crate::util::format::price_line;

fn model_card(model: Model) -> impl IntoView {
    let info = catalog::provider_info(model.provider);
    view! {
        <article class="model-card">
            <div class=format!("model-card__band bg-gradient-to-r {}", info.gradient)></div>
            <div class="model-card__header">
                {info.logo.map(|src| view! { <img class="model-card__logo" src=src alt=model.provider/> })}
                <h3>{model.name}</h3>
                {model.pro.then(|| view! { <span class="badge badge--pro">"PRO"</span> })}
            </div>
            <p class="model-card__provider">{model.provider}</p>
            <p class="model-card__description">{model.description}</p>
            <dl class="model-card__meta">
                <dt>"Price"</dt>
                <dd>{price_line(model.input_price, model.output_price)}</dd>
                <dt>"Context"</dt>
                <dd>{model.context_window}</dd>
            </dl>
        </article>
    }
}

#[component]
pub fn ModelsSection() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let sort = Memo::new(move |_| ui.with(|u| u.model_sort));

    let on_sort = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        if let Some(next) = ModelSort::ALL.into_iter().find(|s| s.label() == value) {
            ui.update(|u| u.model_sort = next);
        }
    };

    view! {
        <section id="models" class="models-section">
            <div class="models-section__header">
                <h2>"Every leading model, one prompt"</h2>
                <select class="models-section__sort" on:change=on_sort>
                    {ModelSort::ALL
                        .into_iter()
                        .map(|option| {
                            view! {
                                <option value=option.label() selected=move || sort.get() == option>
                                    {option.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            {move || {
                let current = sort.get();
                let sorted = catalog::sort_models(catalog::all_models(), current);
                if current == ModelSort::All {
                    catalog::group_by_provider(&sorted)
                        .into_iter()
                        .map(|(provider, models)| {
                            view! {
                                <div class="models-section__group">
                                    <h3>{provider}</h3>
                                    <div class="models-section__grid">
                                        {models.into_iter().map(model_card).collect_view()}
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                } else {
                    view! {
                        <div class="models-section__grid">{sorted.into_iter().map(model_card).collect_view()}</div>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}
