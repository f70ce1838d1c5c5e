//! One composer slot: the chosen model chip plus a searchable picker.

use leptos::prelude::*;

use crate::state::composer::ComposerState;

#[component]
pub fn ModelSelector(index: usize) -> impl IntoView {
    let composer = expect_context::<RwSignal<ComposerState>>();
    let open = RwSignal::new(false);
    let query = RwSignal::new(String::new());
    let selected = Memo::new(move |_| composer.with(|c| c.slots()[index]));

    let matches = move || {
        let taken = composer.with(|c| c.taken_elsewhere(index));
        query.with(|q| catalog::search_models(q, &taken))
    };

    view! {
        <div class="model-slot">
            {move || match selected.get().and_then(catalog::model_by_id) {
                Some(model) => {
                    let info = catalog::provider_info(model.provider);
                    view! {
                        <button
                            class=format!("model-slot__chip bg-gradient-to-r {}", info.gradient)
                            on:click=move |_| open.update(|o| *o = !*o)
                        >
                            {model.name}
                        </button>
                        <button
                            class="model-slot__clear"
                            title="Remove model"
                            on:click=move |_| composer.update(|c| c.clear_slot(index))
                        >
                            "✕"
                        </button>
                    }
                    .into_any()
                }
                None => view! {
                    <button class="model-slot__empty" on:click=move |_| open.set(true)>
                        "+ Add model"
                    </button>
                }
                .into_any(),
            }}
            <Show when=move || open.get()>
                <div class="model-slot__picker">
                    <input
                        class="model-slot__search"
                        type="text"
                        placeholder="Search models..."
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <ul class="model-slot__list">
                        {move || {
                            matches()
                                .into_iter()
                                .map(|model| {
                                    let id = model.id;
                                    view! {
                                        <li>
                                            <button on:click=move |_| {
                                                composer.update(|c| c.assign(index, id));
                                                query.set(String::new());
                                                open.set(false);
                                            }>
                                                <span>{model.name}</span>
                                                <span class="model-slot__provider">{model.provider}</span>
                                                <Show when=move || model.pro>
                                                    <span class="badge badge--pro">"PRO"</span>
                                                </Show>
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </div>
            </Show>
        </div>
    }
}
