//! Bottom-of-page status message. Dismisses itself after a few seconds.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[cfg(feature = "hydrate")]
const TOAST_VISIBLE_SECS: u64 = 4;

#[component]
pub fn ToastHost() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    #[cfg(feature = "hydrate")]
    {
        let seq = Memo::new(move |_| ui.with(|u| u.toast_seq));
        Effect::new(move || {
            let current = seq.get();
            if current == 0 {
                return;
            }
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_secs(TOAST_VISIBLE_SECS)).await;
                ui.update(|u| u.dismiss_toast(current));
            });
        });
    }

    view! {
        {move || {
            ui.with(|u| u.toast.clone())
                .map(|toast| {
                    view! {
                        <div
                            class="toast"
                            class:toast--error=toast.is_error
                            on:click=move |_| ui.update(|u| u.toast = None)
                        >
                            {toast.message}
                        </div>
                    }
                })
        }}
    }
}
