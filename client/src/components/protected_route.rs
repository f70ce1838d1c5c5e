//! Wrapper that renders its children only for signed-in users.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AccessGate, AuthStore};
use crate::state::ui::UiState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthStore>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let gate = Memo::new(move |_| auth.with(AuthStore::access_gate));

    install_unauth_redirect(auth, use_navigate());
    Effect::new(move || {
        if gate.get() == AccessGate::Denied {
            ui.update(|u| u.notify_error("Authentication Required"));
        }
    });

    view! {
        {move || match gate.get() {
            AccessGate::Loading => view! {
                <div class="protected-route__loading">
                    <div class="spinner"></div>
                </div>
            }
            .into_any(),
            AccessGate::Denied => view! {
                <div class="protected-route__denied">
                    <h2>"Authentication Required"</h2>
                    <p>"Please sign in to view this page."</p>
                </div>
            }
            .into_any(),
            AccessGate::Granted => children().into_any(),
        }}
    }
}
