//! Top navigation bar with session-aware auth buttons.

use leptos::prelude::*;

use crate::state::auth::{AccessGate, AuthStore};
use crate::state::auth_flow::AuthMode;
use crate::state::ui::UiState;
use crate::util::auth::sign_out;
use crate::util::format::initials;

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthStore>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let gate = Memo::new(move |_| auth.with(AuthStore::access_gate));

    view! {
        <header class="site-header">
            <a href="/" class="site-header__brand">
                "Prompter"
            </a>
            <nav class="site-header__nav" class:site-header__nav--open=move || ui.with(|u| u.mobile_menu_open)>
                <a href="/#models">"Models"</a>
                <a href="/#pricing">"Pricing"</a>
                <a href="/responses">"Responses"</a>
            </nav>
            <div class="site-header__auth">
                {move || match gate.get() {
                    AccessGate::Loading => view! { <span class="site-header__status">"…"</span> }.into_any(),
                    AccessGate::Granted => {
                        let name = auth.with(|a| a.display_name().unwrap_or_default().to_owned());
                        let badge = initials(&name);
                        view! {
                            <span class="site-header__avatar" title=name.clone()>
                                {badge}
                            </span>
                            <span class="site-header__user">{name}</span>
                            <button class="btn btn--ghost" on:click=move |_| sign_out(auth, ui)>
                                "Sign out"
                            </button>
                        }
                        .into_any()
                    }
                    AccessGate::Denied => view! {
                        <button class="btn btn--ghost" on:click=move |_| ui.update(|u| u.open_auth(AuthMode::SignIn))>
                            "Sign in"
                        </button>
                        <button class="btn btn--primary" on:click=move |_| ui.update(|u| u.open_auth(AuthMode::SignUp))>
                            "Get started"
                        </button>
                    }
                    .into_any(),
                }}
            </div>
            <button
                class="site-header__menu"
                title="Menu"
                on:click=move |_| ui.update(|u| u.mobile_menu_open = !u.mobile_menu_open)
            >
                "☰"
            </button>
        </header>
    }
}
