//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{auth_modal::AuthModal, footer::Footer, header::Header, toast::ToastHost};
use crate::pages::{home::HomePage, responses::ResponsesPage};
use crate::state::{auth::AuthStore, composer::ComposerState, ui::UiState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session store, UI chrome state, and composer through context,
/// and resolves the existing session once after hydration. A failed
/// federated return is reported through the toast.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthStore::new());
    let ui = RwSignal::new(UiState::default());
    let composer = RwSignal::new(ComposerState::default());

    provide_context(auth);
    provide_context(ui);
    provide_context(composer);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let check = AuthStore::check_session(&crate::net::api::ApiIdentity).await;
        auth.update(|s| s.finish_initialize(check.user));
        if let Some(e) = check.redirect_error {
            log::warn!("federated sign in failed: {e}");
            ui.update(|u| u.notify_error(e.to_string()));
        }
    });

    let auth_modal = Memo::new(move |_| ui.with(|u| u.auth_modal.clone()));
    let close_auth = Callback::new(move |()| ui.update(UiState::close_auth));

    view! {
        <Stylesheet id="leptos" href="/pkg/prompter.css"/>
        <Title text="Prompter"/>

        <Router>
            <Header/>
            <main class="site-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("responses") view=ResponsesPage/>
                </Routes>
            </main>
            <Footer/>
            {move || auth_modal.get().map(|mode| view! { <AuthModal initial_mode=mode on_close=close_auth/> })}
            <ToastHost/>
        </Router>
    }
}
