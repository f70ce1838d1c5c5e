//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes and the sign-in/out buttons apply identical session
//! behavior: bounce to `/` once the session check is done and nobody is
//! signed in, and report sign-out results through the toast.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AccessGate, AuthStore};
use crate::state::ui::UiState;

/// Where unauthenticated visitors of a protected route end up.
pub const UNAUTH_REDIRECT: &str = "/";

/// True once the session check is done and nobody is signed in.
pub fn should_redirect_unauth(state: &AuthStore) -> bool {
    state.access_gate() == AccessGate::Denied
}

/// Redirect to `/` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthStore>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.with(should_redirect_unauth) {
            navigate(UNAUTH_REDIRECT, NavigateOptions::default());
        }
    });
}

/// Sign out through the API and report the result.
pub fn sign_out(auth: RwSignal<AuthStore>, ui: RwSignal<UiState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match AuthStore::revoke(&crate::net::api::ApiIdentity).await {
            Ok(()) => {
                auth.update(|s| s.set_user(None));
                ui.update(|u| u.notify("Signed out"));
            }
            Err(e) => {
                log::warn!("sign out failed: {e}");
                ui.update(|u| u.notify_error(e.to_string()));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (auth, ui);
    }
}
