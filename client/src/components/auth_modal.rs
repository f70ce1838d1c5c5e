//! Sign-in / sign-up / verify / reset modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the root component while `UiState::auth_modal` is set. The
//! modal owns its `AuthFlow`; each submit runs on a snapshot of the flow and
//! writes it back when the provider call settles. Inputs and mode links are
//! disabled meanwhile, and `AuthFlow::settle` drops a stale snapshot. The
//! session store is never snapshotted: only a sign-in is merged into it.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use leptos::prelude::*;

use crate::state::auth::AuthStore;
use crate::state::auth_flow::{AuthFlow, AuthMode, ConfirmPurpose, CredentialEntry};
use crate::state::ui::UiState;

/// One input of the credential form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Code,
    NewPassword,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
            Self::Code => "Verification Code",
            Self::NewPassword => "New Password",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password | Self::ConfirmPassword | Self::NewPassword => "password",
            Self::Username | Self::Code => "text",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Username => "Enter your username",
            Self::Email => "you@example.com",
            Self::Password => "Enter your password",
            Self::ConfirmPassword => "Repeat the password",
            Self::Code => "123456",
            Self::NewPassword => "Choose a new password",
        }
    }

    pub fn value(self, form: &CredentialEntry) -> &str {
        match self {
            Self::Username => &form.username,
            Self::Email => &form.email,
            Self::Password => &form.password,
            Self::ConfirmPassword => &form.confirm_password,
            Self::Code => &form.code,
            Self::NewPassword => &form.new_password,
        }
    }

    pub fn slot(self, form: &mut CredentialEntry) -> &mut String {
        match self {
            Self::Username => &mut form.username,
            Self::Email => &mut form.email,
            Self::Password => &mut form.password,
            Self::ConfirmPassword => &mut form.confirm_password,
            Self::Code => &mut form.code,
            Self::NewPassword => &mut form.new_password,
        }
    }
}

/// Inputs shown for a mode, top to bottom.
pub fn fields_for(mode: &AuthMode) -> &'static [Field] {
    match mode {
        AuthMode::SignIn => &[Field::Username, Field::Password],
        AuthMode::SignUp => &[Field::Username, Field::Email, Field::Password, Field::ConfirmPassword],
        AuthMode::ForgotPassword => &[Field::Username],
        AuthMode::Confirm { purpose: ConfirmPurpose::Registration, .. } => &[Field::Code],
        AuthMode::Confirm { purpose: ConfirmPurpose::PasswordReset, .. } => {
            &[Field::Code, Field::NewPassword, Field::ConfirmPassword]
        }
    }
}

/// Whether the "Continue with Google" button is offered in this mode.
pub fn offers_federated(mode: &AuthMode) -> bool {
    matches!(mode, AuthMode::SignIn)
}

fn field_input(field: Field, flow: RwSignal<AuthFlow>, busy: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="auth-modal__label">
            <span>{field.label()}</span>
            <input
                class="auth-modal__input"
                type=field.input_type()
                placeholder=field.placeholder()
                disabled=move || busy.get()
                prop:value=move || flow.with(|f| field.value(&f.form).to_owned())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    flow.update(|f| *field.slot(&mut f.form) = value);
                }
            />
        </label>
    }
}

#[component]
pub fn AuthModal(initial_mode: AuthMode, on_close: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthStore>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let flow = RwSignal::new(AuthFlow::with_mode(initial_mode));
    let busy = RwSignal::new(false);
    let mode = Memo::new(move |_| flow.with(|f| f.mode().clone()));
    let switch_to = move |next: AuthMode| flow.update(|f| f.switch_mode(next));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let mut working = flow.get_untracked();
            let started_in = working.mode().clone();
            let result = working.submit(&crate::net::api::ApiIdentity).await;
            flow.update(|f| f.settle(&started_in, working));
            busy.set(false);
            match result {
                Ok(outcome) => {
                    auth.update(|s| outcome.apply(s));
                    ui.update(|u| u.notify(outcome.notice()));
                    if outcome.closes_modal() {
                        on_close.run(());
                    }
                }
                Err(e) => log::debug!("auth submit rejected: {e}"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (auth, ui);
        }
    };

    let on_google = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let mut working = flow.get_untracked();
            let started_in = working.mode().clone();
            let result = working
                .sign_in_with_federated(
                    &crate::net::api::ApiIdentity,
                    crate::net::identity::FederatedProvider::Google,
                )
                .await;
            flow.update(|f| f.settle(&started_in, working));
            busy.set(false);
            if let Err(e) = result {
                ui.update(|u| u.notify_error(e.to_string()));
            }
        });
    };

    view! {
        <div class="auth-modal__backdrop" on:click=move |_| on_close.run(())>
            <div class="auth-modal" on:click=move |ev| ev.stop_propagation()>
                <div class="auth-modal__header">
                    <h2>{move || mode.with(AuthMode::title)}</h2>
                    <button class="auth-modal__close" on:click=move |_| on_close.run(()) title="Close">
                        "✕"
                    </button>
                </div>
                {move || {
                    mode.with(|m| m.pending_username().map(str::to_owned))
                        .map(|username| {
                            view! {
                                <p class="auth-modal__hint">
                                    "Enter the code we emailed for " <strong>{username}</strong> "."
                                </p>
                            }
                        })
                }}
                <form class="auth-modal__form" on:submit=on_submit>
                    {move || {
                        fields_for(&mode.get())
                            .iter()
                            .map(|field| field_input(*field, flow, busy))
                            .collect_view()
                    }}
                    {move || {
                        flow.with(|f| f.last_error().map(str::to_owned))
                            .map(|message| view! { <p class="auth-modal__error">{message}</p> })
                    }}
                    <button class="btn btn--primary auth-modal__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Loading..." } else { mode.with(AuthMode::submit_label) }}
                    </button>
                </form>
                <Show when=move || mode.with(offers_federated)>
                    <div class="auth-modal__divider">"or"</div>
                    <button
                        class="btn btn--outline auth-modal__federated"
                        disabled=move || busy.get()
                        on:click=on_google
                    >
                        "Continue with Google"
                    </button>
                </Show>
                <div class="auth-modal__links">
                    {move || match mode.get() {
                        AuthMode::SignIn => view! {
                            <button
                                class="auth-modal__link"
                                disabled=move || busy.get()
                                on:click=move |_| switch_to(AuthMode::ForgotPassword)
                            >
                                "Forgot password?"
                            </button>
                            <button
                                class="auth-modal__link"
                                disabled=move || busy.get()
                                on:click=move |_| switch_to(AuthMode::SignUp)
                            >
                                "Don't have an account? Sign up"
                            </button>
                        }
                        .into_any(),
                        AuthMode::SignUp => view! {
                            <button
                                class="auth-modal__link"
                                disabled=move || busy.get()
                                on:click=move |_| switch_to(AuthMode::SignIn)
                            >
                                "Already have an account? Sign in"
                            </button>
                        }
                        .into_any(),
                        AuthMode::ForgotPassword | AuthMode::Confirm { .. } => view! {
                            <button
                                class="auth-modal__link"
                                disabled=move || busy.get()
                                on:click=move |_| switch_to(AuthMode::SignIn)
                            >
                                "Back to sign in"
                            </button>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
