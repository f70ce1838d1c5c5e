use futures::executor::block_on;

use super::*;
use crate::state::test_helpers::{FakeProvider, VALID_CODE, user};

fn seeded_form() -> CredentialEntry {
    CredentialEntry {
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        password: "pw".to_owned(),
        confirm_password: "pw".to_owned(),
        code: "999".to_owned(),
        new_password: "new".to_owned(),
    }
}

fn loaded_store() -> AuthStore {
    let mut store = AuthStore::new();
    block_on(store.initialize(&FakeProvider::new())).unwrap();
    store
}

/// Submit, then merge the outcome into the store the way the modal does.
fn submit(flow: &mut AuthFlow, provider: &FakeProvider, store: &mut AuthStore) -> Result<SubmitOutcome, FlowError> {
    let result = block_on(flow.submit(provider));
    if let Ok(outcome) = &result {
        outcome.apply(store);
    }
    result
}

fn confirm(username: &str, purpose: ConfirmPurpose) -> AuthMode {
    AuthMode::Confirm { pending_username: username.to_owned(), purpose }
}

// =============================================================
// Labels
// =============================================================

#[test]
fn titles_and_submit_labels_per_mode() {
    assert_eq!(AuthMode::SignIn.title(), "Sign In");
    assert_eq!(AuthMode::SignUp.title(), "Create Account");
    assert_eq!(AuthMode::ForgotPassword.title(), "Reset Password");
    assert_eq!(confirm("a", ConfirmPurpose::Registration).title(), "Verify Account");

    assert_eq!(AuthMode::SignIn.submit_label(), "Sign In");
    assert_eq!(AuthMode::SignUp.submit_label(), "Create Account");
    assert_eq!(AuthMode::ForgotPassword.submit_label(), "Send Reset Code");
    assert_eq!(confirm("a", ConfirmPurpose::PasswordReset).submit_label(), "Verify");
}

#[test]
fn pending_username_only_in_confirm() {
    assert_eq!(AuthMode::SignIn.pending_username(), None);
    assert_eq!(confirm("alice", ConfirmPurpose::Registration).pending_username(), Some("alice"));
}

#[test]
fn only_sign_in_closes_modal() {
    assert!(SubmitOutcome::SignedIn(user("alice")).closes_modal());
    assert!(!SubmitOutcome::Registered.closes_modal());
    assert!(!SubmitOutcome::PasswordReset.closes_modal());
    assert_eq!(SubmitOutcome::Confirmed.notice(), "Account confirmed! You can now sign in.");
}

#[test]
fn with_mode_sets_initial_mode() {
    assert_eq!(AuthFlow::new().mode(), &AuthMode::SignIn);
    assert_eq!(AuthFlow::with_mode(AuthMode::SignUp).mode(), &AuthMode::SignUp);
}

// =============================================================
// switch_mode
// =============================================================

#[test]
fn switch_mode_clears_every_field_from_every_mode() {
    let modes = [
        AuthMode::SignIn,
        AuthMode::SignUp,
        AuthMode::ForgotPassword,
        confirm("alice", ConfirmPurpose::Registration),
        confirm("alice", ConfirmPurpose::PasswordReset),
    ];
    for from in &modes {
        for to in &modes {
            let mut flow = AuthFlow::with_mode(from.clone());
            flow.form = seeded_form();
            flow.switch_mode(to.clone());
            assert!(flow.form.is_empty(), "{from:?} -> {to:?}");
            assert_eq!(flow.mode(), to);
        }
    }
}

#[test]
fn switch_mode_clears_last_error() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mut flow = AuthFlow::new();
    assert!(submit(&mut flow, &provider, &mut store).is_err());
    assert!(flow.last_error().is_some());
    flow.switch_mode(AuthMode::SignUp);
    assert_eq!(flow.last_error(), None);
}

#[test]
fn settle_writes_back_snapshot_from_same_mode() {
    let provider = FakeProvider::new().with_account("alice", "old");
    let mut live = AuthFlow::with_mode(AuthMode::ForgotPassword);
    live.form.username = "alice".to_owned();

    let mut working = live.clone();
    let started_in = working.mode().clone();
    block_on(working.submit(&provider)).unwrap();
    live.settle(&started_in, working);
    assert_eq!(live.mode(), &confirm("alice", ConfirmPurpose::PasswordReset));
}

#[test]
fn settle_drops_snapshot_after_mode_switch() {
    let provider = FakeProvider::new().with_account("alice", "old");
    let mut live = AuthFlow::with_mode(AuthMode::ForgotPassword);
    live.form.username = "alice".to_owned();

    let mut working = live.clone();
    let started_in = working.mode().clone();
    live.switch_mode(AuthMode::SignUp);
    live.form.email = "typed@example.com".to_owned();
    block_on(working.submit(&provider)).unwrap();
    live.settle(&started_in, working);

    assert_eq!(live.mode(), &AuthMode::SignUp);
    assert_eq!(live.form.email, "typed@example.com");
    assert!(!live.is_submitting());
}

// =============================================================
// Sign in
// =============================================================

#[test]
fn sign_in_success_authenticates_and_closes() {
    let provider = FakeProvider::new().with_account("alice", "secret");
    let mut store = loaded_store();
    let mut flow = AuthFlow::new();
    flow.form.username = "alice".to_owned();
    flow.form.password = "secret".to_owned();

    assert!(!store.is_authenticated());
    let outcome = submit(&mut flow, &provider, &mut store).unwrap();
    assert_eq!(outcome, SubmitOutcome::SignedIn(user("alice")));
    assert!(outcome.closes_modal());
    assert_eq!(outcome.notice(), "Signed in successfully!");
    assert!(store.is_authenticated());
    assert_eq!(store.user(), Some(&user("alice")));
    assert!(!flow.is_submitting());
    assert!(flow.form.is_empty());
}

#[test]
fn submit_leaves_store_to_the_caller() {
    let provider = FakeProvider::new().with_account("alice", "secret");
    let mut flow = AuthFlow::new();
    flow.form.username = "alice".to_owned();
    flow.form.password = "secret".to_owned();
    let outcome = block_on(flow.submit(&provider)).unwrap();

    // Merging a sign-in into a store that is still loading keeps it loading.
    let mut store = AuthStore::new();
    outcome.apply(&mut store);
    assert!(store.is_authenticated());
    assert!(store.is_loading());

    let mut loaded = loaded_store();
    SubmitOutcome::Registered.apply(&mut loaded);
    SubmitOutcome::PasswordReset.apply(&mut loaded);
    assert_eq!(loaded, loaded_store());
}

#[test]
fn sign_in_rejection_stays_in_sign_in_with_error() {
    let provider = FakeProvider::new().with_account("alice", "secret");
    let mut store = loaded_store();
    let mut flow = AuthFlow::new();
    flow.form.username = "alice".to_owned();
    flow.form.password = "wrong".to_owned();

    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert_eq!(err.to_string(), "Incorrect username or password.");
    assert_eq!(flow.mode(), &AuthMode::SignIn);
    assert!(!store.is_authenticated());
    assert_eq!(flow.last_error(), Some("Incorrect username or password."));
}

#[test]
fn wrong_then_correct_password_signs_in() {
    let provider = FakeProvider::new().with_account("alice", "secret");
    let mut store = loaded_store();
    let mut flow = AuthFlow::new();
    flow.form.username = "alice".to_owned();
    flow.form.password = "wrong".to_owned();
    assert!(submit(&mut flow, &provider, &mut store).is_err());
    assert_eq!(flow.mode(), &AuthMode::SignIn);
    assert!(flow.last_error().is_some_and(|m| !m.is_empty()));

    flow.form.password = "secret".to_owned();
    assert_eq!(submit(&mut flow, &provider, &mut store), Ok(SubmitOutcome::SignedIn(user("alice"))));
    assert!(store.is_authenticated());
    assert_eq!(flow.last_error(), None);
}

#[test]
fn sign_in_with_blank_fields_skips_provider() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mut flow = AuthFlow::new();
    flow.form.username = "   ".to_owned();
    flow.form.password = "pw".to_owned();
    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn sign_in_next_step_is_an_error() {
    let provider = FakeProvider {
        next_step: Some("CONFIRM_SIGN_IN_WITH_NEW_PASSWORD_REQUIRED".to_owned()),
        ..FakeProvider::new()
    }
    .with_account("alice", "secret");
    let mut store = loaded_store();
    let mut flow = AuthFlow::new();
    flow.form.username = "alice".to_owned();
    flow.form.password = "secret".to_owned();

    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert!(err.to_string().contains("CONFIRM_SIGN_IN_WITH_NEW_PASSWORD_REQUIRED"));
    assert_eq!(flow.mode(), &AuthMode::SignIn);
    assert!(!store.is_authenticated());
}

#[test]
fn sign_in_error_without_message_uses_fallback() {
    let provider = FakeProvider::new().with_account("alice", "secret");
    provider.fail_next(ProviderError::Transport(String::new()));
    let mut store = loaded_store();
    let mut flow = AuthFlow::new();
    flow.form.username = "alice".to_owned();
    flow.form.password = "secret".to_owned();
    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert_eq!(err, FlowError::Provider("Sign in failed".to_owned()));
}

// =============================================================
// Sign up + confirm registration
// =============================================================

#[test]
fn sign_up_password_mismatch_never_calls_provider() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(AuthMode::SignUp);
    flow.form.username = "alice".to_owned();
    flow.form.email = "alice@example.com".to_owned();
    flow.form.password = "a".to_owned();
    flow.form.confirm_password = "b".to_owned();

    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert_eq!(err, FlowError::Validation("Passwords do not match"));
    assert_eq!(provider.call_count(), 0);
    assert_eq!(flow.mode(), &AuthMode::SignUp);
    assert_eq!(flow.last_error(), Some("Passwords do not match"));
}

#[test]
fn sign_up_moves_to_confirm_with_pending_username() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(AuthMode::SignUp);
    flow.form.username = "alice".to_owned();
    flow.form.email = "alice@example.com".to_owned();
    flow.form.password = "pw".to_owned();
    flow.form.confirm_password = "pw".to_owned();

    let outcome = submit(&mut flow, &provider, &mut store).unwrap();
    assert_eq!(outcome, SubmitOutcome::Registered);
    assert_eq!(flow.mode(), &confirm("alice", ConfirmPurpose::Registration));
    assert!(flow.form.is_empty());
    assert!(!store.is_authenticated());
}

#[test]
fn sign_up_existing_user_stays_in_sign_up() {
    let provider = FakeProvider::new().with_account("alice", "pw");
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(AuthMode::SignUp);
    flow.form.username = "alice".to_owned();
    flow.form.email = "alice@example.com".to_owned();
    flow.form.password = "pw".to_owned();
    flow.form.confirm_password = "pw".to_owned();

    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert_eq!(err.to_string(), "User already exists");
    assert_eq!(flow.mode(), &AuthMode::SignUp);
}

#[test]
fn confirm_registration_returns_to_sign_in() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(confirm("alice", ConfirmPurpose::Registration));
    flow.form.code = VALID_CODE.to_owned();

    let outcome = submit(&mut flow, &provider, &mut store).unwrap();
    assert_eq!(outcome, SubmitOutcome::Confirmed);
    assert_eq!(flow.mode(), &AuthMode::SignIn);
    assert!(provider.called("confirm_sign_up"));
}

#[test]
fn confirm_registration_wrong_code_stays_in_confirm() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mode = confirm("alice", ConfirmPurpose::Registration);
    let mut flow = AuthFlow::with_mode(mode.clone());
    flow.form.code = "000000".to_owned();

    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert!(err.to_string().starts_with("Invalid verification code"));
    assert_eq!(flow.mode(), &mode);
}

#[test]
fn confirm_requires_code() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(confirm("alice", ConfirmPurpose::Registration));
    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(provider.call_count(), 0);
}

// =============================================================
// Forgot password + confirm reset
// =============================================================

#[test]
fn forgot_password_moves_to_reset_confirm() {
    let provider = FakeProvider::new().with_account("alice", "old");
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(AuthMode::ForgotPassword);
    flow.form.username = "alice".to_owned();

    let outcome = submit(&mut flow, &provider, &mut store).unwrap();
    assert_eq!(outcome.notice(), "Password reset code sent to your email.");
    assert_eq!(flow.mode(), &confirm("alice", ConfirmPurpose::PasswordReset));
}

#[test]
fn forgot_password_unknown_user_stays() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(AuthMode::ForgotPassword);
    flow.form.username = "ghost".to_owned();
    assert!(submit(&mut flow, &provider, &mut store).is_err());
    assert_eq!(flow.mode(), &AuthMode::ForgotPassword);
}

#[test]
fn confirm_from_forgot_password_goes_to_sign_in() {
    let provider = FakeProvider::new().with_account("alice", "old");
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(AuthMode::ForgotPassword);
    flow.form.username = "alice".to_owned();
    submit(&mut flow, &provider, &mut store).unwrap();

    flow.form.code = VALID_CODE.to_owned();
    flow.form.new_password = "fresh".to_owned();
    flow.form.confirm_password = "fresh".to_owned();
    let outcome = submit(&mut flow, &provider, &mut store).unwrap();

    assert_eq!(outcome, SubmitOutcome::PasswordReset);
    assert_eq!(flow.mode(), &AuthMode::SignIn);
    assert!(provider.called("confirm_reset_password"));
    assert!(!provider.called("confirm_sign_up"));
    assert_eq!(
        *provider.last_reset.borrow(),
        Some(("alice".to_owned(), VALID_CODE.to_owned(), "fresh".to_owned()))
    );

    flow.form.username = "alice".to_owned();
    flow.form.password = "fresh".to_owned();
    assert_eq!(submit(&mut flow, &provider, &mut store), Ok(SubmitOutcome::SignedIn(user("alice"))));
}

#[test]
fn confirm_reset_requires_matching_new_passwords() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mode = confirm("alice", ConfirmPurpose::PasswordReset);
    let mut flow = AuthFlow::with_mode(mode.clone());
    flow.form.code = VALID_CODE.to_owned();
    flow.form.new_password = "one".to_owned();
    flow.form.confirm_password = "two".to_owned();

    let err = submit(&mut flow, &provider, &mut store).unwrap_err();
    assert_eq!(err, FlowError::Validation("Passwords do not match"));
    assert_eq!(provider.call_count(), 0);
    assert_eq!(flow.mode(), &mode);
}

#[test]
fn confirm_reset_requires_new_password() {
    let provider = FakeProvider::new();
    let mut store = loaded_store();
    let mut flow = AuthFlow::with_mode(confirm("alice", ConfirmPurpose::PasswordReset));
    flow.form.code = VALID_CODE.to_owned();
    assert!(matches!(submit(&mut flow, &provider, &mut store), Err(FlowError::Validation(_))));
    assert_eq!(provider.call_count(), 0);
}

// =============================================================
// Federated
// =============================================================

#[test]
fn federated_sign_in_delegates_to_redirect() {
    let provider = FakeProvider::new();
    let mut flow = AuthFlow::new();
    block_on(flow.sign_in_with_federated(&provider, FederatedProvider::Google)).unwrap();
    assert!(provider.called("sign_in_with_redirect"));
    assert_eq!(flow.last_error(), None);
}

#[test]
fn federated_failure_is_surfaced() {
    let provider = FakeProvider::new();
    provider.fail_next(ProviderError::Unavailable);
    let mut flow = AuthFlow::new();
    let err = block_on(flow.sign_in_with_federated(&provider, FederatedProvider::Google)).unwrap_err();
    assert_eq!(err.to_string(), "identity service unavailable");
    assert_eq!(flow.last_error(), Some("identity service unavailable"));
    assert_eq!(flow.mode(), &AuthMode::SignIn);
}
