use super::*;

#[test]
fn rejected_message_is_user_message() {
    let err = ProviderError::Rejected {
        code: "NotAuthorizedException".to_owned(),
        message: "Incorrect username or password.".to_owned(),
    };
    assert_eq!(err.user_message().as_deref(), Some("Incorrect username or password."));
    assert_eq!(err.code(), Some("NotAuthorizedException"));
}

#[test]
fn blank_rejection_has_no_user_message() {
    let err = ProviderError::Rejected { code: String::new(), message: "   ".to_owned() };
    assert_eq!(err.user_message(), None);
    assert_eq!(err.code(), None);
}

#[test]
fn transport_error_keeps_message() {
    let err = ProviderError::Transport("connection refused".to_owned());
    assert_eq!(err.user_message().as_deref(), Some("connection refused"));
    assert_eq!(ProviderError::Transport(String::new()).user_message(), None);
}

#[test]
fn unit_variants_have_fixed_messages() {
    assert_eq!(ProviderError::NoPendingRedirect.user_message().as_deref(), Some("no federated sign-in to complete"));
    assert_eq!(ProviderError::Unavailable.user_message().as_deref(), Some("identity service unavailable"));
}

#[test]
fn federated_provider_slug_and_label() {
    assert_eq!(FederatedProvider::Google.slug(), "google");
    assert_eq!(FederatedProvider::Google.label(), "Google");
}

#[test]
fn identity_user_email_defaults_to_none() {
    let user: IdentityUser = serde_json::from_str(r#"{"user_id":"sub-1","username":"alice"}"#).unwrap();
    assert_eq!(user.username, "alice");
    assert!(user.email.is_none());
}
