use super::*;
use crate::config::IdentityTimeouts;

fn test_config(domain: Option<&str>) -> CognitoConfig {
    CognitoConfig {
        region: "us-east-1".into(),
        user_pool_id: "us-east-1_AbC123".into(),
        client_id: "client-abc".into(),
        domain: domain.map(str::to_owned),
        scopes: vec!["openid".into(), "email".into()],
        redirect_sign_in: "https://prompter.example/".into(),
        redirect_sign_out: "https://prompter.example/".into(),
        timeouts: IdentityTimeouts { request_secs: 5, connect_secs: 2 },
    }
}

fn query_pairs(url: &str) -> Vec<(String, String)> {
    let (_, query) = url.split_once('?').expect("url has a query");
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn pair<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

// =============================================================================
// requests
// =============================================================================

#[test]
fn target_header_names_operation() {
    assert_eq!(target_header("InitiateAuth"), "AWSCognitoIdentityProviderService.InitiateAuth");
}

#[test]
fn initiate_auth_request_uses_pascal_case() {
    let body = InitiateAuthRequest {
        auth_flow: "USER_PASSWORD_AUTH",
        client_id: "client-abc",
        auth_parameters: BTreeMap::from([("USERNAME", "ada"), ("PASSWORD", "pw")]),
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": "client-abc",
            "AuthParameters": {"PASSWORD": "pw", "USERNAME": "ada"}
        })
    );
}

#[test]
fn sign_up_request_sends_email_attribute() {
    let body = SignUpRequest {
        client_id: "c",
        username: "ada",
        password: "pw",
        user_attributes: vec![AttributeRef { name: "email", value: "ada@example.com" }],
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["UserAttributes"], serde_json::json!([{"Name": "email", "Value": "ada@example.com"}]));
    assert_eq!(json["Username"], "ada");
}

#[test]
fn confirm_forgot_password_request_fields() {
    let body = ConfirmForgotPasswordRequest { client_id: "c", username: "ada", confirmation_code: "123456", password: "new" };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["ConfirmationCode"], "123456");
    assert_eq!(json["Password"], "new");
}

// =============================================================================
// responses
// =============================================================================

#[test]
fn sign_in_result_with_tokens() {
    let response: InitiateAuthResponse = serde_json::from_str(
        r#"{"AuthenticationResult":{"AccessToken":"at","ExpiresIn":3600,"IdToken":"it","RefreshToken":"rt","TokenType":"Bearer"},"ChallengeParameters":{}}"#,
    )
    .unwrap();
    let SignInResult::Tokens(tokens) = sign_in_result(response).unwrap() else {
        panic!("expected tokens");
    };
    assert_eq!(tokens.access_token, "at");
    assert_eq!(tokens.refresh_token.as_deref(), Some("rt"));
    assert_eq!(tokens.expires_in, 3600);
}

#[test]
fn sign_in_result_with_challenge() {
    let response: InitiateAuthResponse =
        serde_json::from_str(r#"{"ChallengeName":"NEW_PASSWORD_REQUIRED","Session":"s"}"#).unwrap();
    assert_eq!(sign_in_result(response).unwrap(), SignInResult::Challenge("NEW_PASSWORD_REQUIRED".into()));
}

#[test]
fn sign_in_result_empty_is_parse_error() {
    let response: InitiateAuthResponse = serde_json::from_str("{}").unwrap();
    assert!(matches!(sign_in_result(response), Err(IdentityError::Parse(_))));
}

#[test]
fn refresh_result_without_refresh_token() {
    let response: InitiateAuthResponse =
        serde_json::from_str(r#"{"AuthenticationResult":{"AccessToken":"at2","ExpiresIn":3600}}"#).unwrap();
    let SignInResult::Tokens(tokens) = sign_in_result(response).unwrap() else {
        panic!("expected tokens");
    };
    assert_eq!(tokens.refresh_token, None);
}

#[test]
fn profile_prefers_sub_attribute() {
    let response: GetUserResponse = serde_json::from_str(
        r#"{"Username":"ada","UserAttributes":[{"Name":"sub","Value":"sub-1"},{"Name":"email","Value":"ada@example.com"}]}"#,
    )
    .unwrap();
    assert_eq!(
        profile_from_user(response),
        UserProfile { user_id: "sub-1".into(), username: "ada".into(), email: Some("ada@example.com".into()) }
    );
}

#[test]
fn profile_falls_back_to_username() {
    let response: GetUserResponse = serde_json::from_str(r#"{"Username":"google_123"}"#).unwrap();
    let profile = profile_from_user(response);
    assert_eq!(profile.user_id, "google_123");
    assert_eq!(profile.email, None);
}

#[test]
fn forgot_password_delivery_details() {
    let response: ForgotPasswordResponse = serde_json::from_str(
        r#"{"CodeDeliveryDetails":{"AttributeName":"email","DeliveryMedium":"EMAIL","Destination":"a***@e***"}}"#,
    )
    .unwrap();
    let delivery = response.code_delivery_details.map(CodeDelivery::from).unwrap_or_default();
    assert_eq!(delivery.medium.as_deref(), Some("EMAIL"));
    assert_eq!(delivery.destination.as_deref(), Some("a***@e***"));
}

#[test]
fn token_response_parses() {
    let tokens = parse_token_response(
        r#"{"access_token":"at","id_token":"it","refresh_token":"rt","expires_in":3600,"token_type":"Bearer"}"#,
    )
    .unwrap();
    // The ID token is not kept; sessions only carry access and refresh tokens.
    assert_eq!(
        tokens,
        TokenSet { access_token: "at".to_owned(), refresh_token: Some("rt".to_owned()), expires_in: 3600 }
    );
    assert!(matches!(parse_token_response("not json"), Err(IdentityError::Parse(_))));
}

// =============================================================================
// errors
// =============================================================================

#[test]
fn parse_error_plain_type() {
    let err = parse_error(400, r#"{"__type":"NotAuthorizedException","message":"Incorrect username or password."}"#);
    assert_eq!(err.code(), "NotAuthorizedException");
    assert_eq!(err.to_string(), "Incorrect username or password.");
}

#[test]
fn parse_error_strips_namespace_and_suffix() {
    let err = parse_error(
        400,
        r#"{"__type":"com.amazonaws.cognito.identity.idp.model#CodeMismatchException:http://internal","Message":"Invalid code"}"#,
    );
    assert_eq!(err.code(), "CodeMismatchException");
    assert_eq!(err.to_string(), "Invalid code");
}

#[test]
fn parse_error_type_without_message_uses_kind() {
    let err = parse_error(400, r#"{"__type":"LimitExceededException"}"#);
    assert_eq!(err.to_string(), "LimitExceededException");
}

#[test]
fn parse_error_oauth_body() {
    let err = parse_error(400, r#"{"error":"invalid_grant"}"#);
    assert_eq!(err.code(), "invalid_grant");
    assert_eq!(err.to_string(), "Authorization code is invalid or expired");
}

#[test]
fn parse_error_non_json_is_transport() {
    let err = parse_error(503, "<html>Service Unavailable</html>");
    assert!(matches!(err, IdentityError::Request(_)));
}

// =============================================================================
// hosted UI
// =============================================================================

#[test]
fn authorize_url_contains_pkce_and_provider() {
    let cfg = test_config(Some("https://auth.prompter.example"));
    let url = authorize_url_for(&cfg, FederatedProvider::Google, "state-1", "challenge-1").unwrap();
    assert!(url.starts_with("https://auth.prompter.example/oauth2/authorize?"));

    let pairs = query_pairs(&url);
    assert_eq!(pair(&pairs, "response_type"), Some("code"));
    assert_eq!(pair(&pairs, "client_id"), Some("client-abc"));
    assert_eq!(pair(&pairs, "redirect_uri"), Some("https://prompter.example/"));
    assert_eq!(pair(&pairs, "identity_provider"), Some("Google"));
    assert_eq!(pair(&pairs, "scope"), Some("openid email"));
    assert_eq!(pair(&pairs, "state"), Some("state-1"));
    assert_eq!(pair(&pairs, "code_challenge"), Some("challenge-1"));
    assert_eq!(pair(&pairs, "code_challenge_method"), Some("S256"));
}

#[test]
fn authorize_url_requires_domain() {
    let cfg = test_config(None);
    assert!(matches!(
        authorize_url_for(&cfg, FederatedProvider::Google, "s", "c"),
        Err(IdentityError::HostedUiUnavailable)
    ));
}

#[test]
fn logout_url_uses_sign_out_redirect() {
    let mut cfg = test_config(Some("https://auth.prompter.example"));
    cfg.redirect_sign_out = "https://prompter.example/bye".into();
    let url = logout_url_for(&cfg).unwrap();
    assert!(url.starts_with("https://auth.prompter.example/logout?"));
    let pairs = query_pairs(&url);
    assert_eq!(pair(&pairs, "client_id"), Some("client-abc"));
    assert_eq!(pair(&pairs, "logout_uri"), Some("https://prompter.example/bye"));

    assert_eq!(logout_url_for(&test_config(None)), None);
}

#[test]
fn token_form_carries_verifier() {
    let cfg = test_config(Some("https://auth.prompter.example"));
    let form = token_form(&cfg, "code-1", "verifier-1");
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(form.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pair(&pairs, "grant_type"), Some("authorization_code"));
    assert_eq!(pair(&pairs, "code"), Some("code-1"));
    assert_eq!(pair(&pairs, "code_verifier"), Some("verifier-1"));
    assert_eq!(pair(&pairs, "redirect_uri"), Some("https://prompter.example/"));
}

#[tokio::test]
async fn exchange_code_without_domain_fails_fast() {
    let client = CognitoClient::new(test_config(None)).unwrap();
    assert!(matches!(client.exchange_code("c", "v").await, Err(IdentityError::HostedUiUnavailable)));
}
