//! In-memory identity provider for state tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::net::identity::{
    FederatedProvider, IdentityProvider, IdentityUser, ProviderError, SignInOutcome, SignUpOutcome,
};

pub(crate) const VALID_CODE: &str = "123456";

pub(crate) fn user(name: &str) -> IdentityUser {
    IdentityUser { user_id: format!("sub-{name}"), username: name.to_owned(), email: None }
}

fn rejected(code: &str, message: &str) -> ProviderError {
    ProviderError::Rejected { code: code.to_owned(), message: message.to_owned() }
}

/// Scriptable provider that records every call by name.
#[derive(Default)]
pub(crate) struct FakeProvider {
    pub calls: RefCell<Vec<&'static str>>,
    pub accounts: RefCell<HashMap<String, String>>,
    pub session: RefCell<Option<IdentityUser>>,
    pub redirect_user: Option<IdentityUser>,
    pub next_step: Option<String>,
    /// Returned (once) by the next call instead of its normal result.
    pub fail_next: RefCell<Option<ProviderError>>,
    pub last_reset: RefCell<Option<(String, String, String)>>,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_account(self, username: &str, password: &str) -> Self {
        self.accounts
            .borrow_mut()
            .insert(username.to_owned(), password.to_owned());
        self
    }

    pub(crate) fn with_session(self, username: &str) -> Self {
        *self.session.borrow_mut() = Some(user(username));
        self
    }

    pub(crate) fn fail_next(&self, err: ProviderError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    pub(crate) fn called(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|c| *c == name)
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn enter(&self, name: &'static str) -> Result<(), ProviderError> {
        self.calls.borrow_mut().push(name);
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn check_code(code: &str) -> Result<(), ProviderError> {
        if code == VALID_CODE {
            Ok(())
        } else {
            Err(rejected("CodeMismatchException", "Invalid verification code provided, please try again."))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FakeProvider {
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInOutcome, ProviderError> {
        self.enter("sign_in")?;
        let matches = self
            .accounts
            .borrow()
            .get(username)
            .is_some_and(|p| p == password);
        if !matches {
            return Err(rejected("NotAuthorizedException", "Incorrect username or password."));
        }
        if let Some(step) = &self.next_step {
            return Ok(SignInOutcome::NextStep(step.clone()));
        }
        *self.session.borrow_mut() = Some(user(username));
        Ok(SignInOutcome::SignedIn)
    }

    async fn sign_up(&self, username: &str, _email: &str, password: &str) -> Result<SignUpOutcome, ProviderError> {
        self.enter("sign_up")?;
        if self.accounts.borrow().contains_key(username) {
            return Err(rejected("UsernameExistsException", "User already exists"));
        }
        self.accounts
            .borrow_mut()
            .insert(username.to_owned(), password.to_owned());
        Ok(SignUpOutcome { user_confirmed: false, user_sub: Some(format!("sub-{username}")) })
    }

    async fn confirm_sign_up(&self, _username: &str, code: &str) -> Result<(), ProviderError> {
        self.enter("confirm_sign_up")?;
        Self::check_code(code)
    }

    async fn reset_password(&self, username: &str) -> Result<(), ProviderError> {
        self.enter("reset_password")?;
        if self.accounts.borrow().contains_key(username) {
            Ok(())
        } else {
            Err(rejected("UserNotFoundException", "Username/client id combination not found."))
        }
    }

    async fn confirm_reset_password(&self, username: &str, code: &str, new_password: &str) -> Result<(), ProviderError> {
        self.enter("confirm_reset_password")?;
        Self::check_code(code)?;
        *self.last_reset.borrow_mut() = Some((username.to_owned(), code.to_owned(), new_password.to_owned()));
        self.accounts
            .borrow_mut()
            .insert(username.to_owned(), new_password.to_owned());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.enter("sign_out")?;
        *self.session.borrow_mut() = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<IdentityUser, ProviderError> {
        self.enter("current_user")?;
        self.session
            .borrow()
            .clone()
            .ok_or_else(|| rejected("NotAuthorizedException", "User is not authenticated"))
    }

    async fn sign_in_with_redirect(&self, _provider: FederatedProvider) -> Result<(), ProviderError> {
        self.enter("sign_in_with_redirect")
    }

    async fn complete_federated_sign_in(&self) -> Result<IdentityUser, ProviderError> {
        self.enter("complete_federated_sign_in")?;
        let user = self
            .redirect_user
            .clone()
            .ok_or(ProviderError::NoPendingRedirect)?;
        *self.session.borrow_mut() = Some(user.clone());
        Ok(user)
    }
}
