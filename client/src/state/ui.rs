//! Page chrome state: which modal is open, the model-list filter, toasts.
//!
//! DESIGN
//! ======
//! Kept apart from `auth` so opening or closing a modal never touches the
//! session record.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use catalog::ModelSort;

use crate::state::auth_flow::AuthMode;

/// Transient status message shown at the bottom of the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Open auth modal and the mode it was opened in.
    pub auth_modal: Option<AuthMode>,
    pub use_case_modal_open: bool,
    pub mobile_menu_open: bool,
    pub model_sort: ModelSort,
    pub toast: Option<Toast>,
    /// Bumped on every toast so a dismissal timer can tell toasts apart.
    pub toast_seq: u64,
}

impl UiState {
    pub fn open_auth(&mut self, mode: AuthMode) {
        self.mobile_menu_open = false;
        self.auth_modal = Some(mode);
    }

    pub fn close_auth(&mut self) {
        self.auth_modal = None;
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.push_toast(message.into(), false);
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.push_toast(message.into(), true);
    }

    /// Dismiss the toast only if it is still the one numbered `seq`.
    pub fn dismiss_toast(&mut self, seq: u64) {
        if self.toast_seq == seq {
            self.toast = None;
        }
    }

    fn push_toast(&mut self, message: String, is_error: bool) {
        self.toast_seq += 1;
        self.toast = Some(Toast { message, is_error });
    }
}
