//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! server keeps no per-user data of its own: sessions live in cookies and
//! the identity service owns the accounts.

use std::sync::Arc;

use crate::identity::IdentityService;

/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Optional identity backend. `None` if Cognito env vars are not configured.
    pub identity: Option<Arc<dyn IdentityService>>,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Option<Arc<dyn IdentityService>>, cookie_secure: bool) -> Self {
        Self { identity, cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
