//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `auth_flow`, `composer`, `ui`) so
//! components depend on small focused models. None of these types touch the
//! network directly; provider calls go through `net::identity`.

pub mod auth;
pub mod auth_flow;
pub mod composer;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_helpers;
