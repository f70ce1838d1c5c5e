//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` defines the provider capability the auth state depends on;
//! `api` implements it over the server's JSON endpoints.

pub mod api;
pub mod identity;
