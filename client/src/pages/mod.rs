//! Route-level page components.

pub mod home;
pub mod responses;
