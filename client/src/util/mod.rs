//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep browser/environment concerns and display formatting
//! out of page and component logic.

pub mod auth;
pub mod format;
