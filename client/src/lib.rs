//! # client
//!
//! Leptos + WASM frontend for the multi-model prompt comparison site.
//!
//! This crate contains the pages, components, and client-side state: the
//! session store, the sign-in/sign-up flow controller, and the prompt
//! composer. The same crate is compiled with `ssr` into the server binary
//! and with `hydrate` into the browser bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach the app to the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
