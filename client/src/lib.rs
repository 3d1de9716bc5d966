//! # portal
//!
//! Leptos + WASM frontend for the mentorship portal.
//!
//! The crate owns the client-side session: the credential and user record,
//! their persisted copy in `localStorage`, the auth gateway that talks to the
//! backend, and the route guard that gates protected pages. Pages and
//! components read all of it through the `SessionContext` provided by
//! [`app::App`].

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
