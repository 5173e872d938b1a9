//! # opty-web
//!
//! Leptos + WASM front end for the Opty support portal: account flows
//! against the hosted identity provider, profile management against the
//! REST backend, role-gated routing between end-user and supervisor pages,
//! and the support chat views.
//!
//! `state::auth_store` is the heart of the crate; `net` holds both remote
//! collaborators and `components` the route guards built on `util::guard`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;

/// Browser entry point: installs logging and hydrates the server render.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
