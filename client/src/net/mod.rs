//! Networking modules for the identity provider and the profile backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` owns the provider session (issue, refresh, persist, sign out),
//! `api` calls the profile backend with that session's bearer token, and
//! `types` defines the shared wire schema. `http` is the one place that
//! touches `gloo-net`.

pub mod api;
pub mod error;
pub(crate) mod http;
pub mod identity;
pub mod types;
