//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `chat`, `notice`) so individual
//! components can depend on small focused models. `auth_store` is the only
//! module with behavior beyond plain data; everything else is mutated
//! through signals.

pub mod auth;
pub mod auth_store;
pub mod chat;
pub mod notice;
