//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form state, calls into
//! `AuthStore`, notices) and delegates shared chrome to `components`.
//! Guards are applied in `app`, not inside pages.

pub mod chat_client;
pub mod chat_supervisor;
pub mod cookies;
pub mod dashboard;
pub mod forgot_password;
pub mod home;
pub mod legal;
pub mod login;
pub mod not_found;
pub mod onboarding;
pub mod profile;
pub mod profile_unavailable;
pub mod register;
pub mod reset_password;
pub mod results;
pub mod settings;
