//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render route guards and shared page chrome while reading
//! auth and notice state from Leptos context providers.

pub mod chat_log;
pub mod cookie_banner;
pub mod dashboard_nav;
pub mod guest_route;
pub mod notice_tray;
pub mod pending;
pub mod protected_route;
pub mod require_role;
pub mod site_footer;
