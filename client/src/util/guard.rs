//! Route access decisions shared by the guard components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `GuestRoute`, `RequireRole` and `ProtectedRoute` read the mirrored
//! `AuthState` signal and call the pure functions here; the components only
//! translate a [`GuardDecision`] into spinner, redirect or children.
//!
//! DESIGN
//! ======
//! Every guard is Pending while auth is loading, so a reload never flashes
//! a redirect before the stored session is probed.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::Role;
use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_ROLE_REDIRECT: &str = "/dashboard";
/// Terminal page for a signed-in user whose profile could not be loaded.
pub const PROFILE_UNAVAILABLE_PATH: &str = "/perfil-indisponivel";
pub const ACCESS_DENIED: &str = "Acesso negado";
pub const ACCESS_DENIED_DETAIL: &str = "Você precisa ter permissão de supervisor para acessar esta página.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth not resolved yet; render the neutral spinner.
    Pending,
    Allow,
    /// Navigate away, replacing the current history entry.
    Redirect(&'static str),
}

/// Guest-only pages: signed-in users are sent to their role's landing page.
///
/// A session without a profile stays Pending, since the landing page depends
/// on the role.
pub fn guest_decision(state: &AuthState) -> GuardDecision {
    if state.loading {
        return GuardDecision::Pending;
    }
    match (&state.session, &state.profile) {
        (None, _) => GuardDecision::Allow,
        (Some(_), None) => GuardDecision::Pending,
        (Some(_), Some(profile)) => GuardDecision::Redirect(profile.role.landing_path()),
    }
}

/// Role-gated pages.
///
/// A session whose profile failed to load goes to
/// [`PROFILE_UNAVAILABLE_PATH`] rather than `redirect_to`: the role-specific
/// targets are role-gated themselves and would bounce it back.
pub fn role_decision(state: &AuthState, required: Role, redirect_to: &'static str) -> GuardDecision {
    if state.loading {
        return GuardDecision::Pending;
    }
    match &state.profile {
        Some(profile) if profile.role == required => GuardDecision::Allow,
        None if state.is_authenticated() => GuardDecision::Redirect(PROFILE_UNAVAILABLE_PATH),
        _ => GuardDecision::Redirect(redirect_to),
    }
}

pub fn protected_decision(state: &AuthState) -> GuardDecision {
    if state.loading {
        GuardDecision::Pending
    } else if !state.is_authenticated() {
        GuardDecision::Redirect(LOGIN_PATH)
    } else {
        GuardDecision::Allow
    }
}

/// One-shot "access denied" flag owned by a single guard instance.
///
/// Fires only for supervisor-only routes, only once a profile with another
/// role is known, and at most once until the guard is mounted again.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenialLatch {
    fired: bool,
}

impl DenialLatch {
    pub fn should_notify(&mut self, state: &AuthState, required: Role) -> bool {
        if self.fired || state.loading || required != Role::Supervisor {
            return false;
        }
        let mismatch = state.profile.as_ref().is_some_and(|p| p.role != required);
        if mismatch {
            self.fired = true;
        }
        mismatch
    }
}

/// Navigate whenever `decision` resolves to a redirect.
pub fn install_guard_redirect<F>(decision: Memo<GuardDecision>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(path) = decision.get() {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
