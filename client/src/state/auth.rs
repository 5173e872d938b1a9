//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthStore` owns the authoritative copy and mirrors every write into a
//! Leptos signal; route guards and user-aware components read snapshots of
//! this value to decide between spinner, redirect and content.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{AuthUser, ProviderSession, Role, UserProfile};

/// Active credential for the browser context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Session {
    /// Issued and managed by the identity provider; refreshable.
    Full(ProviderSession),
    /// Local-only session built from backend-issued identity when the
    /// provider refused the token pair. Cannot be refreshed.
    ///
    /// The backend client takes its bearer token from the identity provider
    /// only, so while degraded the authenticated endpoints (`/api/auth/me`)
    /// answer 401. The token is kept for display and diagnostics.
    Minimal { access_token: String, user: AuthUser },
}

impl Session {
    pub fn access_token(&self) -> &str {
        match self {
            Self::Full(session) => &session.access_token,
            Self::Minimal { access_token, .. } => access_token,
        }
    }

    pub fn user(&self) -> &AuthUser {
        match self {
            Self::Full(session) => &session.user,
            Self::Minimal { user, .. } => user,
        }
    }
}

/// Snapshot of the auth store.
///
/// A profile is only ever present alongside a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub user: Option<AuthUser>,
    pub profile: Option<UserProfile>,
    pub loading: bool,
}

impl AuthState {
    /// Initial state before the first session probe resolves.
    #[must_use]
    pub fn loading() -> Self {
        Self { loading: true, ..Self::default() }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }

    /// Name shown in navigation: profile name, else the e-mail local part.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.profile.as_ref().map(|p| p.name.as_str()).filter(|n| !n.trim().is_empty()) {
            return Some(name.to_owned());
        }
        let email = self.profile.as_ref().map(|p| p.email.as_str()).or_else(|| self.user.as_ref()?.email.as_deref())?;
        email.split('@').next().filter(|s| !s.is_empty()).map(str::to_owned)
    }

    pub(crate) fn clear_identity(&mut self) {
        self.session = None;
        self.user = None;
        self.profile = None;
    }
}
