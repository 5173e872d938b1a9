use super::*;
use crate::net::types::{AuthUser, ProviderSession, UserProfile};
use crate::state::auth::Session;

fn session() -> Session {
    Session::Full(ProviderSession {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at: None,
        user: AuthUser { id: "u1".to_owned(), email: Some("u1@example.com".to_owned()) },
    })
}

fn profile(role: Role) -> UserProfile {
    UserProfile {
        id: "u1".to_owned(),
        email: "u1@example.com".to_owned(),
        name: "U1".to_owned(),
        phone: None,
        birthday: None,
        avatar_url: None,
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        is_active: true,
        role,
    }
}

fn signed_in(role: Role) -> AuthState {
    AuthState {
        session: Some(session()),
        user: Some(AuthUser { id: "u1".to_owned(), email: None }),
        profile: Some(profile(role)),
        loading: false,
    }
}

fn loading() -> AuthState {
    AuthState { loading: true, ..signed_in(Role::User) }
}

// =============================================================
// Guest-only
// =============================================================

#[test]
fn guest_allows_anonymous_visitors() {
    assert_eq!(guest_decision(&AuthState::default()), GuardDecision::Allow);
}

#[test]
fn guest_redirects_by_role() {
    assert_eq!(guest_decision(&signed_in(Role::Supervisor)), GuardDecision::Redirect("/chat/supervisor"));
    assert_eq!(guest_decision(&signed_in(Role::User)), GuardDecision::Redirect("/dashboard"));
}

#[test]
fn guest_waits_for_profile_and_loading() {
    let mut state = signed_in(Role::User);
    state.profile = None;
    assert_eq!(guest_decision(&state), GuardDecision::Pending);
    assert_eq!(guest_decision(&loading()), GuardDecision::Pending);
    assert_eq!(guest_decision(&AuthState::loading()), GuardDecision::Pending);
}

// =============================================================
// Role-required
// =============================================================

#[test]
fn role_allows_matching_profile() {
    assert_eq!(role_decision(&signed_in(Role::Supervisor), Role::Supervisor, "/dashboard"), GuardDecision::Allow);
    assert_eq!(role_decision(&signed_in(Role::User), Role::User, "/chat/supervisor"), GuardDecision::Allow);
}

#[test]
fn role_redirects_mismatch_and_missing_profile() {
    assert_eq!(
        role_decision(&signed_in(Role::User), Role::Supervisor, DEFAULT_ROLE_REDIRECT),
        GuardDecision::Redirect("/dashboard")
    );
    assert_eq!(
        role_decision(&AuthState::default(), Role::User, "/chat/supervisor"),
        GuardDecision::Redirect("/chat/supervisor")
    );
}

#[test]
fn role_sends_profileless_session_to_terminal_page() {
    let mut state = signed_in(Role::User);
    state.profile = None;
    let for_user_pages = role_decision(&state, Role::User, "/chat/supervisor");
    let for_supervisor_pages = role_decision(&state, Role::Supervisor, DEFAULT_ROLE_REDIRECT);
    assert_eq!(for_user_pages, GuardDecision::Redirect(PROFILE_UNAVAILABLE_PATH));
    assert_eq!(for_supervisor_pages, GuardDecision::Redirect(PROFILE_UNAVAILABLE_PATH));
    // The terminal page itself only needs a session, so nothing bounces further.
    assert_eq!(protected_decision(&state), GuardDecision::Allow);
}

#[test]
fn role_is_pending_while_loading() {
    assert_eq!(role_decision(&loading(), Role::Supervisor, "/dashboard"), GuardDecision::Pending);
}

// =============================================================
// Session-required
// =============================================================

#[test]
fn protected_requires_session() {
    assert_eq!(protected_decision(&AuthState::default()), GuardDecision::Redirect("/login"));
    assert_eq!(protected_decision(&AuthState::loading()), GuardDecision::Pending);

    let mut without_profile = signed_in(Role::User);
    without_profile.profile = None;
    assert_eq!(protected_decision(&without_profile), GuardDecision::Allow);
}

// =============================================================
// Denial latch
// =============================================================

#[test]
fn latch_fires_once_for_supervisor_mismatch() {
    let mut latch = DenialLatch::default();
    let state = signed_in(Role::User);
    assert!(latch.should_notify(&state, Role::Supervisor));
    assert!(!latch.should_notify(&state, Role::Supervisor));
    assert!(!latch.should_notify(&signed_in(Role::User), Role::Supervisor));
}

#[test]
fn latch_stays_silent_for_matching_role() {
    let mut latch = DenialLatch::default();
    assert!(!latch.should_notify(&signed_in(Role::Supervisor), Role::Supervisor));
    // Still armed for a later mismatch.
    assert!(latch.should_notify(&signed_in(Role::User), Role::Supervisor));
}

#[test]
fn latch_ignores_user_only_routes_and_missing_profile() {
    let mut latch = DenialLatch::default();
    assert!(!latch.should_notify(&signed_in(Role::Supervisor), Role::User));
    assert!(!latch.should_notify(&AuthState::default(), Role::Supervisor));
    assert!(!latch.should_notify(&loading(), Role::Supervisor));
    assert!(latch.should_notify(&signed_in(Role::User), Role::Supervisor));
}

#[test]
fn fresh_latch_fires_again_after_remount() {
    let state = signed_in(Role::User);
    let mut first = DenialLatch::default();
    assert!(first.should_notify(&state, Role::Supervisor));
    let mut remounted = DenialLatch::default();
    assert!(remounted.should_notify(&state, Role::Supervisor));
}
