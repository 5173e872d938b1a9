use super::*;
use crate::net::types::Role;
use crate::test_support::{
    FakeBackend, FakeProvider, auth_user, profile, provider_session, provider_user, token_pair,
};

fn store(provider: &Arc<FakeProvider>, backend: &Arc<FakeBackend>) -> AuthStore {
    AuthStore::new(provider.clone(), backend.clone())
}

fn login_ok(id: &str, role: Role) -> Result<LoginResponse, ApiError> {
    Ok(LoginResponse { token: token_pair(id), user: profile(id, role) })
}

async fn signed_out_store() -> (Arc<FakeProvider>, Arc<FakeBackend>, AuthStore) {
    let provider = Arc::new(FakeProvider::default());
    let backend = Arc::new(FakeBackend::default());
    let store = store(&provider, &backend);
    store.initialize().await;
    (provider, backend, store)
}

async fn signed_in_store(role: Role) -> (Arc<FakeProvider>, Arc<FakeBackend>, AuthStore) {
    let provider = Arc::new(FakeProvider::with_session(provider_session("u1", "u1@example.com")));
    let backend = Arc::new(FakeBackend::with_profile(profile("u1", role)));
    let store = store(&provider, &backend);
    store.initialize().await;
    (provider, backend, store)
}

// =============================================================
// Name derivation
// =============================================================

#[test]
fn display_name_prefers_full_name_then_name_then_email() {
    let full = UserMetadata { full_name: Some("Ana Souza".into()), name: Some("ana".into()), ..Default::default() };
    assert_eq!(derive_display_name(&full, Some("ana@x.com")), "Ana Souza");

    let name_only = UserMetadata { name: Some("Ana".into()), ..Default::default() };
    assert_eq!(derive_display_name(&name_only, Some("ana@x.com")), "Ana");

    assert_eq!(derive_display_name(&UserMetadata::default(), Some("ana.s@x.com")), "ana.s");
    assert_eq!(derive_display_name(&UserMetadata::default(), None), "User");
}

#[test]
fn display_name_skips_blank_candidates() {
    let blank = UserMetadata { full_name: Some("  ".into()), name: Some(String::new()), ..Default::default() };
    assert_eq!(derive_display_name(&blank, Some("bia@x.com")), "bia");
    assert_eq!(derive_display_name(&blank, Some("@x.com")), "User");
}

#[test]
fn auth_error_messages_are_user_facing() {
    assert_eq!(
        AuthError::Validation(ValidationFailure::AlreadyExists).to_string(),
        "Usuário já existe. Tente fazer login."
    );
    assert_eq!(AuthError::InvalidCredentials.to_string(), "Email ou senha inválidos");
    assert_eq!(AuthError::InactiveAccount.to_string(), "Usuário inativo. Entre em contato com o suporte.");
}

// =============================================================
// Initialization and profile fetch
// =============================================================

#[tokio::test]
async fn new_store_starts_loading() {
    let provider = Arc::new(FakeProvider::default());
    let backend = Arc::new(FakeBackend::default());
    assert_eq!(store(&provider, &backend).snapshot(), AuthState::loading());
}

#[tokio::test]
async fn initialize_without_session_resolves_signed_out() {
    let (_provider, backend, store) = signed_out_store().await;
    assert_eq!(store.snapshot(), AuthState::default());
    assert_eq!(backend.calls("current_profile"), 0);
}

#[tokio::test]
async fn initialize_with_session_loads_profile() {
    let (_provider, _backend, store) = signed_in_store(Role::Supervisor).await;
    let state = store.snapshot();
    assert!(!state.loading);
    assert_eq!(state.user, Some(auth_user("u1", "u1@example.com")));
    assert_eq!(state.role(), Some(Role::Supervisor));
    assert!(matches!(state.session, Some(Session::Full(_))));
}

#[tokio::test]
async fn missing_profile_is_created_once_with_derived_name() {
    let provider = Arc::new(FakeProvider::with_session(provider_session("g1", "gabi@example.com")));
    provider.state().user = Some(provider_user(
        "g1",
        Some("gabi@example.com"),
        UserMetadata { name: Some("Gabi".into()), avatar_url: Some("https://img/g.png".into()), ..Default::default() },
    ));
    let backend = Arc::new(FakeBackend::default());
    let store = store(&provider, &backend);

    store.initialize().await;

    assert_eq!(backend.calls("create_profile"), 1);
    let created = backend.state().created[0].clone();
    assert_eq!(created.supabase_id, "g1");
    assert_eq!(created.name, "Gabi");
    assert_eq!(created.avatar_url.as_deref(), Some("https://img/g.png"));
    assert_eq!(store.snapshot().profile.map(|p| p.id), Some("g1".to_owned()));
}

#[tokio::test]
async fn failed_profile_creation_leaves_profile_absent() {
    let provider = Arc::new(FakeProvider::with_session(provider_session("g1", "gabi@example.com")));
    provider.state().user = Some(provider_user("g1", Some("gabi@example.com"), UserMetadata::default()));
    let backend = Arc::new(FakeBackend::default());
    backend.state().create_error = Some(ApiError::Status { status: 500, detail: None });
    let store = store(&provider, &backend);

    store.initialize().await;

    let state = store.snapshot();
    assert!(state.user.is_some());
    assert!(state.profile.is_none());
    assert!(!state.loading);
}

#[tokio::test]
async fn other_fetch_errors_do_not_provision() {
    let provider = Arc::new(FakeProvider::with_session(provider_session("u1", "u1@example.com")));
    let backend = Arc::new(FakeBackend::default());
    backend.state().profile_error = Some(ApiError::Status { status: 500, detail: None });
    let store = store(&provider, &backend);

    store.initialize().await;

    assert_eq!(backend.calls("create_profile"), 0);
    assert_eq!(provider.calls("get_user"), 0);
    assert!(store.snapshot().profile.is_none());
}

#[tokio::test]
async fn profile_is_not_installed_without_a_user() {
    let (_provider, backend, store) = signed_out_store().await;
    backend.state().profile = Some(profile("u1", Role::User));

    assert_eq!(store.load_profile().await, None);
    assert!(store.snapshot().profile.is_none());
}

#[tokio::test]
async fn refresh_profile_is_idempotent() {
    let (_provider, _backend, store) = signed_in_store(Role::User).await;
    let first = store.refresh_profile().await;
    let first_snapshot = store.snapshot();
    let second = store.refresh_profile().await;

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(first_snapshot, store.snapshot());
}

// =============================================================
// Sign-in / sign-up
// =============================================================

#[tokio::test]
async fn sign_in_installs_full_session_and_profile() {
    let (provider, backend, store) = signed_out_store().await;
    backend.state().login_result = login_ok("u7", Role::User);

    let profile = store.sign_in("u7@example.com", "secret1").await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.profile, Some(profile));
    assert!(!state.loading);
    assert!(matches!(state.session, Some(Session::Full(_))));
    assert_eq!(state.session.as_ref().map(Session::access_token), Some("at-u7"));
    assert_eq!(provider.calls("set_session"), 1);
}

#[tokio::test]
async fn sign_in_degrades_to_minimal_session_when_provider_refuses_tokens() {
    let (provider, backend, store) = signed_out_store().await;
    backend.state().login_result = login_ok("u7", Role::User);
    provider.state().set_session_error = Some(ProviderError::Rejected { status: 401, message: "bad jwt".into() });

    store.sign_in("u7@example.com", "secret1").await.unwrap();

    let state = store.snapshot();
    let session = state.session.clone().unwrap();
    assert!(matches!(session, Session::Minimal { .. }));
    assert_eq!(session.access_token(), "at-u7");
    assert_eq!(state.user, Some(auth_user("u7", "u7@example.com")));
    assert!(state.profile.is_some());
}

#[tokio::test]
async fn wrong_password_leaves_state_unchanged() {
    let (_provider, backend, store) = signed_out_store().await;
    backend.state().login_result = Err(ApiError::Unauthorized);
    let before = store.snapshot();

    let result = store.sign_in("u7@example.com", "wrong").await;

    assert_eq!(result, Err(AuthError::InvalidCredentials));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn sign_in_maps_inactive_and_backend_detail() {
    let (_provider, backend, store) = signed_out_store().await;
    backend.state().login_result = Err(ApiError::Status { status: 403, detail: Some("inactive".into()) });
    assert_eq!(store.sign_in("a@b.c", "x").await, Err(AuthError::InactiveAccount));

    backend.state().login_result = Err(ApiError::Status { status: 500, detail: Some("db down".into()) });
    assert_eq!(store.sign_in("a@b.c", "x").await, Err(AuthError::Failed("db down".into())));

    backend.state().login_result = Err(ApiError::Status { status: 502, detail: None });
    assert_eq!(store.sign_in("a@b.c", "x").await, Err(AuthError::Failed("Falha ao fazer login".into())));
}

#[tokio::test]
async fn sign_up_returns_confirmation_without_session() {
    let (_provider, backend, store) = signed_out_store().await;
    let req = RegisterRequest { email: "n@x.com".into(), password: "secret1".into(), name: "N".into(), ..Default::default() };

    let message = store.sign_up(&req).await.unwrap();

    assert!(!message.is_empty());
    assert_eq!(backend.state().registered, vec![req]);
    assert_eq!(store.snapshot(), AuthState::default());
}

#[tokio::test]
async fn sign_up_translates_backend_status() {
    let (_provider, backend, store) = signed_out_store().await;
    let req = RegisterRequest::default();

    backend.state().register_error = Some(ApiError::Status { status: 409, detail: Some("exists".into()) });
    assert_eq!(store.sign_up(&req).await, Err(AuthError::Validation(ValidationFailure::AlreadyExists)));

    backend.state().register_error = Some(ApiError::Status { status: 422, detail: None });
    assert_eq!(store.sign_up(&req).await, Err(AuthError::Validation(ValidationFailure::InvalidFields)));

    backend.state().register_error = Some(ApiError::Network("offline".into()));
    assert_eq!(store.sign_up(&req).await, Err(AuthError::Failed("offline".into())));

    backend.state().register_error = Some(ApiError::Status { status: 500, detail: None });
    assert_eq!(store.sign_up(&req).await, Err(AuthError::Failed("Falha ao criar conta".into())));
    assert!(!store.snapshot().loading);
}

#[tokio::test]
async fn provider_sign_in_passes_redirect_through() {
    let (provider, _backend, store) = signed_out_store().await;
    store.sign_in_with_provider(OAuthProvider::Google, "http://localhost:3000/dashboard").await.unwrap();
    assert_eq!(
        provider.state().oauth_redirects,
        vec![(OAuthProvider::Google, "http://localhost:3000/dashboard".to_owned())]
    );
}

// =============================================================
// Sign-out / account
// =============================================================

#[tokio::test]
async fn sign_out_clears_session_user_and_profile() {
    let (_provider, _backend, store) = signed_in_store(Role::User).await;
    store.sign_out().await.unwrap();
    assert_eq!(store.snapshot(), AuthState::default());
}

#[tokio::test]
async fn failed_sign_out_keeps_prior_state() {
    let (provider, _backend, store) = signed_in_store(Role::User).await;
    provider.state().sign_out_error = Some(ProviderError::Network("offline".into()));
    let before = store.snapshot();

    let result = store.sign_out().await;

    assert_eq!(result, Err(AuthError::SignOut("offline".into())));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn delete_account_signs_out() {
    let (_provider, backend, store) = signed_in_store(Role::User).await;
    store.delete_account().await.unwrap();
    assert_eq!(backend.calls("delete_account"), 1);
    assert!(store.snapshot().session.is_none());
}

#[tokio::test]
async fn failed_delete_keeps_session() {
    let (_provider, backend, store) = signed_in_store(Role::User).await;
    backend.state().delete_error = Some(ApiError::Status { status: 500, detail: Some("nope".into()) });
    assert_eq!(store.delete_account().await, Err(AuthError::Failed("nope".into())));
    assert!(store.snapshot().profile.is_some());
}

#[tokio::test]
async fn update_profile_replaces_cached_profile() {
    let (_provider, _backend, store) = signed_in_store(Role::User).await;
    let update = ProfileUpdate { phone: Some("+55 11 99999-0000".into()), ..Default::default() };

    let updated = store.update_profile(&update).await.unwrap();

    assert_eq!(updated.phone.as_deref(), Some("+55 11 99999-0000"));
    assert_eq!(store.snapshot().profile, Some(updated));
    assert!(!store.snapshot().loading);
}

#[tokio::test]
async fn update_password_requires_recovery_session() {
    let (_provider, _backend, store) = signed_out_store().await;
    assert!(matches!(store.update_password("secret1").await, Err(AuthError::Failed(_))));

    let (provider, _backend, store) = signed_in_store(Role::User).await;
    store.update_password("secret2").await.unwrap();
    assert_eq!(provider.state().password_updates, vec!["secret2".to_owned()]);
}

#[tokio::test]
async fn forgot_password_returns_acknowledgement() {
    let (_provider, backend, store) = signed_out_store().await;
    let message = store.forgot_password("ana@example.com").await.unwrap();
    assert!(!message.is_empty());
    assert_eq!(backend.state().forgot, vec!["ana@example.com".to_owned()]);
}

// =============================================================
// Events and lifecycle
// =============================================================

#[tokio::test]
async fn signed_out_event_clears_profile() {
    let (_provider, _backend, store) = signed_in_store(Role::User).await;
    store.handle_event(AuthEvent { kind: AuthEventKind::SignedOut, session: None }).await;
    assert_eq!(store.snapshot(), AuthState::default());
}

#[tokio::test]
async fn token_refresh_event_keeps_profile_without_refetch() {
    let (_provider, backend, store) = signed_in_store(Role::User).await;
    let fetches = backend.calls("current_profile");

    let mut refreshed = provider_session("u1", "u1@example.com");
    refreshed.access_token = "at-new".into();
    store.handle_event(AuthEvent { kind: AuthEventKind::TokenRefreshed, session: Some(refreshed) }).await;

    let state = store.snapshot();
    assert_eq!(backend.calls("current_profile"), fetches);
    assert_eq!(state.session.as_ref().map(Session::access_token), Some("at-new"));
    assert!(state.profile.is_some());
}

#[tokio::test]
async fn user_updated_event_refetches_profile() {
    let (_provider, backend, store) = signed_in_store(Role::User).await;
    backend.state().profile.as_mut().unwrap().name = "Renamed".into();

    store
        .handle_event(AuthEvent {
            kind: AuthEventKind::UserUpdated,
            session: Some(provider_session("u1", "u1@example.com")),
        })
        .await;

    assert_eq!(store.snapshot().profile.map(|p| p.name).as_deref(), Some("Renamed"));
}

#[tokio::test]
async fn pump_applies_events_until_stop() {
    let provider = Arc::new(FakeProvider::default());
    let backend = Arc::new(FakeBackend::with_profile(profile("u1", Role::User)));
    let store = store(&provider, &backend);

    let events = store.start();
    assert_eq!(provider.listener_count(), 1);
    provider.emit(&AuthEvent {
        kind: AuthEventKind::InitialSession,
        session: Some(provider_session("u1", "u1@example.com")),
    });
    store.stop();
    assert_eq!(provider.listener_count(), 0);

    store.pump(events).await;

    let state = store.snapshot();
    assert!(!state.loading);
    assert_eq!(state.role(), Some(Role::User));
}

#[tokio::test]
async fn restart_replaces_previous_subscription() {
    let (provider, _backend, store) = signed_out_store().await;
    let _first = store.start();
    let _second = store.start();
    assert_eq!(provider.listener_count(), 1);
    store.stop();
    assert_eq!(provider.listener_count(), 0);
}

#[tokio::test]
async fn observer_sees_every_write() {
    let (_provider, backend, store) = signed_out_store().await;
    backend.state().login_result = login_ok("u2", Role::Supervisor);
    let seen: Arc<Mutex<Vec<AuthState>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.set_observer(Arc::new(move |s: &AuthState| sink.lock().unwrap().push(s.clone())));

    store.sign_in("u2@example.com", "secret1").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.first(), Some(&AuthState::default()));
    assert!(seen.iter().any(|s| s.loading));
    assert_eq!(seen.last(), Some(&store.snapshot()));
    assert!(seen.iter().all(|s| s.profile.is_none() || s.user.is_some()));
}

