//! In-memory identity provider and profile backend for unit tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::net::api::ProfileBackend;
use crate::net::error::{ApiError, ProviderError};
use crate::net::identity::{AuthEventSender, IdentityProvider, SubscriptionId};
use crate::net::types::{
    AuthEvent, AuthEventKind, AuthUser, CreateProfileRequest, LoginRequest, LoginResponse, OAuthProvider,
    ProfileUpdate, ProviderSession, ProviderUser, RegisterRequest, Role, TokenPair, UserMetadata, UserProfile,
};

pub fn auth_user(id: &str, email: &str) -> AuthUser {
    AuthUser { id: id.to_owned(), email: Some(email.to_owned()) }
}

pub fn provider_session(id: &str, email: &str) -> ProviderSession {
    ProviderSession {
        access_token: format!("at-{id}"),
        refresh_token: format!("rt-{id}"),
        expires_at: None,
        user: auth_user(id, email),
    }
}

pub fn profile(id: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.to_owned(),
        email: format!("{id}@example.com"),
        name: format!("User {id}"),
        phone: None,
        birthday: None,
        avatar_url: None,
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        is_active: true,
        role,
    }
}

pub fn token_pair(id: &str) -> TokenPair {
    TokenPair {
        access_token: format!("at-{id}"),
        refresh_token: format!("rt-{id}"),
        token_type: "bearer".to_owned(),
        expires_in: Some(3600),
    }
}

// =============================================================
// Identity provider
// =============================================================

#[derive(Default)]
pub struct ProviderState {
    pub session: Option<ProviderSession>,
    pub user: Option<ProviderUser>,
    pub set_session_error: Option<ProviderError>,
    pub sign_out_error: Option<ProviderError>,
    pub refresh_result: Option<Result<ProviderSession, ProviderError>>,
    pub oauth_error: Option<ProviderError>,
    pub oauth_redirects: Vec<(OAuthProvider, String)>,
    pub password_updates: Vec<String>,
    pub listeners: Vec<(SubscriptionId, AuthEventSender)>,
    pub next_id: u64,
    pub calls: Vec<&'static str>,
}

#[derive(Default)]
pub struct FakeProvider {
    inner: Mutex<ProviderState>,
}

impl FakeProvider {
    pub fn with_session(session: ProviderSession) -> Self {
        let provider = Self::default();
        provider.state().session = Some(session);
        provider
    }

    pub fn state(&self) -> MutexGuard<'_, ProviderState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn calls(&self, name: &str) -> usize {
        self.state().calls.iter().filter(|c| **c == name).count()
    }

    pub fn listener_count(&self) -> usize {
        self.state().listeners.len()
    }

    pub fn emit(&self, event: &AuthEvent) {
        let mut state = self.state();
        state.listeners.retain(|(_, tx)| tx.unbounded_send(event.clone()).is_ok());
    }

    fn record(&self, name: &'static str) {
        self.state().calls.push(name);
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FakeProvider {
    async fn get_session(&self) -> Result<Option<ProviderSession>, ProviderError> {
        self.record("get_session");
        Ok(self.state().session.clone())
    }

    fn subscribe(&self, sender: AuthEventSender) -> SubscriptionId {
        let mut state = self.state();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.listeners.push((id, sender));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.state().listeners.retain(|(existing, _)| *existing != id);
    }

    async fn set_session(&self, tokens: &TokenPair) -> Result<ProviderSession, ProviderError> {
        self.record("set_session");
        let session = {
            let mut state = self.state();
            if let Some(err) = state.set_session_error.clone() {
                return Err(err);
            }
            let user = state
                .user
                .as_ref()
                .map_or_else(|| auth_user("sb-1", "ana@example.com"), ProviderUser::auth_user);
            let session = ProviderSession {
                access_token: tokens.access_token.clone(),
                refresh_token: tokens.refresh_token.clone(),
                expires_at: None,
                user,
            };
            state.session = Some(session.clone());
            session
        };
        self.emit(&AuthEvent { kind: AuthEventKind::SignedIn, session: Some(session.clone()) });
        Ok(session)
    }

    async fn refresh_session(&self) -> Result<ProviderSession, ProviderError> {
        self.record("refresh_session");
        let result = self.state().refresh_result.clone().unwrap_or(Err(ProviderError::NoSession));
        if let Ok(session) = &result {
            self.state().session = Some(session.clone());
        }
        result
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.record("sign_out");
        if let Some(err) = self.state().sign_out_error.clone() {
            return Err(err);
        }
        self.state().session = None;
        self.emit(&AuthEvent { kind: AuthEventKind::SignedOut, session: None });
        Ok(())
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), ProviderError> {
        self.record("sign_in_with_oauth");
        let mut state = self.state();
        if let Some(err) = state.oauth_error.clone() {
            return Err(err);
        }
        state.oauth_redirects.push((provider, redirect_to.to_owned()));
        Ok(())
    }

    async fn get_user(&self) -> Result<Option<ProviderUser>, ProviderError> {
        self.record("get_user");
        Ok(self.state().user.clone())
    }

    async fn update_password(&self, password: &str) -> Result<(), ProviderError> {
        self.record("update_password");
        let mut state = self.state();
        if state.session.is_none() {
            return Err(ProviderError::NoSession);
        }
        state.password_updates.push(password.to_owned());
        Ok(())
    }
}

pub fn provider_user(id: &str, email: Option<&str>, metadata: UserMetadata) -> ProviderUser {
    ProviderUser { id: id.to_owned(), email: email.map(str::to_owned), user_metadata: metadata }
}

// =============================================================
// Profile backend
// =============================================================

pub struct BackendState {
    pub profile: Option<UserProfile>,
    pub profile_error: Option<ApiError>,
    pub login_result: Result<LoginResponse, ApiError>,
    pub register_error: Option<ApiError>,
    pub create_error: Option<ApiError>,
    pub update_error: Option<ApiError>,
    pub delete_error: Option<ApiError>,
    pub registered: Vec<RegisterRequest>,
    pub created: Vec<CreateProfileRequest>,
    pub updates: Vec<ProfileUpdate>,
    pub forgot: Vec<String>,
    pub calls: Vec<&'static str>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            profile: None,
            profile_error: None,
            login_result: Err(ApiError::Unauthorized),
            register_error: None,
            create_error: None,
            update_error: None,
            delete_error: None,
            registered: Vec::new(),
            created: Vec::new(),
            updates: Vec::new(),
            forgot: Vec::new(),
            calls: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<BackendState>,
}

impl FakeBackend {
    pub fn with_profile(profile: UserProfile) -> Self {
        let backend = Self::default();
        backend.state().profile = Some(profile);
        backend
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn calls(&self, name: &str) -> usize {
        self.state().calls.iter().filter(|c| **c == name).count()
    }
}

#[async_trait::async_trait(?Send)]
impl ProfileBackend for FakeBackend {
    async fn register(&self, req: &RegisterRequest) -> Result<String, ApiError> {
        let mut state = self.state();
        state.calls.push("register");
        if let Some(err) = state.register_error.clone() {
            return Err(err);
        }
        state.registered.push(req.clone());
        Ok("Usuário criado com sucesso".to_owned())
    }

    async fn create_profile(&self, req: &CreateProfileRequest) -> Result<UserProfile, ApiError> {
        let mut state = self.state();
        state.calls.push("create_profile");
        if let Some(err) = state.create_error.clone() {
            return Err(err);
        }
        state.created.push(req.clone());
        let created = UserProfile {
            id: req.supabase_id.clone(),
            email: req.email.clone(),
            name: req.name.clone(),
            phone: req.phone.clone(),
            birthday: req.birthday.clone(),
            avatar_url: req.avatar_url.clone(),
            created_at: "2024-01-01T00:00:00Z".to_owned(),
            is_active: true,
            role: Role::User,
        };
        state.profile = Some(created.clone());
        Ok(created)
    }

    async fn login(&self, _req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let mut state = self.state();
        state.calls.push("login");
        state.login_result.clone()
    }

    async fn current_profile(&self) -> Result<UserProfile, ApiError> {
        let mut state = self.state();
        state.calls.push("current_profile");
        if let Some(err) = state.profile_error.clone() {
            return Err(err);
        }
        state.profile.clone().ok_or(ApiError::NotFound)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let mut state = self.state();
        state.calls.push("update_profile");
        if let Some(err) = state.update_error.clone() {
            return Err(err);
        }
        state.updates.push(update.clone());
        let profile = state.profile.as_mut().ok_or(ApiError::NotFound)?;
        if let Some(name) = &update.name {
            profile.name = name.clone();
        }
        if let Some(phone) = &update.phone {
            profile.phone = Some(phone.clone());
        }
        if let Some(birthday) = &update.birthday {
            profile.birthday = Some(birthday.clone());
        }
        if let Some(avatar_url) = &update.avatar_url {
            profile.avatar_url = Some(avatar_url.clone());
        }
        Ok(profile.clone())
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        let mut state = self.state();
        state.calls.push("delete_account");
        if let Some(err) = state.delete_error.clone() {
            return Err(err);
        }
        state.profile = None;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let mut state = self.state();
        state.calls.push("forgot_password");
        state.forgot.push(email.to_owned());
        Ok("Se o email existir, você receberá instruções.".to_owned())
    }
}
