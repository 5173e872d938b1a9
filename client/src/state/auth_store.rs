//! Auth store: the single owner of session, user and profile state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` constructs one store from an [`IdentityProvider`] and a
//! [`ProfileBackend`], mirrors its writes into a `RwSignal<AuthState>` via
//! [`AuthStore::set_observer`], and shares it with pages through Leptos
//! context. Guards only read the mirrored signal; pages call the async
//! operations below.
//!
//! LIFECYCLE
//! =========
//! `start()` subscribes to the provider's change stream, `initialize()`
//! probes the existing session once, `pump()` applies events until the
//! stream closes, and `stop()` unsubscribes (which closes the stream).
//! In-flight profile fetches are not cancelled by `stop()`.
//!
//! CONCURRENCY
//! ===========
//! The state mutex is only held for field-wise replacement and never across
//! an `.await`; observers run after the lock is released and always see a
//! complete snapshot. Overlapping operations resolve to the last write.

#[cfg(test)]
#[path = "auth_store_test.rs"]
mod auth_store_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedReceiver};

use super::auth::{AuthState, Session};
use crate::net::api::ProfileBackend;
use crate::net::error::{ApiError, ProviderError};
use crate::net::identity::{IdentityProvider, SubscriptionId};
use crate::net::types::{
    AuthEvent, AuthEventKind, AuthUser, CreateProfileRequest, LoginRequest, LoginResponse, OAuthProvider, ProfileUpdate,
    ProviderUser, RegisterRequest, UserMetadata, UserProfile,
};

/// Field-level rejection reported by the backend on sign-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationFailure {
    AlreadyExists,
    InvalidFields,
}

impl ValidationFailure {
    pub fn message(self) -> &'static str {
        match self {
            Self::AlreadyExists => "Usuário já existe. Tente fazer login.",
            Self::InvalidFields => "Dados inválidos. Verifique os campos e tente novamente.",
        }
    }
}

/// Store-level failure; `Display` is the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{}", .0.message())]
    Validation(ValidationFailure),

    #[error("Email ou senha inválidos")]
    InvalidCredentials,

    #[error("Usuário inativo. Entre em contato com o suporte.")]
    InactiveAccount,

    #[error("{0}")]
    SignOut(String),

    #[error("{0}")]
    Failed(String),
}

/// Backend `detail` text, else the transport message, else `fallback`.
fn backend_message(err: &ApiError, fallback: &str) -> String {
    if let Some(detail) = err.detail().filter(|d| !d.trim().is_empty()) {
        return detail.to_owned();
    }
    match err {
        ApiError::Network(msg) | ApiError::Parse(msg) if !msg.is_empty() => msg.clone(),
        _ => fallback.to_owned(),
    }
}

fn provider_message(err: &ProviderError, fallback: &str) -> String {
    match err {
        ProviderError::Rejected { message, .. } if !message.is_empty() => message.clone(),
        ProviderError::Network(msg) if !msg.is_empty() => msg.clone(),
        _ => fallback.to_owned(),
    }
}

fn sign_up_error(err: &ApiError) -> AuthError {
    match err.status() {
        Some(409) => AuthError::Validation(ValidationFailure::AlreadyExists),
        Some(422) => AuthError::Validation(ValidationFailure::InvalidFields),
        _ => AuthError::Failed(backend_message(err, "Falha ao criar conta")),
    }
}

fn sign_in_error(err: &ApiError) -> AuthError {
    match err.status() {
        Some(401) => AuthError::InvalidCredentials,
        Some(403) => AuthError::InactiveAccount,
        _ => AuthError::Failed(backend_message(err, "Falha ao fazer login")),
    }
}

/// Display name for a first-time OAuth profile.
///
/// Metadata `full_name`, then `name`, then the e-mail local part, then
/// `"User"`; blank candidates are skipped.
pub fn derive_display_name(metadata: &UserMetadata, email: Option<&str>) -> String {
    let local_part = email.and_then(|e| e.split('@').next());
    [metadata.full_name.as_deref(), metadata.name.as_deref(), local_part]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or("User")
        .to_owned()
}

fn profile_request_for(user: &ProviderUser, email: String) -> CreateProfileRequest {
    let metadata = &user.user_metadata;
    CreateProfileRequest {
        supabase_id: user.id.clone(),
        name: derive_display_name(metadata, Some(&email)),
        email,
        phone: metadata.phone.clone(),
        birthday: metadata.birthday.clone(),
        avatar_url: metadata.avatar_url.clone(),
    }
}

/// Receiving end of the provider's change stream, returned by [`AuthStore::start`].
pub struct AuthEvents(UnboundedReceiver<AuthEvent>);

impl AuthEvents {
    pub async fn next(&mut self) -> Option<AuthEvent> {
        self.0.next().await
    }
}

/// Callback invoked with every new snapshot.
pub type AuthObserver = Arc<dyn Fn(&AuthState) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Explicitly constructed auth state object shared by clone.
#[derive(Clone)]
pub struct AuthStore {
    provider: Arc<dyn IdentityProvider>,
    backend: Arc<dyn ProfileBackend>,
    state: Arc<Mutex<AuthState>>,
    observer: Arc<Mutex<Option<AuthObserver>>>,
    subscription: Arc<Mutex<Option<SubscriptionId>>>,
}

impl AuthStore {
    /// New store in the loading state; nothing is fetched until `initialize`.
    pub fn new(provider: Arc<dyn IdentityProvider>, backend: Arc<dyn ProfileBackend>) -> Self {
        Self {
            provider,
            backend,
            state: Arc::new(Mutex::new(AuthState::loading())),
            observer: Arc::new(Mutex::new(None)),
            subscription: Arc::new(Mutex::new(None)),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        lock(&self.state).clone()
    }

    /// Install the write observer and replay the current snapshot to it.
    pub fn set_observer(&self, observer: AuthObserver) {
        *lock(&self.observer) = Some(Arc::clone(&observer));
        observer(&self.snapshot());
    }

    fn write(&self, apply: impl FnOnce(&mut AuthState)) -> AuthState {
        let snapshot = {
            let mut state = lock(&self.state);
            apply(&mut state);
            if state.user.is_none() {
                state.profile = None;
            }
            state.clone()
        };
        let observer = lock(&self.observer).clone();
        if let Some(observer) = observer {
            observer(&snapshot);
        }
        snapshot
    }

    fn set_loading(&self, loading: bool) {
        self.write(|s| s.loading = loading);
    }

    // =============================================================
    // Lifecycle
    // =============================================================

    /// Subscribe to provider session changes.
    pub fn start(&self) -> AuthEvents {
        let (tx, rx) = mpsc::unbounded();
        let id = self.provider.subscribe(tx);
        let previous = lock(&self.subscription).replace(id);
        if let Some(previous) = previous {
            self.provider.unsubscribe(previous);
        }
        AuthEvents(rx)
    }

    /// Probe the existing provider session once and load its profile.
    pub async fn initialize(&self) {
        let session = match self.provider.get_session().await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("auth: session probe failed: {e}");
                None
            }
        };
        let has_user = session.is_some();
        self.write(|s| {
            s.user = session.as_ref().map(|session| session.user.clone());
            s.session = session.map(Session::Full);
        });
        if has_user {
            self.load_profile().await;
        }
        self.set_loading(false);
    }

    /// Apply events until the stream closes.
    pub async fn pump(&self, mut events: AuthEvents) {
        while let Some(event) = events.next().await {
            self.handle_event(event).await;
        }
        log::debug!("auth: event stream closed");
    }

    pub fn stop(&self) {
        let id = lock(&self.subscription).take();
        if let Some(id) = id {
            self.provider.unsubscribe(id);
        }
    }

    /// Apply one provider session change.
    pub async fn handle_event(&self, event: AuthEvent) {
        let AuthEvent { kind, session } = event;
        log::debug!("auth: {kind:?} (session: {})", session.is_some());
        let has_user = session.is_some();
        self.write(|s| {
            s.user = session.as_ref().map(|session| session.user.clone());
            s.session = session.map(Session::Full);
            if kind == AuthEventKind::SignedOut {
                s.profile = None;
            }
        });
        if has_user && matches!(kind, AuthEventKind::InitialSession | AuthEventKind::UserUpdated) {
            self.load_profile().await;
        }
        self.set_loading(false);
    }

    // =============================================================
    // Profile fetch
    // =============================================================

    /// Re-fetch the profile; returns whatever ended up installed.
    pub async fn refresh_profile(&self) -> Option<UserProfile> {
        self.load_profile().await
    }

    async fn load_profile(&self) -> Option<UserProfile> {
        let profile = match self.backend.current_profile().await {
            Ok(profile) => Some(profile),
            Err(ApiError::NotFound) => self.provision_profile().await,
            Err(e) => {
                log::warn!("auth: profile fetch failed: {e}");
                None
            }
        };
        self.write(|s| s.profile = profile).profile
    }

    /// First OAuth login: create the backend profile from provider metadata.
    async fn provision_profile(&self) -> Option<UserProfile> {
        let user = match self.provider.get_user().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::warn!("auth: no provider user to provision a profile for");
                return None;
            }
            Err(e) => {
                log::warn!("auth: provider user lookup failed: {e}");
                return None;
            }
        };
        let Some(email) = user.email.clone().filter(|e| !e.is_empty()) else {
            log::warn!("auth: provider user {} has no email; profile not created", user.id);
            return None;
        };

        match self.backend.create_profile(&profile_request_for(&user, email)).await {
            Ok(profile) => {
                log::info!("auth: created profile for {}", profile.id);
                Some(profile)
            }
            Err(e) => {
                log::warn!("auth: profile creation failed: {e}");
                None
            }
        }
    }

    // =============================================================
    // Operations
    // =============================================================

    /// Create an account. No session is established.
    ///
    /// # Errors
    ///
    /// Validation failures for 409/422, otherwise the backend's message.
    pub async fn sign_up(&self, req: &RegisterRequest) -> Result<String, AuthError> {
        self.set_loading(true);
        let result = self.backend.register(req).await.map_err(|e| {
            log::warn!("auth: sign-up failed: {e}");
            sign_up_error(&e)
        });
        self.set_loading(false);
        result
    }

    /// Sign in with e-mail and password through the backend.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for 401, `InactiveAccount` for 403, otherwise the
    /// backend's message. Session, user and profile are untouched on error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        self.set_loading(true);
        let result = self.establish_session(email, password).await;
        self.set_loading(false);
        result
    }

    async fn establish_session(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let req = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let LoginResponse { token, user: profile } = self.backend.login(&req).await.map_err(|e| {
            log::warn!("auth: sign-in failed: {e}");
            sign_in_error(&e)
        })?;

        let session = match self.provider.set_session(&token).await {
            Ok(session) => Session::Full(session),
            Err(e) => {
                log::warn!("auth: provider refused backend tokens, continuing with a local-only session: {e}");
                Session::Minimal {
                    access_token: token.access_token.clone(),
                    user: AuthUser { id: profile.id.clone(), email: Some(profile.email.clone()) },
                }
            }
        };

        let user = session.user().clone();
        let installed = profile.clone();
        self.write(move |s| {
            s.session = Some(session);
            s.user = Some(user);
            s.profile = Some(installed);
        });
        Ok(profile)
    }

    /// Start the provider's hosted sign-in flow; completion arrives as an event.
    ///
    /// # Errors
    ///
    /// The provider's message if the redirect could not be started.
    pub async fn sign_in_with_provider(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), AuthError> {
        self.provider.sign_in_with_oauth(provider, redirect_to).await.map_err(|e| {
            log::warn!("auth: {} sign-in failed: {e}", provider.as_str());
            AuthError::Failed(provider_message(&e, "Falha ao entrar com Google"))
        })
    }

    /// Sign out and clear session, user and profile together.
    ///
    /// # Errors
    ///
    /// `SignOut` if the provider call failed; state is left as it was.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_loading(true);
        match self.provider.sign_out().await {
            Ok(()) => {
                self.write(|s| {
                    s.clear_identity();
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                log::warn!("auth: sign-out failed: {e}");
                self.set_loading(false);
                Err(AuthError::SignOut(provider_message(&e, "Falha ao sair")))
            }
        }
    }

    /// Partially update the profile; the cached copy becomes the server's.
    ///
    /// # Errors
    ///
    /// The backend's message on failure; the cached profile is kept.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, AuthError> {
        self.set_loading(true);
        match self.backend.update_profile(update).await {
            Ok(profile) => {
                let installed = profile.clone();
                self.write(move |s| {
                    s.profile = Some(installed);
                    s.loading = false;
                });
                Ok(profile)
            }
            Err(e) => {
                log::warn!("auth: profile update failed: {e}");
                self.set_loading(false);
                Err(AuthError::Failed(backend_message(&e, "Falha ao atualizar perfil")))
            }
        }
    }

    /// Ask the backend to send a reset e-mail.
    ///
    /// # Errors
    ///
    /// The backend's message if the request itself failed.
    pub async fn forgot_password(&self, email: &str) -> Result<String, AuthError> {
        self.backend.forgot_password(email).await.map_err(|e| {
            log::warn!("auth: password reset request failed: {e}");
            AuthError::Failed(backend_message(&e, "Falha ao enviar email de recuperação"))
        })
    }

    /// Set a new password for the current (recovery) session.
    ///
    /// # Errors
    ///
    /// The provider's message, or a prompt to restart the flow when there is
    /// no session to update.
    pub async fn update_password(&self, password: &str) -> Result<(), AuthError> {
        self.provider.update_password(password).await.map_err(|e| {
            log::warn!("auth: password update failed: {e}");
            match e {
                ProviderError::NoSession => {
                    AuthError::Failed("Link de recuperação inválido ou expirado. Solicite um novo.".to_owned())
                }
                other => AuthError::Failed(provider_message(&other, "Falha ao redefinir senha")),
            }
        })
    }

    /// Delete the backend account, then sign out locally.
    ///
    /// # Errors
    ///
    /// The backend's message if deletion failed; nothing is cleared then.
    pub async fn delete_account(&self) -> Result<(), AuthError> {
        self.backend.delete_account().await.map_err(|e| {
            log::warn!("auth: account deletion failed: {e}");
            AuthError::Failed(backend_message(&e, "Falha ao excluir conta"))
        })?;
        if let Err(e) = self.sign_out().await {
            log::warn!("auth: sign-out after account deletion failed, clearing locally: {e}");
            self.write(AuthState::clear_identity);
        }
        Ok(())
    }
}
