//! Identity provider seam and its Supabase GoTrue implementation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth store talks to the provider only through [`IdentityProvider`], so
//! tests swap in an in-memory fake. [`SupabaseAuth`] is a thin REST adapter:
//! it keeps the current session in memory and in `localStorage`, and fans
//! session changes out to subscribers over unbounded channels.
//!
//! EVENT ORDERING
//! ==============
//! A subscriber first receives exactly one `InitialSession` event, sent once
//! the provider finished consuming any OAuth redirect fragment. Later
//! changes (`SignedIn`, `TokenRefreshed`, ...) are only delivered to
//! subscribers that already got their initial event.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::channel::mpsc::UnboundedSender;
use serde::Deserialize;

use super::error::ProviderError;
use super::http::{self, Method, RawResponse, TransportError};
use super::types::{
    AuthEvent, AuthEventKind, AuthUser, OAuthProvider, ProviderSession, ProviderUser, TokenPair,
};
use crate::util::{browser, storage};

/// Sessions expiring within this many seconds are refreshed before use.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

pub type AuthEventSender = UnboundedSender<AuthEvent>;

/// Handle returned by [`IdentityProvider::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Session issuance, refresh and sign-out primitives.
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider: Send + Sync {
    /// Current session, refreshed first if it is about to expire.
    async fn get_session(&self) -> Result<Option<ProviderSession>, ProviderError>;

    /// Register a listener for session changes.
    fn subscribe(&self, sender: AuthEventSender) -> SubscriptionId;

    /// Drop a listener; its channel closes once pending events drain.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Install a token pair issued elsewhere (the backend login endpoint).
    async fn set_session(&self, tokens: &TokenPair) -> Result<ProviderSession, ProviderError>;

    async fn refresh_session(&self) -> Result<ProviderSession, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Start the hosted OAuth flow; the browser leaves the page on success.
    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), ProviderError>;

    /// Full user record for the current session, if any.
    async fn get_user(&self) -> Result<Option<ProviderUser>, ProviderError>;

    async fn update_password(&self, password: &str) -> Result<(), ProviderError>;
}

// =============================================================================
// REDIRECT FRAGMENT
// =============================================================================

/// Tokens carried in the URL fragment after an OAuth or recovery redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
    pub kind: Option<String>,
}

impl RedirectTokens {
    #[must_use]
    pub fn is_recovery(&self) -> bool {
        self.kind.as_deref() == Some("recovery")
    }

    fn into_session(self, user: AuthUser, now_secs: i64) -> ProviderSession {
        ProviderSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.or_else(|| self.expires_in.map(|s| now_secs + s)),
            user,
        }
    }
}

/// Parse `#access_token=...&refresh_token=...` into redirect tokens.
///
/// Returns `None` unless both tokens are present.
#[must_use]
pub fn parse_redirect_fragment(fragment: &str) -> Option<RedirectTokens> {
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut expires_at = None;
    let mut kind = None;

    for pair in fragment.trim_start_matches('#').split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" if !value.is_empty() => access_token = Some(value.to_owned()),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value.to_owned()),
            "expires_in" => expires_in = value.parse().ok(),
            "expires_at" => expires_at = value.parse().ok(),
            "type" => kind = Some(value.to_owned()),
            _ => {}
        }
    }

    Some(RedirectTokens { access_token: access_token?, refresh_token: refresh_token?, expires_in, expires_at, kind })
}

// =============================================================================
// WIRE HELPERS
// =============================================================================

/// `localStorage` key used by supabase-js for a project URL:
/// `sb-<first host label>-auth-token`.
#[must_use]
pub fn storage_key_for(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = without_scheme.split(['/', ':']).next().unwrap_or_default();
    let project_ref = host.split('.').next().unwrap_or_default();
    format!("sb-{project_ref}-auth-token")
}

/// Hosted OAuth entry point; `encoded_redirect` must already be percent-encoded.
#[must_use]
pub fn authorize_url(base_url: &str, provider: OAuthProvider, encoded_redirect: &str) -> String {
    format!(
        "{base_url}/auth/v1/authorize?provider={}&redirect_to={encoded_redirect}",
        provider.as_str()
    )
}

/// Token endpoint response (`grant_type=refresh_token`).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: ProviderUser,
}

fn session_from_token_response(body: &str, now_secs: i64) -> Result<ProviderSession, ProviderError> {
    let resp: TokenResponse = serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
    Ok(ProviderSession {
        access_token: resp.access_token,
        refresh_token: resp.refresh_token,
        expires_at: resp.expires_at.or_else(|| resp.expires_in.map(|s| now_secs + s)),
        user: resp.user.auth_user(),
    })
}

/// Best human-readable message in a GoTrue error body.
fn provider_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error_description: Option<String>,
        msg: Option<String>,
        message: Option<String>,
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_description.or(b.msg).or(b.message).or(b.error))
        .unwrap_or_else(|| body.trim().to_owned())
}

fn rejected(resp: &RawResponse) -> ProviderError {
    ProviderError::Rejected { status: resp.status, message: provider_error_message(&resp.body) }
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unavailable => Self::Unavailable,
            TransportError::Failed(msg) => Self::Network(msg),
        }
    }
}

// =============================================================================
// SUPABASE AUTH
// =============================================================================

struct Listener {
    id: SubscriptionId,
    sender: AuthEventSender,
    greeted: bool,
}

#[derive(Default)]
struct Inner {
    session: Option<ProviderSession>,
    initialized: bool,
    pending_redirect: Option<RedirectTokens>,
    listeners: Vec<Listener>,
    next_id: u64,
}

/// GoTrue REST client holding the browser's provider session.
pub struct SupabaseAuth {
    url: String,
    anon_key: String,
    storage_key: String,
    inner: Mutex<Inner>,
    init_gate: futures::lock::Mutex<()>,
}

impl SupabaseAuth {
    /// Build the client, restoring any persisted session and capturing an
    /// OAuth redirect fragment for consumption on first use.
    #[must_use]
    pub fn new(url: &str, anon_key: &str) -> Self {
        let url = url.trim_end_matches('/').to_owned();
        let storage_key = storage_key_for(&url);
        let session = storage::load_json::<ProviderSession>(&storage_key);
        let pending_redirect = browser::location_fragment().and_then(|f| parse_redirect_fragment(&f));

        Self {
            url,
            anon_key: anon_key.to_owned(),
            storage_key,
            inner: Mutex::new(Inner { session, pending_redirect, ..Inner::default() }),
            init_gate: futures::lock::Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_access_token(&self) -> Option<String> {
        self.lock().session.as_ref().map(|s| s.access_token.clone())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> Result<RawResponse, ProviderError> {
        let url = format!("{}{path}", self.url);
        let headers = [
            ("apikey", self.anon_key.clone()),
            ("Authorization", format!("Bearer {}", bearer.unwrap_or(self.anon_key.as_str()))),
        ];
        Ok(http::send(method, &url, &headers, body).await?)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError> {
        let resp = self.request(Method::Get, "/auth/v1/user", Some(access_token), None).await?;
        if !resp.is_success() {
            return Err(rejected(&resp));
        }
        serde_json::from_str(&resp.body).map_err(|e| ProviderError::Parse(e.to_string()))
    }

    /// Replace the session, persist it and notify greeted listeners.
    fn install(&self, session: ProviderSession, kind: AuthEventKind) {
        storage::save_json(&self.storage_key, &session);
        let mut inner = self.lock();
        inner.session = Some(session);
        let event = AuthEvent { kind, session: inner.session.clone() };
        broadcast(&mut inner, &event);
    }

    fn clear(&self) {
        storage::remove(&self.storage_key);
        let mut inner = self.lock();
        inner.session = None;
        broadcast(&mut inner, &AuthEvent { kind: AuthEventKind::SignedOut, session: None });
    }

    /// Send `InitialSession` to every listener that has not had one yet.
    fn greet_listeners(&self) {
        let mut inner = self.lock();
        if !inner.initialized {
            return;
        }
        let event = AuthEvent { kind: AuthEventKind::InitialSession, session: inner.session.clone() };
        inner.listeners.retain_mut(|l| {
            if l.greeted {
                return true;
            }
            l.greeted = true;
            l.sender.unbounded_send(event.clone()).is_ok()
        });
    }

    /// Consume a pending redirect fragment once, then greet listeners.
    async fn ensure_initialized(&self) {
        self.initialize_with(|tokens| self.redirect_session(tokens)).await;
    }

    /// Single-flight initialization: concurrent callers wait on `init_gate`
    /// until the first one has installed the redirect session, so nobody is
    /// greeted with a premature empty `InitialSession`.
    async fn initialize_with<F, Fut>(&self, resolve: F)
    where
        F: FnOnce(RedirectTokens) -> Fut,
        Fut: Future<Output = Option<(ProviderSession, AuthEventKind)>>,
    {
        let _gate = self.init_gate.lock().await;
        let pending = {
            let mut inner = self.lock();
            if inner.initialized {
                return;
            }
            inner.pending_redirect.take()
        };

        if let Some(tokens) = pending {
            browser::clear_location_fragment();
            if let Some((session, kind)) = resolve(tokens).await {
                self.install(session, kind);
            }
        }

        self.lock().initialized = true;
        self.greet_listeners();
    }

    /// Validate redirect tokens against the provider.
    async fn redirect_session(&self, tokens: RedirectTokens) -> Option<(ProviderSession, AuthEventKind)> {
        match self.fetch_user(&tokens.access_token).await {
            Ok(user) => {
                let kind = if tokens.is_recovery() { AuthEventKind::PasswordRecovery } else { AuthEventKind::SignedIn };
                Some((tokens.into_session(user.auth_user(), browser::now_secs()), kind))
            }
            Err(e) => {
                log::warn!("discarding redirect session: {e}");
                None
            }
        }
    }
}

fn broadcast(inner: &mut Inner, event: &AuthEvent) {
    inner
        .listeners
        .retain(|l| !l.greeted || l.sender.unbounded_send(event.clone()).is_ok());
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<ProviderSession>, ProviderError> {
        self.ensure_initialized().await;
        let current = self.lock().session.clone();
        match current {
            Some(session) if session.expires_within(browser::now_secs(), EXPIRY_MARGIN_SECS) => {
                match self.refresh_session().await {
                    Ok(refreshed) => Ok(Some(refreshed)),
                    Err(ProviderError::Rejected { status, message }) => {
                        log::warn!("stored session could not be refreshed ({status}): {message}");
                        self.clear();
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
            other => Ok(other),
        }
    }

    fn subscribe(&self, sender: AuthEventSender) -> SubscriptionId {
        let id = {
            let mut inner = self.lock();
            inner.next_id += 1;
            let id = SubscriptionId(inner.next_id);
            inner.listeners.push(Listener { id, sender, greeted: false });
            id
        };
        self.greet_listeners();
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().listeners.retain(|l| l.id != id);
    }

    async fn set_session(&self, tokens: &TokenPair) -> Result<ProviderSession, ProviderError> {
        let user = self.fetch_user(&tokens.access_token).await?;
        let session = ProviderSession {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: tokens.expires_in.map(|s| browser::now_secs() + s),
            user: user.auth_user(),
        };
        self.install(session.clone(), AuthEventKind::SignedIn);
        Ok(session)
    }

    async fn refresh_session(&self) -> Result<ProviderSession, ProviderError> {
        let refresh_token = self
            .lock()
            .session
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or(ProviderError::NoSession)?;
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let resp = self
            .request(Method::Post, "/auth/v1/token?grant_type=refresh_token", None, Some(&body))
            .await?;
        if !resp.is_success() {
            return Err(rejected(&resp));
        }
        let session = session_from_token_response(&resp.body, browser::now_secs())?;
        self.install(session.clone(), AuthEventKind::TokenRefreshed);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        if let Some(token) = self.current_access_token() {
            let resp = self.request(Method::Post, "/auth/v1/logout", Some(&token), None).await?;
            // 401/404 mean the server already forgot this session.
            if resp.status >= 500 {
                return Err(rejected(&resp));
            }
        }
        self.clear();
        Ok(())
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<(), ProviderError> {
        let url = authorize_url(&self.url, provider, &browser::encode_uri_component(redirect_to));
        #[cfg(feature = "hydrate")]
        {
            browser::assign_location(&url).map_err(ProviderError::Network)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(ProviderError::Unavailable)
        }
    }

    async fn get_user(&self) -> Result<Option<ProviderUser>, ProviderError> {
        match self.current_access_token() {
            Some(token) => self.fetch_user(&token).await.map(Some),
            None => Ok(None),
        }
    }

    async fn update_password(&self, password: &str) -> Result<(), ProviderError> {
        let token = self.current_access_token().ok_or(ProviderError::NoSession)?;
        let body = serde_json::json!({ "password": password });
        let resp = self.request(Method::Put, "/auth/v1/user", Some(&token), Some(&body)).await?;
        if !resp.is_success() {
            return Err(rejected(&resp));
        }
        let mut inner = self.lock();
        let event = AuthEvent { kind: AuthEventKind::UserUpdated, session: inner.session.clone() };
        broadcast(&mut inner, &event);
        Ok(())
    }
}
