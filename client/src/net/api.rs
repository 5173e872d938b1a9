//! REST client for the profile backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with [`ApiError::Network`] since the
//! backend is only called from the browser.
//!
//! AUTHORIZATION
//! =============
//! Requests carry the identity provider's current access token. A 401 on a
//! request that carried a token triggers one silent refresh and one retry;
//! if the refresh itself fails the provider is signed out, which clears the
//! auth store and sends guarded pages back to `/login`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::http::{self, Method, RawResponse, TransportError};
use super::identity::IdentityProvider;
use super::types::{
    Acknowledgement, CreateProfileRequest, LoginRequest, LoginResponse, ProfileUpdate, RegisterRequest, UserProfile,
};

/// CRUD on the current user's backend profile.
#[async_trait::async_trait(?Send)]
pub trait ProfileBackend: Send + Sync {
    /// Create an account; returns the backend's confirmation message.
    async fn register(&self, req: &RegisterRequest) -> Result<String, ApiError>;

    /// Create a profile for an identity that already exists (OAuth first login).
    async fn create_profile(&self, req: &CreateProfileRequest) -> Result<UserProfile, ApiError>;

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn current_profile(&self) -> Result<UserProfile, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError>;

    async fn delete_account(&self) -> Result<(), ApiError>;

    /// Request a reset e-mail; the backend answers the same way for unknown addresses.
    async fn forgot_password(&self, email: &str) -> Result<String, ApiError>;
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unavailable => Self::Network("not available on server".to_owned()),
            TransportError::Failed(msg) => Self::Network(msg),
        }
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn bearer_headers(token: Option<&str>) -> Vec<(&'static str, String)> {
    token.map(|t| ("Authorization", format!("Bearer {t}"))).into_iter().collect()
}

/// Extract FastAPI's `{"detail": "..."}` text; validation lists yield `None`.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_owned)
}

fn check_status(resp: &RawResponse) -> Result<(), ApiError> {
    if resp.is_success() {
        return Ok(());
    }
    Err(match resp.status {
        401 => ApiError::Unauthorized,
        404 => ApiError::NotFound,
        status => ApiError::Status { status, detail: error_detail(&resp.body) },
    })
}

fn decode<T: DeserializeOwned>(resp: &RawResponse) -> Result<T, ApiError> {
    check_status(resp)?;
    serde_json::from_str(&resp.body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Run `send` with the provider's access token, refreshing once on 401.
pub(crate) async fn send_with_refresh<F, Fut>(provider: &dyn IdentityProvider, send: F) -> Result<RawResponse, ApiError>
where
    F: Fn(Option<String>) -> Fut,
    Fut: Future<Output = Result<RawResponse, ApiError>>,
{
    let token = match provider.get_session().await {
        Ok(session) => session.map(|s| s.access_token),
        Err(e) => {
            log::warn!("sending request without a session: {e}");
            None
        }
    };
    let carried_token = token.is_some();

    let resp = send(token).await?;
    if resp.status != 401 || !carried_token {
        return Ok(resp);
    }

    match provider.refresh_session().await {
        Ok(session) => send(Some(session.access_token)).await,
        Err(e) => {
            log::warn!("session refresh after 401 failed: {e}");
            if let Err(e) = provider.sign_out().await {
                log::warn!("sign-out after failed refresh failed: {e}");
            }
            Err(ApiError::Unauthorized)
        }
    }
}

/// [`ProfileBackend`] over HTTP/JSON.
pub struct HttpProfileClient {
    base_url: String,
    provider: Arc<dyn IdentityProvider>,
}

impl HttpProfileClient {
    #[must_use]
    pub fn new(base_url: &str, provider: Arc<dyn IdentityProvider>) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), provider }
    }

    async fn call(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> Result<RawResponse, ApiError> {
        let url = endpoint(&self.base_url, path);
        let url = url.as_str();
        let body = body.as_ref();
        send_with_refresh(self.provider.as_ref(), |token| async move {
            let headers = bearer_headers(token.as_deref());
            Ok(http::send(method, url, &headers, body).await?)
        })
        .await
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait::async_trait(?Send)]
impl ProfileBackend for HttpProfileClient {
    async fn register(&self, req: &RegisterRequest) -> Result<String, ApiError> {
        let resp = self.call(Method::Post, "/api/auth/register", Some(to_json(req)?)).await?;
        decode::<Acknowledgement>(&resp).map(|ack| ack.message)
    }

    async fn create_profile(&self, req: &CreateProfileRequest) -> Result<UserProfile, ApiError> {
        let resp = self.call(Method::Post, "/api/auth/profile", Some(to_json(req)?)).await?;
        decode(&resp)
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let resp = self.call(Method::Post, "/api/auth/login", Some(to_json(req)?)).await?;
        decode(&resp)
    }

    async fn current_profile(&self) -> Result<UserProfile, ApiError> {
        let resp = self.call(Method::Get, "/api/auth/me", None).await?;
        decode(&resp)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let resp = self.call(Method::Put, "/api/auth/me", Some(to_json(update)?)).await?;
        decode(&resp)
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        let resp = self.call(Method::Delete, "/api/auth/me", None).await?;
        check_status(&resp)
    }

    async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "email": email });
        let resp = self.call(Method::Post, "/api/auth/forgot-password", Some(body)).await?;
        decode::<Acknowledgement>(&resp).map(|ack| ack.message)
    }
}
