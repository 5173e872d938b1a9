//! Wire DTOs for the profile backend and the identity provider.
//!
//! DESIGN
//! ======
//! Backend types mirror the FastAPI JSON schema (`supabase_id`, `token`,
//! `user`) so serde round-trips stay lossless. Provider types carry only the
//! fields the auth store actually reads.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Path landing supervisors after sign-in or when leaving guest pages.
pub const SUPERVISOR_LANDING: &str = "/chat/supervisor";
/// Path landing every other role.
pub const USER_LANDING: &str = "/dashboard";

/// Server-assigned access level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Supervisor,
}

impl Role {
    /// Where a signed-in user with this role lands when bounced off a guest page.
    #[must_use]
    pub fn landing_path(self) -> &'static str {
        match self {
            Self::Supervisor => SUPERVISOR_LANDING,
            Self::User => USER_LANDING,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Supervisor => "supervisor",
        }
    }
}

/// Application-level user record owned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-provider user id.
    #[serde(rename = "supabase_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// ISO-8601 creation timestamp as sent by the backend.
    pub created_at: String,
    pub is_active: bool,
    #[serde(default)]
    pub role: Role,
}

/// Access/refresh token pair issued by the backend login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// `POST /api/auth/login` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: TokenPair,
    pub user: UserProfile,
}

/// `POST /api/auth/login` body.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/register` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// `POST /api/auth/profile` body, used to provision first-time OAuth users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateProfileRequest {
    pub supabase_id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// `PUT /api/auth/me` body; absent fields are left unchanged server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.birthday.is_none() && self.avatar_url.is_none()
    }
}

/// Generic `{"message": ...}` / `{"response": ...}` acknowledgement body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, alias = "response")]
    pub message: String,
}

/// Minimal identity record derived from a provider session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Free-form metadata attached to a provider user (OAuth claims, signup data).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Full user record as returned by `GET /auth/v1/user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl ProviderUser {
    #[must_use]
    pub fn auth_user(&self) -> AuthUser {
        AuthUser { id: self.id.clone(), email: self.email.clone() }
    }
}

/// Session held by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as Unix seconds, if the provider reported one.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl ProviderSession {
    /// Whether the access token expires within `margin_secs` of `now_secs`.
    #[must_use]
    pub fn expires_within(&self, now_secs: i64, margin_secs: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now_secs + margin_secs)
    }
}

/// OAuth providers offered on the login page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

/// Kind of session change reported by the identity provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEventKind {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

/// One session change notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<ProviderSession>,
}
