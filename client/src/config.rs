//! Build-time client configuration.
//!
//! Values are baked into the WASM bundle from environment variables present
//! when the crate is compiled; the browser has no process environment.
//!
//! - `OPTY_API_URL`: profile backend base URL (default `http://localhost:8000`)
//! - `OPTY_SUPABASE_URL`: identity provider project URL
//! - `OPTY_SUPABASE_ANON_KEY`: identity provider public key

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl AppConfig {
    /// Configuration captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "OPTY_API_URL" => option_env!("OPTY_API_URL"),
            "OPTY_SUPABASE_URL" => option_env!("OPTY_SUPABASE_URL"),
            "OPTY_SUPABASE_ANON_KEY" => option_env!("OPTY_SUPABASE_ANON_KEY"),
            _ => None,
        })
    }

    /// Build from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .trim_end_matches('/')
                .to_owned()
        };
        let supabase_anon_key = read("OPTY_SUPABASE_ANON_KEY", "");
        if supabase_anon_key.is_empty() {
            log::warn!("OPTY_SUPABASE_ANON_KEY not set at build time; identity calls will be rejected");
        }
        Self {
            api_url: read("OPTY_API_URL", DEFAULT_API_URL),
            supabase_url: read("OPTY_SUPABASE_URL", DEFAULT_SUPABASE_URL),
            supabase_anon_key,
        }
    }
}
