//! Cookie consent banner state and category preferences.
//!
//! `localStorage["cookie-consent"]` records whether the banner was answered
//! (`accepted` or `dismissed`); `localStorage["cookie-prefs"]` holds the
//! per-category choices edited on the cookies page.

#[cfg(test)]
#[path = "cookie_consent_test.rs"]
mod cookie_consent_test;

use serde::{Deserialize, Serialize};

use crate::util::storage;

const CONSENT_KEY: &str = "cookie-consent";
const PREFS_KEY: &str = "cookie-prefs";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Consent {
    Accepted,
    Dismissed,
}

impl Consent {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "accepted" => Some(Self::Accepted),
            "dismissed" => Some(Self::Dismissed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Dismissed => "dismissed",
        }
    }
}

/// Optional cookie categories; essential cookies are always on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookiePrefs {
    pub functional: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl Default for CookiePrefs {
    fn default() -> Self {
        Self { functional: true, analytics: true, marketing: false }
    }
}

impl CookiePrefs {
    pub fn all() -> Self {
        Self { functional: true, analytics: true, marketing: true }
    }
}

/// Stored banner answer, if any.
pub fn read_consent() -> Option<Consent> {
    storage::load_raw(CONSENT_KEY).and_then(|raw| Consent::parse(&raw))
}

pub fn record_consent(consent: Consent) {
    storage::save_raw(CONSENT_KEY, consent.as_str());
}

/// Banner shows until the visitor accepted or dismissed it.
pub fn banner_visible(consent: Option<Consent>) -> bool {
    consent.is_none()
}

pub fn read_prefs() -> CookiePrefs {
    storage::load_json(PREFS_KEY).unwrap_or_default()
}

pub fn save_prefs(prefs: &CookiePrefs) {
    storage::save_json(PREFS_KEY, prefs);
}

/// "Accept all" from the banner: every category on, consent recorded.
pub fn accept_all() -> CookiePrefs {
    let prefs = CookiePrefs::all();
    save_prefs(&prefs);
    record_consent(Consent::Accepted);
    prefs
}
