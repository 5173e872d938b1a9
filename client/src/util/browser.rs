//! Thin wrappers over `window.location`, `history` and the clock.
//!
//! Outside the browser each helper degrades to a neutral value so SSR and
//! native tests can call through without cfg noise at the call site.

/// Current Unix time in whole seconds.
#[allow(clippy::cast_possible_truncation)]
pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64)
    }
}

/// Local wall-clock time as `HH:MM` (UTC outside the browser).
pub fn clock_label() -> String {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        format!("{:02}:{:02}", now.get_hours(), now.get_minutes())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let secs = now_secs().rem_euclid(86_400);
        format!("{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
    }
}

/// `window.location.origin`, or an empty string outside the browser.
pub fn origin() -> String {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// The current URL fragment including the leading `#`, if non-empty.
pub fn location_fragment() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let hash = web_sys::window()?.location().hash().ok()?;
        if hash.is_empty() { None } else { Some(hash) }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Drop the URL fragment without adding a history entry.
pub fn clear_location_fragment() {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let path = format!(
            "{}{}",
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default()
        );
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
        }
    }
}

/// Full-page navigation to `url` (used for hosted OAuth flows).
///
/// # Errors
///
/// Returns an error string if the browser refuses the navigation or no
/// window is available.
pub fn assign_location(url: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        window
            .location()
            .set_href(url)
            .map_err(|e| format!("{e:?}"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err("not available on server".to_owned())
    }
}

/// Percent-encode a value for use inside a query string.
pub fn encode_uri_component(value: &str) -> String {
    #[cfg(feature = "hydrate")]
    {
        String::from(js_sys::encode_uri_component(value))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        value.to_owned()
    }
}
