//! API URL helpers.
//!
//! The app is served by the same host that exposes the scheduling API, so
//! requests stay same-origin.

/// Origin for API requests ("https://example.com"), or an empty string
/// outside a browser context.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Full API URL for a path starting with "/api/".
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
