//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing HTTP and WebSocket URLs.

/// Get the base URL for API requests
///
/// The board is served by the backend itself (`dist`), so the API lives on the
/// same origin, whatever port the server was configured with.
/// Returns an empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location.host().unwrap_or_else(|_| "127.0.0.1".to_string());
    origin(&protocol, &host)
}

/// "http:" + "fish.local:8080" -> "http://fish.local:8080"
fn origin(protocol: &str, host: &str) -> String {
    format!("{}//{}", protocol, host)
}

/// Build a full API URL from a path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Build a WebSocket URL for a live query path
pub fn ws_url(path: &str) -> String {
    to_ws_scheme(&api_url(path))
}

/// http -> ws, https -> wss
fn to_ws_scheme(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https:") {
        format!("wss:{}", rest)
    } else if let Some(rest) = url.strip_prefix("http:") {
        format!("ws:{}", rest)
    } else {
        url.to_string()
    }
}

/// Encode an opaque document id for use as a path segment
pub fn path_segment(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}
