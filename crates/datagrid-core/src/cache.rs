//! Response headers that keep grid pages out of every cache.

use axum::http::header::{CACHE_CONTROL, EXPIRES};
use axum::http::{HeaderMap, HeaderValue};
use chrono::Utc;

pub const NEVER_CACHE_CONTROL: &str = "max-age=0, no-cache, no-store, must-revalidate, private";

/// Mark a response as already expired and never storable.
pub fn add_never_cache_headers(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NEVER_CACHE_CONTROL));

    let now = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
    if let Ok(value) = HeaderValue::from_str(&now) {
        headers.insert(EXPIRES, value);
    }
}
