//! Session marker cookie helpers.
//!
//! The marker mirrors "a login or OTP step completed" on the client side. It is
//! deliberately not `HttpOnly`: the dashboard reads it for UX decisions, and the
//! backend enforces real authorization with its own cookie. Only presence is
//! inspected, never the value.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, InvalidHeaderValue},
};

pub const SESSION_COOKIE_NAME: &str = "fe_session";

const SESSION_COOKIE_VALUE: &str = "1";

/// True when the request carries the session marker cookie.
#[must_use]
pub fn has_session(headers: &HeaderMap) -> bool {
    let Some(header) = headers.get(COOKIE) else {
        return false;
    };
    let Ok(value) = header.to_str() else {
        return false;
    };
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next().map(str::trim);
        let val = parts.next().map(str::trim);
        if key == Some(SESSION_COOKIE_NAME) {
            // Presence with a non-empty value is the only signal consulted.
            return val.is_some_and(|v| !v.is_empty());
        }
    }
    false
}

/// Build the `Set-Cookie` value establishing the session marker.
///
/// # Errors
/// Returns an error if the formatted cookie is not a valid header value.
pub fn session_cookie(ttl_seconds: i64, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={SESSION_COOKIE_VALUE}; Path=/; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build the `Set-Cookie` value clearing the session marker.
///
/// # Errors
/// Returns an error if the formatted cookie is not a valid header value.
pub fn clear_session_cookie(secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_cookie_header_means_no_session() {
        assert!(!has_session(&HeaderMap::new()));
    }

    #[test]
    fn marker_detected_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; fe_session=1; lang=en");
        assert!(has_session(&headers));
    }

    #[test]
    fn empty_marker_value_means_no_session() {
        let headers = headers_with_cookie("fe_session=");
        assert!(!has_session(&headers));
    }

    #[test]
    fn unrelated_cookies_mean_no_session() {
        let headers = headers_with_cookie("theme=dark; sidebar=collapsed");
        assert!(!has_session(&headers));
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie(2_592_000, false).unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("fe_session=1;"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Max-Age=2592000"));
        assert!(!value.contains("Secure"));
        assert!(!value.contains("HttpOnly"));
    }

    #[test]
    fn secure_flag_appended_when_requested() {
        let cookie = session_cookie(60, true).unwrap();
        assert!(cookie.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false).unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("fe_session=;"));
        assert!(value.contains("Max-Age=0"));
    }
}
