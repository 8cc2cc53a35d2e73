//! Route guard policy: a pure function of (path, query, cookie presence).
//!
//! The policy runs before any handler and never fails. A forged or stale
//! session marker is indistinguishable from a valid one at this layer; the
//! backend re-validates authorization on every API call.

/// Default landing page after authentication.
pub const DASHBOARD_PATH: &str = "/admin/dashboard";
/// Login page path, the only path authenticated visitors are bounced from.
pub const LOGIN_PATH: &str = "/login";
/// Query parameter carrying the originally requested protected path.
pub const NEXT_PARAM: &str = "next";

const PROTECTED_PREFIX: &str = "/admin";

// Paths that bypass the policy entirely: static assets and well-known files.
const EXCLUDED_PREFIXES: &[&str] = &["/static/", "/images/", "/assets/", "/public/"];
const EXCLUDED_PATHS: &[&str] = &["/favicon.ico", "/sitemap.xml", "/robots.txt"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
}

/// Evaluate the guard for one navigation.
///
/// Authenticated visitors are redirected away from `/login` (query dropped);
/// unauthenticated visitors are redirected away from `/admin*` with a `next`
/// parameter; everything else passes through unmodified.
#[must_use]
pub fn evaluate(path: &str, query: Option<&str>, has_session: bool) -> Decision {
    if is_excluded(path) {
        return Decision::Allow;
    }

    // If already authenticated, prevent accessing /login
    if path == LOGIN_PATH && has_session {
        return Decision::Redirect(DASHBOARD_PATH.to_string());
    }

    // Protect /admin routes
    if path.starts_with(PROTECTED_PREFIX) && !has_session {
        let target = match query {
            Some(query) if !query.is_empty() => format!("{path}?{query}"),
            _ => path.to_string(),
        };
        return Decision::Redirect(format!(
            "{LOGIN_PATH}?{NEXT_PARAM}={}",
            encode_next(&target)
        ));
    }

    Decision::Allow
}

fn is_excluded(path: &str) -> bool {
    EXCLUDED_PATHS.contains(&path)
        || EXCLUDED_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

/// Percent-encode a path-plus-query for embedding as the `next` value.
#[must_use]
pub fn encode_next(target: &str) -> String {
    url::form_urlencoded::byte_serialize(target.as_bytes()).collect()
}

/// Decode a `next` value. Values arriving through an extractor are already
/// decoded once; this is for call sites holding the raw encoded form.
#[must_use]
pub fn decode_next(value: &str) -> String {
    url::form_urlencoded::parse(format!("{NEXT_PARAM}={value}").as_bytes())
        .next()
        .map_or_else(|| value.to_string(), |(_, decoded)| decoded.into_owned())
}
