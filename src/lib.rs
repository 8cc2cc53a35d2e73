//! # Pordego (Session-Gated Admin Edge)
//!
//! `pordego` is a small HTTP edge that sits in front of an admin dashboard.
//! It evaluates a session-cookie route policy on every navigation and brokers
//! the login/OTP handshake against a remote authentication backend.
//!
//! ## Route Guard
//!
//! Every request is checked against a pure policy before any handler runs:
//! authenticated visitors are bounced away from `/login`, unauthenticated
//! visitors are bounced away from `/admin/*` with a `next` parameter carrying
//! the originally requested path. Static assets bypass the policy entirely.
//!
//! ## Session Marker
//!
//! The `fe_session` cookie is a client-visible UX marker, not a security
//! boundary. Its presence only records that a login or OTP step completed;
//! the backend re-validates authorization on every API call with its own
//! `HttpOnly` session cookie.
//!
//! ## Credential Exchange
//!
//! Login, OTP confirmation, refresh, and logout calls go to a configured
//! upstream base URL. When no upstream is configured the edge runs in demo
//! mode with fixed credentials. Authenticated upstream calls that hit a 401
//! get exactly one silent refresh followed by exactly one retry.

pub mod cli;
pub mod gate;
pub mod upstream;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
