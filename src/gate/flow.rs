//! Login/OTP flow transitions.
//!
//! The flow has three states. `AwaitingOtp` is the one with a subtle
//! invariant: the session marker must be cleared at the transition, even if a
//! stale marker existed from an earlier session, so the route guard never
//! treats a half-authenticated visitor as logged in.

use crate::gate::policy::DASHBOARD_PATH;
use crate::upstream::LoginOutcome;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowState {
    /// Credential form displayed.
    Idle,
    /// Login reported `requires_otp`; the session marker must be absent here.
    AwaitingOtp { email: String },
    /// Terminal for this flow; the session marker is set and the visitor is
    /// sent to `redirect_to`.
    Authenticated { redirect_to: String },
}

/// Compute the post-login destination from an optional `next` value.
///
/// The value is consumed already-decoded (extractors decode exactly once).
/// Only in-app absolute paths are honoured so `next` cannot leave the app.
#[must_use]
pub fn destination(next: Option<&str>) -> String {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") => next.to_string(),
        _ => DASHBOARD_PATH.to_string(),
    }
}

/// Transition out of `Idle` after a login call succeeded.
#[must_use]
pub fn after_login(outcome: &LoginOutcome, email: &str, next: Option<&str>) -> FlowState {
    match outcome {
        LoginOutcome::OtpRequired => FlowState::AwaitingOtp {
            email: email.to_string(),
        },
        LoginOutcome::Authenticated(_) => FlowState::Authenticated {
            redirect_to: destination(next),
        },
    }
}

/// Transition out of `AwaitingOtp` after the code was accepted.
#[must_use]
pub fn after_otp(next: Option<&str>) -> FlowState {
    FlowState::Authenticated {
        redirect_to: destination(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::types::User;

    #[test]
    fn destination_defaults_to_dashboard() {
        assert_eq!(destination(None), DASHBOARD_PATH);
        assert_eq!(destination(Some("")), DASHBOARD_PATH);
    }

    #[test]
    fn destination_honours_internal_paths() {
        assert_eq!(
            destination(Some("/admin/reports?from=1&to=2")),
            "/admin/reports?from=1&to=2"
        );
    }

    #[test]
    fn destination_rejects_external_targets() {
        assert_eq!(destination(Some("https://evil.example")), DASHBOARD_PATH);
        assert_eq!(destination(Some("//evil.example")), DASHBOARD_PATH);
    }

    #[test]
    fn otp_requirement_enters_awaiting_state() {
        let state = after_login(&LoginOutcome::OtpRequired, "a@example.com", Some("/admin"));
        assert_eq!(
            state,
            FlowState::AwaitingOtp {
                email: "a@example.com".to_string()
            }
        );
    }

    #[test]
    fn direct_login_enters_authenticated_state() {
        let outcome = LoginOutcome::Authenticated(Some(User::demo()));
        let state = after_login(&outcome, "a@example.com", None);
        assert_eq!(
            state,
            FlowState::Authenticated {
                redirect_to: DASHBOARD_PATH.to_string()
            }
        );
    }

    #[test]
    fn otp_confirmation_restores_next_target() {
        let state = after_otp(Some("/admin/users?page=2"));
        assert_eq!(
            state,
            FlowState::Authenticated {
                redirect_to: "/admin/users?page=2".to_string()
            }
        );
    }
}
