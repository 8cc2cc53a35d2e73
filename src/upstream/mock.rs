//! Demo credential exchange used when no upstream backend is configured.

use crate::upstream::{
    error::ExchangeError,
    types::{LoginOutcome, User},
};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password123";

pub struct DemoExchange {
    require_otp: bool,
    otp_code: String,
}

impl DemoExchange {
    /// Build the demo exchange, generating a fresh OTP code when the demo flow
    /// includes the second factor. The code is logged so operators can walk
    /// through the flow.
    #[must_use]
    pub fn new(require_otp: bool) -> Self {
        let otp_code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32));
        if require_otp {
            info!("Demo OTP code: {otp_code}");
        }
        Self {
            require_otp,
            otp_code,
        }
    }

    /// Build a demo exchange with a fixed OTP code. Used by tests.
    #[must_use]
    pub fn with_code(otp_code: impl Into<String>, require_otp: bool) -> Self {
        Self {
            require_otp,
            otp_code: otp_code.into(),
        }
    }

    /// Accept exactly the demo credential pair.
    ///
    /// # Errors
    /// `InvalidCredentials` for any other pair.
    pub fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome, ExchangeError> {
        if email == DEMO_EMAIL && password.expose_secret() == DEMO_PASSWORD {
            if self.require_otp {
                Ok(LoginOutcome::OtpRequired)
            } else {
                Ok(LoginOutcome::Authenticated(Some(User::demo())))
            }
        } else {
            Err(ExchangeError::InvalidCredentials)
        }
    }

    /// Accept the generated demo code for the demo account.
    ///
    /// # Errors
    /// `InvalidOtp` for any other code or account.
    pub fn confirm_otp(&self, email: &str, code: &str) -> Result<(), ExchangeError> {
        if email == DEMO_EMAIL && code == self.otp_code {
            Ok(())
        } else {
            Err(ExchangeError::InvalidOtp)
        }
    }

    /// Demo profile, gated on the session marker the edge itself sets.
    ///
    /// # Errors
    /// `SessionExpired` when the marker is absent.
    pub fn profile(&self, cookies: Option<&str>) -> Result<User, ExchangeError> {
        if cookies.is_some_and(has_marker) {
            Ok(User::demo())
        } else {
            Err(ExchangeError::SessionExpired)
        }
    }
}

fn has_marker(cookies: &str) -> bool {
    cookies.split(';').any(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        parts.next().map(str::trim) == Some(crate::gate::session::SESSION_COOKIE_NAME)
            && parts.next().is_some_and(|value| !value.trim().is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_credentials_accepted() {
        let exchange = DemoExchange::with_code("123456", false);
        let outcome = exchange
            .login(DEMO_EMAIL, &SecretString::from(DEMO_PASSWORD.to_string()))
            .unwrap();
        assert!(matches!(outcome, LoginOutcome::Authenticated(Some(_))));
    }

    #[test]
    fn other_credentials_rejected() {
        let exchange = DemoExchange::with_code("123456", false);
        let result = exchange.login(DEMO_EMAIL, &SecretString::from("password124".to_string()));
        assert!(matches!(result, Err(ExchangeError::InvalidCredentials)));

        let result = exchange.login("other@example.com", &SecretString::from(DEMO_PASSWORD.to_string()));
        assert!(matches!(result, Err(ExchangeError::InvalidCredentials)));
    }

    #[test]
    fn otp_step_inserted_when_enabled() {
        let exchange = DemoExchange::with_code("123456", true);
        let outcome = exchange
            .login(DEMO_EMAIL, &SecretString::from(DEMO_PASSWORD.to_string()))
            .unwrap();
        assert_eq!(outcome, LoginOutcome::OtpRequired);
    }

    #[test]
    fn otp_code_must_match() {
        let exchange = DemoExchange::with_code("123456", true);
        assert!(exchange.confirm_otp(DEMO_EMAIL, "123456").is_ok());
        assert!(matches!(
            exchange.confirm_otp(DEMO_EMAIL, "654321"),
            Err(ExchangeError::InvalidOtp)
        ));
    }

    #[test]
    fn profile_requires_the_marker() {
        let exchange = DemoExchange::with_code("123456", false);
        assert!(exchange.profile(Some("fe_session=1")).is_ok());
        assert!(matches!(
            exchange.profile(Some("theme=dark")),
            Err(ExchangeError::SessionExpired)
        ));
        assert!(matches!(
            exchange.profile(None),
            Err(ExchangeError::SessionExpired)
        ));
    }
}
