//! Credential exchange against the authentication backend.
//!
//! Two variants live behind one seam: a real HTTP client and a demo exchange
//! with fixed credentials. Handlers only see [`Exchange`].

mod client;
mod error;
mod mock;
pub mod types;

pub use client::HttpExchange;
pub use error::ExchangeError;
pub use mock::{DEMO_EMAIL, DEMO_PASSWORD, DemoExchange};
pub use types::{LoginOutcome, User};

use secrecy::SecretString;

pub enum Exchange {
    Demo(DemoExchange),
    Http(HttpExchange),
}

impl Exchange {
    /// # Errors
    /// `InvalidCredentials` when the backend rejects the pair.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome, ExchangeError> {
        match self {
            Self::Demo(demo) => demo.login(email, password),
            Self::Http(http) => http.login(email, password).await,
        }
    }

    /// # Errors
    /// `InvalidOtp` when the backend rejects the code.
    pub async fn confirm_otp(
        &self,
        email: &str,
        code: &str,
        remember_device: bool,
    ) -> Result<(), ExchangeError> {
        match self {
            Self::Demo(demo) => demo.confirm_otp(email, code),
            Self::Http(http) => http.confirm_otp(email, code, remember_device).await,
        }
    }

    /// # Errors
    /// Returns an error if the backend call fails; logout callers ignore it.
    pub async fn logout(&self, cookies: Option<&str>) -> Result<(), ExchangeError> {
        match self {
            Self::Demo(_) => Ok(()),
            Self::Http(http) => http.logout(cookies).await,
        }
    }

    /// # Errors
    /// `SessionExpired` when a 401 survives the one-shot refresh retry.
    pub async fn profile(&self, cookies: Option<&str>) -> Result<User, ExchangeError> {
        match self {
            Self::Demo(demo) => demo.profile(cookies),
            Self::Http(http) => http.profile(cookies).await,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Demo(_) => "demo",
            Self::Http(_) => "http",
        }
    }
}
