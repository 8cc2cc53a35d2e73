use thiserror::Error;

/// Credential exchange failures surfaced to handlers.
///
/// Every variant is caught at the call site that issued the request and
/// converted to user-visible form state; nothing propagates further.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Wrong email/password pair. Surfaced on both fields so the response does
    /// not reveal which one was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Wrong or expired one-time code.
    #[error("invalid or expired code")]
    InvalidOtp,
    /// A 401 that survived the one-shot refresh retry.
    #[error("session expired")]
    SessionExpired,
    /// The backend answered with an unexpected status.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
    /// Transport-level failure.
    #[error("network failure: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
