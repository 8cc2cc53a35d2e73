//! HTTP credential exchange against the authentication backend.

use crate::upstream::{
    error::ExchangeError,
    types::{LoginOutcome, RawLoginResponse, User},
};
use anyhow::Result;
use reqwest::{Client, StatusCode, header::COOKIE};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{Instrument, debug, info_span};
use url::Url;

pub struct HttpExchange {
    http: Client,
    base: String,
}

impl HttpExchange {
    /// Build the exchange client for the given backend base URL.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base: Url, timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Exchange credentials for either a session or an OTP challenge.
    ///
    /// # Errors
    /// `InvalidCredentials` when the backend rejects the pair; the caller maps
    /// this to a form error on both fields.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome, ExchangeError> {
        let url = self.endpoint("/login");
        let span = info_span!("upstream.login", http.method = "POST", url = %url);
        let response = self
            .http
            .post(&url)
            .json(&json!({
                "email": email,
                "password": password.expose_secret(),
            }))
            .send()
            .instrument(span)
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ExchangeError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(upstream_error(status, response).await);
        }

        let raw: RawLoginResponse = response.json().await?;
        Ok(raw.normalize())
    }

    /// Confirm the second factor for `email`.
    ///
    /// # Errors
    /// `InvalidOtp` when the backend rejects the code.
    pub async fn confirm_otp(
        &self,
        email: &str,
        code: &str,
        remember_device: bool,
    ) -> Result<(), ExchangeError> {
        let url = self.endpoint("/login/otp/confirm");
        let span = info_span!("upstream.otp_confirm", http.method = "POST", url = %url);
        let response = self
            .http
            .post(&url)
            .json(&json!({
                "email": email,
                "code": code,
                "remember_device": remember_device,
            }))
            .send()
            .instrument(span)
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::BAD_REQUEST
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
            || status == StatusCode::UNPROCESSABLE_ENTITY
        {
            return Err(ExchangeError::InvalidOtp);
        }
        Err(upstream_error(status, response).await)
    }

    /// One silent token refresh. `Ok(false)` means the backend declined.
    ///
    /// # Errors
    /// Returns an error only on transport failure.
    pub async fn refresh(&self, cookies: Option<&str>) -> Result<bool, ExchangeError> {
        let url = self.endpoint("/refresh");
        let span = info_span!("upstream.refresh", http.method = "POST", url = %url);
        let mut request = self.http.post(&url);
        if let Some(cookies) = cookies {
            request = request.header(COOKIE, cookies);
        }
        let response = request.send().instrument(span).await?;
        Ok(response.status().is_success())
    }

    /// Best-effort logout; callers clear local state regardless.
    ///
    /// # Errors
    /// Returns an error if the backend call fails; callers may ignore it.
    pub async fn logout(&self, cookies: Option<&str>) -> Result<(), ExchangeError> {
        let url = self.endpoint("/logout");
        let span = info_span!("upstream.logout", http.method = "POST", url = %url);
        let mut request = self.http.post(&url);
        if let Some(cookies) = cookies {
            request = request.header(COOKIE, cookies);
        }
        let response = request.send().instrument(span).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(upstream_error(status, response).await)
        }
    }

    /// Fetch the authenticated profile, applying the one-shot refresh retry.
    ///
    /// # Errors
    /// `SessionExpired` when a 401 survives the refresh retry.
    pub async fn profile(&self, cookies: Option<&str>) -> Result<User, ExchangeError> {
        let response = self.send_authenticated("/profile", cookies).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(status, response).await);
        }

        let raw: RawProfileResponse = response.json().await?;
        Ok(raw.into_user())
    }

    /// Issue an authenticated GET; on a 401, refresh once and retry once.
    /// A second 401, or a failed refresh, is terminal.
    async fn send_authenticated(
        &self,
        path: &str,
        cookies: Option<&str>,
    ) -> Result<reqwest::Response, ExchangeError> {
        let response = self.get(path, cookies).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("401 on {path}, attempting refresh");
        if !matches!(self.refresh(cookies).await, Ok(true)) {
            // Refresh failed: surface the original authorization failure.
            return Err(ExchangeError::SessionExpired);
        }

        let retry = self.get(path, cookies).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            return Err(ExchangeError::SessionExpired);
        }
        Ok(retry)
    }

    async fn get(
        &self,
        path: &str,
        cookies: Option<&str>,
    ) -> Result<reqwest::Response, ExchangeError> {
        let url = self.endpoint(path);
        let span = info_span!("upstream.get", http.method = "GET", url = %url);
        let mut request = self.http.get(&url);
        if let Some(cookies) = cookies {
            request = request.header(COOKIE, cookies);
        }
        Ok(request.send().instrument(span).await?)
    }
}

/// Profile responses arrive either as the bare user object or wrapped in
/// `{user: ...}`; both collapse here.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawProfileResponse {
    Enveloped { user: User },
    Bare(User),
}

impl RawProfileResponse {
    fn into_user(self) -> User {
        match self {
            Self::Enveloped { user } | Self::Bare(user) => user,
        }
    }
}

async fn upstream_error(status: StatusCode, response: reqwest::Response) -> ExchangeError {
    let message = response.text().await.unwrap_or_default();
    ExchangeError::Upstream {
        status: status.as_u16(),
        message: message.trim().chars().take(200).collect(),
    }
}
