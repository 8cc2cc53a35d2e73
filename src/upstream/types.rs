//! Wire types for the credential exchange, including the single normalization
//! step for the backend's loosely shaped login response.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authenticated user profile as reported by the backend.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl User {
    /// Fixed profile used by the demo exchange.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            id: "1".to_string(),
            name: "Admin".to_string(),
            email: "test@example.com".to_string(),
            role: "admin".to_string(),
        }
    }
}

/// Normalized result of a login call.
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    /// A second factor is outstanding; the session marker must stay absent.
    OtpRequired,
    /// Login completed; the backend may or may not include the user profile.
    Authenticated(Option<User>),
}

/// Raw login response as the backend actually sends it. Some deployments put
/// the fields at the top level, some wrap them in a `data` envelope; both are
/// normalized here and nowhere else.
#[derive(Debug, Deserialize)]
pub struct RawLoginResponse {
    #[serde(default)]
    requires_otp: Option<bool>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    data: Option<RawLoginData>,
}

#[derive(Debug, Deserialize)]
struct RawLoginData {
    #[serde(default)]
    requires_otp: Option<bool>,
    #[serde(default)]
    user: Option<User>,
}

impl RawLoginResponse {
    /// Collapse both accepted shapes into a tagged outcome.
    #[must_use]
    pub fn normalize(self) -> LoginOutcome {
        let requires_otp = self
            .requires_otp
            .or_else(|| self.data.as_ref().and_then(|data| data.requires_otp))
            .unwrap_or(false);

        if requires_otp {
            return LoginOutcome::OtpRequired;
        }

        let user = self.user.or_else(|| self.data.and_then(|data| data.user));
        LoginOutcome::Authenticated(user)
    }
}
