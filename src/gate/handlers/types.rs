//! Request/response types for the auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginResponse {
    /// A second factor is outstanding; the session marker has been cleared.
    OtpRequired { email: String },
    /// The session marker is set; the client should navigate to `redirect_to`.
    Authenticated { redirect_to: String },
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct OtpConfirmRequest {
    pub email: String,
    pub code: String,
    #[serde(default)]
    pub remember_device: bool,
}

/// Validation or rejection payload attached to form fields.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct FormError {
    pub message: String,
    pub fields: Vec<String>,
}

impl FormError {
    #[must_use]
    pub fn new(message: &str, fields: &[&str]) -> Self {
        Self {
            message: message.to_string(),
            fields: fields.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Optional `next` parameter carried through the login/OTP calls.
#[derive(Deserialize, Debug, Default)]
pub struct NextQuery {
    pub next: Option<String>,
}
