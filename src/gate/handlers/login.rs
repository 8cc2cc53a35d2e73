//! Login endpoint: the `Idle` state of the flow.

use crate::gate::{
    flow::{self, FlowState},
    handlers::{
        types::{FormError, LoginRequest, LoginResponse, NextQuery},
        utils::{normalize_email, valid_email, valid_password},
    },
    session,
    state::GateState,
};
use crate::upstream::ExchangeError;
use axum::{
    Json,
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    params(
        ("next" = Option<String>, Query, description = "Percent-encoded path to return to after authentication")
    ),
    responses(
        (status = 200, description = "Login accepted or OTP challenge issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = FormError),
        (status = 422, description = "Validation error", body = FormError),
        (status = 502, description = "Authentication backend unreachable", body = FormError)
    ),
    tag = "auth"
)]
pub async fn login(
    state: Extension<Arc<GateState>>,
    Query(query): Query<NextQuery>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(FormError::new("Missing payload", &[])),
            )
                .into_response();
        }
    };

    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FormError::new("Invalid email", &["email"])),
        )
            .into_response();
    }
    if !valid_password(&request.password) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FormError::new("Min 6 characters", &["password"])),
        )
            .into_response();
    }

    let password = SecretString::from(request.password);
    let outcome = match state.exchange().login(&email, &password).await {
        Ok(outcome) => outcome,
        Err(ExchangeError::InvalidCredentials) => {
            // Attached to both fields so the response does not reveal which was wrong.
            return (
                StatusCode::UNAUTHORIZED,
                Json(FormError::new("Invalid credentials", &["email", "password"])),
            )
                .into_response();
        }
        Err(err) => {
            error!("Login failed: {err}");
            return (
                StatusCode::BAD_GATEWAY,
                Json(FormError::new(
                    "Unable to reach the authentication service",
                    &[],
                )),
            )
                .into_response();
        }
    };

    match flow::after_login(&outcome, &email, query.next.as_deref()) {
        FlowState::AwaitingOtp { email } => {
            // The marker must be absent while the second factor is outstanding,
            // even if a stale marker existed before this attempt.
            let mut headers = HeaderMap::new();
            if let Ok(cookie) = session::clear_session_cookie(state.config().session_cookie_secure())
            {
                headers.insert(SET_COOKIE, cookie);
            }
            (
                StatusCode::OK,
                headers,
                Json(LoginResponse::OtpRequired { email }),
            )
                .into_response()
        }
        FlowState::Authenticated { redirect_to } => {
            authenticated_response(&state, redirect_to)
        }
        FlowState::Idle => {
            error!("Login transition returned Idle");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Set the session marker and report the destination.
pub(super) fn authenticated_response(
    state: &GateState,
    redirect_to: String,
) -> axum::response::Response {
    let cookie = session::session_cookie(
        state.config().session_ttl_seconds(),
        state.config().session_cookie_secure(),
    );
    match cookie {
        Ok(cookie) => {
            let mut headers = HeaderMap::new();
            headers.insert(SET_COOKIE, cookie);
            (
                StatusCode::OK,
                headers,
                Json(LoginResponse::Authenticated { redirect_to }),
            )
                .into_response()
        }
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
