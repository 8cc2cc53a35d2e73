//! OTP confirmation endpoint: the `AwaitingOtp` state of the flow.

use crate::gate::{
    flow::{self, FlowState},
    handlers::{
        login::authenticated_response,
        types::{FormError, NextQuery, OtpConfirmRequest},
        utils::{normalize_email, valid_email, valid_otp_code},
    },
    state::GateState,
};
use crate::upstream::ExchangeError;
use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    post,
    path = "/api/login/otp/confirm",
    request_body = OtpConfirmRequest,
    params(
        ("next" = Option<String>, Query, description = "Percent-encoded path to return to after authentication")
    ),
    responses(
        (status = 200, description = "Code accepted, session established", body = crate::gate::handlers::types::LoginResponse),
        (status = 401, description = "Invalid or expired code", body = FormError),
        (status = 422, description = "Validation error", body = FormError),
        (status = 502, description = "Authentication backend unreachable", body = FormError)
    ),
    tag = "auth"
)]
pub async fn confirm(
    state: Extension<Arc<GateState>>,
    Query(query): Query<NextQuery>,
    payload: Option<Json<OtpConfirmRequest>>,
) -> impl IntoResponse {
    let request: OtpConfirmRequest = match payload {
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
            Json(FormError::new("Missing email, please login again", &["email"])),
        )
            .into_response();
    }
    // Rejected before any network call is made.
    if !valid_otp_code(&request.code) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FormError::new("Enter the 6-digit code", &["code"])),
        )
            .into_response();
    }

    match state
        .exchange()
        .confirm_otp(&email, &request.code, request.remember_device)
        .await
    {
        Ok(()) => match flow::after_otp(query.next.as_deref()) {
            FlowState::Authenticated { redirect_to } => authenticated_response(&state, redirect_to),
            other => {
                error!("OTP transition returned {other:?}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Err(ExchangeError::InvalidOtp) => (
            StatusCode::UNAUTHORIZED,
            Json(FormError::new("Invalid or expired code", &["code"])),
        )
            .into_response(),
        Err(err) => {
            error!("OTP confirmation failed: {err}");
            (
                StatusCode::BAD_GATEWAY,
                Json(FormError::new(
                    "Unable to reach the authentication service",
                    &[],
                )),
            )
                .into_response()
        }
    }
}
