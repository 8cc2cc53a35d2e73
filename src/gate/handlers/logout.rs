//! Logout endpoint.

use crate::gate::{session, state::GateState};
use axum::{
    extract::Extension,
    http::{
        HeaderMap, StatusCode,
        header::{COOKIE, SET_COOKIE},
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::warn;

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 204, description = "Session marker cleared")
    ),
    tag = "auth"
)]
pub async fn logout(headers: HeaderMap, state: Extension<Arc<GateState>>) -> impl IntoResponse {
    let cookies = headers.get(COOKIE).and_then(|value| value.to_str().ok());

    // Best-effort: local state is cleared regardless of the backend outcome.
    if let Err(err) = state.exchange().logout(cookies).await {
        warn!("Upstream logout failed: {err}");
    }

    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = session::clear_session_cookie(state.config().session_cookie_secure()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}
