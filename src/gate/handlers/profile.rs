//! Authenticated profile endpoint, forwarded upstream with the one-shot
//! refresh retry.

use crate::gate::state::GateState;
use crate::upstream::{ExchangeError, User};
use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode, header::COOKIE},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Authenticated user profile", body = User),
        (status = 401, description = "Session expired"),
        (status = 502, description = "Authentication backend unreachable")
    ),
    tag = "auth"
)]
pub async fn profile(headers: HeaderMap, state: Extension<Arc<GateState>>) -> impl IntoResponse {
    let cookies = headers.get(COOKIE).and_then(|value| value.to_str().ok());

    match state.exchange().profile(cookies).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        // A 401 that survived the refresh retry: the next navigation will hit
        // the route guard's normal unauthenticated path.
        Err(ExchangeError::SessionExpired) => StatusCode::UNAUTHORIZED.into_response(),
        Err(err) => {
            error!("Profile fetch failed: {err}");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
