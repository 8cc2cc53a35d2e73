//! Sidebar menu endpoint.

use crate::gate::{menu::AdminMenuItem, state::GateState};
use axum::{Json, extract::Extension, response::IntoResponse};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/admin/menu",
    responses(
        (status = 200, description = "Resolved admin menu tree", body = [AdminMenuItem])
    ),
    tag = "admin"
)]
pub async fn menu(state: Extension<Arc<GateState>>) -> impl IntoResponse {
    Json(state.menu().to_vec())
}
