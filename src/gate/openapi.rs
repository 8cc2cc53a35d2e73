//! `OpenAPI` document for the edge API.
//!
//! Add new endpoints to `paths(...)` so they appear in the generated spec;
//! page shells and `/openapi.json` itself are intentionally not documented.

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "pordego",
        description = "Session-gated edge for an admin dashboard"
    ),
    paths(
        crate::gate::handlers::login::login,
        crate::gate::handlers::otp::confirm,
        crate::gate::handlers::logout::logout,
        crate::gate::handlers::profile::profile,
        crate::gate::handlers::menu::menu,
        crate::gate::handlers::health::health,
    ),
    tags(
        (name = "auth", description = "Login, OTP confirmation, and session lifecycle"),
        (name = "admin", description = "Dashboard shell data"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
