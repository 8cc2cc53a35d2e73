//! The edge itself: router construction, guard wiring, and the serve loop.

use anyhow::Result;
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, info, info_span};
use ulid::Ulid;

pub mod flow;
pub mod handlers;
pub mod menu;
pub mod policy;
pub mod session;

mod middleware;
mod openapi;
mod state;

pub use openapi::openapi;
pub use state::{GateConfig, GateState};

use crate::upstream::Exchange;

/// Build the edge router: guarded page shells, the auth API, and service routes.
#[must_use]
pub fn router(state: Arc<GateState>) -> Router {
    Router::new()
        .route("/", get(handlers::pages::root))
        .route("/login", get(handlers::pages::login_page))
        .route("/otp", get(handlers::pages::otp_page))
        .route("/admin", get(handlers::pages::admin_page))
        .route("/admin/*path", get(handlers::pages::admin_page))
        .route("/api/login", post(handlers::login::login))
        .route("/api/login/otp/confirm", post(handlers::otp::confirm))
        .route("/api/logout", post(handlers::logout::logout))
        .route("/api/profile", get(handlers::profile::profile))
        .route("/api/admin/menu", get(handlers::menu::menu))
        .route("/health", get(handlers::health::health))
        .route("/openapi.json", get(openapi::openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                // The guard runs before any handler, page shells and API alike.
                .layer(axum::middleware::from_fn(middleware::guard))
                .layer(Extension(state)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, config: GateConfig, exchange: Exchange) -> Result<()> {
    let menu_items = menu::resolve(config.admin_routes_dir());
    let state = Arc::new(GateState::new(config, exchange, menu_items));
    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
