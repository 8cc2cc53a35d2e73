//! Axum wrapper around the route guard policy.

use crate::gate::{policy, session};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

/// Evaluate the guard before any handler runs.
///
/// The policy itself cannot fail; cookie presence is the only signal consulted.
pub async fn guard(request: Request, next: Next) -> Response {
    let has_session = session::has_session(request.headers());
    let decision = policy::evaluate(
        request.uri().path(),
        request.uri().query(),
        has_session,
    );

    match decision {
        policy::Decision::Allow => next.run(request).await,
        policy::Decision::Redirect(location) => {
            debug!("guard redirect {} -> {location}", request.uri().path());
            Redirect::temporary(&location).into_response()
        }
    }
}
