//! Behavioral tests for the HTTP credential exchange against a scripted
//! backend, centered on the one-shot refresh retry rule.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use pordego::upstream::{ExchangeError, HttpExchange, LoginOutcome};
use secrecy::SecretString;
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use url::Url;

/// Scripted backend: the first `deny_profile` profile calls return 401, and
/// the refresh endpoint answers per `allow_refresh`.
struct Backend {
    profile_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    deny_profile: usize,
    allow_refresh: bool,
    login_body: Value,
    login_status: StatusCode,
}

impl Backend {
    fn new(deny_profile: usize, allow_refresh: bool) -> Self {
        Self {
            profile_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            deny_profile,
            allow_refresh,
            login_body: json!({"user": {"id": "1", "name": "Admin", "email": "test@example.com"}}),
            login_status: StatusCode::OK,
        }
    }
}

async fn profile(State(backend): State<Arc<Backend>>) -> (StatusCode, Json<Value>) {
    let call = backend.profile_calls.fetch_add(1, Ordering::SeqCst);
    if call < backend.deny_profile {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "expired"})));
    }
    (
        StatusCode::OK,
        Json(json!({"user": {"id": "1", "name": "Admin", "email": "test@example.com"}})),
    )
}

async fn refresh(State(backend): State<Arc<Backend>>) -> StatusCode {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if backend.allow_refresh {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::UNAUTHORIZED
    }
}

async fn login(State(backend): State<Arc<Backend>>) -> (StatusCode, Json<Value>) {
    (backend.login_status, Json(backend.login_body.clone()))
}

async fn spawn_backend(backend: Arc<Backend>) -> Result<Url> {
    let app = Router::new()
        .route("/profile", get(profile))
        .route("/refresh", post(refresh))
        .route("/login", post(login))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind backend listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("backend server failed");
    });

    Ok(Url::parse(&format!("http://{addr}"))?)
}

fn exchange(base: Url) -> Result<HttpExchange> {
    HttpExchange::new(base, Duration::from_secs(5), "pordego-test")
}

#[tokio::test]
async fn refresh_then_retry_exactly_once() -> Result<()> {
    let backend = Arc::new(Backend::new(1, true));
    let base = spawn_backend(backend.clone()).await?;

    let user = exchange(base)?.profile(Some("sid=abc")).await?;

    assert_eq!(user.email, "test@example.com");
    assert_eq!(backend.profile_calls.load(Ordering::SeqCst), 2);
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn failed_refresh_skips_the_retry() -> Result<()> {
    let backend = Arc::new(Backend::new(1, false));
    let base = spawn_backend(backend.clone()).await?;

    let result = exchange(base)?.profile(Some("sid=abc")).await;

    assert!(matches!(result, Err(ExchangeError::SessionExpired)));
    // No retry without a successful refresh.
    assert_eq!(backend.profile_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn second_401_is_terminal() -> Result<()> {
    let backend = Arc::new(Backend::new(2, true));
    let base = spawn_backend(backend.clone()).await?;

    let result = exchange(base)?.profile(Some("sid=abc")).await;

    assert!(matches!(result, Err(ExchangeError::SessionExpired)));
    // One retry, never a third attempt.
    assert_eq!(backend.profile_calls.load(Ordering::SeqCst), 2);
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn no_refresh_when_first_call_succeeds() -> Result<()> {
    let backend = Arc::new(Backend::new(0, true));
    let base = spawn_backend(backend.clone()).await?;

    exchange(base)?.profile(Some("sid=abc")).await?;

    assert_eq!(backend.profile_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn enveloped_otp_flag_normalizes() -> Result<()> {
    let mut backend = Backend::new(0, true);
    backend.login_body = json!({"data": {"requires_otp": true}});
    let base = spawn_backend(Arc::new(backend)).await?;

    let outcome = exchange(base)?
        .login("test@example.com", &SecretString::from("password123".to_string()))
        .await?;

    assert!(matches!(outcome, LoginOutcome::OtpRequired));
    Ok(())
}

#[tokio::test]
async fn rejected_login_maps_to_invalid_credentials() -> Result<()> {
    let mut backend = Backend::new(0, true);
    backend.login_status = StatusCode::UNAUTHORIZED;
    backend.login_body = json!({"error": "bad credentials"});
    let base = spawn_backend(Arc::new(backend)).await?;

    let result = exchange(base)?
        .login("test@example.com", &SecretString::from("wrong".to_string()))
        .await;

    assert!(matches!(result, Err(ExchangeError::InvalidCredentials)));
    Ok(())
}

#[tokio::test]
async fn backend_5xx_surfaces_status_and_message() -> Result<()> {
    let mut backend = Backend::new(0, true);
    backend.login_status = StatusCode::BAD_GATEWAY;
    backend.login_body = json!({"error": "upstream down"});
    let base = spawn_backend(Arc::new(backend)).await?;

    let result = exchange(base)?
        .login("test@example.com", &SecretString::from("password123".to_string()))
        .await;

    match result {
        Err(ExchangeError::Upstream { status, message }) => {
            assert_eq!(status, 502);
            assert!(message.contains("upstream down"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
    Ok(())
}
