use crate::{
    gate::{self, GateConfig},
    upstream::{DemoExchange, Exchange, HttpExchange},
};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub upstream_url: Option<String>,
    pub upstream_timeout_seconds: u64,
    pub demo_require_otp: bool,
    pub session_ttl_seconds: i64,
    pub session_cookie_secure: bool,
    pub admin_routes_dir: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the upstream URL is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let exchange = match &args.upstream_url {
        Some(url) => {
            let base = Url::parse(url).with_context(|| format!("Invalid upstream URL: {url}"))?;
            Exchange::Http(HttpExchange::new(
                base,
                Duration::from_secs(args.upstream_timeout_seconds),
                crate::APP_USER_AGENT,
            )?)
        }
        None => Exchange::Demo(DemoExchange::new(args.demo_require_otp)),
    };

    let config = GateConfig::new()
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_session_cookie_secure(args.session_cookie_secure)
        .with_admin_routes_dir(args.admin_routes_dir.map(Into::into));

    gate::new(args.port, config, exchange).await
}

fn log_startup_args(args: &Args) {
    let upstream = args.upstream_url.as_deref().unwrap_or("demo");
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("upstream", upstream.to_string()),
        (
            "session_ttl_seconds",
            args.session_ttl_seconds.to_string(),
        ),
        (
            "session_cookie_secure",
            args.session_cookie_secure.to_string(),
        ),
        (
            "admin_routes_dir",
            args.admin_routes_dir
                .clone()
                .unwrap_or_else(|| "n/a".to_string()),
        ),
    ];

    for (key, value) in entries {
        info!("startup {key}={value}");
    }
}
