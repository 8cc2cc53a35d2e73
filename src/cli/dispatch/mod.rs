//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the appropriate
//! action, such as starting the edge server with its full configuration state.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{menu, session, upstream};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    // Validate the upstream URL scheme before wiring anything up
    crate::cli::commands::validate(matches).map_err(|e| anyhow::anyhow!(e))?;

    let upstream_opts = upstream::Options::parse(matches)?;
    let session_opts = session::Options::parse(matches)?;
    let menu_opts = menu::Options::parse(matches);

    Ok(Action::Server(Args {
        port,
        upstream_url: upstream_opts.url,
        upstream_timeout_seconds: upstream_opts.timeout_seconds,
        demo_require_otp: upstream_opts.demo_require_otp,
        session_ttl_seconds: session_opts.ttl_seconds,
        session_cookie_secure: session_opts.cookie_secure,
        admin_routes_dir: menu_opts.admin_routes_dir,
    }))
}
