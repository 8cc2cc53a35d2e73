use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_SESSION_COOKIE_SECURE: &str = "session-cookie-secure";

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session marker cookie TTL in seconds")
                .default_value("2592000")
                .env("PORDEGO_SESSION_TTL_SECONDS")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE_SECURE)
                .long(ARG_SESSION_COOKIE_SECURE)
                .help("Mark the session cookie Secure (HTTPS deployments)")
                .env("PORDEGO_SESSION_COOKIE_SECURE")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug)]
pub struct Options {
    pub ttl_seconds: i64,
    pub cookie_secure: bool,
}

impl Options {
    /// Parse session cookie options from validated CLI matches.
    ///
    /// # Errors
    /// Returns an error if the TTL argument is missing its default.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let ttl_seconds = matches
            .get_one::<i64>(ARG_SESSION_TTL_SECONDS)
            .copied()
            .context("missing default for --session-ttl-seconds")?;

        Ok(Self {
            ttl_seconds,
            cookie_secure: matches.get_flag(ARG_SESSION_COOKIE_SECURE),
        })
    }
}
