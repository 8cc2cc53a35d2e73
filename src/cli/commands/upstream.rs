use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

pub const ARG_UPSTREAM_URL: &str = "upstream-url";
pub const ARG_UPSTREAM_TIMEOUT_SECONDS: &str = "upstream-timeout-seconds";
pub const ARG_DEMO_REQUIRE_OTP: &str = "demo-require-otp";

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_UPSTREAM_URL)
                .long(ARG_UPSTREAM_URL)
                .help("Base URL of the authentication backend")
                .long_help(
                    "Base URL of the authentication backend. When omitted, the edge runs in demo \
                     mode with fixed credentials (test@example.com / password123).",
                )
                .env("PORDEGO_UPSTREAM_URL"),
        )
        .arg(
            Arg::new(ARG_UPSTREAM_TIMEOUT_SECONDS)
                .long(ARG_UPSTREAM_TIMEOUT_SECONDS)
                .help("Timeout in seconds for upstream requests")
                .default_value("10")
                .env("PORDEGO_UPSTREAM_TIMEOUT_SECONDS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_DEMO_REQUIRE_OTP)
                .long(ARG_DEMO_REQUIRE_OTP)
                .help("Insert an OTP step into the demo login flow")
                .env("PORDEGO_DEMO_REQUIRE_OTP")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug)]
pub struct Options {
    pub url: Option<String>,
    pub timeout_seconds: u64,
    pub demo_require_otp: bool,
}

impl Options {
    /// Parse upstream options from validated CLI matches.
    ///
    /// # Errors
    /// Returns an error if the timeout argument is missing its default.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let timeout_seconds = matches
            .get_one::<u64>(ARG_UPSTREAM_TIMEOUT_SECONDS)
            .copied()
            .context("missing default for --upstream-timeout-seconds")?;

        Ok(Self {
            url: matches.get_one::<String>(ARG_UPSTREAM_URL).cloned(),
            timeout_seconds,
            demo_require_otp: matches.get_flag(ARG_DEMO_REQUIRE_OTP),
        })
    }
}
