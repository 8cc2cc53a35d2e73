pub mod logging;
pub mod menu;
pub mod session;
pub mod upstream;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

use self::upstream::ARG_UPSTREAM_URL;

/// Validate that the upstream URL, when provided, is an HTTP(S) endpoint.
///
/// # Errors
/// Returns an error string if `upstream-url` uses an unsupported scheme.
pub fn validate(matches: &clap::ArgMatches) -> Result<(), String> {
    let Some(url) = matches.get_one::<String>(ARG_UPSTREAM_URL) else {
        return Ok(()); // Demo mode, nothing to validate
    };

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!(
            "Invalid --{ARG_UPSTREAM_URL}: expected an http:// or https:// URL"
        ));
    }
    Ok(())
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("pordego")
        .about("Session-gated edge for an admin dashboard")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORDEGO_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = upstream::with_args(command);
    let command = session::with_args(command);
    let command = menu::with_args(command);
    logging::with_args(command)
}
