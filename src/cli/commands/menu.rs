use clap::{Arg, Command};

pub const ARG_ADMIN_ROUTES_DIR: &str = "admin-routes-dir";

pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_ADMIN_ROUTES_DIR)
            .long(ARG_ADMIN_ROUTES_DIR)
            .help("Directory scanned for admin routes to build the sidebar menu")
            .long_help(
                "Directory scanned for admin routes to build the sidebar menu. Each \
                 subdirectory containing a page.html marker becomes a menu entry, one level \
                 of nesting included. When omitted, or when the scan yields only the root \
                 dashboard entry, the static menu is used.",
            )
            .env("PORDEGO_ADMIN_ROUTES_DIR"),
    )
}

#[derive(Debug)]
pub struct Options {
    pub admin_routes_dir: Option<String>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &clap::ArgMatches) -> Self {
        Self {
            admin_routes_dir: matches.get_one::<String>(ARG_ADMIN_ROUTES_DIR).cloned(),
        }
    }
}
