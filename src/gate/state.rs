//! Gate configuration and shared request state.

use crate::gate::menu::AdminMenuItem;
use crate::upstream::Exchange;
use std::path::{Path, PathBuf};

const DEFAULT_SESSION_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct GateConfig {
    session_ttl_seconds: i64,
    session_cookie_secure: bool,
    admin_routes_dir: Option<PathBuf>,
}

impl GateConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            session_cookie_secure: false,
            admin_routes_dir: None,
        }
    }

    #[must_use]
    pub const fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub const fn with_session_cookie_secure(mut self, secure: bool) -> Self {
        self.session_cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn with_admin_routes_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.admin_routes_dir = dir;
        self
    }

    #[must_use]
    pub const fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub const fn session_cookie_secure(&self) -> bool {
        self.session_cookie_secure
    }

    #[must_use]
    pub fn admin_routes_dir(&self) -> Option<&Path> {
        self.admin_routes_dir.as_deref()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state handed to every handler via `Extension`.
pub struct GateState {
    config: GateConfig,
    exchange: Exchange,
    menu: Vec<AdminMenuItem>,
}

impl GateState {
    #[must_use]
    pub fn new(config: GateConfig, exchange: Exchange, menu: Vec<AdminMenuItem>) -> Self {
        Self {
            config,
            exchange,
            menu,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GateConfig {
        &self.config
    }

    #[must_use]
    pub const fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    #[must_use]
    pub fn menu(&self) -> &[AdminMenuItem] {
        &self.menu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_cookie_contract() {
        let config = GateConfig::new();
        assert_eq!(config.session_ttl_seconds(), 2_592_000);
        assert!(!config.session_cookie_secure());
        assert!(config.admin_routes_dir().is_none());
    }

    #[test]
    fn builder_overrides_apply() {
        let config = GateConfig::new()
            .with_session_ttl_seconds(3600)
            .with_session_cookie_secure(true)
            .with_admin_routes_dir(Some(PathBuf::from("/srv/admin")));
        assert_eq!(config.session_ttl_seconds(), 3600);
        assert!(config.session_cookie_secure());
        assert_eq!(
            config.admin_routes_dir(),
            Some(Path::new("/srv/admin"))
        );
    }
}
