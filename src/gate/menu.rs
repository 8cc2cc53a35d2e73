//! Admin menu resolution.
//!
//! The sidebar menu is configuration, not runtime logic: a static declarative
//! table is authoritative, with an optional directory scan for deployments that
//! drop route directories next to the edge. The scan requires a `page.html`
//! marker per directory and includes one level of nesting. Any scan failure, or
//! a scan that yields only the trivial dashboard entry, falls back to the
//! static table.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;
use utoipa::ToSchema;

/// Marker file a directory must contain to qualify as a navigable route.
const PAGE_MARKER: &str = "page.html";

// Reserved or implementation directories never shown in the menu.
const RESERVED_NAMES: &[&str] = &["api", "components"];

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct AdminMenuItem {
    pub title: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub children: Option<Vec<AdminMenuItem>>,
}

impl AdminMenuItem {
    fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            badge: None,
            children: None,
        }
    }

    fn with_badge(mut self, badge: &str) -> Self {
        self.badge = Some(badge.to_string());
        self
    }

    fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = Some(children);
        self
    }
}

/// The static fallback menu.
#[must_use]
pub fn static_menu() -> Vec<AdminMenuItem> {
    vec![
        AdminMenuItem::new("Dashboard", "/admin/dashboard"),
        AdminMenuItem::new("Analytics", "/admin/analytics").with_badge("New"),
        AdminMenuItem::new("Users", "/admin/users").with_children(vec![
            AdminMenuItem::new("Active Users", "/admin/users/active"),
            AdminMenuItem::new("Inactive Users", "/admin/users/inactive"),
        ]),
        AdminMenuItem::new("Reports", "/admin/reports").with_children(vec![
            AdminMenuItem::new("Analytics Reports", "/admin/reports/analytics"),
            AdminMenuItem::new("Export Data", "/admin/reports/export"),
        ]),
        AdminMenuItem::new("System Health", "/admin/system"),
        AdminMenuItem::new("Database", "/admin/database"),
        AdminMenuItem::new("Notifications", "/admin/notifications")
            .with_badge("3")
            .with_children(vec![
                AdminMenuItem::new("Push Notifications", "/admin/notifications/push"),
                AdminMenuItem::new("Email Notifications", "/admin/notifications/email"),
            ]),
        AdminMenuItem::new("Security", "/admin/security").with_children(vec![
            AdminMenuItem::new("Access Control", "/admin/security/access"),
            AdminMenuItem::new("API Keys", "/admin/security/keys"),
        ]),
        AdminMenuItem::new("Settings", "/admin/settings").with_children(vec![
            AdminMenuItem::new("Appearance", "/admin/settings/appearance"),
            AdminMenuItem::new("Localization", "/admin/settings/localization"),
        ]),
    ]
}

/// Resolve the menu: scan `routes_dir` when provided, otherwise (and on any
/// fallback condition) return the static table.
#[must_use]
pub fn resolve(routes_dir: Option<&Path>) -> Vec<AdminMenuItem> {
    let Some(root) = routes_dir else {
        return static_menu();
    };

    match scan(root) {
        Ok(items) if items.len() > 1 => items,
        Ok(_) => {
            debug!("route scan yielded only the dashboard entry, using static menu");
            static_menu()
        }
        Err(err) => {
            debug!("route scan failed ({err}), using static menu");
            static_menu()
        }
    }
}

fn scan(root: &Path) -> std::io::Result<Vec<AdminMenuItem>> {
    // Always include the root dashboard as the main entry
    let mut items = vec![AdminMenuItem::new("Dashboard", "/admin/dashboard")];

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if skipped(&name) || name == "dashboard" {
            continue;
        }
        if !entry.path().join(PAGE_MARKER).exists() {
            continue;
        }

        let mut item = AdminMenuItem::new(title_case(&name), format!("/admin/{name}"));
        let children = scan_children(&entry.path(), &name);
        if !children.is_empty() {
            item = item.with_children(children);
        }
        items.push(item);
    }

    // Stable ordering regardless of directory iteration order; Dashboard stays first.
    items[1..].sort_by(|a, b| a.title.cmp(&b.title));

    Ok(items)
}

fn scan_children(dir: &Path, parent: &str) -> Vec<AdminMenuItem> {
    let Ok(entries) = fs::read_dir(dir) else {
        // Unreadable subdirectories simply contribute no children.
        return Vec::new();
    };

    let mut children = Vec::new();
    for entry in entries.flatten() {
        if !entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if skipped(&name) {
            continue;
        }
        if entry.path().join(PAGE_MARKER).exists() {
            children.push(AdminMenuItem::new(
                title_case(&name),
                format!("/admin/{parent}/{name}"),
            ));
        }
    }
    children.sort_by(|a, b| a.title.cmp(&b.title));
    children
}

fn skipped(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('(') || RESERVED_NAMES.contains(&name)
}

fn title_case(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
