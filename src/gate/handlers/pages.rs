//! Minimal HTML shells for the guarded navigations.
//!
//! The edge is not a rendering layer; these pages exist so the route guard has
//! real navigations to gate and the dashboard shell has a sidebar to hydrate.

use crate::gate::{menu::AdminMenuItem, policy, state::GateState};
use axum::{extract::Extension, response::Html};
use std::fmt::Write;
use std::sync::Arc;

pub async fn root() -> Html<String> {
    Html(page(
        "Pordego",
        &format!(r#"<p><a href="{}">Sign in</a></p>"#, policy::LOGIN_PATH),
    ))
}

pub async fn login_page() -> Html<String> {
    Html(page(
        "Sign in",
        r#"<form id="login" method="post" action="/api/login">
  <label>Email <input name="email" type="email" autocomplete="username"></label>
  <label>Password <input name="password" type="password" autocomplete="current-password"></label>
  <button type="submit">Access dashboard</button>
</form>"#,
    ))
}

pub async fn otp_page() -> Html<String> {
    Html(page(
        "Confirm code",
        r#"<form id="otp" method="post" action="/api/login/otp/confirm">
  <label>6-digit code <input name="code" inputmode="numeric" maxlength="6"></label>
  <label><input name="remember_device" type="checkbox"> Remember this device</label>
  <button type="submit">Verify</button>
</form>"#,
    ))
}

pub async fn admin_page(state: Extension<Arc<GateState>>) -> Html<String> {
    let mut nav = String::from("<nav><ul>\n");
    for item in state.menu() {
        render_item(&mut nav, item, 0);
    }
    nav.push_str("</ul></nav>");
    Html(page("Dashboard", &nav))
}

fn render_item(out: &mut String, item: &AdminMenuItem, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    let badge = item
        .badge
        .as_deref()
        .map_or_else(String::new, |badge| {
            format!(r#" <span class="badge">{}</span>"#, escape(badge))
        });
    let _ = writeln!(
        out,
        r#"{indent}<li><a href="{}">{}</a>{badge}"#,
        escape(&item.href),
        escape(&item.title),
    );
    if let Some(children) = &item.children {
        let _ = writeln!(out, "{indent}<ul>");
        for child in children {
            render_item(out, child, depth + 1);
        }
        let _ = writeln!(out, "{indent}</ul>");
    }
    let _ = writeln!(out, "{indent}</li>");
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
