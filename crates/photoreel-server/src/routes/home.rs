//! Landing page.

use axum::{extract::Query, response::Html};
use serde::Deserialize;

/// Query accepted by the landing page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Error code left by a failed sign-in.
    pub error: Option<String>,
}

/// Minimal page: an optional sign-in error and a link to start the flow.
pub async fn home_handler(Query(query): Query<HomeQuery>) -> Html<String> {
    Html(render_home(query.error.as_deref()))
}

fn render_home(error: Option<&str>) -> String {
    let error_block = match error.filter(|e| !e.is_empty()) {
        Some(code) => format!(
            "<p class=\"error\">Authentication failed: {}</p>\n",
            escape_html(code)
        ),
        None => String::new(),
    };

    format!(
        "<!doctype html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>Photoreel</title></head>\n\
         <body>\n\
         <h1>Photoreel</h1>\n\
         {error_block}\
         <p><a href=\"/api/auth/login\">Sign in with Google Photos</a></p>\n\
         <p>Then run <code>photoreel browse</code> to view your recent photos.</p>\n\
         </body>\n\
         </html>\n"
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
