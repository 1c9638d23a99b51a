//! Status command - shows server health and the local session.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use reqwest::header::COOKIE;
use console::{Style, style};
use serde::{Deserialize, Serialize};

use super::Context;
use crate::session_file::{AUTH_TOKEN_COOKIE, SessionFile, StoredSession};

/// Arguments for the status command.
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// `/health` payload.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    version: String,
    /// How the server reads the cookies we sent.
    #[serde(default)]
    session: Option<String>,
}

/// Status response for JSON output.
#[derive(Debug, Serialize)]
struct StatusOutput {
    running: bool,
    version: Option<String>,
    server_url: String,
    signed_in: bool,
    has_refresh_token: bool,
    session_saved_at: Option<DateTime<Utc>>,
    session_expires_at: Option<DateTime<Utc>>,
    server_session: Option<String>,
}

async fn health(ctx: &Context, session: Option<&StoredSession>) -> Result<HealthResponse> {
    let mut request = reqwest::Client::new()
        .get(ctx.url("/health"))
        .timeout(std::time::Duration::from_secs(5));
    if let Some(session) = session.filter(|s| s.server_url == ctx.server_url) {
        request = request.header(COOKIE, session.cookie_header());
    }
    let response = request.send().await?.error_for_status()?;
    Ok(response.json().await?)
}

/// Run the status command.
pub async fn run(_args: StatusArgs, ctx: &Context) -> Result<()> {
    let session: Option<StoredSession> = SessionFile::default_location()
        .and_then(|file| file.load())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable session file");
            None
        });

    let health = health(ctx, session.as_ref()).await;

    if ctx.json_output {
        let output = StatusOutput {
            running: health.is_ok(),
            version: health.as_ref().ok().map(|h| h.version.clone()),
            server_url: ctx.server_url.clone(),
            signed_in: session.as_ref().is_some_and(StoredSession::is_signed_in),
            has_refresh_token: session.as_ref().is_some_and(StoredSession::has_refresh_token),
            session_saved_at: session.as_ref().map(|s| s.saved_at),
            session_expires_at: session.as_ref().and_then(StoredSession::access_expires_at),
            server_session: health.as_ref().ok().and_then(|h| h.session.clone()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let green = Style::new().green();
    let red = Style::new().red();
    let dim = Style::new().dim();

    println!();
    println!("{}", style("Photoreel Status").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();

    match health {
        Ok(ref health) => {
            println!(
                "  {} {}",
                dim.apply_to("Server:"),
                green.apply_to("● running")
            );
            println!("  {} {}", dim.apply_to("Version:"), health.version);
            if let Some(ref server_session) = health.session {
                println!("  {} {}", dim.apply_to("Server sees:"), server_session);
            }
        }
        Err(ref e) => {
            println!(
                "  {} {}",
                dim.apply_to("Server:"),
                red.apply_to("● not running")
            );
            if ctx.verbose {
                println!("  {} {}", dim.apply_to("Error:"), e);
            }
        }
    }
    println!("  {} {}", dim.apply_to("URL:"), ctx.server_url);
    println!();

    match session {
        Some(ref session) if session.is_signed_in() => {
            println!(
                "  {} {}",
                dim.apply_to("Session:"),
                green.apply_to("signed in")
            );
            println!(
                "  {} {}",
                dim.apply_to("Saved:"),
                session.saved_at.format("%Y-%m-%d %H:%M UTC")
            );
            if let Some(expires_at) = session.access_expires_at() {
                println!(
                    "  {} {}",
                    dim.apply_to("Expires:"),
                    expires_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
            println!(
                "  {} {}",
                dim.apply_to("Refresh token:"),
                if session.has_refresh_token() { "yes" } else { "no" }
            );
            if session.server_url != ctx.server_url {
                println!(
                    "  {} session belongs to {}",
                    style("!").yellow(),
                    session.server_url
                );
            }
        }
        Some(ref session) if session.cookies.contains_key(AUTH_TOKEN_COOKIE) => {
            println!("  {} expired", dim.apply_to("Session:"));
            println!();
            println!("  {}", dim.apply_to("Sign in again with: photoreel login"));
        }
        _ => {
            println!("  {} not signed in", dim.apply_to("Session:"));
            println!();
            println!("  {}", dim.apply_to("Sign in with: photoreel login"));
        }
    }

    println!();
    Ok(())
}
