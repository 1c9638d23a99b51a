//! Browse command - opens the photo carousel TUI.

use anyhow::Result;
use clap::Args;
use photoreel_tui::{LogBuffer, TuiConfig};

use super::Context;
use crate::session_file::{AUTH_TOKEN_COOKIE, SessionFile};

/// Arguments for the browse command.
#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Access token to use instead of the saved session
    #[arg(long, env = "PHOTOREEL_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context, log_buffer: LogBuffer) -> Result<()> {
    let mut config = TuiConfig::new(&ctx.server_url).with_log_buffer(log_buffer);

    if let Some(cookie) = session_cookie(args.token, ctx)? {
        config = config.with_cookie(cookie);
    } else {
        tracing::info!("No saved session; the carousel will ask you to sign in");
    }

    photoreel_tui::run_with_config(config).await
}

/// `Cookie` header for the TUI, from `--token` or the saved session.
fn session_cookie(token: Option<String>, ctx: &Context) -> Result<Option<String>> {
    if let Some(token) = token {
        return Ok(Some(format!("{}={}", AUTH_TOKEN_COOKIE, token)));
    }

    let session = SessionFile::default_location()?.load()?;
    Ok(session.and_then(|session| {
        if session.server_url != ctx.server_url {
            tracing::warn!(
                saved = %session.server_url,
                server = %ctx.server_url,
                "Saved session belongs to a different server"
            );
            return None;
        }
        session.is_signed_in().then(|| session.cookie_header())
    }))
}
