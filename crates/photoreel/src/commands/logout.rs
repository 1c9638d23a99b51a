//! Logout command - ends the server session and forgets the local copy.

use anyhow::Result;
use clap::Args;
use console::style;
use reqwest::header::COOKIE;
use serde::Serialize;

use super::Context;
use crate::session_file::SessionFile;

/// Arguments for the logout command.
#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Only delete the local session file
    #[arg(long)]
    pub local: bool,
}

#[derive(Debug, Serialize)]
struct LogoutOutput {
    server_notified: bool,
    session_removed: bool,
}

/// Run the logout command.
pub async fn run(args: LogoutArgs, ctx: &Context) -> Result<()> {
    let file = SessionFile::default_location()?;
    let session = file.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable session file");
        None
    });

    let server_notified = if args.local {
        false
    } else {
        let mut request = reqwest::Client::new().post(ctx.url("/api/auth/logout"));
        if let Some(ref session) = session {
            request = request.header(COOKIE, session.cookie_header());
        }
        match request.send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = response.status().as_u16(), "Server rejected logout");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not reach server for logout");
                false
            }
        }
    };

    let session_removed = file.delete()?;

    if ctx.json_output {
        let output = LogoutOutput {
            server_notified,
            session_removed,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if server_notified {
        println!("{} Signed out of {}", style("✓").green(), ctx.server_url);
    } else if !args.local {
        println!(
            "{} Could not reach {}; its cookies expire on their own",
            style("!").yellow(),
            ctx.server_url
        );
    }
    if session_removed {
        println!("  Removed {}", file.path().display());
    } else {
        println!("  No local session found.");
    }

    Ok(())
}
