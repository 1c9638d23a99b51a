//! Photoreel - a carousel of your recent Google Photos
//!
//! Main entry point for the Photoreel CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use photoreel_tui::{LogBuffer, TuiLogLayer};

mod commands;
mod session_file;

use commands::{browse, login, logout, serve, status};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Photoreel - a carousel of your recent Google Photos
#[derive(Parser)]
#[command(name = "photoreel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Server URL (default: [client] server_url, then http://localhost:3000)
    #[arg(long, global = true, env = "PHOTOREEL_SERVER_URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Photoreel server
    Serve(serve::ServeArgs),

    /// Sign in with Google through the server
    Login(login::LoginArgs),

    /// Sign out and forget the local session
    Logout(logout::LogoutArgs),

    /// Show server health and local session
    Status(status::StatusArgs),

    /// Browse recent photos in the terminal
    Browse(browse::BrowseArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "photoreel=debug,photoreel_server=debug,photoreel_oauth=debug,photoreel_photos=debug,photoreel_config=debug,photoreel_tui=debug,tower_http=debug,info"
    } else {
        "photoreel=info,photoreel_server=info,photoreel_oauth=info,photoreel_photos=info,photoreel_tui=info,warn"
    };

    // The TUI owns the terminal, so its events go to the logs panel instead of stderr
    let log_buffer = matches!(cli.command, Commands::Browse(_)).then(LogBuffer::new);

    let log_dir = photoreel_config::xdg_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "photoreel.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(log_buffer.is_none().then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(filter))
        }))
        .with(log_buffer.clone().map(|buffer| {
            TuiLogLayer::new(buffer).with_filter(tracing_subscriber::EnvFilter::new(filter))
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "photoreel=trace,photoreel_server=trace,photoreel_oauth=trace,photoreel_photos=trace,photoreel_config=trace,photoreel_tui=trace,info",
                )),
        )
        .init();

    // Flag or env var first, then [client] server_url from config
    let server_url = match cli.server {
        Some(url) => url,
        None => photoreel_config::load_config(None).config.client().server_url,
    };

    let ctx = commands::Context {
        server_url: server_url.trim_end_matches('/').to_string(),
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Serve(args) => serve::run(args, &ctx).await,
        Commands::Login(args) => login::run(args, &ctx).await,
        Commands::Logout(args) => logout::run(args, &ctx).await,
        Commands::Status(args) => status::run(args, &ctx).await,
        Commands::Browse(args) => browse::run(args, &ctx, log_buffer.unwrap_or_default()).await,
    }
}
