//! Serve command - runs the Photoreel HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use photoreel_config::{LoadedConfig, PhotoreelConfig};
use photoreel_oauth::{OAuthConfig, TokenClient};
use photoreel_photos::PhotosClient;
use photoreel_server::{Server, ServerConfig};

use super::Context;

/// Arguments for the serve command.
///
/// CLI arguments override config file values.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Load this config file instead of discovering one
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let loaded = match args.config {
        Some(ref path) => LoadedConfig::from_file(path)?,
        None => photoreel_config::load_config(None),
    };

    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }

    if ctx.verbose {
        let sources = loaded.loaded_from();
        if sources.is_empty() {
            println!("No config files found, using defaults + CLI args");
        } else {
            for source in sources {
                println!("Loaded config: {}", source.display());
            }
        }
        if let Some(origin) = loaded.section_origin("oauth") {
            println!(
                "[oauth] from {} config {}",
                origin.layer,
                origin.path.display()
            );
        }
    }

    let config = &loaded.config;

    // ── OAuth client ────────────────────────────────────────────────────

    let oauth_config = build_oauth_config(config)?;
    let authorization_url = photoreel_oauth::build_authorization_url(&oauth_config);

    let http = reqwest::Client::builder()
        .user_agent(format!("photoreel/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    let oauth = TokenClient::with_http(http.clone(), oauth_config);

    // ── Photos client ───────────────────────────────────────────────────

    let photos_section = config.photos();
    let mut photos = PhotosClient::builder().http_client(http);
    if let Some(ref base) = photos_section.api_base_url {
        photos = photos.base_url(base.clone());
    }
    let photos = photos.build()?;

    // ── Server ──────────────────────────────────────────────────────────

    let server_section = config.server();
    let environment = server_section.effective_environment();
    let addr = bind_address(
        args.bind.as_deref().unwrap_or(&server_section.bind),
        args.port.unwrap_or(server_section.port),
    )?;

    let server_config = ServerConfig::new()
        .with_bind_address(addr)
        .with_secure_cookies(server_section.secure_cookies_for(environment))
        .with_request_logging(server_section.request_logging)
        .with_cors_origins(server_section.cors_origins.clone())
        .with_page_size(photos_section.page_size);

    if ctx.verbose {
        println!("Environment: {}", environment);
        println!("Bind address: {}", addr);
        println!("Secure cookies: {}", server_config.secure_cookies);
        println!("Consent URL: {}", authorization_url);
    }

    let public_url = server_section
        .public_url
        .clone()
        .unwrap_or_else(|| format!("http://{}", addr));
    println!("Photoreel listening on {}", addr);
    println!("Sign in at {}/api/auth/login", public_url.trim_end_matches('/'));

    Server::new(server_config, oauth, photos).run().await?;

    Ok(())
}

/// Provider config from resolved credentials plus `[oauth]` overrides.
fn build_oauth_config(config: &PhotoreelConfig) -> Result<OAuthConfig> {
    let creds = photoreel_config::resolve_oauth_credentials(config.oauth.as_ref())?;
    for warning in &creds.warnings {
        eprintln!("warning: {}", warning);
    }
    tracing::debug!(
        client_id_source = %creds.client_id.source,
        client_secret_source = %creds.client_secret.source,
        "Resolved OAuth credentials"
    );

    let mut oauth = OAuthConfig::google(
        creds.client_id.value,
        creds.client_secret.value,
        creds.redirect_uri.value,
    );

    if let Some(section) = config.oauth.as_ref() {
        if let Some(ref url) = section.authorize_url {
            oauth = oauth.with_authorize_url(url.clone());
        }
        if let Some(ref url) = section.token_url {
            oauth = oauth.with_token_url(url.clone());
        }
        if !section.scopes.is_empty() {
            oauth = oauth.with_scopes(section.scopes.clone());
        }
    }

    Ok(oauth)
}

fn bind_address(host: &str, port: u16) -> Result<SocketAddr> {
    format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))
}
