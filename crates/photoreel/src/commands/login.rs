//! Login command - signs in through the server's OAuth flow.

use anyhow::{Result, bail};
use clap::Args;
use console::style;
use reqwest::header::{LOCATION, SET_COOKIE};
use serde::Serialize;
use url::Url;

use super::Context;
use crate::session_file::{SessionFile, StoredSession};

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Authorization code to complete the callback without a browser
    #[arg(long)]
    pub code: Option<String>,

    /// Print the sign-in URL without opening a browser
    #[arg(long)]
    pub no_browser: bool,
}

#[derive(Debug, Serialize)]
struct LoginOutput {
    signed_in: bool,
    has_refresh_token: bool,
    session_file: String,
}

/// Run the login command.
pub async fn run(args: LoginArgs, ctx: &Context) -> Result<()> {
    match args.code {
        Some(code) => complete_callback(&code, ctx).await,
        None => start_login(args.no_browser, ctx),
    }
}

fn start_login(no_browser: bool, ctx: &Context) -> Result<()> {
    let login_url = ctx.url("/api/auth/login");

    println!("{}", style("Photoreel Sign-in").bold());
    println!();
    println!("Open this URL in your browser:");
    println!();
    println!("  {}", login_url);
    println!();

    if !no_browser && open_url(&login_url).is_err() {
        println!("(Could not open browser automatically)");
        println!();
    }

    println!("If the browser cannot reach the callback, copy the `code`");
    println!("parameter from its address bar and run:");
    println!();
    println!("  photoreel login --code <code>");
    println!();

    Ok(())
}

/// Hit the callback ourselves and keep the cookies it sets.
async fn complete_callback(code: &str, ctx: &Context) -> Result<()> {
    let mut url = Url::parse(&ctx.url("/api/auth/callback"))?;
    url.query_pairs_mut().append_pair("code", code);

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    tracing::debug!(server = %ctx.server_url, "Completing OAuth callback");
    let response = client.get(url.clone()).send().await?;

    if !response.status().is_redirection() {
        bail!(
            "Unexpected response from {}: {}",
            ctx.server_url,
            response.status()
        );
    }

    if let Some(error) = redirect_error(&url, response.headers().get(LOCATION)) {
        bail!("Authentication failed: {}", error);
    }

    let headers: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();
    let session =
        StoredSession::from_set_cookies(&ctx.server_url, headers.iter().map(String::as_str));

    if !session.is_signed_in() {
        bail!("Server did not set a session cookie");
    }

    let file = SessionFile::default_location()?;
    file.save(&session)?;

    if ctx.json_output {
        let output = LoginOutput {
            signed_in: true,
            has_refresh_token: session.has_refresh_token(),
            session_file: file.path().display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} Signed in", style("✓").green());
        if !session.has_refresh_token() {
            println!(
                "  {}",
                style("No refresh token issued; you will need to sign in again in an hour").dim()
            );
        }
        println!("  Session saved to {}", file.path().display());
    }

    Ok(())
}

/// The `error` query parameter of the callback's redirect target, if any.
fn redirect_error(base: &Url, location: Option<&reqwest::header::HeaderValue>) -> Option<String> {
    let location = location?.to_str().ok()?;
    let target = base.join(location).ok()?;
    target
        .query_pairs()
        .find(|(key, _)| key == "error")
        .map(|(_, value)| value.into_owned())
}

/// Try to open a URL in the default browser.
fn open_url(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).status()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).status()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .status()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn base() -> Url {
        Url::parse("http://localhost:3000/api/auth/callback?code=x").unwrap()
    }

    #[test]
    fn test_redirect_error_found() {
        let location = HeaderValue::from_static("/?error=auth_failed");
        assert_eq!(
            redirect_error(&base(), Some(&location)).as_deref(),
            Some("auth_failed")
        );
    }

    #[test]
    fn test_redirect_error_absent_on_success() {
        let location = HeaderValue::from_static("/");
        assert_eq!(redirect_error(&base(), Some(&location)), None);
        assert_eq!(redirect_error(&base(), None), None);
    }

    #[test]
    fn test_redirect_error_is_decoded() {
        let location = HeaderValue::from_static("/?error=access%20denied");
        assert_eq!(
            redirect_error(&base(), Some(&location)).as_deref(),
            Some("access denied")
        );
    }
}
