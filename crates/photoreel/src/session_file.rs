//! Local copy of the server's session cookies.
//!
//! `photoreel login --code` completes the callback headlessly and keeps the
//! `Set-Cookie` values here so `browse` can replay them as a `Cookie` header.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// File name inside the config directory.
const SESSION_FILE: &str = "session.json";

/// Cookie carrying the access token.
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Session cookies captured from one server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Server the cookies belong to.
    pub server_url: String,
    /// Cookie name to value.
    pub cookies: BTreeMap<String, String>,
    /// Expiry per cookie, from `saved_at + Max-Age`. Cookies without an
    /// entry last until the file is removed.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expires_at: BTreeMap<String, DateTime<Utc>>,
    /// When the cookies were captured.
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    /// Collect cookies from `Set-Cookie` header values received now.
    ///
    /// Removal cookies (empty value or `Max-Age=0`) drop the name instead.
    pub fn from_set_cookies<'a>(
        server_url: &str,
        headers: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::from_set_cookies_at(server_url, headers, Utc::now())
    }

    /// Collect cookies received at `saved_at`.
    pub fn from_set_cookies_at<'a>(
        server_url: &str,
        headers: impl IntoIterator<Item = &'a str>,
        saved_at: DateTime<Utc>,
    ) -> Self {
        let mut cookies = BTreeMap::new();
        let mut expires_at = BTreeMap::new();
        for header in headers {
            match parse_set_cookie(header) {
                Some(SetCookie::Value {
                    name,
                    value,
                    max_age,
                }) => {
                    let expiry = max_age
                        .and_then(Duration::try_seconds)
                        .and_then(|lifetime| saved_at.checked_add_signed(lifetime));
                    match expiry {
                        Some(expiry) => {
                            expires_at.insert(name.clone(), expiry);
                        }
                        None => {
                            expires_at.remove(&name);
                        }
                    }
                    cookies.insert(name, value);
                }
                Some(SetCookie::Removal { name }) => {
                    cookies.remove(&name);
                    expires_at.remove(&name);
                }
                None => {}
            }
        }

        Self {
            server_url: server_url.to_string(),
            cookies,
            expires_at,
            saved_at,
        }
    }

    /// Whether `name` was captured and has not expired by `now`.
    pub fn is_live_at(&self, name: &str, now: DateTime<Utc>) -> bool {
        self.cookies.contains_key(name)
            && self.expires_at.get(name).is_none_or(|expiry| now < *expiry)
    }

    /// Whether a live access token cookie is held.
    pub fn is_signed_in(&self) -> bool {
        self.is_live_at(AUTH_TOKEN_COOKIE, Utc::now())
    }

    /// Whether a live refresh token cookie is held.
    pub fn has_refresh_token(&self) -> bool {
        self.is_live_at(REFRESH_TOKEN_COOKIE, Utc::now())
    }

    /// When the access token cookie runs out, if it carried a `Max-Age`.
    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at.get(AUTH_TOKEN_COOKIE).copied()
    }

    /// Value for a `Cookie` request header. Expired cookies are left out.
    pub fn cookie_header(&self) -> String {
        self.cookie_header_at(Utc::now())
    }

    fn cookie_header_at(&self, now: DateTime<Utc>) -> String {
        self.cookies
            .iter()
            .filter(|(name, _)| self.is_live_at(name, now))
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, PartialEq)]
enum SetCookie {
    Value {
        name: String,
        value: String,
        max_age: Option<i64>,
    },
    Removal {
        name: String,
    },
}

fn parse_set_cookie(header: &str) -> Option<SetCookie> {
    let mut parts = header.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let value = value.trim().trim_matches('"');

    let max_age = parts
        .filter_map(|attr| attr.split_once('='))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("max-age"))
        .and_then(|(_, v)| v.trim().parse::<i64>().ok());

    if value.is_empty() || max_age.is_some_and(|secs| secs <= 0) {
        Some(SetCookie::Removal {
            name: name.to_string(),
        })
    } else {
        Some(SetCookie::Value {
            name: name.to_string(),
            value: value.to_string(),
            max_age,
        })
    }
}

/// JSON file holding a [`StoredSession`].
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Session file inside `config_dir`.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SESSION_FILE),
        }
    }

    /// Session file in the photoreel config directory.
    pub fn default_location() -> Result<Self> {
        let dir = photoreel_config::xdg_config_dir()
            .context("Could not determine config directory")?;
        Ok(Self::new(&dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the stored session, if any.
    pub fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let session = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Write the session, replacing any previous one.
    pub fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(session)?;

        // The mode only applies when the file is created, so never reuse one.
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to replace {}", self.path.display()));
            }
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Remove the file. Returns whether one existed.
    pub fn delete(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}
