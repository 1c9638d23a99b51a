//! OAuth credential resolution.
//!
//! Resolution order for each value:
//! 1. Environment variable
//! 2. Config file (the client secret produces a warning)

use crate::error::{ConfigError, Result};
use crate::types::OAuthSection;

/// Environment variable holding the OAuth client id.
pub const CLIENT_ID_ENV: &str = "PHOTOREEL_CLIENT_ID";

/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_ENV: &str = "PHOTOREEL_CLIENT_SECRET";

/// Environment variable holding the OAuth redirect URI.
pub const REDIRECT_URI_ENV: &str = "PHOTOREEL_REDIRECT_URI";

/// A resolved value with provenance.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    /// The value.
    pub value: String,
    /// Where it was found.
    pub source: SecretSource,
}

impl std::fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("value", &"[redacted]")
            .field("source", &self.source)
            .finish()
    }
}

/// Where a value was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// Environment variable.
    EnvVar(String),
    /// Config file.
    ConfigFile,
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSource::EnvVar(var) => write!(f, "env var {}", var),
            SecretSource::ConfigFile => write!(f, "config file"),
        }
    }
}

/// Fully resolved OAuth client credentials.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub client_id: ResolvedSecret,
    pub client_secret: ResolvedSecret,
    pub redirect_uri: ResolvedSecret,
    /// Warnings to surface to the operator (plaintext secrets).
    pub warnings: Vec<String>,
}

/// Resolve OAuth credentials from the process environment and config.
pub fn resolve_oauth_credentials(section: Option<&OAuthSection>) -> Result<OAuthCredentials> {
    resolve_oauth_credentials_with(section, |name| std::env::var(name).ok())
}

/// Resolve OAuth credentials with an explicit environment lookup.
pub fn resolve_oauth_credentials_with(
    section: Option<&OAuthSection>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<OAuthCredentials> {
    let empty = OAuthSection::default();
    let section = section.unwrap_or(&empty);
    let mut warnings = Vec::new();

    let client_id = resolve_value(
        "client_id",
        CLIENT_ID_ENV,
        section.client_id.as_deref(),
        &env,
    )?;

    let client_secret = resolve_value(
        "client_secret",
        CLIENT_SECRET_ENV,
        section.client_secret.as_deref(),
        &env,
    )?;
    if client_secret.source == SecretSource::ConfigFile {
        warnings.push(format!(
            "[oauth] contains a plaintext client_secret. Consider setting {} instead.",
            CLIENT_SECRET_ENV
        ));
    }

    let redirect_uri = resolve_value(
        "redirect_uri",
        REDIRECT_URI_ENV,
        section.redirect_uri.as_deref(),
        &env,
    )?;
    if !redirect_uri.value.starts_with("http://") && !redirect_uri.value.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            field: "oauth.redirect_uri".to_string(),
            reason: "must be an absolute http(s) URL".to_string(),
        });
    }

    Ok(OAuthCredentials {
        client_id,
        client_secret,
        redirect_uri,
        warnings,
    })
}

fn resolve_value(
    field: &str,
    env_var: &str,
    config_value: Option<&str>,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<ResolvedSecret> {
    if let Some(value) = env(env_var)
        && !value.is_empty()
    {
        return Ok(ResolvedSecret {
            value,
            source: SecretSource::EnvVar(env_var.to_string()),
        });
    }

    match config_value {
        Some(value) if !value.is_empty() => Ok(ResolvedSecret {
            value: value.to_string(),
            source: SecretSource::ConfigFile,
        }),
        _ => Err(ConfigError::MissingField {
            field: field.to_string(),
            context: "[oauth]".to_string(),
            env_var: env_var.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn section() -> OAuthSection {
        OAuthSection {
            client_id: Some("file-id".to_string()),
            client_secret: Some("file-secret".to_string()),
            redirect_uri: Some("http://localhost:3000/api/auth/callback".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_env_overrides_config() {
        let creds = resolve_oauth_credentials_with(
            Some(&section()),
            env_of(&[(CLIENT_ID_ENV, "env-id"), (CLIENT_SECRET_ENV, "env-secret")]),
        )
        .unwrap();

        assert_eq!(creds.client_id.value, "env-id");
        assert_eq!(
            creds.client_id.source,
            SecretSource::EnvVar(CLIENT_ID_ENV.to_string())
        );
        assert_eq!(creds.client_secret.value, "env-secret");
        assert_eq!(creds.redirect_uri.source, SecretSource::ConfigFile);
        assert!(creds.warnings.is_empty());
    }

    #[test]
    fn test_plaintext_secret_warns() {
        let creds = resolve_oauth_credentials_with(Some(&section()), env_of(&[])).unwrap();
        assert_eq!(creds.client_secret.value, "file-secret");
        assert_eq!(creds.warnings.len(), 1);
        assert!(creds.warnings[0].contains(CLIENT_SECRET_ENV));
    }

    #[test]
    fn test_missing_client_id() {
        let err = resolve_oauth_credentials_with(None, env_of(&[])).unwrap_err();
        match err {
            ConfigError::MissingField { field, env_var, .. } => {
                assert_eq!(field, "client_id");
                assert_eq!(env_var, CLIENT_ID_ENV);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_env_value_falls_through() {
        let creds =
            resolve_oauth_credentials_with(Some(&section()), env_of(&[(CLIENT_ID_ENV, "")]))
                .unwrap();
        assert_eq!(creds.client_id.value, "file-id");
    }

    #[test]
    fn test_relative_redirect_uri_rejected() {
        let mut bad = section();
        bad.redirect_uri = Some("/api/auth/callback".to_string());
        let err = resolve_oauth_credentials_with(Some(&bad), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_debug_hides_value() {
        let secret = ResolvedSecret {
            value: "hunter2".to_string(),
            source: SecretSource::ConfigFile,
        };
        assert!(!format!("{:?}", secret).contains("hunter2"));
    }
}
