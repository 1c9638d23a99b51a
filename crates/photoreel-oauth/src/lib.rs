//! OAuth 2.0 authorization-code flow for the Google Photos Library API.
//!
//! # Components
//!
//! - [`oauth`]: provider endpoints, authorization URL, token payloads
//! - [`token_client`]: code-for-token exchange and access token refresh

pub mod error;
pub mod oauth;
pub mod token_client;

pub use error::{OAuthError, Result};
pub use oauth::{AuthTokens, OAuthConfig, build_authorization_url};
pub use token_client::{TokenClient, exchange_code_for_tokens};
