//! oidc-login - OpenID Connect login resolution library
//!
//! This library decides how an OpenID Connect login runs: which grant it
//! uses, where the authorization code callback listener binds, and which
//! issuer and client it talks to. It also issues the `state` and `nonce`
//! values that protect the authorization round-trip.
//!
//! # Architecture
//!
//! - `auth`: listen address resolution, grant resolution, secure tokens
//! - `oidc`: provider and token set data contracts
//! - `config`: configuration loading and validation
//! - `cli`: command-line interface definition
//! - `commands`: handlers behind the binary's subcommands
//! - `error`: error types and result aliases
//!
//! # Example
//!
//! ```
//! use oidc_login::auth::{AuthRequestTokens, GrantOptionSet, RawAuthConfig};
//!
//! let raw = RawAuthConfig::default();
//! let grant = raw.grant_option_set()?;
//! assert!(matches!(grant, GrantOptionSet::AuthCode(_)));
//!
//! let tokens = AuthRequestTokens::generate()?;
//! assert_ne!(tokens.state, tokens.nonce);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod oidc;

// Re-export commonly used types
pub use auth::{GrantOptionSet, RawAuthConfig, SecureToken};
pub use config::Config;
pub use error::{OidcLoginError, Result};
pub use oidc::{Provider, TokenSet};

#[cfg(test)]
pub mod test_utils;
