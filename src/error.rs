//! Error types for oidc-login
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for oidc-login operations
///
/// Covers configuration loading, grant resolution, provider construction,
/// and secure token generation. Address resolution never fails and has no
/// variant here.
#[derive(Error, Debug)]
pub enum OidcLoginError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The grant type matched none of the accepted spellings
    #[error("grant-type must be one of ({allowed}) but got {grant_type:?}")]
    UnsupportedGrantType {
        /// The value the operator supplied
        grant_type: String,
        /// The accepted grant types joined with `|`
        allowed: String,
    },

    /// The operating system random source could not supply bytes
    #[error("could not generate a random: {0}")]
    RandomSourceUnavailable(String),

    /// The provider description is unusable (bad issuer URL, missing client ID)
    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    /// TLS trust material could not be loaded
    #[error("Certificate authority error: {0}")]
    CertificateAuthority(String),
}

/// Result type alias for oidc-login operations
///
/// Uses `anyhow::Error` so callers can attach context; the typed
/// [`OidcLoginError`] is recovered with `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
