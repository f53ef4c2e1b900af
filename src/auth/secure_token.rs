//! Secure single-use tokens for OAuth2 `state` and OIDC `nonce`
//!
//! Each token is 32 bytes read from the operating system random source and
//! encoded as base64url without padding (43 characters). A failing source
//! is surfaced as [`OidcLoginError::RandomSourceUnavailable`]; nothing here
//! falls back to a non-cryptographic generator.
//!
//! `state` protects the authorization code callback against cross-site
//! request forgery and `nonce` binds the ID token to the request. The two
//! must always come from separate draws; [`AuthRequestTokens::generate`]
//! does that for callers building an authorization request.

use std::fmt;

use base64::Engine as _;
use rand::rngs::OsRng;
use rand::TryCryptoRng;

use crate::error::{OidcLoginError, Result};

/// Number of random bytes behind every token.
pub const TOKEN_BYTES: usize = 32;

/// Length of an encoded token: 32 bytes in unpadded base64url.
pub const ENCODED_TOKEN_LEN: usize = 43;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generates a fresh opaque token from the operating system random source.
///
/// # Errors
///
/// Returns [`OidcLoginError::RandomSourceUnavailable`] when the OS source
/// cannot be read.
///
/// # Examples
///
/// ```
/// use oidc_login::auth::secure_token::new_opaque_token;
///
/// let token = new_opaque_token().unwrap();
/// assert_eq!(token.len(), 43);
/// assert!(!token.contains('='));
/// ```
pub fn new_opaque_token() -> Result<String> {
    new_opaque_token_from(&mut OsRng)
}

/// Generates an opaque token from the given cryptographic source.
///
/// Only [`TryCryptoRng`] sources are accepted, so a seeded or otherwise
/// predictable generator cannot be passed in by accident.
///
/// # Errors
///
/// Returns [`OidcLoginError::RandomSourceUnavailable`] when `rng` fails.
pub fn new_opaque_token_from<R>(rng: &mut R) -> Result<String>
where
    R: TryCryptoRng + ?Sized,
{
    let mut bytes = [0u8; TOKEN_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| OidcLoginError::RandomSourceUnavailable(format!("read error: {e}")))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

// ---------------------------------------------------------------------------
// SecureToken
// ---------------------------------------------------------------------------

/// An opaque, single-use token.
///
/// The value is only reachable through [`SecureToken::as_str`]; `Debug`
/// prints a placeholder so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureToken(String);

impl SecureToken {
    /// Generates a token for the OAuth2 `state` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`OidcLoginError::RandomSourceUnavailable`] when the OS
    /// source fails.
    pub fn new_state() -> Result<Self> {
        new_opaque_token().map(Self)
    }

    /// Generates a token for the OIDC `nonce` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`OidcLoginError::RandomSourceUnavailable`] when the OS
    /// source fails.
    pub fn new_nonce() -> Result<Self> {
        new_opaque_token().map(Self)
    }

    /// The encoded token, for placing into an authorization request.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `received` equals this token.
    ///
    /// Used when validating the `state` echoed back on the callback or the
    /// `nonce` claim of an ID token.
    pub fn matches(&self, received: &str) -> bool {
        self.0 == received
    }
}

impl fmt::Debug for SecureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureToken(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// AuthRequestTokens
// ---------------------------------------------------------------------------

/// The `state` and `nonce` pair for one authorization round-trip.
#[derive(Debug, Clone)]
pub struct AuthRequestTokens {
    /// CSRF protection for the redirect callback.
    pub state: SecureToken,
    /// Replay protection, echoed back inside the ID token.
    pub nonce: SecureToken,
}

impl AuthRequestTokens {
    /// Draws `state` and `nonce` independently.
    ///
    /// # Errors
    ///
    /// Returns [`OidcLoginError::RandomSourceUnavailable`] when either draw
    /// fails.
    pub fn generate() -> Result<Self> {
        Ok(Self {
            state: SecureToken::new_state()?,
            nonce: SecureToken::new_nonce()?,
        })
    }
}
