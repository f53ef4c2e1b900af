//! Tokens produced by the OIDC exchange
//!
//! The exchange (authorization code, password grant, or refresh) returns a
//! [`TokenSet`]; callers cache it and check its claims for expiry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims decoded from an ID token.
///
/// Signature verification happens before these are built; this type only
/// carries the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// The `sub` claim
    pub subject: String,

    /// The `exp` claim
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expiry: DateTime<Utc>,

    /// The full claim set, pretty-printed for display
    #[serde(default)]
    pub pretty: String,
}

impl IdTokenClaims {
    /// Returns `true` when the ID token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }
}

/// ID token, optional refresh token, and the decoded ID token claims.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub id_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub id_token_claims: IdTokenClaims,
}

impl TokenSet {
    /// Whether the ID token is still usable at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.id_token_claims.is_expired_at(now)
    }

    /// Whether a refresh can be attempted instead of a full login.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("id_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("id_token_claims", &self.id_token_claims)
            .finish()
    }
}
