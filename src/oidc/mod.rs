//! Data contracts shared with the OIDC token exchange
//!
//! - [`provider`]   -- issuer, client, and TLS settings for one login
//! - [`certpool`]   -- PEM trust anchors a [`provider::Provider`] may carry
//! - [`token_set`]  -- tokens returned by the exchange

pub mod certpool;
pub mod provider;
pub mod token_set;

pub use certpool::CertPool;
pub use provider::Provider;
pub use token_set::{IdTokenClaims, TokenSet};
