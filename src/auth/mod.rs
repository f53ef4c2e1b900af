//! Login strategy resolution and request protection
//!
//! # Module Layout
//!
//! - [`listen`]       -- callback listener bind address resolution
//! - [`grant`]        -- grant type resolution into a [`grant::GrantOptionSet`]
//! - [`secure_token`] -- `state` and `nonce` generation

pub mod grant;
pub mod listen;
pub mod secure_token;

pub use grant::{
    AuthCodeKeyboardOption, AuthCodeOption, GrantOptionSet, GrantType, RawAuthConfig, RopcOption,
};
pub use listen::{determine_listen_address, DEFAULT_LISTEN_ADDRESS};
pub use secure_token::{new_opaque_token, AuthRequestTokens, SecureToken};
