//! Grant strategy resolution
//!
//! Turns the flat, possibly conflicting authentication options gathered from
//! the config file, environment, and command line into exactly one
//! [`GrantOptionSet`] variant.
//!
//! Resolution order, first match wins:
//!
//! | grant type          | username | result                  |
//! |---------------------|----------|-------------------------|
//! | `authcode`          | any      | [`AuthCodeOption`]      |
//! | `auto`              | empty    | [`AuthCodeOption`]      |
//! | `authcode-keyboard` | any      | [`AuthCodeKeyboardOption`] |
//! | `password`          | any      | [`RopcOption`]          |
//! | `auto`              | set      | [`RopcOption`]          |
//! | anything else       |          | `UnsupportedGrantType`  |

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::auth::listen::{default_listen_address, determine_listen_address};
use crate::error::{OidcLoginError, Result};

// ---------------------------------------------------------------------------
// GrantType
// ---------------------------------------------------------------------------

/// The grant type requested by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrantType {
    /// Pick authcode or password depending on whether a username was given
    #[default]
    Auto,
    /// Authorization code flow with a local callback listener
    AuthCode,
    /// Authorization code flow where the user pastes the code
    AuthCodeKeyboard,
    /// Resource owner password credentials
    Password,
}

impl GrantType {
    /// Every accepted grant type, in the order shown to users.
    pub const ALL: [GrantType; 4] = [
        GrantType::Auto,
        GrantType::AuthCode,
        GrantType::AuthCodeKeyboard,
        GrantType::Password,
    ];

    /// The command-line spelling of this grant type.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::Auto => "auto",
            GrantType::AuthCode => "authcode",
            GrantType::AuthCodeKeyboard => "authcode-keyboard",
            GrantType::Password => "password",
        }
    }

    /// The accepted spellings joined with `|`, e.g. for help text.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(GrantType::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = OidcLoginError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| OidcLoginError::UnsupportedGrantType {
                grant_type: s.to_string(),
                allowed: Self::allowed(),
            })
    }
}

// ---------------------------------------------------------------------------
// RawAuthConfig
// ---------------------------------------------------------------------------

/// Authentication options as gathered from the operator, before resolution.
///
/// `grant_type` stays a string here; it is only interpreted by
/// [`RawAuthConfig::grant_option_set`].
#[derive(Clone, PartialEq, Eq)]
pub struct RawAuthConfig {
    pub grant_type: String,
    /// Candidate bind addresses, tried in order
    pub listen_address: Vec<String>,
    /// Deprecated; when non-empty replaces `listen_address`
    pub listen_port: Vec<u16>,
    pub skip_open_browser: bool,
    pub redirect_url_hostname: String,
    pub auth_request_extra_params: BTreeMap<String, String>,
    pub username: String,
    pub password: String,
}

impl Default for RawAuthConfig {
    fn default() -> Self {
        Self {
            grant_type: GrantType::Auto.to_string(),
            listen_address: default_listen_address(),
            listen_port: Vec::new(),
            skip_open_browser: false,
            redirect_url_hostname: "localhost".to_string(),
            auth_request_extra_params: BTreeMap::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for RawAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawAuthConfig")
            .field("grant_type", &self.grant_type)
            .field("listen_address", &self.listen_address)
            .field("listen_port", &self.listen_port)
            .field("skip_open_browser", &self.skip_open_browser)
            .field("redirect_url_hostname", &self.redirect_url_hostname)
            .field("auth_request_extra_params", &self.auth_request_extra_params)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

impl RawAuthConfig {
    /// Addresses the callback listener should try, see
    /// [`determine_listen_address`].
    pub fn listen_addresses(&self) -> Vec<String> {
        determine_listen_address(&self.listen_address, &self.listen_port)
    }

    /// Whether `auto` resolves to the password grant.
    ///
    /// A username is taken as the sign of a headless login; without one,
    /// `auto` falls back to the browser-based authorization code flow. This
    /// is the only place the heuristic lives.
    pub fn auto_selects_password_grant(&self) -> bool {
        !self.username.is_empty()
    }

    /// Resolves these options into a single grant strategy.
    ///
    /// The password is passed through as given, even when empty; the token
    /// endpoint rejects bad credentials.
    ///
    /// # Errors
    ///
    /// Returns [`OidcLoginError::UnsupportedGrantType`] when `grant_type` is
    /// not one of `auto`, `authcode`, `authcode-keyboard`, `password`.
    ///
    /// # Examples
    ///
    /// ```
    /// use oidc_login::auth::grant::{GrantOptionSet, RawAuthConfig};
    ///
    /// let raw = RawAuthConfig {
    ///     username: "alice".to_string(),
    ///     ..Default::default()
    /// };
    /// let set = raw.grant_option_set().unwrap();
    /// assert!(matches!(set, GrantOptionSet::Ropc(ref o) if o.username == "alice"));
    /// ```
    pub fn grant_option_set(&self) -> Result<GrantOptionSet> {
        let grant_type: GrantType = self.grant_type.parse()?;
        let auto_password = self.auto_selects_password_grant();

        let set = match grant_type {
            GrantType::AuthCode => self.auth_code_option(),
            GrantType::Auto if !auto_password => self.auth_code_option(),
            GrantType::AuthCodeKeyboard => {
                GrantOptionSet::AuthCodeKeyboard(AuthCodeKeyboardOption {
                    auth_request_extra_params: self.auth_request_extra_params.clone(),
                })
            }
            GrantType::Password | GrantType::Auto => GrantOptionSet::Ropc(RopcOption {
                username: self.username.clone(),
                password: self.password.clone(),
            }),
        };

        tracing::debug!(
            grant_type = %grant_type,
            selected = set.name(),
            "Resolved grant option set"
        );
        Ok(set)
    }

    fn auth_code_option(&self) -> GrantOptionSet {
        GrantOptionSet::AuthCode(AuthCodeOption {
            bind_address: self.listen_addresses(),
            skip_open_browser: self.skip_open_browser,
            redirect_url_hostname: self.redirect_url_hostname.clone(),
            auth_request_extra_params: self.auth_request_extra_params.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// GrantOptionSet
// ---------------------------------------------------------------------------

/// Exactly one resolved grant strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grant")]
pub enum GrantOptionSet {
    /// Browser login with a local redirect listener
    #[serde(rename = "authcode")]
    AuthCode(AuthCodeOption),
    /// Browser login where the code is typed back in
    #[serde(rename = "authcode-keyboard")]
    AuthCodeKeyboard(AuthCodeKeyboardOption),
    /// Resource owner password credentials
    #[serde(rename = "password")]
    Ropc(RopcOption),
}

impl GrantOptionSet {
    /// Short name of the selected strategy, matching its grant type spelling.
    pub fn name(&self) -> &'static str {
        match self {
            GrantOptionSet::AuthCode(_) => GrantType::AuthCode.as_str(),
            GrantOptionSet::AuthCodeKeyboard(_) => GrantType::AuthCodeKeyboard.as_str(),
            GrantOptionSet::Ropc(_) => GrantType::Password.as_str(),
        }
    }

    pub fn auth_code(&self) -> Option<&AuthCodeOption> {
        match self {
            GrantOptionSet::AuthCode(o) => Some(o),
            _ => None,
        }
    }

    pub fn auth_code_keyboard(&self) -> Option<&AuthCodeKeyboardOption> {
        match self {
            GrantOptionSet::AuthCodeKeyboard(o) => Some(o),
            _ => None,
        }
    }

    pub fn ropc(&self) -> Option<&RopcOption> {
        match self {
            GrantOptionSet::Ropc(o) => Some(o),
            _ => None,
        }
    }
}

/// Options for the authorization code flow with a local listener.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthCodeOption {
    /// Addresses to try binding, in order, until one succeeds
    pub bind_address: Vec<String>,
    pub skip_open_browser: bool,
    /// Hostname used in the `redirect_uri`
    pub redirect_url_hostname: String,
    pub auth_request_extra_params: BTreeMap<String, String>,
}

/// Options for the authorization code flow with manual code entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthCodeKeyboardOption {
    pub auth_request_extra_params: BTreeMap<String, String>,
}

/// Options for the resource owner password credentials grant.
///
/// The password is never serialized and `Debug` redacts it.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct RopcOption {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for RopcOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RopcOption")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
