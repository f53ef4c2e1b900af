//! Configuration management for oidc-login
//!
//! This module handles loading, parsing, validating, and merging
//! configuration from files, environment variables, and CLI overrides.
//! Later sources win: defaults, then the YAML file, then `OIDC_LOGIN_*`
//! environment variables, then command-line flags.

use crate::auth::grant::{GrantType, RawAuthConfig};
use crate::auth::listen::default_listen_address;
use crate::cli::{AuthenticationArgs, Cli, ProviderArgs};
use crate::error::{OidcLoginError, Result};
use crate::oidc::{CertPool, Provider};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure for oidc-login
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// How the login is performed
    #[serde(default)]
    pub authentication: AuthenticationConfig,

    /// Which issuer the login talks to
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Grant selection and authorization code settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthenticationConfig {
    /// One of `auto`, `authcode`, `authcode-keyboard`, `password`
    #[serde(default = "default_grant_type")]
    pub grant_type: String,

    /// Addresses the callback listener tries, in order
    #[serde(default = "default_listen_address")]
    pub listen_address: Vec<String>,

    /// Deprecated; replaces `listen_address` when non-empty
    #[serde(default)]
    pub listen_port: Vec<u16>,

    #[serde(default)]
    pub skip_open_browser: bool,

    #[serde(default = "default_redirect_url_hostname")]
    pub redirect_url_hostname: String,

    #[serde(default)]
    pub auth_request_extra_params: BTreeMap<String, String>,

    #[serde(default)]
    pub username: String,

    /// Only taken from the environment or command line
    #[serde(skip)]
    pub password: String,
}

fn default_grant_type() -> String {
    GrantType::default().to_string()
}

fn default_redirect_url_hostname() -> String {
    "localhost".to_string()
}

impl Default for AuthenticationConfig {
    fn default() -> Self {
        Self {
            grant_type: default_grant_type(),
            listen_address: default_listen_address(),
            listen_port: Vec::new(),
            skip_open_browser: false,
            redirect_url_hostname: default_redirect_url_hostname(),
            auth_request_extra_params: BTreeMap::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl std::fmt::Debug for AuthenticationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Same layout as the resolver input, which already redacts the password
        std::fmt::Debug::fmt(&self.to_raw(), f)
    }
}

impl AuthenticationConfig {
    fn to_raw(&self) -> RawAuthConfig {
        RawAuthConfig {
            grant_type: self.grant_type.clone(),
            listen_address: self.listen_address.clone(),
            listen_port: self.listen_port.clone(),
            skip_open_browser: self.skip_open_browser,
            redirect_url_hostname: self.redirect_url_hostname.clone(),
            auth_request_extra_params: self.auth_request_extra_params.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// OIDC provider settings
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub issuer_url: Option<String>,

    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,

    #[serde(default)]
    pub extra_scopes: Vec<String>,

    /// PEM files with CA certificates for the issuer
    #[serde(default)]
    pub certificate_authority: Vec<PathBuf>,

    /// Base64-encoded PEM, as in kubeconfig `certificate-authority-data`
    #[serde(default)]
    pub certificate_authority_data: Option<String>,

    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("issuer_url", &self.issuer_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("extra_scopes", &self.extra_scopes)
            .field("certificate_authority", &self.certificate_authority)
            .field(
                "certificate_authority_data",
                &self.certificate_authority_data.is_some(),
            )
            .field("insecure_skip_tls_verify", &self.insecure_skip_tls_verify)
            .finish()
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; built-in defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OidcLoginError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| OidcLoginError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        let auth = &mut self.authentication;
        if let Ok(grant_type) = std::env::var("OIDC_LOGIN_GRANT_TYPE") {
            auth.grant_type = grant_type;
        }

        if let Ok(addresses) = std::env::var("OIDC_LOGIN_LISTEN_ADDRESS") {
            let parsed: Vec<String> = addresses
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if parsed.is_empty() {
                tracing::warn!("Ignoring empty OIDC_LOGIN_LISTEN_ADDRESS");
            } else {
                auth.listen_address = parsed;
            }
        }

        if let Ok(skip) = std::env::var("OIDC_LOGIN_SKIP_OPEN_BROWSER") {
            match skip.to_lowercase().as_str() {
                "1" | "true" | "yes" => auth.skip_open_browser = true,
                "0" | "false" | "no" => auth.skip_open_browser = false,
                _ => tracing::warn!("Invalid OIDC_LOGIN_SKIP_OPEN_BROWSER: {}", skip),
            }
        }

        if let Ok(hostname) = std::env::var("OIDC_LOGIN_REDIRECT_URL_HOSTNAME") {
            auth.redirect_url_hostname = hostname;
        }

        if let Ok(username) = std::env::var("OIDC_LOGIN_USERNAME") {
            auth.username = username;
        }

        if let Ok(password) = std::env::var("OIDC_LOGIN_PASSWORD") {
            auth.password = password;
        }

        let provider = &mut self.provider;
        if let Ok(issuer_url) = std::env::var("OIDC_LOGIN_ISSUER_URL") {
            provider.issuer_url = Some(issuer_url);
        }

        if let Ok(client_id) = std::env::var("OIDC_LOGIN_CLIENT_ID") {
            provider.client_id = Some(client_id);
        }

        if let Ok(client_secret) = std::env::var("OIDC_LOGIN_CLIENT_SECRET") {
            provider.client_secret = Some(client_secret);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
        self.authentication.apply_args(cli.command.auth());
        if let Some(provider) = cli.command.provider() {
            self.provider.apply_args(provider);
        }
    }

    /// Validate the configuration
    ///
    /// The grant type itself, even when empty, is checked during
    /// resolution, where the error can name the accepted values. Addresses
    /// are only required when no legacy port replaces them.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let auth = &self.authentication;
        if auth.listen_address.is_empty() && auth.listen_port.is_empty() {
            return Err(OidcLoginError::Config(
                "listen_address must contain at least one address".to_string(),
            )
            .into());
        }

        if auth.listen_address.iter().any(|a| a.trim().is_empty()) {
            return Err(
                OidcLoginError::Config("listen_address entries cannot be empty".to_string()).into(),
            );
        }

        if auth.redirect_url_hostname.is_empty() {
            return Err(
                OidcLoginError::Config("redirect_url_hostname cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }

    /// The authentication options as input to grant resolution.
    pub fn raw_auth_config(&self) -> RawAuthConfig {
        self.authentication.to_raw()
    }

    /// Builds the [`Provider`] for this login.
    ///
    /// # Errors
    ///
    /// Returns [`OidcLoginError::Config`] when the issuer URL or client ID is
    /// missing, and propagates provider and certificate errors.
    pub fn provider(&self) -> Result<Provider> {
        let p = &self.provider;
        let issuer_url = p.issuer_url.as_deref().ok_or_else(|| {
            OidcLoginError::Config("--oidc-issuer-url is required".to_string())
        })?;
        let client_id = p
            .client_id
            .as_deref()
            .ok_or_else(|| OidcLoginError::Config("--oidc-client-id is required".to_string()))?;

        let mut provider = Provider::new(issuer_url, client_id)?
            .with_extra_scopes(p.extra_scopes.clone())
            .with_skip_tls_verify(p.insecure_skip_tls_verify);
        if let Some(secret) = &p.client_secret {
            provider = provider.with_client_secret(secret.clone());
        }

        if !p.certificate_authority.is_empty() || p.certificate_authority_data.is_some() {
            let mut pool = CertPool::new();
            for path in &p.certificate_authority {
                pool.add_file(path)?;
            }
            if let Some(data) = &p.certificate_authority_data {
                pool.add_encoded(data)?;
            }
            provider = provider.with_cert_pool(pool);
        }

        if provider.skip_tls_verify {
            tracing::warn!("TLS verification is disabled for {}", provider.issuer_url);
        }
        Ok(provider)
    }
}

impl AuthenticationConfig {
    fn apply_args(&mut self, args: &AuthenticationArgs) {
        if let Some(grant_type) = &args.grant_type {
            self.grant_type = grant_type.clone();
        }
        if !args.listen_address.is_empty() {
            self.listen_address = args.listen_address.clone();
        }
        if !args.listen_port.is_empty() {
            self.listen_port = args.listen_port.clone();
        }
        if args.skip_open_browser {
            self.skip_open_browser = true;
        }
        if let Some(hostname) = &args.redirect_url_hostname {
            self.redirect_url_hostname = hostname.clone();
        }
        // Merged key by key; file entries without a CLI counterpart survive
        for (key, value) in &args.auth_request_extra_params {
            self.auth_request_extra_params.insert(key.clone(), value.clone());
        }
        if let Some(username) = &args.username {
            self.username = username.clone();
        }
        if let Some(password) = &args.password {
            self.password = password.clone();
        }
    }
}

impl ProviderConfig {
    fn apply_args(&mut self, args: &ProviderArgs) {
        if let Some(issuer_url) = &args.issuer_url {
            self.issuer_url = Some(issuer_url.clone());
        }
        if let Some(client_id) = &args.client_id {
            self.client_id = Some(client_id.clone());
        }
        if let Some(client_secret) = &args.client_secret {
            self.client_secret = Some(client_secret.clone());
        }
        if !args.extra_scopes.is_empty() {
            self.extra_scopes = args.extra_scopes.clone();
        }
        if !args.certificate_authority.is_empty() {
            self.certificate_authority = args.certificate_authority.clone();
        }
        if args.insecure_skip_tls_verify {
            self.insecure_skip_tls_verify = true;
        }
    }
}
