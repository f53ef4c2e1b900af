//! Command-line interface definition for oidc-login
//!
//! This module defines the CLI structure using clap's derive API. Every
//! option is optional here; defaults live in [`crate::config::Config`] so
//! that the config file and environment can supply them.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// oidc-login - resolve an OpenID Connect login
///
/// Works out which grant a login will use, where the callback listener
/// binds, and which issuer it talks to.
#[derive(Parser, Debug, Clone)]
#[command(name = "oidc-login")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for oidc-login
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve the grant strategy and print it as JSON
    Resolve {
        #[command(flatten)]
        auth: AuthenticationArgs,
    },

    /// Resolve the provider and grant strategy and print the login plan as JSON
    Plan {
        #[command(flatten)]
        provider: ProviderArgs,

        #[command(flatten)]
        auth: AuthenticationArgs,
    },
}

impl Commands {
    /// Authentication flags of whichever command was given
    pub fn auth(&self) -> &AuthenticationArgs {
        match self {
            Commands::Resolve { auth } | Commands::Plan { auth, .. } => auth,
        }
    }

    /// Provider flags, when the command takes them
    pub fn provider(&self) -> Option<&ProviderArgs> {
        match self {
            Commands::Resolve { .. } => None,
            Commands::Plan { provider, .. } => Some(provider),
        }
    }
}

/// Flags that select and configure the grant
#[derive(Args, Debug, Clone, Default)]
pub struct AuthenticationArgs {
    /// Authorization grant type to use. One of (auto|authcode|authcode-keyboard|password)
    #[arg(long)]
    pub grant_type: Option<String>,

    /// [authcode] Address to bind to the local server. If multiple addresses are set, it will try binding in order
    #[arg(long, value_delimiter = ',')]
    pub listen_address: Vec<String>,

    /// [authcode] deprecated: port to bind to the local server. Use --listen-address instead
    #[arg(long, value_delimiter = ',')]
    pub listen_port: Vec<u16>,

    /// [authcode] Do not open the browser automatically
    #[arg(long)]
    pub skip_open_browser: bool,

    /// [authcode] Hostname of the redirect URL
    #[arg(long = "oidc-redirect-url-hostname")]
    pub redirect_url_hostname: Option<String>,

    /// [authcode, authcode-keyboard] Extra query parameters to send with an authentication request (KEY=VALUE)
    #[arg(
        long = "oidc-auth-request-extra-params",
        value_delimiter = ',',
        value_parser = parse_key_val
    )]
    pub auth_request_extra_params: Vec<(String, String)>,

    /// [password] Username for resource owner password credentials grant
    #[arg(long)]
    pub username: Option<String>,

    /// [password] Password for resource owner password credentials grant
    #[arg(long)]
    pub password: Option<String>,
}

/// Flags describing the OIDC provider
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Issuer URL of the provider
    #[arg(long = "oidc-issuer-url")]
    pub issuer_url: Option<String>,

    /// Client ID of the provider
    #[arg(long = "oidc-client-id")]
    pub client_id: Option<String>,

    /// Client secret of the provider
    #[arg(long = "oidc-client-secret")]
    pub client_secret: Option<String>,

    /// Scopes to request to the provider, in addition to openid
    #[arg(long = "oidc-extra-scope", value_delimiter = ',')]
    pub extra_scopes: Vec<String>,

    /// Path to a cert file for the certificate authority
    #[arg(long = "certificate-authority")]
    pub certificate_authority: Vec<PathBuf>,

    /// If set, the server's certificate will not be checked for validity
    #[arg(long)]
    pub insecure_skip_tls_verify: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            json_logs: false,
            command: Commands::Resolve {
                auth: AuthenticationArgs::default(),
            },
        }
    }
}
