//! OIDC provider description
//!
//! A [`Provider`] is built once per invocation from operator input and
//! handed unchanged to the token exchange.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::error::{OidcLoginError, Result};
use crate::oidc::certpool::CertPool;

/// The scope every OIDC authorization request carries.
pub const OPENID_SCOPE: &str = "openid";

/// An OpenID Connect issuer and the client registered with it.
#[derive(Clone, PartialEq, Eq)]
pub struct Provider {
    pub issuer_url: Url,
    pub client_id: String,
    /// Optional; public clients have none
    pub client_secret: Option<String>,
    /// Requested in addition to `openid`, in this order
    pub extra_scopes: Vec<String>,
    pub cert_pool: Option<CertPool>,
    pub skip_tls_verify: bool,
}

impl Provider {
    /// Creates a provider for `issuer_url` and `client_id`.
    ///
    /// # Errors
    ///
    /// Returns [`OidcLoginError::InvalidProvider`] when the issuer is not an
    /// absolute `http(s)` URL or the client ID is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use oidc_login::oidc::Provider;
    ///
    /// let provider = Provider::new("https://issuer.example.com", "my-client").unwrap();
    /// assert_eq!(provider.scopes(), vec!["openid"]);
    /// ```
    pub fn new(issuer_url: &str, client_id: &str) -> Result<Self> {
        let issuer_url = Url::parse(issuer_url).map_err(|e| {
            OidcLoginError::InvalidProvider(format!("invalid issuer URL {issuer_url:?}: {e}"))
        })?;
        if issuer_url.scheme() != "https" && issuer_url.scheme() != "http" {
            return Err(OidcLoginError::InvalidProvider(format!(
                "issuer URL must use http or https, got {}",
                issuer_url.scheme()
            ))
            .into());
        }
        if client_id.is_empty() {
            return Err(OidcLoginError::InvalidProvider("client ID is empty".to_string()).into());
        }
        Ok(Self {
            issuer_url,
            client_id: client_id.to_string(),
            client_secret: None,
            extra_scopes: Vec::new(),
            cert_pool: None,
            skip_tls_verify: false,
        })
    }

    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.client_secret = (!secret.is_empty()).then_some(secret);
        self
    }

    pub fn with_extra_scopes(mut self, scopes: Vec<String>) -> Self {
        self.extra_scopes = scopes;
        self
    }

    pub fn with_cert_pool(mut self, pool: CertPool) -> Self {
        self.cert_pool = Some(pool);
        self
    }

    pub fn with_skip_tls_verify(mut self, skip: bool) -> Self {
        self.skip_tls_verify = skip;
        self
    }

    /// Scopes for the authorization request: `openid`, then the extra
    /// scopes in order. An extra `openid` is not repeated.
    pub fn scopes(&self) -> Vec<&str> {
        std::iter::once(OPENID_SCOPE)
            .chain(
                self.extra_scopes
                    .iter()
                    .map(String::as_str)
                    .filter(|s| *s != OPENID_SCOPE),
            )
            .collect()
    }

    /// A serializable view with the client secret left out.
    pub fn summary(&self) -> ProviderSummary<'_> {
        ProviderSummary {
            issuer_url: self.issuer_url.as_str(),
            client_id: &self.client_id,
            has_client_secret: self.client_secret.is_some(),
            scopes: self.scopes(),
            certificate_count: self.cert_pool.as_ref().map_or(0, CertPool::len),
            skip_tls_verify: self.skip_tls_verify,
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("issuer_url", &self.issuer_url.as_str())
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("extra_scopes", &self.extra_scopes)
            .field("cert_pool", &self.cert_pool)
            .field("skip_tls_verify", &self.skip_tls_verify)
            .finish()
    }
}

/// What the `plan` command prints about a provider.
#[derive(Debug, Serialize)]
pub struct ProviderSummary<'a> {
    pub issuer_url: &'a str,
    pub client_id: &'a str,
    pub has_client_secret: bool,
    pub scopes: Vec<&'a str>,
    pub certificate_count: usize,
    pub skip_tls_verify: bool,
}
