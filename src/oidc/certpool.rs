//! TLS trust material for talking to the issuer
//!
//! Certificates are kept as PEM text. Parsing the DER inside is left to
//! whichever TLS stack the token exchange uses.

use std::path::Path;

use base64::Engine as _;

use crate::error::{OidcLoginError, Result};

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";

/// An ordered collection of PEM-encoded CA certificates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertPool {
    certificates: Vec<String>,
}

impl CertPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every certificate found in the PEM file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OidcLoginError::CertificateAuthority`] when the file cannot
    /// be read or holds no certificate.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OidcLoginError::CertificateAuthority(format!(
                "could not read {}: {}",
                path.display(),
                e
            ))
        })?;
        let added = self.add_pem(&contents);
        if added == 0 {
            return Err(OidcLoginError::CertificateAuthority(format!(
                "no certificate found in {}",
                path.display()
            ))
            .into());
        }
        tracing::debug!("Loaded {} certificate(s) from {}", added, path.display());
        Ok(())
    }

    /// Adds certificates from base64-encoded PEM text, as found in a
    /// kubeconfig `certificate-authority-data` field.
    ///
    /// # Errors
    ///
    /// Returns [`OidcLoginError::CertificateAuthority`] when the value is
    /// not valid base64 or decodes to text without a certificate.
    pub fn add_encoded(&mut self, encoded: &str) -> Result<()> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| OidcLoginError::CertificateAuthority(format!("invalid base64: {e}")))?;
        let text = String::from_utf8(decoded).map_err(|e| {
            OidcLoginError::CertificateAuthority(format!("decoded data is not PEM text: {e}"))
        })?;
        if self.add_pem(&text) == 0 {
            return Err(OidcLoginError::CertificateAuthority(
                "no certificate found in encoded data".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// PEM blocks in the order they were added.
    pub fn certificates(&self) -> &[String] {
        &self.certificates
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    fn add_pem(&mut self, text: &str) -> usize {
        let before = self.certificates.len();
        let mut rest = text;
        while let Some(start) = rest.find(PEM_BEGIN) {
            let Some(end) = rest[start..].find(PEM_END) else {
                break;
            };
            let block_end = start + end + PEM_END.len();
            self.certificates.push(rest[start..block_end].to_string());
            rest = &rest[block_end..];
        }
        self.certificates.len() - before
    }
}
