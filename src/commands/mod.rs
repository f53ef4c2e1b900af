/*!
Command handlers for the CLI

- `resolve` -- print the resolved grant strategy
- `plan`    -- print the provider and grant strategy a login would use

Both handlers render JSON and leave printing to the entrypoint, so they can
be tested without capturing stdout. Secrets are never part of the output.
*/

use serde::Serialize;

use crate::auth::grant::GrantOptionSet;
use crate::config::Config;
use crate::error::Result;
use crate::oidc::provider::ProviderSummary;

/// What `plan` prints
#[derive(Debug, Serialize)]
pub struct LoginPlan<'a> {
    pub provider: ProviderSummary<'a>,
    pub grant: &'a GrantOptionSet,
}

// Resolve command handler
pub mod resolve {
    //! Resolves the grant strategy from the merged configuration.

    use super::*;

    /// Resolve the grant and render it as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported grant type
    pub fn run_resolve(config: &Config) -> Result<String> {
        let grant = config.raw_auth_config().grant_option_set()?;
        tracing::info!("Selected {} grant", grant.name());
        Ok(serde_json::to_string_pretty(&grant)?)
    }
}

// Plan command handler
pub mod plan {
    //! Resolves the provider and grant strategy together.

    use super::*;

    /// Build the login plan and render it as pretty JSON
    ///
    /// The provider is resolved first so that a missing issuer is reported
    /// before grant problems.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider is incomplete or invalid, or the
    /// grant type is unsupported
    pub fn run_plan(config: &Config) -> Result<String> {
        let provider = config.provider()?;
        let grant = config.raw_auth_config().grant_option_set()?;
        tracing::info!(
            "Planned {} grant against {}",
            grant.name(),
            provider.issuer_url
        );
        let plan = LoginPlan {
            provider: provider.summary(),
            grant: &grant,
        };
        Ok(serde_json::to_string_pretty(&plan)?)
    }
}
