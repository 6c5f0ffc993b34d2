// SPDX-License-Identifier: Apache-2.0

//! GitHub client construction.
//!
//! Builds an Octocrab client from a [`TokenProvider`] and the `[github]`
//! configuration section. Connect and read timeouts are always set so a
//! stalled request cannot hang a whole aggregation pass.

use std::time::Duration;

use octocrab::Octocrab;
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument, warn};

use crate::auth::TokenProvider;
use crate::config::GitHubConfig;
use crate::error::BoardError;

/// Creates an Octocrab client using the token supplied by `provider`.
///
/// When the provider has no token the client is built unauthenticated,
/// which works against public repositories at a much lower rate limit.
///
/// # Errors
///
/// Returns an error if the API URL is invalid or the client cannot be built.
#[instrument(skip(provider, config), fields(api_url = ?config.api_url))]
pub fn create_client(
    provider: &dyn TokenProvider,
    config: &GitHubConfig,
) -> Result<Octocrab, BoardError> {
    let timeout = Duration::from_secs(config.api_timeout_seconds);

    let mut builder = Octocrab::builder()
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout));

    if let Some(api_url) = &config.api_url {
        builder = builder.base_uri(api_url.as_str())?;
    }

    match provider.github_token() {
        Some(token) => {
            info!("Creating authenticated GitHub client");
            builder = builder.personal_token(token.expose_secret().to_string());
        }
        None => warn!("No GitHub token found, requests will be unauthenticated"),
    }

    let client = builder.build()?;

    debug!(timeout_secs = config.api_timeout_seconds, "Created GitHub client");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    struct FixedToken(Option<&'static str>);

    impl TokenProvider for FixedToken {
        fn github_token(&self) -> Option<SecretString> {
            self.0.map(SecretString::from)
        }
    }

    #[tokio::test]
    async fn test_create_client_with_token() {
        let client = create_client(&FixedToken(Some("ghp_test")), &GitHubConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_create_client_without_token() {
        let client = create_client(&FixedToken(None), &GitHubConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_create_client_with_custom_api_url() {
        let config = GitHubConfig {
            api_url: Some("http://127.0.0.1:9/".to_string()),
            api_timeout_seconds: 1,
        };
        assert!(create_client(&FixedToken(None), &config).is_ok());
    }
}
