// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction for credential resolution.
//!
//! The core never reads credentials itself. Binaries implement
//! `TokenProvider` for their own credential source (environment, keychain,
//! test fixtures) and hand it to [`crate::github::auth::create_client`].

use secrecy::SecretString;

/// Provides the GitHub credential used for API calls.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    ///
    /// Returns `None` if no token is available from any source.
    fn github_token(&self) -> Option<SecretString>;
}
