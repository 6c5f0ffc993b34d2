// SPDX-License-Identifier: Apache-2.0

//! Token provider for the server using environment variables.

use secrecy::SecretString;
use teamboard_core::TokenProvider;

/// Variables consulted for the GitHub token, in priority order.
pub const TOKEN_VARS: &[&str] = &["GITHUB_AUTH_TOKEN", "GITHUB_TOKEN"];

/// Resolves the GitHub token from the process environment.
///
/// Reads `GITHUB_AUTH_TOKEN`, falling back to `GITHUB_TOKEN`. Empty values
/// are treated as unset.
pub struct EnvTokenProvider;

impl TokenProvider for EnvTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        TOKEN_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|token| !token.trim().is_empty())
            .map(SecretString::from)
    }
}
