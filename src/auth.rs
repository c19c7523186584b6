//! GitHub authentication

use crate::error::{Error, Result};
use std::env;

/// Environment variables checked for a token, in priority order
pub const TOKEN_ENV_VARS: [&str; 3] = ["TOKEN", "GITHUB_TOKEN", "GH_TOKEN"];

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Bearer token
    pub token: String,
    /// Environment variable the token came from
    pub source: &'static str,
}

/// Get GitHub authentication from the process environment
///
/// Priority:
/// 1. `TOKEN`
/// 2. `GITHUB_TOKEN`
/// 3. `GH_TOKEN`
pub fn get_github_auth() -> Result<GitHubAuthConfig> {
    github_auth_from(|name| env::var(name).ok())
}

/// Resolve authentication through an arbitrary variable lookup
pub fn github_auth_from(lookup: impl Fn(&str) -> Option<String>) -> Result<GitHubAuthConfig> {
    TOKEN_ENV_VARS
        .iter()
        .find_map(|&name| {
            lookup(name)
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .map(|token| GitHubAuthConfig {
                    token,
                    source: name,
                })
        })
        .ok_or_else(|| {
            Error::Auth("No GitHub token found. Set TOKEN, GITHUB_TOKEN or GH_TOKEN".to_string())
        })
}
