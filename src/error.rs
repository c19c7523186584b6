//! Error types for release-changelog

use std::time::Duration;
use thiserror::Error;

/// Errors produced while orchestrating a release
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid input
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable credential for the hosting service
    #[error("authentication error: {0}")]
    Auth(String),

    /// Package registry lookup failed
    #[error("registry error: {0}")]
    Registry(String),

    /// Hosting service query failed or returned malformed data
    #[error("GitHub query failed: {0}")]
    Query(String),

    /// Release creation was rejected or could not be sent
    #[error("failed to publish release: {0}")]
    Publish(String),

    /// Trigger channel could not be set up
    #[error("trigger channel error: {0}")]
    TriggerChannel(String),

    /// No matching trigger signal arrived in time
    #[error("no trigger signal for {repo} within {timeout:?}")]
    TriggerTimeout {
        /// Repository name being waited on
        repo: String,
        /// Configured wait limit
        timeout: Duration,
    },

    /// No tag was given and none could be derived
    #[error("need to provide tag to publish release")]
    MissingTag,

    /// Registry reported no latest version for the package
    #[error("registry returned no latest version for {0}")]
    EmptyVersion(String),

    /// Commit is not associated with any pull request
    #[error("no pull request associated with commit {0}")]
    NoPullRequest(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
