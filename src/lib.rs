//! release-changelog - cut GitHub releases from pull requests
//!
//! Waits for an optional trigger signal, resolves the release tag from a
//! package registry, locates the pull request being released and publishes a
//! release whose body is the pull request's commit list.

pub mod auth;
pub mod changelog;
pub mod error;
pub mod http;
pub mod platform;
pub mod registry;
pub mod release;
pub mod trigger;
pub mod types;
