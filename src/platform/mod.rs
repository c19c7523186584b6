//! Hosting platform services
//!
//! Provides the pull request lookups and the release write the orchestrator
//! needs from the source-hosting service.

mod github;
mod graphql;

pub use github::{GitHubService, graphql_endpoint};

use crate::error::Result;
use crate::types::{PlatformConfig, PublishedRelease, PullRequestInfo, ReleaseRecord};
use async_trait::async_trait;

/// Maximum number of commits fetched for a pull request
pub const MAX_PR_COMMITS: usize = 50;

/// Platform service trait for release operations
///
/// Abstracts the hosting service so the orchestrator can be driven by a
/// mock in tests.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Find the PR that introduced a commit ref
    ///
    /// Returns the first associated PR's number, or 0 when there is none.
    async fn find_pr_for_commit(&self, commit_ref: &str) -> Result<u64>;

    /// Fetch PR metadata and up to [`MAX_PR_COMMITS`] commits
    async fn fetch_pr_details(&self, pr_number: u64) -> Result<PullRequestInfo>;

    /// Read the package name from `package.json` at a ref
    async fn fetch_package_name(&self, git_ref: &str) -> Result<String>;

    /// Create a release
    async fn publish_release(&self, record: &ReleaseRecord) -> Result<PublishedRelease>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
