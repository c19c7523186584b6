//! Core types for release-changelog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Commit ref used when none is given
pub const DEFAULT_COMMIT_REF: &str = "master";

/// Default GitHub REST API base
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Login shown for commits and PRs without a resolvable account
pub const GHOST_LOGIN: &str = "ghost";

/// Everything needed to cut one release, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Package registry base URL
    pub registry_url: String,
    /// Tag to publish; resolved from the registry when absent
    pub explicit_tag: Option<String>,
    /// Branch or commit the tag points at; defaults to the PR base branch
    pub explicit_target_ref: Option<String>,
    /// PR to release; located from `base_commit_ref` when absent
    pub explicit_pr_number: Option<u64>,
    /// Commit ref used to find the PR
    pub base_commit_ref: String,
    /// Registry package name; read from `package.json` when absent
    pub package_name: Option<String>,
    /// Ref the `package.json` blob is read from
    pub package_json_ref: String,
    /// Resolve everything but skip the publish
    pub dry_run: bool,
    /// Trigger channel to wait on before releasing
    pub trigger: Option<TriggerSettings>,
}

impl ReleaseRequest {
    /// Create a request with only the required inputs set
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        registry_url: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            registry_url: registry_url.into(),
            explicit_tag: None,
            explicit_target_ref: None,
            explicit_pr_number: None,
            base_commit_ref: DEFAULT_COMMIT_REF.to_string(),
            package_name: None,
            package_json_ref: DEFAULT_COMMIT_REF.to_string(),
            dry_run: false,
            trigger: None,
        }
    }
}

/// Trigger channel settings; present only when brokers and topic are both known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSettings {
    /// Comma-separated broker addresses
    pub brokers: String,
    /// Topic to subscribe to
    pub topic: String,
    /// Upper bound on the wait (None waits forever)
    pub timeout: Option<Duration>,
}

/// Settings shared by every outbound HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Hosting service REST API base
    pub api_url: String,
    /// Skip TLS certificate verification
    pub insecure: bool,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            insecure: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Repository the platform service operates on
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST API base URL
    pub api_url: String,
}

/// A commit listed on a pull request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitInfo {
    /// First line of the commit message
    pub headline: String,
    /// Short commit id
    pub abbreviated_oid: String,
    /// Account login of the commit author
    pub author_login: String,
    /// PRs this commit is associated with
    pub associated_pr_numbers: BTreeSet<u64>,
}

/// Snapshot of a pull request and its commits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestInfo {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Base branch name
    pub base_ref_name: String,
    /// Base commit id
    pub base_ref_oid: String,
    /// Head commit id
    pub head_ref_oid: String,
    /// When the PR was opened
    pub created_at: DateTime<Utc>,
    /// Login of the PR author
    pub author_login: String,
    /// Commits in service order (at most 50)
    pub commits: Vec<CommitInfo>,
}

/// The release written to the hosting service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseRecord {
    /// Tag to create
    pub tag_name: String,
    /// Branch or commit the tag points at
    pub target_commitish: String,
    /// Release title
    pub name: String,
    /// Release notes
    pub body: String,
}

/// What the hosting service reported for a created release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedRelease {
    /// Release id
    pub id: Option<u64>,
    /// Web URL for the release
    pub html_url: Option<String>,
}

/// The trigger message that released the wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSignal {
    /// Matching payload, lossily decoded
    pub payload: String,
    /// Messages read, including the match
    pub messages_seen: usize,
}
