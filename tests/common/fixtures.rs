//! Test data factories for release-changelog types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use release_changelog::types::{
    CommitInfo, PlatformConfig, PullRequestInfo, ReleaseRequest, TriggerSettings,
};
use std::collections::BTreeSet;

/// Create a commit with default values
pub fn make_commit(headline: &str, author: &str) -> CommitInfo {
    CommitInfo {
        headline: headline.to_string(),
        abbreviated_oid: format!("{:07x}", headline.len()),
        author_login: author.to_string(),
        associated_pr_numbers: BTreeSet::new(),
    }
}

/// Create a pull request with the given commits
pub fn make_pr(number: u64, base: &str, commits: Vec<CommitInfo>) -> PullRequestInfo {
    PullRequestInfo {
        number,
        title: format!("Release PR #{number}"),
        base_ref_name: base.to_string(),
        base_ref_oid: "base0000".to_string(),
        head_ref_oid: "head1111".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        author_login: "carol".to_string(),
        commits,
    }
}

/// The two-commit PR #42 used throughout the scenarios
pub fn make_pr_42() -> PullRequestInfo {
    make_pr(
        42,
        "main",
        vec![make_commit("fix bug", "alice"), make_commit("add test", "bob")],
    )
}

/// Create a request for acme/widget with nothing explicit
pub fn make_request() -> ReleaseRequest {
    ReleaseRequest::new("acme", "widget", "https://registry.example.com")
}

/// Create trigger settings for a topic
pub fn make_trigger(topic: &str) -> TriggerSettings {
    TriggerSettings {
        brokers: "localhost:9092".to_string(),
        topic: topic.to_string(),
        timeout: None,
    }
}

/// Create a platform config for acme/widget
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        repo: "widget".to_string(),
        api_url: "https://api.github.com".to_string(),
    }
}
