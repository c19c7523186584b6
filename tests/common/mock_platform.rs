//! Mock services for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use release_changelog::error::{Error, Result};
use release_changelog::platform::PlatformService;
use release_changelog::registry::PackageRegistry;
use release_changelog::release::{Phase, ProgressCallback};
use release_changelog::trigger::SignalSource;
use release_changelog::types::{
    PlatformConfig, PublishedRelease, PullRequestInfo, ReleaseRecord, TriggerSignal,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable responses per commit ref and PR number
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    commit_prs: Mutex<HashMap<String, u64>>,
    pr_details: Mutex<HashMap<u64, PullRequestInfo>>,
    package_name: Mutex<Option<String>>,
    // Call tracking
    find_pr_calls: Mutex<Vec<String>>,
    fetch_pr_calls: Mutex<Vec<u64>>,
    package_name_calls: Mutex<Vec<String>>,
    publish_calls: Mutex<Vec<ReleaseRecord>>,
    // Error injection
    error_on_find_pr: Mutex<Option<String>>,
    error_on_fetch_pr: Mutex<Option<String>>,
    error_on_publish: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            commit_prs: Mutex::new(HashMap::new()),
            pr_details: Mutex::new(HashMap::new()),
            package_name: Mutex::new(None),
            find_pr_calls: Mutex::new(Vec::new()),
            fetch_pr_calls: Mutex::new(Vec::new()),
            package_name_calls: Mutex::new(Vec::new()),
            publish_calls: Mutex::new(Vec::new()),
            error_on_find_pr: Mutex::new(None),
            error_on_fetch_pr: Mutex::new(None),
            error_on_publish: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Associate a commit ref with a PR number
    pub fn set_commit_pr(&self, commit_ref: &str, pr_number: u64) {
        self.commit_prs
            .lock()
            .unwrap()
            .insert(commit_ref.to_string(), pr_number);
    }

    /// Register PR details
    pub fn add_pr(&self, pr: PullRequestInfo) {
        self.pr_details.lock().unwrap().insert(pr.number, pr);
    }

    /// Set the package name read from package.json
    pub fn set_package_name(&self, name: &str) {
        *self.package_name.lock().unwrap() = Some(name.to_string());
    }

    // === Error injection methods ===

    /// Make `find_pr_for_commit` return an error
    pub fn fail_find_pr(&self, msg: &str) {
        *self.error_on_find_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `fetch_pr_details` return an error
    pub fn fail_fetch_pr(&self, msg: &str) {
        *self.error_on_fetch_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `publish_release` return an error
    pub fn fail_publish(&self, msg: &str) {
        *self.error_on_publish.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Commit refs `find_pr_for_commit` was called with
    pub fn get_find_pr_calls(&self) -> Vec<String> {
        self.find_pr_calls.lock().unwrap().clone()
    }

    /// PR numbers `fetch_pr_details` was called with
    pub fn get_fetch_pr_calls(&self) -> Vec<u64> {
        self.fetch_pr_calls.lock().unwrap().clone()
    }

    /// Refs `fetch_package_name` was called with
    pub fn get_package_name_calls(&self) -> Vec<String> {
        self.package_name_calls.lock().unwrap().clone()
    }

    /// Records passed to `publish_release`
    pub fn get_publish_calls(&self) -> Vec<ReleaseRecord> {
        self.publish_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn find_pr_for_commit(&self, commit_ref: &str) -> Result<u64> {
        self.find_pr_calls
            .lock()
            .unwrap()
            .push(commit_ref.to_string());

        if let Some(msg) = self.error_on_find_pr.lock().unwrap().as_ref() {
            return Err(Error::Query(msg.clone()));
        }

        Ok(self
            .commit_prs
            .lock()
            .unwrap()
            .get(commit_ref)
            .copied()
            .unwrap_or(0))
    }

    async fn fetch_pr_details(&self, pr_number: u64) -> Result<PullRequestInfo> {
        self.fetch_pr_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_fetch_pr.lock().unwrap().as_ref() {
            return Err(Error::Query(msg.clone()));
        }

        self.pr_details
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::Query(format!("pull request #{pr_number} not found")))
    }

    async fn fetch_package_name(&self, git_ref: &str) -> Result<String> {
        self.package_name_calls
            .lock()
            .unwrap()
            .push(git_ref.to_string());

        self.package_name
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Query(format!("no package.json at {git_ref}:package.json")))
    }

    async fn publish_release(&self, record: &ReleaseRecord) -> Result<PublishedRelease> {
        self.publish_calls.lock().unwrap().push(record.clone());

        if let Some(msg) = self.error_on_publish.lock().unwrap().as_ref() {
            return Err(Error::Publish(msg.clone()));
        }

        Ok(PublishedRelease {
            id: Some(1),
            html_url: Some(format!(
                "https://github.com/{}/{}/releases/tag/{}",
                self.config.owner, self.config.repo, record.tag_name
            )),
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

/// Mock registry returning fixed versions per package
#[derive(Default)]
pub struct MockRegistry {
    versions: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
    error: Mutex<Option<String>>,
}

impl MockRegistry {
    /// Set the latest version of a package
    pub fn set_version(&self, package: &str, version: &str) {
        self.versions
            .lock()
            .unwrap()
            .insert(package.to_string(), version.to_string());
    }

    /// Make `latest_version` return an error
    pub fn fail(&self, msg: &str) {
        *self.error.lock().unwrap() = Some(msg.to_string());
    }

    /// Packages looked up
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageRegistry for MockRegistry {
    async fn latest_version(&self, package: &str) -> Result<String> {
        self.calls.lock().unwrap().push(package.to_string());

        if let Some(msg) = self.error.lock().unwrap().as_ref() {
            return Err(Error::Registry(msg.clone()));
        }

        Ok(self
            .versions
            .lock()
            .unwrap()
            .get(package)
            .cloned()
            .unwrap_or_default())
    }
}

/// Signal source replaying queued payloads, then waiting forever
#[derive(Default)]
pub struct MockSignalSource {
    queue: VecDeque<Result<Vec<u8>>>,
    /// Topic subscribed to
    pub subscribed: Option<String>,
    /// Number of reads attempted
    pub reads: usize,
    /// Whether `close` was called
    pub closed: bool,
}

impl MockSignalSource {
    /// Queue the given payloads
    pub fn with_messages(messages: &[&str]) -> Self {
        Self {
            queue: messages.iter().map(|m| Ok(m.as_bytes().to_vec())).collect(),
            ..Self::default()
        }
    }

    /// Queue a read failure
    pub fn push_error(&mut self, msg: &str) {
        self.queue
            .push_back(Err(Error::TriggerChannel(msg.to_string())));
    }

    /// Queue a payload
    pub fn push_message(&mut self, msg: &str) {
        self.queue.push_back(Ok(msg.as_bytes().to_vec()));
    }
}

#[async_trait]
impl SignalSource for MockSignalSource {
    async fn subscribe(&mut self, topic: &str) -> Result<()> {
        self.subscribed = Some(topic.to_string());
        Ok(())
    }

    async fn next_payload(&mut self) -> Result<Vec<u8>> {
        self.reads += 1;
        match self.queue.pop_front() {
            Some(next) => next,
            None => std::future::pending().await,
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Progress callback recording everything it is told
#[derive(Default)]
pub struct RecordingProgress {
    /// Phases entered, in order
    pub phases: Mutex<Vec<Phase>>,
    /// Trigger signals reported
    pub triggers: Mutex<Vec<TriggerSignal>>,
    /// Records reported as published
    pub published: Mutex<Vec<ReleaseRecord>>,
    /// Records reported in a dry run
    pub dry_runs: Mutex<Vec<ReleaseRecord>>,
    /// Non-fatal errors
    pub errors: Mutex<Vec<String>>,
}

impl RecordingProgress {
    /// Phases entered so far
    pub fn get_phases(&self) -> Vec<Phase> {
        self.phases.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.phases.lock().unwrap().push(phase);
    }

    async fn on_trigger(&self, signal: &TriggerSignal) {
        self.triggers.lock().unwrap().push(signal.clone());
    }

    async fn on_published(&self, record: &ReleaseRecord, _release: &PublishedRelease) {
        self.published.lock().unwrap().push(record.clone());
    }

    async fn on_dry_run(&self, record: &ReleaseRecord) {
        self.dry_runs.lock().unwrap().push(record.clone());
    }

    async fn on_error(&self, error: &Error) {
        self.errors.lock().unwrap().push(error.to_string());
    }

    async fn on_message(&self, _message: &str) {}
}
