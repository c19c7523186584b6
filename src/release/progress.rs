//! Progress callback trait for interface-agnostic updates

use crate::error::Error;
use crate::types::{PublishedRelease, ReleaseRecord, TriggerSignal};
use async_trait::async_trait;
use std::fmt;

/// Release phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a trigger message
    WaitingForTrigger,
    /// Resolving the release tag
    ResolvingVersion,
    /// Finding the PR for a commit
    LocatingPullRequest,
    /// Fetching PR details
    FetchingPullRequest,
    /// Building the changelog
    BuildingChangelog,
    /// Creating the release
    Publishing,
    /// Release complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::WaitingForTrigger => "Waiting for trigger",
            Self::ResolvingVersion => "Resolving version",
            Self::LocatingPullRequest => "Locating pull request",
            Self::FetchingPullRequest => "Fetching pull request",
            Self::BuildingChangelog => "Building changelog",
            Self::Publishing => "Publishing release",
            Self::Complete => "Done",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during a release.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called when a trigger message matched
    async fn on_trigger(&self, signal: &TriggerSignal);

    /// Called after the release was created
    async fn on_published(&self, record: &ReleaseRecord, release: &PublishedRelease);

    /// Called instead of publishing in a dry run
    async fn on_dry_run(&self, record: &ReleaseRecord);

    /// Called when an error occurs (non-fatal)
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_trigger(&self, _signal: &TriggerSignal) {}
    async fn on_published(&self, _record: &ReleaseRecord, _release: &PublishedRelease) {}
    async fn on_dry_run(&self, _record: &ReleaseRecord) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
