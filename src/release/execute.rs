//! Release execution
//!
//! Runs each stage whose input is not already known. Any stage failure ends
//! the release; nothing done by earlier stages is undone.

use crate::changelog::{Changelog, build_changelog};
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::registry::{PackageRegistry, tag_for_version};
use crate::release::{Phase, ProgressCallback, publish_dry_run, publish_release};
use crate::trigger::{ListenerObserver, SignalSource, wait_for_repo_signal};
use crate::types::{PublishedRelease, ReleaseRecord, ReleaseRequest, TriggerSignal};
use async_trait::async_trait;
use tracing::{debug, info};

/// Result of a release run
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR the release was built from
    pub pr_number: u64,
    /// Generated changelog
    pub changelog: Changelog,
    /// Release that was (or would have been) created
    pub record: ReleaseRecord,
    /// Hosting service response; None in a dry run
    pub published: Option<PublishedRelease>,
    /// Trigger message that started the run, if any
    pub trigger: Option<TriggerSignal>,
}

impl ReleaseOutcome {
    /// `<owner>/<repo> - <target>:<tag>`
    pub fn summary_line(&self) -> String {
        format!(
            "{}/{} - {}:{}",
            self.owner, self.repo, self.record.target_commitish, self.record.tag_name
        )
    }
}

/// Forwards listener read errors to the progress callback
struct TriggerProgress<'a> {
    progress: &'a dyn ProgressCallback,
}

#[async_trait]
impl ListenerObserver for TriggerProgress<'_> {
    async fn on_read_error(&self, error: &Error) {
        self.progress.on_error(error).await;
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Resolve the release tag
///
/// An explicit tag wins and the registry is never contacted. Otherwise the
/// package name (explicit, or read from `package.json`) is looked up and its
/// latest version prefixed with `v`.
pub async fn resolve_tag(
    request: &ReleaseRequest,
    platform: &dyn PlatformService,
    registry: &dyn PackageRegistry,
) -> Result<String> {
    if let Some(tag) = non_empty(request.explicit_tag.as_ref()) {
        debug!(tag, "using explicit tag");
        return Ok(tag.to_string());
    }

    let package = match non_empty(request.package_name.as_ref()) {
        Some(name) => name.to_string(),
        None => platform.fetch_package_name(&request.package_json_ref).await?,
    };

    let version = registry.latest_version(&package).await?;
    if version.is_empty() {
        return Err(Error::EmptyVersion(package));
    }

    info!(%package, %version, "resolved latest version");
    Ok(tag_for_version(&version))
}

/// Resolve the PR number to release
///
/// An explicit number above zero wins; otherwise the first PR associated
/// with the base commit ref is used.
pub async fn resolve_pr_number(
    request: &ReleaseRequest,
    platform: &dyn PlatformService,
) -> Result<u64> {
    if let Some(number) = request.explicit_pr_number.filter(|n| *n > 0) {
        debug!(number, "using explicit pull request");
        return Ok(number);
    }

    match platform.find_pr_for_commit(&request.base_commit_ref).await? {
        0 => Err(Error::NoPullRequest(request.base_commit_ref.clone())),
        number => {
            info!(number, commit = %request.base_commit_ref, "located pull request");
            Ok(number)
        }
    }
}

fn build_record(
    tag: String,
    target_commitish: String,
    changelog: &Changelog,
) -> Result<ReleaseRecord> {
    if tag.is_empty() {
        return Err(Error::MissingTag);
    }

    Ok(ReleaseRecord {
        name: tag.clone(),
        tag_name: tag,
        target_commitish,
        body: changelog.body(),
    })
}

/// Execute a release
///
/// The trigger stage runs only when the request carries trigger settings
/// and a source is supplied.
pub async fn execute_release(
    request: &ReleaseRequest,
    platform: &dyn PlatformService,
    registry: &dyn PackageRegistry,
    trigger_source: Option<&mut dyn SignalSource>,
    progress: &dyn ProgressCallback,
) -> Result<ReleaseOutcome> {
    let trigger = match (request.trigger.as_ref(), trigger_source) {
        (Some(settings), Some(source)) => {
            progress.on_phase(Phase::WaitingForTrigger).await;
            let observer = TriggerProgress { progress };
            let signal = wait_for_repo_signal(
                source,
                &settings.topic,
                &request.repo,
                settings.timeout,
                &observer,
            )
            .await?;
            progress.on_trigger(&signal).await;
            Some(signal)
        }
        _ => None,
    };

    progress.on_phase(Phase::ResolvingVersion).await;
    let tag = resolve_tag(request, platform, registry).await?;

    progress.on_phase(Phase::LocatingPullRequest).await;
    let pr_number = resolve_pr_number(request, platform).await?;

    progress.on_phase(Phase::FetchingPullRequest).await;
    let pr = platform.fetch_pr_details(pr_number).await?;

    progress.on_phase(Phase::BuildingChangelog).await;
    let changelog = build_changelog(&pr.commits);

    let target = non_empty(request.explicit_target_ref.as_ref())
        .map_or_else(|| pr.base_ref_name.clone(), ToString::to_string);
    let record = build_record(tag, target, &changelog)?;

    let published = if request.dry_run {
        publish_dry_run(&record, progress).await;
        None
    } else {
        Some(publish_release(platform, &record, progress).await?)
    };

    progress.on_phase(Phase::Complete).await;

    Ok(ReleaseOutcome {
        owner: request.owner.clone(),
        repo: request.repo.clone(),
        pr_number,
        changelog,
        record,
        published,
        trigger,
    })
}
