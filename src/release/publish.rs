//! Release publishing

use crate::error::Result;
use crate::platform::PlatformService;
use crate::release::{Phase, ProgressCallback};
use crate::types::{PublishedRelease, ReleaseRecord};
use tracing::info;

/// Create the release on the hosting service
///
/// Exactly one write is attempted; failures are not retried.
pub async fn publish_release(
    platform: &dyn PlatformService,
    record: &ReleaseRecord,
    progress: &dyn ProgressCallback,
) -> Result<PublishedRelease> {
    progress.on_phase(Phase::Publishing).await;

    let config = platform.config();
    info!(owner = %config.owner, repo = %config.repo, tag = %record.tag_name, "publishing release");

    let published = platform.publish_release(record).await?;
    progress.on_published(record, &published).await;
    Ok(published)
}

/// Report the release that would have been created
pub async fn publish_dry_run(record: &ReleaseRecord, progress: &dyn ProgressCallback) {
    info!(tag = %record.tag_name, target = %record.target_commitish, "dry run, not publishing");
    progress
        .on_message("Dry run - the release will not be published")
        .await;
    progress.on_dry_run(record).await;
}
