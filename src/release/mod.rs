//! Release orchestration
//!
//! Sequences the release pipeline:
//! 1. Trigger - optionally wait for a signal naming the repository
//! 2. Version - resolve the tag from the package registry
//! 3. Pull request - locate the PR for a commit and fetch its commits
//! 4. Publish - create the release, or report it in a dry run

mod execute;
mod progress;
mod publish;

pub use execute::{ReleaseOutcome, execute_release, resolve_pr_number, resolve_tag};
pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use publish::{publish_dry_run, publish_release};
