//! CLI progress callback with styled output and a trigger spinner

use crate::cli::style::{Stream, Stylize, caution, check, hyperlink_url, spinner_style};
use anstream::eprintln;
use async_trait::async_trait;
use indicatif::ProgressBar;
use release_changelog::error::Error;
use release_changelog::release::{Phase, ProgressCallback};
use release_changelog::types::{PublishedRelease, ReleaseRecord, TriggerSignal};
use std::sync::Mutex;
use std::time::Duration;

/// Progress callback writing to stderr
pub struct CliProgress {
    /// Label shown next to the trigger spinner
    topic: Option<String>,
    /// Repository named when the trigger matches
    repo: String,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create progress output; `topic` labels the trigger wait
    pub const fn new(topic: Option<String>, repo: String) -> Self {
        Self {
            topic,
            repo,
            spinner: Mutex::new(None),
        }
    }

    /// Stop and erase the spinner, if one is running
    pub fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.lock().ok().and_then(|mut s| s.take()) {
            spinner.finish_and_clear();
        }
    }

    fn start_spinner(&self) {
        let topic = self.topic.as_deref().unwrap_or("trigger channel");
        let spinner = ProgressBar::new_spinner()
            .with_style(spinner_style())
            .with_message(format!("Waiting for a message on {}", topic.accent()));
        spinner.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::WaitingForTrigger => self.start_spinner(),
            Phase::Complete => {}
            _ => eprintln!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_trigger(&self, signal: &TriggerSignal) {
        self.clear_spinner();
        eprintln!();
        eprintln!("{:?}", signal.payload);
        eprintln!(
            "{} {} has been published ({} message{} read)",
            check(),
            self.repo.accent(),
            signal.messages_seen,
            if signal.messages_seen == 1 { "" } else { "s" }
        );
    }

    async fn on_published(&self, record: &ReleaseRecord, release: &PublishedRelease) {
        eprintln!(
            "{} {} {}",
            check(),
            "Published".success(),
            record.tag_name.accent()
        );
        if let Some(url) = &release.html_url {
            eprintln!("  {}", hyperlink_url(Stream::Stderr, url).muted());
        }
    }

    async fn on_dry_run(&self, record: &ReleaseRecord) {
        eprintln!(
            "  Would publish {} at {} ({} changelog line{})",
            record.tag_name.accent(),
            record.target_commitish.accent(),
            record.body.lines().count(),
            if record.body.lines().count() == 1 { "" } else { "s" }
        );
    }

    async fn on_error(&self, error: &Error) {
        let line = format!("{} {}", caution(), error.to_string().warn());
        let guard = self.spinner.lock().ok();
        match guard.as_deref().and_then(Option::as_ref) {
            Some(spinner) => spinner.println(line),
            None => eprintln!("{line}"),
        }
    }

    async fn on_message(&self, message: &str) {
        eprintln!("{}", message.warn());
    }
}
