//! Release command - resolve, build and publish a release

use crate::cli::progress::CliProgress;
use anstream::{print, println};
use clap::Args;
use clap::builder::NonEmptyStringValueParser;
use release_changelog::auth::get_github_auth;
use release_changelog::error::Result;
use release_changelog::platform::GitHubService;
use release_changelog::registry::NpmRegistry;
use release_changelog::release::execute_release;
use release_changelog::trigger::{KafkaSource, SignalSource};
use release_changelog::types::{
    ClientSettings, DEFAULT_API_URL, DEFAULT_COMMIT_REF, ReleaseRequest, TriggerSettings,
};
use std::time::Duration;
use tracing::debug;

/// Arguments for a release run
#[derive(Args, Debug, Clone)]
pub struct ReleaseArgs {
    /// GitHub repository to release (required)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub repo: String,

    /// GitHub owner of the repository (required)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub owner: String,

    /// npm registry URL (required)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub registry: String,

    /// Release tag name (e.g. v1.0.2); resolved from the registry when omitted
    #[arg(long)]
    pub tag: Option<String>,

    /// Ref the tag points at (defaults to the pull request's base branch)
    #[arg(long = "targetRef", value_name = "REF")]
    pub target_ref: Option<String>,

    /// Pull request whose commits make up the changelog
    #[arg(long, default_value_t = 0)]
    pub pr: u64,

    /// Commit ref used to find the pull request
    #[arg(long, default_value = DEFAULT_COMMIT_REF)]
    pub commit: String,

    /// Show what the release would look like without publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Kafka topic to wait on before releasing
    #[arg(long = "kafka-topic", value_name = "TOPIC")]
    pub kafka_topic: Option<String>,

    /// Kafka bootstrap servers
    #[arg(long, env = "KAFKA_BOOTSTRAP_SERVERS", value_name = "BROKERS")]
    pub kafka_brokers: Option<String>,

    /// Give up waiting for the trigger after this many seconds
    #[arg(long, value_name = "SECS")]
    pub trigger_timeout: Option<u64>,

    /// Registry package name; read from package.json when omitted
    #[arg(long)]
    pub package: Option<String>,

    /// Ref package.json is read from
    #[arg(long, default_value = DEFAULT_COMMIT_REF, value_name = "REF")]
    pub package_ref: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Skip TLS certificate verification (insecure)
    #[arg(long)]
    pub insecure: bool,
}

fn present(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

impl ReleaseArgs {
    /// Build the immutable release request
    pub fn release_request(&self) -> ReleaseRequest {
        let brokers = present(self.kafka_brokers.as_ref());
        let trigger = match (brokers, present(self.kafka_topic.as_ref())) {
            (Some(brokers), Some(topic)) => Some(TriggerSettings {
                brokers,
                topic,
                timeout: self.trigger_timeout.map(Duration::from_secs),
            }),
            _ => None,
        };

        ReleaseRequest {
            explicit_tag: present(self.tag.as_ref()),
            explicit_target_ref: present(self.target_ref.as_ref()),
            explicit_pr_number: Some(self.pr).filter(|n| *n > 0),
            base_commit_ref: self.commit.clone(),
            package_name: present(self.package.as_ref()),
            package_json_ref: self.package_ref.clone(),
            dry_run: self.dry_run,
            trigger,
            ..ReleaseRequest::new(&self.owner, &self.repo, &self.registry)
        }
    }

    /// Settings for outbound HTTP clients
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_url: self.api_url.clone(),
            insecure: self.insecure,
            ..ClientSettings::default()
        }
    }
}

/// Run a release and print the summary to stdout
pub async fn run_release(args: &ReleaseArgs) -> Result<()> {
    let request = args.release_request();
    let settings = args.client_settings();
    debug!(?request, "release request");

    let auth = get_github_auth()?;
    debug!(source = auth.source, "using GitHub token");

    let platform = GitHubService::new(
        &auth.token,
        request.owner.clone(),
        request.repo.clone(),
        &settings,
    )?;
    let registry = NpmRegistry::new(request.registry_url.clone(), &settings)?;

    let mut kafka = request
        .trigger
        .as_ref()
        .map(|trigger| KafkaSource::connect(&trigger.brokers))
        .transpose()?;
    let trigger_source = kafka.as_mut().map(|k| k as &mut dyn SignalSource);

    let progress = CliProgress::new(
        request.trigger.as_ref().map(|t| t.topic.clone()),
        request.repo.clone(),
    );
    let result = execute_release(&request, &platform, &registry, trigger_source, &progress).await;
    progress.clear_spinner();
    let outcome = result?;

    println!("{}", outcome.summary_line());
    print!("{}", outcome.changelog);

    Ok(())
}
