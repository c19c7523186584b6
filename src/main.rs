//! release-changelog - cut GitHub releases from pull requests
//!
//! CLI binary wiring flags and logging to the release pipeline.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

#[derive(Parser)]
#[command(name = "release-changelog")]
#[command(about = "Publish a GitHub release with a changelog built from a pull request")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    release: cli::ReleaseArgs,

    /// Log filter (e.g. "info", "release_changelog=debug")
    #[arg(long, env = "RELEASE_CHANGELOG_LOG", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    cli::run_release(&cli.release).await?;

    Ok(())
}
