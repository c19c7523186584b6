//! Trigger channel
//!
//! Blocks the release until a message naming the repository shows up on a
//! topic. Any payload containing the repository name as a substring counts.

mod kafka;

pub use kafka::{CONSUMER_GROUP, KafkaSource};

use crate::error::{Error, Result};
use crate::types::TriggerSignal;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause after a failed read before polling the source again
pub const READ_RETRY_DELAY: Duration = Duration::from_millis(100);

/// A subscribable message stream
#[async_trait]
pub trait SignalSource: Send {
    /// Subscribe to a topic
    async fn subscribe(&mut self, topic: &str) -> Result<()>;

    /// Wait for the next message payload
    ///
    /// Errors are read failures; the listener logs them and keeps reading.
    async fn next_payload(&mut self) -> Result<Vec<u8>>;

    /// Unsubscribe and release the channel
    fn close(&mut self);
}

/// Listener state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// Not yet subscribed
    Idle,
    /// Subscribed, waiting for a message
    Subscribed,
    /// Inspecting a received message
    Checking,
    /// Matching message seen
    Done,
}

/// Observer for listener progress
#[async_trait]
pub trait ListenerObserver: Send + Sync {
    /// Called on every state transition
    async fn on_state(&self, _state: ListenerState) {}

    /// Called when a read fails and the listener keeps waiting
    async fn on_read_error(&self, _error: &Error) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

#[async_trait]
impl ListenerObserver for NoopObserver {}

/// Whether a payload names the repository
pub fn payload_matches(payload: &[u8], repo: &str) -> bool {
    String::from_utf8_lossy(payload).contains(repo)
}

/// Block until a message containing `repo` arrives on `topic`
///
/// With a timeout the wait ends in [`Error::TriggerTimeout`]. The source is
/// closed on both the match and the timeout path; a subscribe failure is
/// returned as-is.
pub async fn wait_for_repo_signal(
    source: &mut dyn SignalSource,
    topic: &str,
    repo: &str,
    timeout: Option<Duration>,
    observer: &dyn ListenerObserver,
) -> Result<TriggerSignal> {
    observer.on_state(ListenerState::Idle).await;
    source.subscribe(topic).await?;
    observer.on_state(ListenerState::Subscribed).await;
    info!(topic, repo, "subscribed and waiting for message");

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, read_until_match(source, repo, observer))
            .await
            .unwrap_or_else(|_| {
                Err(Error::TriggerTimeout {
                    repo: repo.to_string(),
                    timeout: limit,
                })
            }),
        None => read_until_match(source, repo, observer).await,
    };

    source.close();
    result
}

async fn read_until_match(
    source: &mut dyn SignalSource,
    repo: &str,
    observer: &dyn ListenerObserver,
) -> Result<TriggerSignal> {
    let mut messages_seen = 0;

    loop {
        let payload = match source.next_payload().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "trigger read failed, continuing to wait");
                observer.on_read_error(&e).await;
                tokio::time::sleep(READ_RETRY_DELAY).await;
                continue;
            }
        };

        messages_seen += 1;
        observer.on_state(ListenerState::Checking).await;

        if payload_matches(&payload, repo) {
            observer.on_state(ListenerState::Done).await;
            let payload = String::from_utf8_lossy(&payload).into_owned();
            info!(%payload, messages_seen, "trigger signal matched");
            return Ok(TriggerSignal {
                payload,
                messages_seen,
            });
        }

        debug!(payload = %String::from_utf8_lossy(&payload), "ignoring trigger message");
    }
}
