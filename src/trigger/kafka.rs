//! Kafka-backed signal source

use crate::error::{Error, Result};
use crate::trigger::SignalSource;
use async_trait::async_trait;
use rdkafka::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use tracing::debug;

/// Consumer group shared by every instance of this tool
pub const CONSUMER_GROUP: &str = "release-changelog";

/// Kafka consumer reading only messages produced after subscription
pub struct KafkaSource {
    consumer: StreamConsumer,
}

impl KafkaSource {
    /// Connect to a comma-separated broker list
    pub fn connect(brokers: &str) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", CONSUMER_GROUP)
            .set("auto.offset.reset", "latest")
            .create()
            .map_err(|e| Error::TriggerChannel(format!("failed to create consumer: {e}")))?;

        Ok(Self { consumer })
    }
}

#[async_trait]
impl SignalSource for KafkaSource {
    async fn subscribe(&mut self, topic: &str) -> Result<()> {
        self.consumer
            .subscribe(&[topic])
            .map_err(|e| Error::TriggerChannel(format!("failed to subscribe to {topic}: {e}")))
    }

    async fn next_payload(&mut self) -> Result<Vec<u8>> {
        let message = self
            .consumer
            .recv()
            .await
            .map_err(|e| Error::TriggerChannel(e.to_string()))?;

        debug!(
            topic = message.topic(),
            partition = message.partition(),
            offset = message.offset(),
            "received trigger message"
        );

        Ok(message.payload().map(<[u8]>::to_vec).unwrap_or_default())
    }

    fn close(&mut self) {
        self.consumer.unsubscribe();
    }
}
