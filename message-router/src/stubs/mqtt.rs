/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! MQTT transport stubs: one per destination topic, sharing the broker
//! connection handed in at startup.

use crate::address::Address;
use crate::message::Message;
use crate::stubs::{MessagingStub, MessagingStubFactory, TransmitError};
use async_trait::async_trait;
use std::sync::Arc;

/// Header carrying the topic a remote cluster controller should reply to.
pub const REPLY_TO_HEADER: &str = "reply-to";

/// Broker connection owned by the MQTT transport module. Implementations
/// encode the message for the wire; the router never sees wire bytes.
#[async_trait]
pub trait MqttSender: Send + Sync {
    async fn publish(
        &self,
        broker_uri: &str,
        topic: &str,
        message: &Message,
    ) -> Result<(), TransmitError>;
}

/// Used to contact another (remote) cluster controller through the broker.
struct MqttMessagingStub {
    destination: Address,
    sender: Arc<dyn MqttSender>,
    receive_channel_topic: String,
}

#[async_trait]
impl MessagingStub for MqttMessagingStub {
    fn destination(&self) -> &Address {
        &self.destination
    }

    async fn transmit(&self, message: &Message) -> Result<(), TransmitError> {
        let (broker_uri, topic) = match &self.destination {
            Address::Mqtt { broker_uri, topic } => (broker_uri.as_str(), topic.as_str()),
            other => {
                return Err(TransmitError::permanent(format!(
                    "mqtt stub bound to non-mqtt address {other}"
                )))
            }
        };

        // Replies come back on our own receive topic.
        let mut outgoing = message.clone();
        outgoing.set_custom_header(REPLY_TO_HEADER, self.receive_channel_topic.clone());
        self.sender.publish(broker_uri, topic, &outgoing).await
    }
}

/// Produces stubs for [`Address::Mqtt`] destinations.
pub struct MqttMessagingStubFactory {
    sender: Arc<dyn MqttSender>,
    receive_channel_topic: String,
}

impl MqttMessagingStubFactory {
    pub fn new(sender: Arc<dyn MqttSender>, receive_channel_topic: impl Into<String>) -> Self {
        Self {
            sender,
            receive_channel_topic: receive_channel_topic.into(),
        }
    }
}

impl MessagingStubFactory for MqttMessagingStubFactory {
    fn transport_name(&self) -> &'static str {
        "mqtt"
    }

    fn can_create(&self, address: &Address) -> bool {
        matches!(address, Address::Mqtt { .. })
    }

    fn create(&self, address: &Address) -> Arc<dyn MessagingStub> {
        Arc::new(MqttMessagingStub {
            destination: address.clone(),
            sender: self.sender.clone(),
            receive_channel_topic: self.receive_channel_topic.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MqttMessagingStubFactory, MqttSender, REPLY_TO_HEADER};
    use crate::address::Address;
    use crate::message::Message;
    use crate::stubs::{MessagingStubFactory, TransmitError};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingMqttSender {
        published: Mutex<Vec<(String, String, Message)>>,
    }

    #[async_trait]
    impl MqttSender for RecordingMqttSender {
        async fn publish(
            &self,
            broker_uri: &str,
            topic: &str,
            message: &Message,
        ) -> Result<(), TransmitError> {
            self.published.lock().await.push((
                broker_uri.to_string(),
                topic.to_string(),
                message.clone(),
            ));
            Ok(())
        }
    }

    #[tokio::test]
    async fn transmit_publishes_to_destination_topic_with_reply_to() {
        let sender = Arc::new(RecordingMqttSender::default());
        let factory = MqttMessagingStubFactory::new(sender.clone(), "cc/local/inbox");
        let address = Address::Mqtt {
            broker_uri: "tcp://broker:1883".to_string(),
            topic: "cc/remote/inbox".to_string(),
        };
        assert!(factory.can_create(&address));

        let stub = factory.create(&address);
        let message = Message::new("sender", "recipient", 10_000, vec![7]);
        stub.transmit(&message).await.expect("publish should succeed");

        let published = sender.published.lock().await;
        assert_eq!(published.len(), 1);
        let (broker, topic, sent) = &published[0];
        assert_eq!(broker, "tcp://broker:1883");
        assert_eq!(topic, "cc/remote/inbox");
        assert_eq!(sent.custom_header(REPLY_TO_HEADER), Some("cc/local/inbox"));
        assert_eq!(sent.id(), message.id());
    }

    #[test]
    fn claims_only_mqtt_addresses() {
        let factory = MqttMessagingStubFactory::new(
            Arc::new(RecordingMqttSender::default()),
            "cc/local/inbox",
        );

        assert!(!factory.can_create(&Address::InProcess {
            participant_scope: "local".to_string(),
        }));
    }
}
