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

//! WebSocket transport stubs for client runtimes attached to this cluster
//! controller.

use crate::address::Address;
use crate::message::Message;
use crate::stubs::{MessagingStub, MessagingStubFactory, TransmitError};
use async_trait::async_trait;
use std::sync::Arc;

/// Connection pool owned by the WebSocket transport module.
#[async_trait]
pub trait WebSocketSender: Send + Sync {
    async fn send(&self, url: &str, message: &Message) -> Result<(), TransmitError>;
}

struct WebSocketMessagingStub {
    destination: Address,
    sender: Arc<dyn WebSocketSender>,
}

#[async_trait]
impl MessagingStub for WebSocketMessagingStub {
    fn destination(&self) -> &Address {
        &self.destination
    }

    async fn transmit(&self, message: &Message) -> Result<(), TransmitError> {
        let url = match &self.destination {
            Address::WebSocket { url } => url.as_str(),
            other => {
                return Err(TransmitError::permanent(format!(
                    "websocket stub bound to non-websocket address {other}"
                )))
            }
        };
        self.sender.send(url, message).await
    }
}

/// Produces stubs for [`Address::WebSocket`] destinations.
pub struct WebSocketMessagingStubFactory {
    sender: Arc<dyn WebSocketSender>,
}

impl WebSocketMessagingStubFactory {
    pub fn new(sender: Arc<dyn WebSocketSender>) -> Self {
        Self { sender }
    }
}

impl MessagingStubFactory for WebSocketMessagingStubFactory {
    fn transport_name(&self) -> &'static str {
        "websocket"
    }

    fn can_create(&self, address: &Address) -> bool {
        matches!(address, Address::WebSocket { .. })
    }

    fn create(&self, address: &Address) -> Arc<dyn MessagingStub> {
        Arc::new(WebSocketMessagingStub {
            destination: address.clone(),
            sender: self.sender.clone(),
        })
    }
}
