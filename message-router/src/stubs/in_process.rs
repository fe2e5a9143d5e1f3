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

//! In-process transport: hands messages straight to the local dispatcher.

use crate::address::Address;
use crate::message::Message;
use crate::stubs::{MessagingStub, MessagingStubFactory, TransmitError};
use async_trait::async_trait;
use std::sync::Arc;

/// Local dispatcher entry point for messages that never leave the process.
#[async_trait]
pub trait InProcessSkeleton: Send + Sync {
    async fn deliver(&self, message: Message) -> Result<(), TransmitError>;
}

struct InProcessMessagingStub {
    destination: Address,
    skeleton: Arc<dyn InProcessSkeleton>,
}

#[async_trait]
impl MessagingStub for InProcessMessagingStub {
    fn destination(&self) -> &Address {
        &self.destination
    }

    async fn transmit(&self, message: &Message) -> Result<(), TransmitError> {
        self.skeleton.deliver(message.clone()).await
    }
}

/// Produces stubs for [`Address::InProcess`] destinations, all backed by the
/// dispatcher skeleton handed in at startup.
pub struct InProcessMessagingStubFactory {
    skeleton: Arc<dyn InProcessSkeleton>,
}

impl InProcessMessagingStubFactory {
    pub fn new(skeleton: Arc<dyn InProcessSkeleton>) -> Self {
        Self { skeleton }
    }
}

impl MessagingStubFactory for InProcessMessagingStubFactory {
    fn transport_name(&self) -> &'static str {
        "in-process"
    }

    fn can_create(&self, address: &Address) -> bool {
        matches!(address, Address::InProcess { .. })
    }

    fn create(&self, address: &Address) -> Arc<dyn MessagingStub> {
        Arc::new(InProcessMessagingStub {
            destination: address.clone(),
            skeleton: self.skeleton.clone(),
        })
    }
}
