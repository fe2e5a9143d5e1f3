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

//! Transport stub abstraction: one sender object per destination address,
//! produced by per-transport factories and cached by the registry.

use crate::address::Address;
use crate::message::Message;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod registry;
pub use registry::{MessagingStubRegistry, StubRegistryError};

mod in_process;
pub use in_process::{InProcessMessagingStubFactory, InProcessSkeleton};

mod mqtt;
pub use mqtt::{MqttMessagingStubFactory, MqttSender, REPLY_TO_HEADER};

mod websocket;
pub use websocket::{WebSocketMessagingStubFactory, WebSocketSender};

/// How a failed transmit should be handled by the router.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransmitErrorKind {
    /// Worth retrying: connection refused, broker momentarily unavailable.
    Transient,
    /// Retrying cannot help: protocol mismatch, malformed destination.
    Permanent,
}

/// Transport-level transmit failure with its retry classification.
#[derive(Clone, Debug)]
pub struct TransmitError {
    kind: TransmitErrorKind,
    detail: String,
}

impl TransmitError {
    pub fn transient(detail: impl Into<String>) -> Self {
        Self {
            kind: TransmitErrorKind::Transient,
            detail: detail.into(),
        }
    }

    pub fn permanent(detail: impl Into<String>) -> Self {
        Self {
            kind: TransmitErrorKind::Permanent,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> TransmitErrorKind {
        self.kind
    }

    pub fn is_transient(&self) -> bool {
        self.kind == TransmitErrorKind::Transient
    }
}

impl Display for TransmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            TransmitErrorKind::Transient => "transient",
            TransmitErrorKind::Permanent => "permanent",
        };
        write!(f, "{kind} transmit failure: {}", self.detail)
    }
}

impl Error for TransmitError {}

/// Sender bound to exactly one destination address.
#[async_trait]
pub trait MessagingStub: Send + Sync {
    /// The address this stub was created for.
    fn destination(&self) -> &Address;

    /// Transmits one message to the bound destination.
    async fn transmit(&self, message: &Message) -> Result<(), TransmitError>;
}

/// Per-transport stub constructor registered with the stub registry.
///
/// Adding a transport means implementing this trait and registering the
/// factory at startup; the router itself never changes.
pub trait MessagingStubFactory: Send + Sync {
    /// Transport label; must be unique across registered factories.
    fn transport_name(&self) -> &'static str;

    /// Capability probe: does this factory handle the given address variant?
    fn can_create(&self, address: &Address) -> bool;

    /// Builds a stub bound to `address`. Only called after `can_create`
    /// returned true for the same address.
    fn create(&self, address: &Address) -> Arc<dyn MessagingStub>;
}
