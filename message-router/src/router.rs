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

//! Delivery orchestration: resolve the next hop, pick a stub, transmit,
//! retry transient failures with bounded backoff.

use crate::address::Address;
use crate::config::RouterConfig;
use crate::message::{now_millis, Message};
use crate::observability::{events, fields};
use crate::routing::{RegistrationError, RoutingEntry, RoutingTable};
use crate::stubs::{MessagingStubRegistry, StubRegistryError, TransmitError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const COMPONENT: &str = "message_router";

/// Delivery failures surfaced by [`MessageRouter::route`].
#[derive(Debug)]
pub enum RouteError {
    /// No live routing entry for the recipient.
    UnknownParticipant(String),
    /// The message expired before the first delivery attempt.
    MessageExpired { message_id: String },
    /// Transient transport failures exhausted the message TTL.
    MessageNotSent {
        message_id: String,
        attempts: u32,
        last_error: TransmitError,
    },
    /// No stub could be produced for the resolved address.
    Stub(StubRegistryError),
    /// The transport reported a permanent failure.
    Transport(TransmitError),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::UnknownParticipant(participant_id) => {
                write!(f, "no routing entry for participant {participant_id}")
            }
            RouteError::MessageExpired { message_id } => {
                write!(f, "message {message_id} expired before routing")
            }
            RouteError::MessageNotSent {
                message_id,
                attempts,
                last_error,
            } => write!(
                f,
                "message {message_id} not sent after {attempts} attempts: {last_error}"
            ),
            RouteError::Stub(err) => write!(f, "stub selection failed: {err}"),
            RouteError::Transport(err) => write!(f, "transport failure: {err}"),
        }
    }
}

impl Error for RouteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RouteError::MessageNotSent { last_error, .. } => Some(last_error),
            RouteError::Stub(err) => Some(err),
            RouteError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Routes messages to registered next hops over pluggable transports.
///
/// Delivery to distinct participants is independent: no router-wide lock is
/// held across a transmit. Under retry there is no per-participant ordering
/// guarantee; a retried message may interleave with newer ones.
pub struct MessageRouter {
    routing_table: Arc<RoutingTable>,
    stub_registry: Arc<MessagingStubRegistry>,
    config: RouterConfig,
}

impl MessageRouter {
    pub fn new(
        routing_table: Arc<RoutingTable>,
        stub_registry: Arc<MessagingStubRegistry>,
        config: RouterConfig,
    ) -> Self {
        Self {
            routing_table,
            stub_registry,
            config,
        }
    }

    pub fn routing_table(&self) -> &Arc<RoutingTable> {
        &self.routing_table
    }

    /// Registers the next hop for a participant.
    pub async fn add_next_hop(
        &self,
        participant_id: impl Into<String>,
        address: Arc<Address>,
        is_globally_visible: bool,
        expiry_date_ms: i64,
        is_sticky: bool,
        allow_update: bool,
    ) -> Result<(), RegistrationError> {
        let entry = RoutingEntry {
            participant_id: participant_id.into(),
            address,
            is_globally_visible,
            expiry_date_ms,
            is_sticky,
        };
        self.routing_table
            .add_next_hop(entry, allow_update, now_millis())
            .await
    }

    /// Removes the next hop and evicts the destination stub once no other
    /// live entry routes to the same address.
    pub async fn remove_next_hop(&self, participant_id: &str) {
        let Some(address) = self.routing_table.remove_next_hop(participant_id).await else {
            return;
        };
        if !self
            .routing_table
            .address_in_use(address.as_ref(), now_millis())
            .await
        {
            self.stub_registry.evict(address.as_ref()).await;
        }
    }

    /// Delivers one message to its recipient's next hop.
    ///
    /// Transient transport failures are retried with exponential backoff,
    /// bounded by the message TTL; permanent failures surface immediately.
    pub async fn route(&self, message: Message) -> Result<(), RouteError> {
        let now = now_millis();
        if message.is_expired(now) {
            warn!(
                event = events::ROUTE_MESSAGE_EXPIRED,
                component = COMPONENT,
                msg_id = message.id(),
                participant_id = message.recipient(),
                "dropping expired message"
            );
            return Err(RouteError::MessageExpired {
                message_id: message.id().to_string(),
            });
        }

        let Some(address) = self
            .routing_table
            .resolve_next_hop(message.recipient(), now)
            .await
        else {
            warn!(
                event = events::ROUTE_UNKNOWN_PARTICIPANT,
                component = COMPONENT,
                msg_id = message.id(),
                participant_id = message.recipient(),
                "no next hop"
            );
            return Err(RouteError::UnknownParticipant(
                message.recipient().to_string(),
            ));
        };

        let stub = self
            .stub_registry
            .get_or_create(address.as_ref())
            .await
            .map_err(RouteError::Stub)?;

        let mut attempts: u32 = 0;
        let mut backoff_ms = self.config.initial_retry_interval_ms.max(1);
        loop {
            attempts += 1;
            debug!(
                event = events::ROUTE_SEND_ATTEMPT,
                component = COMPONENT,
                msg_id = message.id(),
                attempt = attempts,
                address = %address,
                "attempting delivery"
            );
            let last_error = match stub.transmit(&message).await {
                Ok(()) => {
                    debug!(
                        event = events::ROUTE_SEND_OK,
                        component = COMPONENT,
                        msg_id = message.id(),
                        attempt = attempts,
                        "delivered"
                    );
                    return Ok(());
                }
                Err(err) if err.is_transient() => err,
                Err(err) => {
                    warn!(
                        event = events::ROUTE_SEND_FAILED,
                        component = COMPONENT,
                        msg_id = message.id(),
                        attempt = attempts,
                        err = %err,
                        "permanent transport failure"
                    );
                    return Err(RouteError::Transport(err));
                }
            };

            let remaining_ms = message.remaining_ttl_ms(now_millis());
            if remaining_ms <= 0 {
                warn!(
                    event = events::ROUTE_SEND_FAILED,
                    component = COMPONENT,
                    msg_id = message.id(),
                    attempt = attempts,
                    reason = fields::REASON_TTL_ELAPSED,
                    err = %last_error,
                    "giving up on delivery"
                );
                return Err(RouteError::MessageNotSent {
                    message_id: message.id().to_string(),
                    attempts,
                    last_error,
                });
            }

            let delay_ms = backoff_ms.min(remaining_ms as u64);
            debug!(
                event = events::ROUTE_SEND_RETRY,
                component = COMPONENT,
                msg_id = message.id(),
                attempt = attempts,
                delay_ms,
                err = %last_error,
                "transient failure, rescheduling"
            );
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;

            backoff_ms = ((backoff_ms as f64) * self.config.retry_multiplier) as u64;
            backoff_ms = backoff_ms.min(self.config.max_retry_interval_ms).max(1);
        }
    }

    /// Starts the periodic expired-entry sweep. Stale entries are reclaimed
    /// and their stubs evicted once no live entry shares the address.
    pub fn spawn_cleanup_task(&self) -> JoinHandle<()> {
        let routing_table = self.routing_table.clone();
        let stub_registry = self.stub_registry.clone();
        let interval = Duration::from_millis(self.config.routing_table_cleanup_interval_ms.max(1));
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let now = now_millis();
                let purged = routing_table.purge_expired(now).await;
                if purged.is_empty() {
                    continue;
                }
                info!(
                    event = events::ROUTE_CLEANUP_SWEEP,
                    component = COMPONENT,
                    purged = purged.len(),
                    "expired entries reclaimed"
                );
                for (_participant_id, address) in purged {
                    if !routing_table.address_in_use(address.as_ref(), now).await {
                        stub_registry.evict(address.as_ref()).await;
                    }
                }
            }
        })
    }
}
