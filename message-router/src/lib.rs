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

//! # message-router
//!
//! `message-router` is the routing core of the cluster controller: it maps a
//! participant id to a transport address, selects and caches a messaging stub
//! for that address, and delivers messages with bounded retry on transient
//! transport failures.
//!
//! The outward surface is [`MessageRouter`] plus the data model
//! ([`Address`], [`Message`]) and the transport seam
//! ([`stubs::MessagingStub`], [`stubs::MessagingStubFactory`]). Transports are
//! plugged in at startup by registering a factory per address variant; the
//! router itself never changes when a transport is added.
//!
//! ## Routing a message in-process
//!
//! ```
//! use std::sync::Arc;
//! use message_router::{Address, Message, MessageRouter, RouterConfig};
//! use message_router::routing::RoutingTable;
//! use message_router::stubs::{InProcessMessagingStubFactory, MessagingStubRegistry};
//!
//! # pub mod dispatcher_mock {
//! #     use async_trait::async_trait;
//! #     use message_router::stubs::{InProcessSkeleton, TransmitError};
//! #     use message_router::Message;
//! #     use std::sync::Mutex;
//! #
//! #     #[derive(Default)]
//! #     pub struct RecordingDispatcher {
//! #         pub delivered: Mutex<Vec<Message>>,
//! #     }
//! #
//! #     #[async_trait]
//! #     impl InProcessSkeleton for RecordingDispatcher {
//! #         async fn deliver(&self, message: Message) -> Result<(), TransmitError> {
//! #             self.delivered.lock().unwrap().push(message);
//! #             Ok(())
//! #         }
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let dispatcher = Arc::new(dispatcher_mock::RecordingDispatcher::default());
//!
//! let mut stub_registry = MessagingStubRegistry::new();
//! stub_registry
//!     .register_factory(Arc::new(InProcessMessagingStubFactory::new(
//!         dispatcher.clone(),
//!     )))
//!     .unwrap();
//!
//! let router = MessageRouter::new(
//!     Arc::new(RoutingTable::new()),
//!     Arc::new(stub_registry),
//!     RouterConfig::default(),
//! );
//!
//! let address = Arc::new(Address::InProcess {
//!     participant_scope: "local-dispatcher".to_string(),
//! });
//! router
//!     .add_next_hop(
//!         "provider-participant",
//!         address,
//!         false,
//!         message_router::now_millis() + 60_000,
//!         false,
//!         false,
//!     )
//!     .await
//!     .unwrap();
//!
//! router
//!     .route(Message::new("proxy", "provider-participant", 60_000, vec![1, 2, 3]))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(dispatcher.delivered.lock().unwrap().len(), 1);
//! # });
//! ```
//!
//! ## Delivery semantics
//!
//! Messages to distinct participants are routed independently. Under retry
//! there is no per-participant ordering guarantee: a retried message may
//! interleave with newer messages to the same participant. Removing a routing
//! entry does not cancel an in-flight send that already holds its stub.
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits
//! events/spans and does not unconditionally initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod address;
pub use address::Address;

mod message;
pub use message::{now_millis, Message};

mod config;
pub use config::{ConfigError, RouterConfig};

#[doc(hidden)]
pub mod observability;

pub mod routing;
pub mod stubs;

mod router;
pub use router::{MessageRouter, RouteError};
