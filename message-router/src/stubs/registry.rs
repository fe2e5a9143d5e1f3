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

//! Capability-keyed factory registry with a shared per-address stub cache.

use crate::address::Address;
use crate::observability::events;
use crate::stubs::{MessagingStub, MessagingStubFactory};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

const COMPONENT: &str = "stub_registry";

/// Stub selection failures. Both variants are configuration problems,
/// permanent for the affected address.
#[derive(Debug)]
pub enum StubRegistryError {
    /// No registered factory claimed the address variant.
    NoFactoryForAddress(Address),
    /// More than one factory claimed the address, or a second factory was
    /// registered under an already-taken transport name.
    AmbiguousFactory {
        address: Option<Address>,
        transports: Vec<&'static str>,
    },
}

impl Display for StubRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StubRegistryError::NoFactoryForAddress(address) => {
                write!(f, "no messaging stub factory claims address {address}")
            }
            StubRegistryError::AmbiguousFactory {
                address: Some(address),
                transports,
            } => write!(
                f,
                "multiple stub factories ({}) claim address {address}",
                transports.join(", ")
            ),
            StubRegistryError::AmbiguousFactory {
                address: None,
                transports,
            } => write!(
                f,
                "stub factory for transport {} registered twice",
                transports.join(", ")
            ),
        }
    }
}

impl Error for StubRegistryError {}

/// Registry of transport stub factories plus the cache of created stubs.
///
/// One stub per destination address; all routes to the same destination share
/// the cached instance until the address is evicted.
pub struct MessagingStubRegistry {
    factories: Vec<Arc<dyn MessagingStubFactory>>,
    cache: Mutex<HashMap<Address, Arc<dyn MessagingStub>>>,
}

impl MessagingStubRegistry {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a transport factory at startup. A duplicate transport name
    /// is rejected immediately so a misconfigured runtime fails before it
    /// routes anything.
    pub fn register_factory(
        &mut self,
        factory: Arc<dyn MessagingStubFactory>,
    ) -> Result<(), StubRegistryError> {
        let name = factory.transport_name();
        if self
            .factories
            .iter()
            .any(|existing| existing.transport_name() == name)
        {
            error!(
                event = events::STUB_AMBIGUOUS_FACTORY,
                component = COMPONENT,
                transport = name,
                "duplicate stub factory registration"
            );
            return Err(StubRegistryError::AmbiguousFactory {
                address: None,
                transports: vec![name],
            });
        }

        debug!(
            event = events::STUB_FACTORY_REGISTERED,
            component = COMPONENT,
            transport = name,
            "stub factory registered"
        );
        self.factories.push(factory);
        Ok(())
    }

    /// Returns the cached stub for `address`, creating it on first use.
    pub async fn get_or_create(
        &self,
        address: &Address,
    ) -> Result<Arc<dyn MessagingStub>, StubRegistryError> {
        let mut cache = self.cache.lock().await;
        if let Some(stub) = cache.get(address) {
            debug!(
                event = events::STUB_REUSE,
                component = COMPONENT,
                address = %address,
                "reusing cached stub"
            );
            return Ok(stub.clone());
        }

        let claiming: Vec<&Arc<dyn MessagingStubFactory>> = self
            .factories
            .iter()
            .filter(|factory| factory.can_create(address))
            .collect();

        match claiming.as_slice() {
            [] => {
                error!(
                    event = events::STUB_NO_FACTORY,
                    component = COMPONENT,
                    address = %address,
                    "no stub factory claims address; transport not configured"
                );
                Err(StubRegistryError::NoFactoryForAddress(address.clone()))
            }
            [factory] => {
                let stub = factory.create(address);
                debug!(
                    event = events::STUB_CREATE,
                    component = COMPONENT,
                    address = %address,
                    transport = factory.transport_name(),
                    "created stub"
                );
                cache.insert(address.clone(), stub.clone());
                Ok(stub)
            }
            _ => {
                let transports: Vec<&'static str> = claiming
                    .iter()
                    .map(|factory| factory.transport_name())
                    .collect();
                error!(
                    event = events::STUB_AMBIGUOUS_FACTORY,
                    component = COMPONENT,
                    address = %address,
                    transports = transports.join(","),
                    "multiple stub factories claim address"
                );
                Err(StubRegistryError::AmbiguousFactory {
                    address: Some(address.clone()),
                    transports,
                })
            }
        }
    }

    /// Drops the cached stub for `address`. In-flight transmits holding the
    /// stub `Arc` complete independently.
    pub async fn evict(&self, address: &Address) -> bool {
        let removed = self.cache.lock().await.remove(address).is_some();
        if removed {
            debug!(
                event = events::STUB_EVICT,
                component = COMPONENT,
                address = %address,
                "evicted cached stub"
            );
        }
        removed
    }

    #[cfg(test)]
    pub(crate) async fn cached_stub_count(&self) -> usize {
        self.cache.lock().await.len()
    }
}

impl Default for MessagingStubRegistry {
    fn default() -> Self {
        Self::new()
    }
}
