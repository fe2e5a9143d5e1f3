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

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Transport-level destination of a routing entry.
///
/// [`Address`] is a closed set of transport variants; each stub factory claims
/// exactly one of them. Addresses are immutable value types, so equality and
/// hashing cover the full variant payload (an MQTT address is identified by
/// broker plus topic, a WebSocket address by its url).
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Address {
    /// Dispatcher running in the same process as the router.
    InProcess { participant_scope: String },
    /// Remote cluster controller reachable through a shared MQTT broker.
    Mqtt { broker_uri: String, topic: String },
    /// Client library runtime connected over a WebSocket server endpoint.
    WebSocket { url: String },
}

impl Address {
    /// Stable transport label used in log fields and factory diagnostics.
    pub fn transport_name(&self) -> &'static str {
        match self {
            Address::InProcess { .. } => "in-process",
            Address::Mqtt { .. } => "mqtt",
            Address::WebSocket { .. } => "websocket",
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Address::InProcess { participant_scope } => {
                write!(f, "in-process:{participant_scope}")
            }
            Address::Mqtt { broker_uri, topic } => write!(f, "mqtt:{broker_uri}/{topic}"),
            Address::WebSocket { url } => write!(f, "websocket:{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Address;
    use std::collections::HashSet;

    #[test]
    fn equality_covers_variant_payload() {
        let a = Address::Mqtt {
            broker_uri: "tcp://broker:1883".to_string(),
            topic: "cc/one".to_string(),
        };
        let b = Address::Mqtt {
            broker_uri: "tcp://broker:1883".to_string(),
            topic: "cc/one".to_string(),
        };
        let c = Address::Mqtt {
            broker_uri: "tcp://broker:1883".to_string(),
            topic: "cc/two".to_string(),
        };

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serde_round_trip_is_stable() {
        let address = Address::WebSocket {
            url: "ws://localhost:4242".to_string(),
        };

        let encoded = serde_json::to_string(&address).expect("address should serialize");
        let decoded: Address = serde_json::from_str(&encoded).expect("address should deserialize");

        assert_eq!(address, decoded);
    }
}
