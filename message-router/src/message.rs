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

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Milliseconds since the Unix epoch, the time base for all expiry fields.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Routable message envelope: opaque payload plus the headers the router
/// needs (sender, recipient, absolute expiry).
///
/// The payload bytes are produced and consumed by the RPC codec layer; the
/// router never inspects them. Custom headers travel with the message
/// verbatim so outer layers can attach correlation data.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    id: String,
    sender: String,
    recipient: String,
    expiry_date_ms: i64,
    custom_headers: BTreeMap<String, String>,
    payload: Vec<u8>,
}

impl Message {
    /// Builds a message expiring `ttl_ms` from now.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        ttl_ms: i64,
        payload: Vec<u8>,
    ) -> Self {
        Self::with_expiry_date(sender, recipient, now_millis() + ttl_ms, payload)
    }

    /// Builds a message with an absolute expiry timestamp.
    pub fn with_expiry_date(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        expiry_date_ms: i64,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: sender.into(),
            recipient: recipient.into(),
            expiry_date_ms,
            custom_headers: BTreeMap::new(),
            payload,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Participant id the router resolves to a next hop.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn expiry_date_ms(&self) -> i64 {
        self.expiry_date_ms
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn set_custom_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom_headers.insert(key.into(), value.into());
    }

    pub fn custom_header(&self, key: &str) -> Option<&str> {
        self.custom_headers.get(key).map(String::as_str)
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expiry_date_ms <= now_ms
    }

    /// Remaining time to live; negative once the message expired.
    pub fn remaining_ttl_ms(&self, now_ms: i64) -> i64 {
        self.expiry_date_ms - now_ms
    }
}
