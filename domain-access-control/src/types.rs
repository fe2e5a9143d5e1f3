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

//! Access-control data types shared by the store, controller, and editor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Role a user can hold over a set of domains.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Master,
    Owner,
}

/// Outcome of a permission decision.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    Yes,
    Ask,
    No,
}

/// Trust placed in the caller's identity. Variants are ordered ascending so
/// the derived `Ord` makes `High` the strongest level.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustLevel {
    None,
    Low,
    Mid,
    High,
}

/// Grants `uid` a role over a set of domains. Keyed by `(uid, role)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DomainRoleEntry {
    pub uid: String,
    pub domains: BTreeSet<String>,
    pub role: Role,
}

impl DomainRoleEntry {
    pub fn new(uid: impl Into<String>, domains: BTreeSet<String>, role: Role) -> Self {
        Self {
            uid: uid.into(),
            domains,
            role,
        }
    }
}

/// Master- (and mediator-) tier rule for invoking an interface operation.
///
/// `uid` and `operation` may be the wildcard sentinel; `domain` and
/// `interface_name` may additionally be prefix patterns ending in `*`.
/// Keyed by `(uid, domain, interface_name, operation)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MasterAccessControlEntry {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub default_required_trust_level: TrustLevel,
    pub possible_required_trust_levels: Vec<TrustLevel>,
    pub default_required_control_entry_change_trust_level: TrustLevel,
    pub possible_required_control_entry_change_trust_levels: Vec<TrustLevel>,
    pub operation: String,
    pub default_consumer_permission: Permission,
    pub possible_consumer_permissions: Vec<Permission>,
}

/// Owner-tier rule for invoking an interface operation. Same key shape as the
/// master entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OwnerAccessControlEntry {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub required_trust_level: TrustLevel,
    pub required_ace_change_trust_level: TrustLevel,
    pub operation: String,
    pub consumer_permission: Permission,
}

/// Master- (and mediator-) tier rule for registering a provider. Provider
/// registration is interface-level, so there is no operation field.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MasterRegistrationControlEntry {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub default_required_trust_level: TrustLevel,
    pub possible_required_trust_levels: Vec<TrustLevel>,
    pub default_required_control_entry_change_trust_level: TrustLevel,
    pub possible_required_control_entry_change_trust_levels: Vec<TrustLevel>,
    pub default_provider_permission: Permission,
    pub possible_provider_permissions: Vec<Permission>,
}

/// Owner-tier rule for registering a provider.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OwnerRegistrationControlEntry {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub required_trust_level: TrustLevel,
    pub required_ace_change_trust_level: TrustLevel,
    pub provider_permission: Permission,
}

/// Caller identity threaded explicitly through every editor operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallContext {
    principal: String,
}

impl CallContext {
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
        }
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }
}

#[cfg(test)]
mod tests {
    use super::TrustLevel;

    #[test]
    fn trust_levels_order_ascending() {
        assert!(TrustLevel::High > TrustLevel::Mid);
        assert!(TrustLevel::Mid > TrustLevel::Low);
        assert!(TrustLevel::Low > TrustLevel::None);
    }
}
