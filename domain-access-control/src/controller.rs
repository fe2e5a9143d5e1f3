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

//! Authorization decision layer over the access store.

use crate::store::LocalDomainAccessStore;
use crate::types::{Permission, Role, TrustLevel};
use crate::wildcard::WILDCARD;
use std::sync::Arc;
use tracing::trace;

const COMPONENT: &str = "access_controller";

/// Answers role and consumer-permission queries from the store tables.
///
/// Permission resolution walks the tiers from most to least binding: an owner
/// entry decides when its trust requirement is met, then the mediator tier,
/// then the master tier; with no matching entry the answer is
/// [`Permission::No`].
pub struct LocalDomainAccessController {
    store: Arc<LocalDomainAccessStore>,
}

impl LocalDomainAccessController {
    pub fn new(store: Arc<LocalDomainAccessStore>) -> Self {
        Self { store }
    }

    /// True when `uid` holds `role` for `domain`.
    pub fn has_role(&self, uid: &str, domain: &str, role: Role) -> bool {
        let granted = self
            .store
            .get_domain_role(uid, role)
            .map(|entry| entry.domains.contains(domain))
            .unwrap_or(false);
        trace!(
            component = COMPONENT,
            uid,
            domain,
            role = ?role,
            granted,
            "role lookup"
        );
        granted
    }

    /// Interface-level consumer permission.
    ///
    /// Returns `None` when operation-level entries exist for the tuple: the
    /// caller must then ask per operation, because a single interface-level
    /// answer would be wrong for at least one operation.
    pub fn get_consumer_permission(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        trust_level: TrustLevel,
    ) -> Option<Permission> {
        if !self
            .store
            .only_wildcard_operations(uid, domain, interface_name)
        {
            return None;
        }
        Some(self.get_consumer_permission_for_operation(
            uid,
            domain,
            interface_name,
            WILDCARD,
            trust_level,
        ))
    }

    /// Consumer permission for one concrete operation (or the wildcard).
    pub fn get_consumer_permission_for_operation(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
        trust_level: TrustLevel,
    ) -> Permission {
        if let Some(owner_ace) =
            self.store
                .get_owner_access_control_entry(uid, domain, interface_name, operation)
        {
            if trust_level >= owner_ace.required_trust_level {
                return owner_ace.consumer_permission;
            }
        }

        if let Some(mediator_ace) =
            self.store
                .get_mediator_access_control_entry(uid, domain, interface_name, operation)
        {
            if trust_level >= mediator_ace.default_required_trust_level {
                return mediator_ace.default_consumer_permission;
            }
        }

        if let Some(master_ace) =
            self.store
                .get_master_access_control_entry(uid, domain, interface_name, operation)
        {
            if trust_level >= master_ace.default_required_trust_level {
                return master_ace.default_consumer_permission;
            }
        }

        Permission::No
    }
}
