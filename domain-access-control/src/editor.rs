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

//! Mutation gateway over the access store, gated by domain roles.
//!
//! Every operation returns `bool`: authorization denial is an expected
//! outcome, never an error. With audit mode enabled a denied role check is
//! logged and then treated as granted, so operators can observe what
//! enforcement would block before turning it on.

use crate::controller::LocalDomainAccessController;
use crate::store::LocalDomainAccessStore;
use crate::types::{
    CallContext, MasterAccessControlEntry, MasterRegistrationControlEntry,
    OwnerAccessControlEntry, OwnerRegistrationControlEntry, Role,
};
use std::sync::Arc;
use tracing::{error, trace};

const COMPONENT: &str = "acl_editor";

const EVENT_AUDIT_DENIED: &str = "acl_audit_denied";
const EVENT_AUDIT_GRANTED: &str = "acl_audit_granted";

pub struct AccessControlListEditor {
    store: Arc<LocalDomainAccessStore>,
    controller: Arc<LocalDomainAccessController>,
    audit_mode: bool,
}

impl AccessControlListEditor {
    pub fn new(
        store: Arc<LocalDomainAccessStore>,
        controller: Arc<LocalDomainAccessController>,
        audit_mode: bool,
    ) -> Self {
        Self {
            store,
            controller,
            audit_mode,
        }
    }

    fn has_role_master(&self, context: &CallContext, domain: &str) -> bool {
        self.has_role_worker(context, domain, Role::Master)
    }

    fn has_role_owner(&self, context: &CallContext, domain: &str) -> bool {
        self.has_role_worker(context, domain, Role::Owner)
    }

    fn has_role_worker(&self, context: &CallContext, domain: &str, role: Role) -> bool {
        let uid = context.principal();
        trace!(
            component = COMPONENT,
            uid,
            domain,
            role = ?role,
            "role check for ACL edit"
        );
        let mut has_role = self.controller.has_role(uid, domain, role);

        if self.audit_mode {
            if has_role {
                trace!(
                    event = EVENT_AUDIT_GRANTED,
                    component = COMPONENT,
                    uid,
                    domain,
                    "audit: edit would be allowed"
                );
            } else {
                error!(
                    event = EVENT_AUDIT_DENIED,
                    component = COMPONENT,
                    uid,
                    domain,
                    "audit: edit would be denied"
                );
                has_role = true;
            }
        }

        has_role
    }

    // --- master tier ----------------------------------------------------

    pub fn update_master_access_control_entry(
        &self,
        context: &CallContext,
        entry: MasterAccessControlEntry,
    ) -> bool {
        if !self.has_role_master(context, &entry.domain) {
            return false;
        }
        self.store.update_master_access_control_entry(entry)
    }

    pub fn remove_master_access_control_entry(
        &self,
        context: &CallContext,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        if !self.has_role_master(context, domain) {
            return false;
        }
        self.store
            .remove_master_access_control_entry(uid, domain, interface_name, operation)
    }

    pub fn update_master_registration_control_entry(
        &self,
        context: &CallContext,
        entry: MasterRegistrationControlEntry,
    ) -> bool {
        if !self.has_role_master(context, &entry.domain) {
            return false;
        }
        self.store.update_master_registration_control_entry(entry)
    }

    pub fn remove_master_registration_control_entry(
        &self,
        context: &CallContext,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> bool {
        if !self.has_role_master(context, domain) {
            return false;
        }
        self.store
            .remove_master_registration_control_entry(uid, domain, interface_name)
    }

    // --- mediator tier --------------------------------------------------
    // Mediator edits are gated by the MASTER role: the mediator tier refines
    // master rules, so its editors are the same population.

    pub fn update_mediator_access_control_entry(
        &self,
        context: &CallContext,
        entry: MasterAccessControlEntry,
    ) -> bool {
        if !self.has_role_master(context, &entry.domain) {
            return false;
        }
        self.store.update_mediator_access_control_entry(entry)
    }

    pub fn remove_mediator_access_control_entry(
        &self,
        context: &CallContext,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        if !self.has_role_master(context, domain) {
            return false;
        }
        self.store
            .remove_mediator_access_control_entry(uid, domain, interface_name, operation)
    }

    pub fn update_mediator_registration_control_entry(
        &self,
        context: &CallContext,
        entry: MasterRegistrationControlEntry,
    ) -> bool {
        if !self.has_role_master(context, &entry.domain) {
            return false;
        }
        self.store.update_mediator_registration_control_entry(entry)
    }

    pub fn remove_mediator_registration_control_entry(
        &self,
        context: &CallContext,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> bool {
        if !self.has_role_master(context, domain) {
            return false;
        }
        self.store
            .remove_mediator_registration_control_entry(uid, domain, interface_name)
    }

    // --- owner tier -----------------------------------------------------

    pub fn update_owner_access_control_entry(
        &self,
        context: &CallContext,
        entry: OwnerAccessControlEntry,
    ) -> bool {
        if !self.has_role_owner(context, &entry.domain) {
            return false;
        }
        self.store.update_owner_access_control_entry(entry)
    }

    pub fn remove_owner_access_control_entry(
        &self,
        context: &CallContext,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        if !self.has_role_owner(context, domain) {
            return false;
        }
        self.store
            .remove_owner_access_control_entry(uid, domain, interface_name, operation)
    }

    pub fn update_owner_registration_control_entry(
        &self,
        context: &CallContext,
        entry: OwnerRegistrationControlEntry,
    ) -> bool {
        if !self.has_role_owner(context, &entry.domain) {
            return false;
        }
        self.store.update_owner_registration_control_entry(entry)
    }

    pub fn remove_owner_registration_control_entry(
        &self,
        context: &CallContext,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> bool {
        if !self.has_role_owner(context, domain) {
            return false;
        }
        self.store
            .remove_owner_registration_control_entry(uid, domain, interface_name)
    }
}

#[cfg(test)]
mod tests {
    use super::AccessControlListEditor;
    use crate::controller::LocalDomainAccessController;
    use crate::store::LocalDomainAccessStore;
    use crate::types::{
        CallContext, DomainRoleEntry, MasterAccessControlEntry, Permission, Role, TrustLevel,
    };
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn editor(audit_mode: bool) -> (AccessControlListEditor, Arc<LocalDomainAccessStore>) {
        let store = Arc::new(LocalDomainAccessStore::new());
        let controller = Arc::new(LocalDomainAccessController::new(store.clone()));
        (
            AccessControlListEditor::new(store.clone(), controller, audit_mode),
            store,
        )
    }

    fn master_ace(domain: &str) -> MasterAccessControlEntry {
        MasterAccessControlEntry {
            uid: "consumerUser".to_string(),
            domain: domain.to_string(),
            interface_name: "interface1".to_string(),
            default_required_trust_level: TrustLevel::Low,
            possible_required_trust_levels: vec![TrustLevel::Low],
            default_required_control_entry_change_trust_level: TrustLevel::Low,
            possible_required_control_entry_change_trust_levels: vec![TrustLevel::Low],
            operation: "READ".to_string(),
            default_consumer_permission: Permission::Ask,
            possible_consumer_permissions: vec![Permission::Ask, Permission::No],
        }
    }

    fn grant(store: &LocalDomainAccessStore, uid: &str, domain: &str, role: Role) {
        store.update_domain_role(DomainRoleEntry::new(
            uid,
            BTreeSet::from([domain.to_string()]),
            role,
        ));
    }

    #[test]
    fn update_is_denied_without_master_role() {
        let (editor, store) = editor(false);
        let context = CallContext::new("editorUser");

        assert!(!editor.update_master_access_control_entry(&context, master_ace("domain1")));
        assert!(store
            .get_master_access_control_entries("consumerUser")
            .is_empty());
    }

    #[test]
    fn update_succeeds_with_master_role_on_target_domain() {
        let (editor, store) = editor(false);
        grant(&store, "editorUser", "domain1", Role::Master);
        let context = CallContext::new("editorUser");

        assert!(editor.update_master_access_control_entry(&context, master_ace("domain1")));
        assert!(!editor.update_master_access_control_entry(&context, master_ace("domain2")));
        assert_eq!(
            store.get_master_access_control_entries("consumerUser").len(),
            1
        );
    }

    #[test]
    fn mediator_edits_require_master_role() {
        let (editor, store) = editor(false);
        grant(&store, "editorUser", "domain1", Role::Owner);
        let context = CallContext::new("editorUser");

        // Owner role is not enough for the mediator tier.
        assert!(!editor.update_mediator_access_control_entry(&context, master_ace("domain1")));

        grant(&store, "editorUser", "domain1", Role::Master);
        assert!(editor.update_mediator_access_control_entry(&context, master_ace("domain1")));
    }

    #[test]
    fn remove_reports_missing_entry_as_false_even_when_authorized() {
        let (editor, store) = editor(false);
        grant(&store, "editorUser", "domain1", Role::Master);
        let context = CallContext::new("editorUser");

        assert!(!editor.remove_master_access_control_entry(
            &context,
            "consumerUser",
            "domain1",
            "interface1",
            "READ"
        ));
    }

    #[test]
    fn audit_mode_lets_denied_edits_through() {
        let (editor, store) = editor(true);
        let context = CallContext::new("unprivilegedUser");

        assert!(editor.update_master_access_control_entry(&context, master_ace("domain1")));
        assert_eq!(
            store.get_master_access_control_entries("consumerUser").len(),
            1
        );
    }
}
