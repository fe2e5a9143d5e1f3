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

//! # domain-access-control
//!
//! Local access-control subsystem of the cluster controller: a persistent
//! store of domain roles and access/registration control entries
//! ([`LocalDomainAccessStore`]), the authorization decision layer
//! ([`LocalDomainAccessController`]), and the role-gated mutation gateway
//! ([`AccessControlListEditor`]).
//!
//! Stored entries may carry wildcards (`"*"` or a `"prefix*"` pattern on
//! domain/interface); queries are always concrete and resolve to the most
//! specific stored match, with field precedence uid > domain > interface >
//! operation.
//!
//! ```
//! use domain_access_control::{
//!     LocalDomainAccessStore, MasterAccessControlEntry, Permission, TrustLevel, WILDCARD,
//! };
//!
//! let store = LocalDomainAccessStore::new();
//! let base = MasterAccessControlEntry {
//!     uid: WILDCARD.to_string(),
//!     domain: "domain".to_string(),
//!     interface_name: "interfaceName".to_string(),
//!     default_required_trust_level: TrustLevel::Low,
//!     possible_required_trust_levels: vec![TrustLevel::Low],
//!     default_required_control_entry_change_trust_level: TrustLevel::Low,
//!     possible_required_control_entry_change_trust_levels: vec![TrustLevel::Low],
//!     operation: WILDCARD.to_string(),
//!     default_consumer_permission: Permission::No,
//!     possible_consumer_permissions: vec![Permission::No, Permission::Ask],
//! };
//! store.update_master_access_control_entry(base.clone());
//! store.update_master_access_control_entry(MasterAccessControlEntry {
//!     uid: "testUser1".to_string(),
//!     default_consumer_permission: Permission::Ask,
//!     ..base
//! });
//!
//! // The exact-uid entry wins over the wildcard entry.
//! let entry = store
//!     .get_master_access_control_entry("testUser1", "domain", "interfaceName", "READ")
//!     .unwrap();
//! assert_eq!(entry.uid, "testUser1");
//! assert_eq!(entry.default_consumer_permission, Permission::Ask);
//! ```
//!
//! ## Persistence
//!
//! A store opened with [`LocalDomainAccessStore::open`] loads the whole table
//! set into memory and flushes every successful mutation back to the file
//! before reporting success. Readers work on immutable snapshots, so a
//! concurrent mutation is never observed half-applied.
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits
//! events/spans and does not unconditionally initialize a global subscriber.

mod types;
pub use types::{
    CallContext, DomainRoleEntry, MasterAccessControlEntry, MasterRegistrationControlEntry,
    OwnerAccessControlEntry, OwnerRegistrationControlEntry, Permission, Role, TrustLevel,
};

mod wildcard;
pub use wildcard::WILDCARD;

mod store;
pub use store::{LocalDomainAccessStore, StoreError, DEFAULT_PERSISTENCE_FILE};

mod controller;
pub use controller::LocalDomainAccessController;

mod editor;
pub use editor::AccessControlListEditor;
