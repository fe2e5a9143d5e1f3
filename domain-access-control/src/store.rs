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

//! Persistent table of domain roles and access/registration control entries
//! with most-specific wildcard lookup.
//!
//! Readers load one immutable snapshot and never block; every mutation clones
//! the current snapshot, applies the change, flushes it to the persistence
//! file, and only then swaps the new snapshot in. A reader therefore never
//! observes a half-applied mutation, and a mutation that fails to persist
//! leaves the in-memory state untouched.

use crate::types::{
    DomainRoleEntry, MasterAccessControlEntry, MasterRegistrationControlEntry,
    OwnerAccessControlEntry, OwnerRegistrationControlEntry, Role,
};
use crate::wildcard::{matches, Specificity, WILDCARD};
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

const COMPONENT: &str = "access_store";

const EVENT_STORE_LOADED: &str = "access_store_loaded";
const EVENT_STORE_PERSIST_FAILED: &str = "access_store_persist_failed";
const EVENT_STORE_ENTRY_UPDATED: &str = "access_store_entry_updated";
const EVENT_STORE_ENTRY_REMOVED: &str = "access_store_entry_removed";

/// Default persistence file name, relative to the working directory.
pub const DEFAULT_PERSISTENCE_FILE: &str = "LocalDomainAccessStore.persist";

/// Store construction / persistence failures.
#[derive(Debug)]
pub enum StoreError {
    Io(PathBuf, std::io::Error),
    Decode(PathBuf, serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(path, err) => {
                write!(f, "access store file {}: {err}", path.display())
            }
            StoreError::Decode(path, err) => {
                write!(f, "corrupt access store file {}: {err}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(_, err) => Some(err),
            StoreError::Decode(_, err) => Some(err),
        }
    }
}

/// Composite key of operation-level control entries.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct OperationKey {
    uid: String,
    domain: String,
    interface_name: String,
    operation: String,
}

/// Composite key of interface-level (registration) control entries.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct InterfaceKey {
    uid: String,
    domain: String,
    interface_name: String,
}

/// Field access shared by every control-entry kind so lookup logic is written
/// once. Registration entries report the wildcard as their operation.
trait ControlEntry: Clone {
    fn uid(&self) -> &str;
    fn domain(&self) -> &str;
    fn interface_name(&self) -> &str;
    fn operation(&self) -> &str;
}

impl ControlEntry for MasterAccessControlEntry {
    fn uid(&self) -> &str {
        &self.uid
    }
    fn domain(&self) -> &str {
        &self.domain
    }
    fn interface_name(&self) -> &str {
        &self.interface_name
    }
    fn operation(&self) -> &str {
        &self.operation
    }
}

impl ControlEntry for OwnerAccessControlEntry {
    fn uid(&self) -> &str {
        &self.uid
    }
    fn domain(&self) -> &str {
        &self.domain
    }
    fn interface_name(&self) -> &str {
        &self.interface_name
    }
    fn operation(&self) -> &str {
        &self.operation
    }
}

impl ControlEntry for MasterRegistrationControlEntry {
    fn uid(&self) -> &str {
        &self.uid
    }
    fn domain(&self) -> &str {
        &self.domain
    }
    fn interface_name(&self) -> &str {
        &self.interface_name
    }
    fn operation(&self) -> &str {
        WILDCARD
    }
}

impl ControlEntry for OwnerRegistrationControlEntry {
    fn uid(&self) -> &str {
        &self.uid
    }
    fn domain(&self) -> &str {
        &self.domain
    }
    fn interface_name(&self) -> &str {
        &self.interface_name
    }
    fn operation(&self) -> &str {
        WILDCARD
    }
}

fn operation_key<E: ControlEntry>(entry: &E) -> OperationKey {
    OperationKey {
        uid: entry.uid().to_string(),
        domain: entry.domain().to_string(),
        interface_name: entry.interface_name().to_string(),
        operation: entry.operation().to_string(),
    }
}

fn interface_key<E: ControlEntry>(entry: &E) -> InterfaceKey {
    InterfaceKey {
        uid: entry.uid().to_string(),
        domain: entry.domain().to_string(),
        interface_name: entry.interface_name().to_string(),
    }
}

/// Immutable view of all seven tables.
#[derive(Clone, Default)]
struct StoreSnapshot {
    domain_roles: BTreeMap<(String, Role), DomainRoleEntry>,
    master_aces: BTreeMap<OperationKey, MasterAccessControlEntry>,
    mediator_aces: BTreeMap<OperationKey, MasterAccessControlEntry>,
    owner_aces: BTreeMap<OperationKey, OwnerAccessControlEntry>,
    master_rces: BTreeMap<InterfaceKey, MasterRegistrationControlEntry>,
    mediator_rces: BTreeMap<InterfaceKey, MasterRegistrationControlEntry>,
    owner_rces: BTreeMap<InterfaceKey, OwnerRegistrationControlEntry>,
}

/// On-disk form: flat record lists, rebuilt into keyed tables on load.
#[derive(Default, Serialize, Deserialize)]
struct PersistedStore {
    domain_roles: Vec<DomainRoleEntry>,
    master_access_entries: Vec<MasterAccessControlEntry>,
    mediator_access_entries: Vec<MasterAccessControlEntry>,
    owner_access_entries: Vec<OwnerAccessControlEntry>,
    master_registration_entries: Vec<MasterRegistrationControlEntry>,
    mediator_registration_entries: Vec<MasterRegistrationControlEntry>,
    owner_registration_entries: Vec<OwnerRegistrationControlEntry>,
}

impl From<&StoreSnapshot> for PersistedStore {
    fn from(snapshot: &StoreSnapshot) -> Self {
        Self {
            domain_roles: snapshot.domain_roles.values().cloned().collect(),
            master_access_entries: snapshot.master_aces.values().cloned().collect(),
            mediator_access_entries: snapshot.mediator_aces.values().cloned().collect(),
            owner_access_entries: snapshot.owner_aces.values().cloned().collect(),
            master_registration_entries: snapshot.master_rces.values().cloned().collect(),
            mediator_registration_entries: snapshot.mediator_rces.values().cloned().collect(),
            owner_registration_entries: snapshot.owner_rces.values().cloned().collect(),
        }
    }
}

impl From<PersistedStore> for StoreSnapshot {
    fn from(persisted: PersistedStore) -> Self {
        let mut snapshot = StoreSnapshot::default();
        for entry in persisted.domain_roles {
            snapshot
                .domain_roles
                .insert((entry.uid.clone(), entry.role), entry);
        }
        for entry in persisted.master_access_entries {
            snapshot.master_aces.insert(operation_key(&entry), entry);
        }
        for entry in persisted.mediator_access_entries {
            snapshot.mediator_aces.insert(operation_key(&entry), entry);
        }
        for entry in persisted.owner_access_entries {
            snapshot.owner_aces.insert(operation_key(&entry), entry);
        }
        for entry in persisted.master_registration_entries {
            snapshot.master_rces.insert(interface_key(&entry), entry);
        }
        for entry in persisted.mediator_registration_entries {
            snapshot.mediator_rces.insert(interface_key(&entry), entry);
        }
        for entry in persisted.owner_registration_entries {
            snapshot.owner_rces.insert(interface_key(&entry), entry);
        }
        snapshot
    }
}

/// Most-specific stored entry matching a query tuple, if any.
///
/// The queried operation may itself be the wildcard, meaning "any operation":
/// interface-level permission checks resolve that way before asking
/// per-operation.
fn most_specific<'a, E, I>(
    candidates: I,
    uid: &str,
    domain: &str,
    interface_name: &str,
    operation: &str,
) -> Option<&'a E>
where
    E: ControlEntry + 'a,
    I: Iterator<Item = &'a E>,
{
    candidates
        .filter(|entry| {
            matches(entry.uid(), uid)
                && matches(entry.domain(), domain)
                && matches(entry.interface_name(), interface_name)
                && (operation == WILDCARD || matches(entry.operation(), operation))
        })
        .min_by_key(|entry| {
            (
                Specificity::rank(
                    entry.uid(),
                    entry.domain(),
                    entry.interface_name(),
                    entry.operation(),
                ),
                operation_key(*entry),
            )
        })
}

/// Entries visible to `uid`: its own plus wildcard-uid entries.
fn uid_filter<E: ControlEntry>(entry: &E, uid: &str) -> bool {
    entry.uid() == uid || entry.uid() == WILDCARD
}

/// Local store of the domain access-control tables.
pub struct LocalDomainAccessStore {
    snapshot: ArcSwap<StoreSnapshot>,
    writer: Mutex<()>,
    persistence_path: Option<PathBuf>,
}

impl LocalDomainAccessStore {
    /// In-memory store without a persistence file.
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(StoreSnapshot::default()),
            writer: Mutex::new(()),
            persistence_path: None,
        }
    }

    /// Opens a store backed by `path`, loading all persisted entries. A
    /// missing file starts empty; an unreadable or corrupt file is fatal.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let persisted: PersistedStore = serde_json::from_str(&contents)
                    .map_err(|err| StoreError::Decode(path.clone(), err))?;
                StoreSnapshot::from(persisted)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreSnapshot::default(),
            Err(err) => return Err(StoreError::Io(path.clone(), err)),
        };
        info!(
            event = EVENT_STORE_LOADED,
            component = COMPONENT,
            path = %path.display(),
            domain_roles = snapshot.domain_roles.len(),
            "access store loaded"
        );
        Ok(Self {
            snapshot: ArcSwap::from_pointee(snapshot),
            writer: Mutex::new(()),
            persistence_path: Some(path),
        })
    }

    fn load(&self) -> Arc<StoreSnapshot> {
        self.snapshot.load_full()
    }

    /// Applies one mutation with write-then-swap semantics. Returns false
    /// when the mutation was a no-op or the flush failed; in both cases the
    /// visible snapshot is unchanged.
    fn mutate<F>(&self, apply: F) -> bool
    where
        F: FnOnce(&mut StoreSnapshot) -> bool,
    {
        let _writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut next = (*self.load()).clone();
        if !apply(&mut next) {
            return false;
        }
        if let Some(path) = &self.persistence_path {
            if let Err(err) = persist(path, &next) {
                warn!(
                    event = EVENT_STORE_PERSIST_FAILED,
                    component = COMPONENT,
                    err = %err,
                    "mutation rolled back, snapshot not swapped"
                );
                return false;
            }
        }
        self.snapshot.store(Arc::new(next));
        true
    }

    // --- domain roles ---------------------------------------------------

    pub fn update_domain_role(&self, entry: DomainRoleEntry) -> bool {
        debug!(
            event = EVENT_STORE_ENTRY_UPDATED,
            component = COMPONENT,
            table = "domain_roles",
            uid = entry.uid.as_str(),
            "upserting domain role"
        );
        self.mutate(|snapshot| {
            snapshot
                .domain_roles
                .insert((entry.uid.clone(), entry.role), entry);
            true
        })
    }

    pub fn remove_domain_role(&self, uid: &str, role: Role) -> bool {
        debug!(
            event = EVENT_STORE_ENTRY_REMOVED,
            component = COMPONENT,
            table = "domain_roles",
            uid,
            "removing domain role"
        );
        self.mutate(|snapshot| {
            snapshot
                .domain_roles
                .remove(&(uid.to_string(), role))
                .is_some()
        })
    }

    pub fn get_domain_roles(&self, uid: &str) -> Vec<DomainRoleEntry> {
        self.load()
            .domain_roles
            .values()
            .filter(|entry| entry.uid == uid)
            .cloned()
            .collect()
    }

    pub fn get_domain_role(&self, uid: &str, role: Role) -> Option<DomainRoleEntry> {
        self.load()
            .domain_roles
            .get(&(uid.to_string(), role))
            .cloned()
    }

    // --- master access control entries ----------------------------------

    pub fn update_master_access_control_entry(&self, entry: MasterAccessControlEntry) -> bool {
        self.mutate(|snapshot| {
            snapshot.master_aces.insert(operation_key(&entry), entry);
            true
        })
    }

    pub fn remove_master_access_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        let key = OperationKey {
            uid: uid.to_string(),
            domain: domain.to_string(),
            interface_name: interface_name.to_string(),
            operation: operation.to_string(),
        };
        self.mutate(|snapshot| snapshot.master_aces.remove(&key).is_some())
    }

    pub fn get_master_access_control_entries(&self, uid: &str) -> Vec<MasterAccessControlEntry> {
        let snapshot = self.load();
        entries_for_uid(snapshot.master_aces.values(), uid)
    }

    pub fn get_master_access_control_entries_for_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MasterAccessControlEntry> {
        let snapshot = self.load();
        entries_for_interface(snapshot.master_aces.values(), domain, interface_name)
    }

    pub fn get_master_access_control_entries_for_uid_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MasterAccessControlEntry> {
        let snapshot = self.load();
        entries_for_uid_interface(snapshot.master_aces.values(), uid, domain, interface_name)
    }

    pub fn get_master_access_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Option<MasterAccessControlEntry> {
        let snapshot = self.load();
        most_specific(
            snapshot.master_aces.values(),
            uid,
            domain,
            interface_name,
            operation,
        )
        .cloned()
    }

    pub fn get_editable_master_access_control_entries(
        &self,
        uid: &str,
    ) -> Vec<MasterAccessControlEntry> {
        let snapshot = self.load();
        editable_entries(snapshot.master_aces.values(), &snapshot, uid, Role::Master)
    }

    // --- mediator access control entries --------------------------------

    pub fn update_mediator_access_control_entry(&self, entry: MasterAccessControlEntry) -> bool {
        self.mutate(|snapshot| {
            snapshot.mediator_aces.insert(operation_key(&entry), entry);
            true
        })
    }

    pub fn remove_mediator_access_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        let key = OperationKey {
            uid: uid.to_string(),
            domain: domain.to_string(),
            interface_name: interface_name.to_string(),
            operation: operation.to_string(),
        };
        self.mutate(|snapshot| snapshot.mediator_aces.remove(&key).is_some())
    }

    pub fn get_mediator_access_control_entries(&self, uid: &str) -> Vec<MasterAccessControlEntry> {
        let snapshot = self.load();
        entries_for_uid(snapshot.mediator_aces.values(), uid)
    }

    pub fn get_mediator_access_control_entries_for_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MasterAccessControlEntry> {
        let snapshot = self.load();
        entries_for_interface(snapshot.mediator_aces.values(), domain, interface_name)
    }

    pub fn get_mediator_access_control_entries_for_uid_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<MasterAccessControlEntry> {
        let snapshot = self.load();
        entries_for_uid_interface(snapshot.mediator_aces.values(), uid, domain, interface_name)
    }

    pub fn get_mediator_access_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Option<MasterAccessControlEntry> {
        let snapshot = self.load();
        most_specific(
            snapshot.mediator_aces.values(),
            uid,
            domain,
            interface_name,
            operation,
        )
        .cloned()
    }

    pub fn get_editable_mediator_access_control_entries(
        &self,
        uid: &str,
    ) -> Vec<MasterAccessControlEntry> {
        let snapshot = self.load();
        editable_entries(snapshot.mediator_aces.values(), &snapshot, uid, Role::Master)
    }

    // --- owner access control entries -----------------------------------

    pub fn update_owner_access_control_entry(&self, entry: OwnerAccessControlEntry) -> bool {
        self.mutate(|snapshot| {
            snapshot.owner_aces.insert(operation_key(&entry), entry);
            true
        })
    }

    pub fn remove_owner_access_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> bool {
        let key = OperationKey {
            uid: uid.to_string(),
            domain: domain.to_string(),
            interface_name: interface_name.to_string(),
            operation: operation.to_string(),
        };
        self.mutate(|snapshot| snapshot.owner_aces.remove(&key).is_some())
    }

    pub fn get_owner_access_control_entries(&self, uid: &str) -> Vec<OwnerAccessControlEntry> {
        let snapshot = self.load();
        entries_for_uid(snapshot.owner_aces.values(), uid)
    }

    pub fn get_owner_access_control_entries_for_interface(
        &self,
        domain: &str,
        interface_name: &str,
    ) -> Vec<OwnerAccessControlEntry> {
        let snapshot = self.load();
        entries_for_interface(snapshot.owner_aces.values(), domain, interface_name)
    }

    pub fn get_owner_access_control_entries_for_uid_interface(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Vec<OwnerAccessControlEntry> {
        let snapshot = self.load();
        entries_for_uid_interface(snapshot.owner_aces.values(), uid, domain, interface_name)
    }

    pub fn get_owner_access_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
        operation: &str,
    ) -> Option<OwnerAccessControlEntry> {
        let snapshot = self.load();
        most_specific(
            snapshot.owner_aces.values(),
            uid,
            domain,
            interface_name,
            operation,
        )
        .cloned()
    }

    pub fn get_editable_owner_access_control_entries(
        &self,
        uid: &str,
    ) -> Vec<OwnerAccessControlEntry> {
        let snapshot = self.load();
        editable_entries(snapshot.owner_aces.values(), &snapshot, uid, Role::Owner)
    }

    // --- registration control entries -----------------------------------

    pub fn update_master_registration_control_entry(
        &self,
        entry: MasterRegistrationControlEntry,
    ) -> bool {
        self.mutate(|snapshot| {
            snapshot.master_rces.insert(interface_key(&entry), entry);
            true
        })
    }

    pub fn remove_master_registration_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> bool {
        let key = InterfaceKey {
            uid: uid.to_string(),
            domain: domain.to_string(),
            interface_name: interface_name.to_string(),
        };
        self.mutate(|snapshot| snapshot.master_rces.remove(&key).is_some())
    }

    pub fn get_master_registration_control_entries(
        &self,
        uid: &str,
    ) -> Vec<MasterRegistrationControlEntry> {
        let snapshot = self.load();
        entries_for_uid(snapshot.master_rces.values(), uid)
    }

    pub fn get_master_registration_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Option<MasterRegistrationControlEntry> {
        let snapshot = self.load();
        most_specific(
            snapshot.master_rces.values(),
            uid,
            domain,
            interface_name,
            WILDCARD,
        )
        .cloned()
    }

    pub fn get_editable_master_registration_control_entries(
        &self,
        uid: &str,
    ) -> Vec<MasterRegistrationControlEntry> {
        let snapshot = self.load();
        editable_entries(snapshot.master_rces.values(), &snapshot, uid, Role::Master)
    }

    pub fn update_mediator_registration_control_entry(
        &self,
        entry: MasterRegistrationControlEntry,
    ) -> bool {
        self.mutate(|snapshot| {
            snapshot.mediator_rces.insert(interface_key(&entry), entry);
            true
        })
    }

    pub fn remove_mediator_registration_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> bool {
        let key = InterfaceKey {
            uid: uid.to_string(),
            domain: domain.to_string(),
            interface_name: interface_name.to_string(),
        };
        self.mutate(|snapshot| snapshot.mediator_rces.remove(&key).is_some())
    }

    pub fn get_mediator_registration_control_entries(
        &self,
        uid: &str,
    ) -> Vec<MasterRegistrationControlEntry> {
        let snapshot = self.load();
        entries_for_uid(snapshot.mediator_rces.values(), uid)
    }

    pub fn get_editable_mediator_registration_control_entries(
        &self,
        uid: &str,
    ) -> Vec<MasterRegistrationControlEntry> {
        let snapshot = self.load();
        editable_entries(snapshot.mediator_rces.values(), &snapshot, uid, Role::Master)
    }

    pub fn update_owner_registration_control_entry(
        &self,
        entry: OwnerRegistrationControlEntry,
    ) -> bool {
        self.mutate(|snapshot| {
            snapshot.owner_rces.insert(interface_key(&entry), entry);
            true
        })
    }

    pub fn remove_owner_registration_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> bool {
        let key = InterfaceKey {
            uid: uid.to_string(),
            domain: domain.to_string(),
            interface_name: interface_name.to_string(),
        };
        self.mutate(|snapshot| snapshot.owner_rces.remove(&key).is_some())
    }

    pub fn get_owner_registration_control_entries(
        &self,
        uid: &str,
    ) -> Vec<OwnerRegistrationControlEntry> {
        let snapshot = self.load();
        entries_for_uid(snapshot.owner_rces.values(), uid)
    }

    pub fn get_owner_registration_control_entry(
        &self,
        uid: &str,
        domain: &str,
        interface_name: &str,
    ) -> Option<OwnerRegistrationControlEntry> {
        let snapshot = self.load();
        most_specific(
            snapshot.owner_rces.values(),
            uid,
            domain,
            interface_name,
            WILDCARD,
        )
        .cloned()
    }

    pub fn get_editable_owner_registration_control_entries(
        &self,
        uid: &str,
    ) -> Vec<OwnerRegistrationControlEntry> {
        let snapshot = self.load();
        editable_entries(snapshot.owner_rces.values(), &snapshot, uid, Role::Owner)
    }

    // --- cross-table queries --------------------------------------------

    /// True when no ACE matching `(uid, domain, interface_name)` in any tier
    /// names a concrete operation. Vacuously true for an empty match set.
    pub fn only_wildcard_operations(&self, uid: &str, domain: &str, interface_name: &str) -> bool {
        let snapshot = self.load();
        let master_concrete = snapshot
            .master_aces
            .values()
            .chain(snapshot.mediator_aces.values())
            .filter(|entry| {
                uid_filter(*entry, uid)
                    && entry.domain == domain
                    && entry.interface_name == interface_name
            })
            .any(|entry| entry.operation != WILDCARD);
        let owner_concrete = snapshot
            .owner_aces
            .values()
            .filter(|entry| {
                uid_filter(*entry, uid)
                    && entry.domain == domain
                    && entry.interface_name == interface_name
            })
            .any(|entry| entry.operation != WILDCARD);
        !(master_concrete || owner_concrete)
    }
}

impl Default for LocalDomainAccessStore {
    fn default() -> Self {
        Self::new()
    }
}

fn entries_for_uid<'a, E, I>(candidates: I, uid: &str) -> Vec<E>
where
    E: ControlEntry + 'a,
    I: Iterator<Item = &'a E>,
{
    candidates
        .filter(|entry| uid_filter(*entry, uid))
        .cloned()
        .collect()
}

fn entries_for_interface<'a, E, I>(candidates: I, domain: &str, interface_name: &str) -> Vec<E>
where
    E: ControlEntry + 'a,
    I: Iterator<Item = &'a E>,
{
    candidates
        .filter(|entry| entry.domain() == domain && entry.interface_name() == interface_name)
        .cloned()
        .collect()
}

fn entries_for_uid_interface<'a, E, I>(
    candidates: I,
    uid: &str,
    domain: &str,
    interface_name: &str,
) -> Vec<E>
where
    E: ControlEntry + 'a,
    I: Iterator<Item = &'a E>,
{
    candidates
        .filter(|entry| {
            uid_filter(*entry, uid)
                && entry.domain() == domain
                && entry.interface_name() == interface_name
        })
        .cloned()
        .collect()
}

/// Entries editable by `uid`: those whose domain the uid governs through a
/// matching domain-role entry. No role entry means nothing is editable.
fn editable_entries<'a, E, I>(
    candidates: I,
    snapshot: &StoreSnapshot,
    uid: &str,
    role: Role,
) -> Vec<E>
where
    E: ControlEntry + 'a,
    I: Iterator<Item = &'a E>,
{
    let Some(role_entry) = snapshot.domain_roles.get(&(uid.to_string(), role)) else {
        return Vec::new();
    };
    candidates
        .filter(|entry| role_entry.domains.contains(entry.domain()))
        .cloned()
        .collect()
}

fn persist(path: &Path, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
    let persisted = PersistedStore::from(snapshot);
    let encoded = serde_json::to_string_pretty(&persisted)
        .map_err(|err| StoreError::Decode(path.to_path_buf(), err))?;
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, encoded).map_err(|err| StoreError::Io(tmp_path.clone(), err))?;
    std::fs::rename(&tmp_path, path).map_err(|err| StoreError::Io(path.to_path_buf(), err))
}
