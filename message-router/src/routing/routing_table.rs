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

//! Routing-table data model and storage owner for next-hop resolution.

use crate::address::Address;
use crate::observability::events;
use crate::routing::persistence::{PersistedRoutingEntry, RoutingTablePersistence};
use crate::routing::PersistenceError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const COMPONENT: &str = "routing_table";

/// One next-hop mapping from participant id to transport address.
///
/// The address is shared ownership: the stub cache keys on the same value and
/// an in-flight send may hold it after the entry is gone.
#[derive(Clone, Debug)]
pub struct RoutingEntry {
    pub participant_id: String,
    pub address: Arc<Address>,
    pub is_globally_visible: bool,
    pub expiry_date_ms: i64,
    pub is_sticky: bool,
}

impl RoutingEntry {
    fn is_expired(&self, now_ms: i64) -> bool {
        self.expiry_date_ms <= now_ms
    }
}

/// Registration failures surfaced by [`RoutingTable::add_next_hop`].
#[derive(Debug)]
pub enum RegistrationError {
    /// A live sticky entry exists and the caller did not allow updates.
    StickyEntryConflict(String),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationError::StickyEntryConflict(participant_id) => write!(
                f,
                "sticky routing entry for participant {participant_id} cannot be replaced"
            ),
        }
    }
}

impl Error for RegistrationError {}

/// Storage owner for next-hop entries.
///
/// Readers resolve concurrently under a shared lock; every mutation takes the
/// exclusive lock, so lookups always observe a consistent table. Expiry is
/// lazy: resolution treats an expired entry as absent, and the periodic sweep
/// reclaims it.
pub struct RoutingTable {
    entries: RwLock<HashMap<String, RoutingEntry>>,
    persistence: Option<RoutingTablePersistence>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            persistence: None,
        }
    }

    /// Opens a table backed by `path`, loading previously persisted entries.
    /// An unreadable or corrupt file fails construction.
    pub fn with_persistence(path: PathBuf) -> Result<Self, PersistenceError> {
        let persistence = RoutingTablePersistence::new(path);
        let persisted = persistence.load()?;
        let mut entries = HashMap::with_capacity(persisted.len());
        for persisted_entry in persisted {
            entries.insert(
                persisted_entry.participant_id.clone(),
                RoutingEntry {
                    participant_id: persisted_entry.participant_id,
                    address: Arc::new(persisted_entry.address),
                    is_globally_visible: persisted_entry.is_globally_visible,
                    expiry_date_ms: persisted_entry.expiry_date_ms,
                    is_sticky: persisted_entry.is_sticky,
                },
            );
        }
        info!(
            event = events::PERSISTENCE_LOAD_OK,
            component = COMPONENT,
            entries = entries.len(),
            path = %persistence.path().display(),
            "routing table restored"
        );
        Ok(Self {
            entries: RwLock::new(entries),
            persistence: Some(persistence),
        })
    }

    /// Inserts or replaces the next hop for a participant.
    ///
    /// A live prior entry is replaced only when `allow_update` is set; a live
    /// sticky entry additionally turns the refused update into an error. An
    /// expired prior entry counts as absent.
    pub async fn add_next_hop(
        &self,
        entry: RoutingEntry,
        allow_update: bool,
        now_ms: i64,
    ) -> Result<(), RegistrationError> {
        let mut entries = self.entries.write().await;

        if let Some(existing) = entries.get(&entry.participant_id) {
            if !existing.is_expired(now_ms) {
                if existing.is_sticky && !allow_update {
                    warn!(
                        event = events::HOP_ADD_STICKY_CONFLICT,
                        component = COMPONENT,
                        participant_id = entry.participant_id.as_str(),
                        "refusing to replace sticky entry"
                    );
                    return Err(RegistrationError::StickyEntryConflict(entry.participant_id));
                }
                if !allow_update {
                    debug!(
                        event = events::HOP_ADD_UPDATE_SKIPPED,
                        component = COMPONENT,
                        participant_id = entry.participant_id.as_str(),
                        "existing entry kept, update not allowed"
                    );
                    return Ok(());
                }
            }
        }

        debug!(
            event = events::HOP_ADD_OK,
            component = COMPONENT,
            participant_id = entry.participant_id.as_str(),
            address = %entry.address,
            is_globally_visible = entry.is_globally_visible,
            is_sticky = entry.is_sticky,
            "next hop registered"
        );
        entries.insert(entry.participant_id.clone(), entry);
        self.persist_locked(&entries);
        Ok(())
    }

    /// Removes the entry unless it is sticky; sticky entries survive
    /// unprivileged removal. Absent entries are a no-op.
    pub async fn remove_next_hop(&self, participant_id: &str) -> Option<Arc<Address>> {
        let mut entries = self.entries.write().await;
        match entries.get(participant_id) {
            None => {
                debug!(
                    event = events::HOP_REMOVE_MISSING,
                    component = COMPONENT,
                    participant_id,
                    "no entry to remove"
                );
                None
            }
            Some(existing) if existing.is_sticky => {
                warn!(
                    event = events::HOP_REMOVE_STICKY_REJECTED,
                    component = COMPONENT,
                    participant_id,
                    "sticky entry kept"
                );
                None
            }
            Some(_) => {
                let removed = entries.remove(participant_id);
                debug!(
                    event = events::HOP_REMOVE_OK,
                    component = COMPONENT,
                    participant_id,
                    "next hop removed"
                );
                self.persist_locked(&entries);
                removed.map(|entry| entry.address)
            }
        }
    }

    /// Resolves the live next hop; absent and expired entries both yield `None`.
    pub async fn resolve_next_hop(&self, participant_id: &str, now_ms: i64) -> Option<Arc<Address>> {
        let entries = self.entries.read().await;
        entries
            .get(participant_id)
            .filter(|entry| !entry.is_expired(now_ms))
            .map(|entry| entry.address.clone())
    }

    /// Removes expired non-sticky entries, returning the freed pairs so the
    /// caller can evict stale stubs.
    pub async fn purge_expired(&self, now_ms: i64) -> Vec<(String, Arc<Address>)> {
        let mut entries = self.entries.write().await;
        let expired_ids: Vec<String> = entries
            .values()
            .filter(|entry| entry.is_expired(now_ms) && !entry.is_sticky)
            .map(|entry| entry.participant_id.clone())
            .collect();

        let mut purged = Vec::with_capacity(expired_ids.len());
        for participant_id in expired_ids {
            if let Some(entry) = entries.remove(&participant_id) {
                debug!(
                    event = events::HOP_EXPIRED_PURGED,
                    component = COMPONENT,
                    participant_id = participant_id.as_str(),
                    "expired entry purged"
                );
                purged.push((participant_id, entry.address));
            }
        }
        if !purged.is_empty() {
            self.persist_locked(&entries);
        }
        purged
    }

    /// True when any live entry still routes to `address`.
    pub async fn address_in_use(&self, address: &Address, now_ms: i64) -> bool {
        let entries = self.entries.read().await;
        entries
            .values()
            .any(|entry| !entry.is_expired(now_ms) && entry.address.as_ref() == address)
    }

    /// Writes the durable subset (globally visible entries) while the caller
    /// already holds the write lock. A failed write keeps the in-memory table
    /// authoritative and is reported once per mutation.
    fn persist_locked(&self, entries: &HashMap<String, RoutingEntry>) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        let durable: Vec<PersistedRoutingEntry> = entries
            .values()
            .filter(|entry| entry.is_globally_visible)
            .map(|entry| PersistedRoutingEntry {
                participant_id: entry.participant_id.clone(),
                address: entry.address.as_ref().clone(),
                is_globally_visible: entry.is_globally_visible,
                expiry_date_ms: entry.expiry_date_ms,
                is_sticky: entry.is_sticky,
            })
            .collect();
        if let Err(err) = persistence.save(&durable) {
            warn!(
                event = events::PERSISTENCE_WRITE_FAILED,
                component = COMPONENT,
                err = %err,
                "routing table not persisted"
            );
        }
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::new()
    }
}
