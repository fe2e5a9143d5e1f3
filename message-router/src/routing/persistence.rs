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

//! File-backed persistence for globally visible routing entries.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// On-disk form of one routing entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct PersistedRoutingEntry {
    pub(crate) participant_id: String,
    pub(crate) address: Address,
    pub(crate) is_globally_visible: bool,
    pub(crate) expiry_date_ms: i64,
    pub(crate) is_sticky: bool,
}

/// Routing-table persistence failures.
#[derive(Debug)]
pub enum PersistenceError {
    Io(PathBuf, std::io::Error),
    Decode(PathBuf, serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Io(path, err) => {
                write!(f, "routing table file {}: {err}", path.display())
            }
            PersistenceError::Decode(path, err) => {
                write!(f, "corrupt routing table file {}: {err}", path.display())
            }
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PersistenceError::Io(_, err) => Some(err),
            PersistenceError::Decode(_, err) => Some(err),
        }
    }
}

pub(crate) struct RoutingTablePersistence {
    path: PathBuf,
}

impl RoutingTablePersistence {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all persisted entries; a missing file is an empty table.
    pub(crate) fn load(&self) -> Result<Vec<PersistedRoutingEntry>, PersistenceError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(PersistenceError::Io(self.path.clone(), err)),
        };
        serde_json::from_str(&contents)
            .map_err(|err| PersistenceError::Decode(self.path.clone(), err))
    }

    /// Rewrites the file atomically: write a sibling temp file, then rename.
    pub(crate) fn save(
        &self,
        entries: &[PersistedRoutingEntry],
    ) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string_pretty(entries)
            .map_err(|err| PersistenceError::Decode(self.path.clone(), err))?;

        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, encoded)
            .map_err(|err| PersistenceError::Io(tmp_path.clone(), err))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|err| PersistenceError::Io(self.path.clone(), err))
    }
}
