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
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_INITIAL_RETRY_INTERVAL_MS: u64 = 500;
pub const DEFAULT_MAX_RETRY_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_RETRY_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 1_000;

/// Tunables for delivery retry and routing-table housekeeping.
///
/// Retry pacing is deliberately configuration, not code: deployments behind a
/// flaky broker want a different envelope than an in-process-only runtime.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// First delay after a transient transmit failure.
    #[serde(default = "default_initial_retry_interval_ms")]
    pub initial_retry_interval_ms: u64,
    /// Upper bound for the growing retry delay.
    #[serde(default = "default_max_retry_interval_ms")]
    pub max_retry_interval_ms: u64,
    /// Factor applied to the delay after each transient failure.
    #[serde(default = "default_retry_multiplier")]
    pub retry_multiplier: f64,
    /// Interval of the periodic expired-entry sweep.
    #[serde(default = "default_cleanup_interval_ms")]
    pub routing_table_cleanup_interval_ms: u64,
    /// When set, globally visible routing entries are persisted here.
    #[serde(default)]
    pub routing_table_persistence_file: Option<PathBuf>,
}

fn default_initial_retry_interval_ms() -> u64 {
    DEFAULT_INITIAL_RETRY_INTERVAL_MS
}

fn default_max_retry_interval_ms() -> u64 {
    DEFAULT_MAX_RETRY_INTERVAL_MS
}

fn default_retry_multiplier() -> f64 {
    DEFAULT_RETRY_MULTIPLIER
}

fn default_cleanup_interval_ms() -> u64 {
    DEFAULT_CLEANUP_INTERVAL_MS
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            initial_retry_interval_ms: DEFAULT_INITIAL_RETRY_INTERVAL_MS,
            max_retry_interval_ms: DEFAULT_MAX_RETRY_INTERVAL_MS,
            retry_multiplier: DEFAULT_RETRY_MULTIPLIER,
            routing_table_cleanup_interval_ms: DEFAULT_CLEANUP_INTERVAL_MS,
            routing_table_persistence_file: None,
        }
    }
}

impl RouterConfig {
    /// Loads configuration from a json5 file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read(path.to_path_buf(), source))?;
        json5::from_str(&contents).map_err(|source| ConfigError::Parse(path.to_path_buf(), source))
    }
}

/// Configuration loading failures.
#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, json5::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(path, err) => {
                write!(f, "failed to read config file {}: {err}", path.display())
            }
            ConfigError::Parse(path, err) => {
                write!(f, "failed to parse config file {}: {err}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Read(_, err) => Some(err),
            ConfigError::Parse(_, err) => Some(err),
        }
    }
}
