// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Per-record serialization of mutations
//!
//! dnscmd offers no locking, so two requests touching the same record could
//! interleave their invocations (a replace's delete and add in particular).
//! [`RecordLocks`] hands out one async mutex per (zone, node, type) key;
//! requests for different records never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Identity of a record for locking purposes
///
/// DNS names and record types are case-insensitive, so the key is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    zone: String,
    node: String,
    record_type: String,
}

impl RecordKey {
    pub fn new(zone: &str, node: &str, record_type: &str) -> Self {
        Self {
            zone: zone.to_ascii_lowercase(),
            node: node.to_ascii_lowercase(),
            record_type: record_type.to_ascii_uppercase(),
        }
    }
}

/// Held for the duration of one mutation
pub type RecordGuard = OwnedMutexGuard<()>;

/// Registry of per-record locks
#[derive(Debug, Default)]
pub struct RecordLocks {
    locks: Mutex<HashMap<RecordKey, Arc<AsyncMutex<()>>>>,
}

impl RecordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a record
    pub async fn lock(&self, key: RecordKey) -> RecordGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // entries only referenced by the map have no holder and no waiter
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of records currently locked or awaited
    #[cfg(test)]
    fn active(&self) -> usize {
        let locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .values()
            .filter(|lock| Arc::strong_count(lock) > 1)
            .count()
    }
}
