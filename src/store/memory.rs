//! In-memory partition backend
//!
//! `MemoryBackend` implements [`PartitionBackend`] over a `DashMap` keyed by
//! partition, with rows inside a partition keyed by commit-timestamp
//! millis. DashMap's internal sharding lets concurrent writers touch
//! different partitions without a global lock, and the per-partition
//! `BTreeMap` gives the same last-write-wins-per-row-key semantics a
//! production backend provides.
//!
//! This backend backs the CLI replay tool and the test suite; durable
//! deployments implement [`PartitionBackend`] against their own driver.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeMap;

use crate::store::partitioned::{EntryRow, PartitionBackend, PartitionKey};
use crate::types::StoreError;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    partitions: DashMap<PartitionKey, BTreeMap<i64, EntryRow>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            partitions: DashMap::new(),
        }
    }

    /// Number of distinct `(account, bucket)` partitions currently held.
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

#[async_trait]
impl PartitionBackend for MemoryBackend {
    async fn insert(&self, partition: PartitionKey, row: EntryRow) -> Result<(), StoreError> {
        let row_key = row.committed_at.timestamp_millis();
        self.partitions
            .entry(partition)
            .or_insert_with(BTreeMap::new)
            .insert(row_key, row);
        Ok(())
    }

    async fn scan(&self, partition: &PartitionKey) -> Result<Vec<EntryRow>, StoreError> {
        // Clone out of the shard lock; scans must not block writers.
        Ok(self
            .partitions
            .get(partition)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }
}
