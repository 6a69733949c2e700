//! Partitioned store engine
//!
//! Concrete implementation of the [`LedgerStore`] port against a partitioned
//! time-series backend. Entries are written far more often than read, and
//! reads are always scoped to one address and a time range, so rows are
//! partitioned by `(account id, time bucket)`: a range read touches exactly
//! the calendar buckets spanned by `[start, end]` instead of the whole
//! table.
//!
//! # Write path
//!
//! The bucket is derived from the entry's commit timestamp and the row is
//! keyed by `(account id, bucket, commit timestamp)`. A write never reads
//! before writing, which keeps concurrent writes to the same address safe
//! without locking; the backend provides last-write-wins semantics per
//! physical row key, so distinct commit timestamps never collide.
//!
//! # Read path
//!
//! Every bucket from the one containing `start` to the one containing `end`
//! is scanned with one scoped query each. Bucket boundaries are coarser than
//! the query range, so every returned row is re-filtered against the exact
//! `[start, end]` bound on the requested time axis before it is kept. Any
//! per-bucket failure aborts the whole read; partial results are never
//! returned.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::traits::LedgerStore;
use crate::store::bucket::TimeBucket;
use crate::types::{EntryType, LedgerAddress, LedgerEntry, StoreError, TimeAxis};

/// Storage partition key: one address in one calendar bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    pub account_id: String,
    pub bucket: TimeBucket,
}

/// The encoded form of an entry as stored in a partition row.
///
/// The full address is carried in the payload so a row is self-describing
/// and decodes without a lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub legal_entity: String,
    pub namespace: String,
    pub name: String,
    pub currency: String,
    pub account_id: String,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub description: String,
    pub committed_at: DateTime<Utc>,
    pub reporting_at: Option<DateTime<Utc>>,
}

/// Low-level partition backend: the part of the storage engine a concrete
/// driver (or an in-memory stand-in) has to supply.
///
/// The backend owns retry-count/backoff policy for transient faults; this
/// engine surfaces whatever the backend reports.
#[async_trait]
pub trait PartitionBackend: Send + Sync {
    /// Insert `row` under `partition`, keyed within the partition by the
    /// row's commit timestamp. Last write wins per physical row key.
    async fn insert(&self, partition: PartitionKey, row: EntryRow) -> Result<(), StoreError>;

    /// Return every row currently stored under `partition`.
    async fn scan(&self, partition: &PartitionKey) -> Result<Vec<EntryRow>, StoreError>;
}

/// The partitioned store engine: bucket routing, row encoding, and the
/// multi-bucket scan, over any [`PartitionBackend`].
#[derive(Debug, Clone)]
pub struct PartitionedStore<B> {
    backend: B,
}

impl<B: PartitionBackend> PartitionedStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn encode(entry: &LedgerEntry) -> EntryRow {
        EntryRow {
            legal_entity: entry.address.legal_entity.clone(),
            namespace: entry.address.namespace.clone(),
            name: entry.address.name.clone(),
            currency: entry.address.currency.clone(),
            account_id: entry.address.account_id.clone(),
            entry_type: entry.entry_type,
            amount: entry.amount,
            description: entry.description.clone(),
            committed_at: entry.committed_at,
            reporting_at: entry.reporting_at,
        }
    }

    fn decode(row: EntryRow) -> LedgerEntry {
        LedgerEntry {
            address: LedgerAddress {
                legal_entity: row.legal_entity,
                namespace: row.namespace,
                name: row.name,
                currency: row.currency,
                account_id: row.account_id,
            },
            entry_type: row.entry_type,
            amount: row.amount,
            description: row.description,
            committed_at: row.committed_at,
            reporting_at: row.reporting_at,
        }
    }
}

#[async_trait]
impl<B: PartitionBackend> LedgerStore for PartitionedStore<B> {
    async fn write(&self, entry: &LedgerEntry) -> Result<(), StoreError> {
        let bucket = TimeBucket::containing(entry.committed_at);
        let partition = PartitionKey {
            account_id: entry.address.account_id.clone(),
            bucket,
        };
        debug!(
            account_id = %entry.address.account_id,
            bucket = %bucket,
            kind = entry.entry_type.as_str(),
            "writing ledger entry"
        );
        self.backend.insert(partition, Self::encode(entry)).await
    }

    async fn read(
        &self,
        address: &LedgerAddress,
        axis: TimeAxis,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let mut entries = Vec::new();
        for bucket in TimeBucket::span(start, end) {
            let partition = PartitionKey {
                account_id: address.account_id.clone(),
                bucket,
            };
            let rows = self.backend.scan(&partition).await?;
            debug!(
                account_id = %address.account_id,
                bucket = %bucket,
                rows = rows.len(),
                "scanned partition"
            );
            for row in rows {
                let entry = Self::decode(row);
                // Bucket granularity is coarser than the query range, so
                // boundary-adjacent rows must be filtered out here.
                let ts = entry.timestamp_on(axis);
                if ts >= start && ts <= end {
                    entries.push(entry);
                }
            }
        }
        Ok(entries)
    }
}
