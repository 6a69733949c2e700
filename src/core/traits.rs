//! Ledger store port
//!
//! The store is specified as a capability so any durable partitioned backend
//! (key-value, columnar, document) can implement it. The engine assumes
//! nothing about backend consistency beyond "a write is visible to a
//! subsequent read after acknowledgement".

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::{LedgerAddress, LedgerEntry, StoreError, TimeAxis};

/// Persistence contract for ledger entries.
///
/// Both operations may block on network I/O. The handle must be safe for
/// concurrent use by multiple in-flight calls; the balance aggregator shares
/// one store across all of its address workers.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Persist one entry durably.
    ///
    /// There is no idempotency or deduplication guarantee: a caller retry
    /// after a timeout may create a duplicate unless the caller supplies its
    /// own idempotency key.
    async fn write(&self, entry: &LedgerEntry) -> Result<(), StoreError>;

    /// Return all entries for `address` whose timestamp on `axis` falls
    /// within `[start, end]` inclusive.
    ///
    /// Result ordering is not guaranteed; callers that need ordering sort
    /// the returned sequence themselves.
    async fn read(
        &self,
        address: &LedgerAddress,
        axis: TimeAxis,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LedgerEntry>, StoreError>;
}
