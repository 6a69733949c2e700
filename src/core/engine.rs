//! Entry set processing engine
//!
//! Applies a validated `EntrySet` to the ledger store, one entry at a time
//! in set order, stopping at the first failure.
//!
//! # Non-atomicity contract
//!
//! Entries already written before a failing one remain persisted; there is
//! no rollback. Callers needing atomicity must record compensating entries.

use std::sync::Arc;

use tracing::warn;

use crate::core::traits::LedgerStore;
use crate::types::{EntrySet, StoreError};

/// Writes entry sets through the ledger store.
#[derive(Clone)]
pub struct ProcessingEngine {
    store: Arc<dyn LedgerStore>,
}

impl ProcessingEngine {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Persist every entry of `set` in order, returning the first store
    /// error encountered. At-least-once: earlier writes stay persisted when
    /// a later one fails.
    pub async fn process(&self, set: &EntrySet) -> Result<(), StoreError> {
        for entry in &set.entries {
            if let Err(err) = self.store.write(entry).await {
                warn!(
                    account_id = %entry.address.account_id,
                    error = %err,
                    "failed to write ledger entry, aborting entry set"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryType, LedgerAddress, LedgerEntry, TimeAxis};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    /// Store double that records writes and can be told to fail from the
    /// nth write onward.
    struct RecordingStore {
        written: Mutex<Vec<LedgerEntry>>,
        fail_from: Option<usize>,
    }

    impl RecordingStore {
        fn new(fail_from: Option<usize>) -> Self {
            Self {
                written: Mutex::new(Vec::new()),
                fail_from,
            }
        }
    }

    #[async_trait]
    impl LedgerStore for RecordingStore {
        async fn write(&self, entry: &LedgerEntry) -> Result<(), StoreError> {
            let mut written = self.written.lock().unwrap();
            if let Some(n) = self.fail_from {
                if written.len() >= n {
                    return Err(StoreError::backend("write failure"));
                }
            }
            written.push(entry.clone());
            Ok(())
        }

        async fn read(
            &self,
            _address: &LedgerAddress,
            _axis: TimeAxis,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<LedgerEntry>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn entry(account_id: &str, entry_type: EntryType) -> LedgerEntry {
        LedgerEntry {
            address: LedgerAddress {
                legal_entity: "acme-uk".to_string(),
                namespace: "settlement".to_string(),
                name: "cash".to_string(),
                currency: "GBP".to_string(),
                account_id: account_id.to_string(),
            },
            entry_type,
            amount: Decimal::new(10000, 2),
            description: "engine test".to_string(),
            committed_at: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
            reporting_at: None,
        }
    }

    #[tokio::test]
    async fn writes_every_entry_in_set_order() {
        let store = Arc::new(RecordingStore::new(None));
        let engine = ProcessingEngine::new(Arc::clone(&store) as Arc<dyn LedgerStore>);
        let set = EntrySet {
            entries: vec![
                entry("acc-001", EntryType::Credit),
                entry("acc-002", EntryType::Debit),
            ],
        };

        engine.process(&set).await.unwrap();

        let written = store.written.lock().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].address.account_id, "acc-001");
        assert_eq!(written[1].address.account_id, "acc-002");
    }

    #[tokio::test]
    async fn stops_at_first_failure_and_keeps_earlier_writes() {
        let store = Arc::new(RecordingStore::new(Some(1)));
        let engine = ProcessingEngine::new(Arc::clone(&store) as Arc<dyn LedgerStore>);
        let set = EntrySet {
            entries: vec![
                entry("acc-001", EntryType::Credit),
                entry("acc-002", EntryType::Debit),
                entry("acc-003", EntryType::Debit),
            ],
        };

        let err = engine.process(&set).await.unwrap_err();
        assert_eq!(err, StoreError::backend("write failure"));

        // The first entry was persisted before the failure and stays.
        let written = store.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].address.account_id, "acc-001");
    }

    #[tokio::test]
    async fn empty_set_is_a_no_op() {
        let store = Arc::new(RecordingStore::new(None));
        let engine = ProcessingEngine::new(Arc::clone(&store) as Arc<dyn LedgerStore>);

        engine.process(&EntrySet { entries: vec![] }).await.unwrap();
        assert!(store.written.lock().unwrap().is_empty());
    }
}
