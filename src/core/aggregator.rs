//! Concurrent balance aggregation
//!
//! Fans a balance query out across every address in a resolved
//! `BalanceDefinition`: one tokio task per address, each reading from the
//! shared ledger store and folding its entries into a signed partial sum.
//! Partial sums flow back through the task handles and a single collecting
//! step performs the associative merge, so no shared mutable total or lock
//! is needed.
//!
//! # Failure semantics
//!
//! If any address worker fails, the aggregation as a whole fails with the
//! first error observed; a partial total computed before the failure is
//! discarded, never returned. Workers are not cancelled on a sibling's
//! failure; they run to completion. Every store read carries a bounded
//! deadline so a stuck worker cannot hang the aggregation.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::traits::LedgerStore;
use crate::types::{AggregateError, Balance, BalanceDefinition, LedgerEntry, StoreError};

/// Tuning for the aggregator's store reads.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Deadline applied to each per-address store read.
    pub read_timeout: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(10),
        }
    }
}

/// Computes balances by concurrent per-address reads and a reduction merge.
#[derive(Clone)]
pub struct BalanceAggregator {
    store: Arc<dyn LedgerStore>,
    config: AggregatorConfig,
}

impl BalanceAggregator {
    pub fn new(store: Arc<dyn LedgerStore>, config: AggregatorConfig) -> Self {
        Self { store, config }
    }

    /// Sum all entries of the definition's addresses whose `time_axis`
    /// timestamp lies in `[start, end]`, returning the merged total and the
    /// currency of the first configured address.
    pub async fn aggregate(
        &self,
        definition: &BalanceDefinition,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    ) -> Result<Balance, AggregateError> {
        let currency = definition
            .addresses
            .first()
            .ok_or(AggregateError::EmptyDefinition)?
            .currency
            .clone();

        let mut tasks = Vec::with_capacity(definition.addresses.len());
        for address in definition.addresses.iter().cloned() {
            let store = Arc::clone(&self.store);
            let axis = definition.time_axis;
            let deadline = self.config.read_timeout;
            tasks.push(tokio::spawn(async move {
                let entries = match tokio::time::timeout(
                    deadline,
                    store.read(&address, axis, start, end),
                )
                .await
                {
                    Ok(result) => result?,
                    Err(_) => return Err(StoreError::timeout(deadline)),
                };
                let sum: Decimal = entries.iter().map(LedgerEntry::signed_amount).sum();
                debug!(
                    account_id = %address.account_id,
                    entries = entries.len(),
                    %sum,
                    "address worker finished"
                );
                Ok(sum)
            }));
        }

        // Reduction merge: every worker reports through its handle; the sum
        // is associative and commutative so completion order is irrelevant.
        let mut total = Decimal::ZERO;
        let mut first_error: Option<StoreError> = None;
        for outcome in join_all(tasks).await {
            match outcome {
                Ok(Ok(sum)) => total += sum,
                Ok(Err(err)) => {
                    warn!(definition = %definition.name, error = %err, "address worker failed");
                    first_error.get_or_insert(err);
                }
                Err(join_err) => {
                    first_error
                        .get_or_insert(StoreError::backend(format!(
                            "address worker panicked: {join_err}"
                        )));
                }
            }
        }

        if let Some(err) = first_error {
            return Err(AggregateError::Store(err));
        }
        Ok(Balance {
            amount: total,
            currency,
        })
    }
}
