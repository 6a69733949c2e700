//! Ledger service facade
//!
//! `LedgerService` is what request-handling layers talk to: it owns the
//! processing engine, the balance aggregator, and the resolved balance
//! definitions, and exposes the two inbound operations — record an entry
//! set, compute a named balance.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::core::aggregator::{AggregatorConfig, BalanceAggregator};
use crate::core::engine::ProcessingEngine;
use crate::core::traits::LedgerStore;
use crate::types::{Balance, BalanceDefinition, ConfigError, EntrySet, EntrySetInput, LedgerError};

pub struct LedgerService {
    engine: ProcessingEngine,
    aggregator: BalanceAggregator,
    definitions: HashMap<String, BalanceDefinition>,
}

impl LedgerService {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        definitions: HashMap<String, BalanceDefinition>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            engine: ProcessingEngine::new(Arc::clone(&store)),
            aggregator: BalanceAggregator::new(store, config),
            definitions,
        }
    }

    /// Validate and persist one entry set.
    ///
    /// Validation (type coercion and the double-entry balance check) runs
    /// before any store interaction; a set that fails never reaches the
    /// store.
    pub async fn process_entry_set(&self, input: EntrySetInput) -> Result<(), LedgerError> {
        let set = EntrySet::from_input(input)?;
        set.check_balanced()?;
        self.engine.process(&set).await?;
        info!(entries = set.entries.len(), "entry set recorded");
        Ok(())
    }

    /// Compute the balance for the named definition over `[start, end]`.
    ///
    /// An unknown name is a [`ConfigError`], reported distinctly from store
    /// faults.
    pub async fn balance(
        &self,
        name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Balance, LedgerError> {
        let definition = self
            .definitions
            .get(name)
            .ok_or_else(|| ConfigError::unknown_definition(name))?;
        let balance = self.aggregator.aggregate(definition, start, end).await?;
        Ok(balance)
    }

    /// Names of every configured balance definition, sorted.
    pub fn definition_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.keys().cloned().collect();
        names.sort();
        names
    }
}
