//! Ledger Engine Library
//! # Overview
//!
//! This library provides a ledger storage and balance-aggregation engine:
//! entry sets are validated against the double-entry invariant and persisted
//! into a time-partitioned store, and balance queries scan partitions across
//! a time window, fanning out concurrently over the addresses of a named
//! balance definition.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (addresses, entries, balances, errors)
//! - [`core`] - Business logic components:
//!   - [`core::traits`] - The ledger store port
//!   - [`core::engine`] - Entry set processing (sequential, first-error stop)
//!   - [`core::aggregator`] - Concurrent per-address balance aggregation
//!   - [`core::service`] - Facade for request-handling layers
//! - [`store`] - Partitioned storage engine:
//!   - [`store::bucket`] - Calendar-month partition keys
//!   - [`store::partitioned`] - Bucket routing, multi-bucket scans, post-filtering
//!   - [`store::memory`] - DashMap-backed backend for replay and tests
//! - [`config`] - YAML address book and balance definition resolution
//! - [`io`] - Journal reading and balance output
//! - [`cli`] - CLI argument parsing for the replay tool
//!
//! # Write path
//!
//! Caller input is coerced into an `EntrySet`, checked against the
//! double-entry invariant (signed amounts must net to zero within 1e-5),
//! and written entry by entry. Entries are routed to a `(account id,
//! calendar month)` partition keyed by commit timestamp. Writes are
//! independent: there is no atomic rollback of a partially written set.
//!
//! # Read path
//!
//! A balance query resolves a named definition to its addresses and time
//! axis, launches one read task per address, scans every calendar bucket
//! the window spans, re-filters rows against the exact bounds, sums signed
//! amounts per address, and merges the partial sums into a single total.
//! Any worker failure fails the whole query; partial totals are never
//! returned.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod store;
pub mod types;

pub use crate::core::{
    AggregatorConfig, BalanceAggregator, LedgerService, LedgerStore, ProcessingEngine,
};
pub use crate::store::{MemoryBackend, PartitionedStore, TimeBucket};
pub use crate::types::{
    Balance, BalanceDefinition, EntryInput, EntrySet, EntrySetInput, EntryType, LedgerAddress,
    LedgerEntry, LedgerError, TimeAxis,
};
