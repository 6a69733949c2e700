//! Core value types for the ledger engine
//!
//! This module contains the entry model, address and balance types, and the
//! engine's error taxonomy.

pub mod address;
pub mod balance;
pub mod entry;
pub mod error;

pub use address::LedgerAddress;
pub use balance::{Balance, BalanceDefinition};
pub use entry::{EntryInput, EntrySet, EntrySetInput, EntryType, LedgerEntry, TimeAxis};
pub use error::{AggregateError, ConfigError, EntrySetError, LedgerError, StoreError};
