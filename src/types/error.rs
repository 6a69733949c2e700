//! Error types for the ledger engine
//!
//! Errors are split by fault domain so callers and operators can tell a bad
//! request from a degraded backend:
//!
//! - **EntrySetError**: validation failures, rejected before any store
//!   interaction; recoverable by resubmitting corrected input.
//! - **StoreError**: storage faults (connection, timeout, backend-reported),
//!   surfaced verbatim up the call chain with no retry at this layer.
//! - **AggregateError**: a balance query failure wrapping the first store
//!   fault observed among concurrent address workers.
//! - **ConfigError**: configuration faults (unknown definition names,
//!   dangling address references), distinct from store faults.
//!
//! `LedgerError` is the facade-level union of all of the above.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failure for an entry set. Never reaches the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntrySetError {
    /// The signed sum of the set's amounts exceeds the 1e-5 tolerance.
    #[error("entry set is not balanced: signed sum is {sum}")]
    Unbalanced {
        /// The offending signed sum (credits positive, debits negative)
        sum: Decimal,
    },

    /// An entry carried a kind outside the closed `{credit, debit}` set.
    #[error("invalid entry kind '{kind}'")]
    InvalidEntryType {
        /// The rejected kind string as received
        kind: String,
    },
}

impl EntrySetError {
    pub fn invalid_entry_type(kind: &str) -> Self {
        EntrySetError::InvalidEntryType {
            kind: kind.to_string(),
        }
    }
}

/// Storage fault reported by the ledger store or its backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The backend session could not be reached.
    #[error("store connection failure: {message}")]
    Connection {
        /// Driver-reported connection failure detail
        message: String,
    },

    /// A store call exceeded its deadline.
    #[error("store call timed out after {millis}ms")]
    Timeout {
        /// The deadline that elapsed, in milliseconds
        millis: u64,
    },

    /// The backend accepted the call but reported a failure.
    #[error("store backend failure: {message}")]
    Backend {
        /// Backend-reported failure detail
        message: String,
    },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection {
            message: message.into(),
        }
    }

    pub fn timeout(deadline: std::time::Duration) -> Self {
        StoreError::Timeout {
            millis: deadline.as_millis() as u64,
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}

/// Failure of a balance aggregation across concurrent address workers.
///
/// Only one representative store fault is kept; errors from sibling workers
/// are dropped once one has been chosen to report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    /// The first store fault observed among the address workers.
    #[error("balance aggregation failed: {0}")]
    Store(#[from] StoreError),

    /// The definition resolved to no addresses, so no currency can be
    /// reported.
    #[error("balance definition has no addresses")]
    EmptyDefinition,
}

/// Configuration fault: the caller or the deployed configuration is wrong,
/// not the storage backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A balance query named a definition that does not exist.
    #[error("unknown balance definition '{name}'")]
    UnknownDefinition {
        /// The name the caller asked for
        name: String,
    },

    /// A balance definition referenced an address key missing from the
    /// address book.
    #[error("address reference '{reference}' not found in address book")]
    DanglingAddress {
        /// The unresolved reference
        reference: String,
    },

    /// A balance definition resolved to addresses of differing currencies.
    #[error("balance definition '{name}' mixes currencies '{first}' and '{other}'")]
    MixedCurrency {
        name: String,
        first: String,
        other: String,
    },

    /// A balance definition listed no addresses.
    #[error("balance definition '{name}' has no addresses")]
    EmptyDefinition { name: String },

    /// A configuration file could not be read.
    #[error("reading {path}: {message}")]
    Io { path: String, message: String },

    /// A configuration file could not be parsed.
    #[error("parsing {path}: {message}")]
    Parse { path: String, message: String },
}

impl ConfigError {
    pub fn unknown_definition(name: &str) -> Self {
        ConfigError::UnknownDefinition {
            name: name.to_string(),
        }
    }

    pub fn dangling_address(reference: &str) -> Self {
        ConfigError::DanglingAddress {
            reference: reference.to_string(),
        }
    }
}

/// Facade-level error: everything `LedgerService` can fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("entry set rejected: {0}")]
    EntrySet(#[from] EntrySetError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
