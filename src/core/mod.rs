//! Core engine components
//!
//! - `traits` - the ledger store port
//! - `engine` - entry set processing (sequential writes, first-error stop)
//! - `aggregator` - concurrent per-address balance aggregation
//! - `service` - the facade request-handling layers talk to

pub mod aggregator;
pub mod engine;
pub mod service;
pub mod traits;

pub use aggregator::{AggregatorConfig, BalanceAggregator};
pub use engine::ProcessingEngine;
pub use service::LedgerService;
pub use traits::LedgerStore;
