//! Ledger address identification
//!
//! A `LedgerAddress` names one logical account. Addresses are defined in
//! configuration, resolved once at load time, and never created or destroyed
//! while the engine is running.

use serde::{Deserialize, Serialize};

/// Identifies a logical account in the ledger.
///
/// The full tuple of fields is written alongside every entry so that a row
/// is self-describing; the `account_id` component doubles as the address
/// half of the storage partition key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerAddress {
    /// Owning legal entity, e.g. "acme-uk"
    pub legal_entity: String,

    /// Grouping namespace within the legal entity, e.g. "settlement"
    pub namespace: String,

    /// Human-readable account name, e.g. "customer-payable"
    pub name: String,

    /// ISO 4217 currency code, e.g. "GBP"
    pub currency: String,

    /// Unique account identifier used for partition routing
    pub account_id: String,
}
