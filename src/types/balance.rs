//! Balance query types
//!
//! A `BalanceDefinition` is a named aggregation rule resolved from
//! configuration: the set of addresses whose entries are summed into one
//! figure, and the time axis their timestamps are filtered on. Definitions
//! are read-only after resolution and shared by all concurrent queries.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::address::LedgerAddress;
use crate::types::entry::TimeAxis;

/// A resolved, named balance query template.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceDefinition {
    /// The name callers query this definition by
    pub name: String,

    /// Which timestamp entries are filtered on
    pub time_axis: TimeAxis,

    /// Fully resolved addresses whose entries are summed together.
    ///
    /// Resolution guarantees the list is non-empty and currency-homogeneous.
    pub addresses: Vec<LedgerAddress>,
}

/// The result of a balance aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    /// Merged signed total across every address in the definition
    pub amount: Decimal,

    /// Currency of the definition's first configured address
    pub currency: String,
}
