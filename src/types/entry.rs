//! Ledger entry model
//!
//! This module defines the movement types at the heart of the engine: a
//! `LedgerEntry` is a single credit or debit against an address, and an
//! `EntrySet` is an ordered group of entries recorded together as one
//! logical transaction.
//!
//! # Double-entry invariant
//!
//! An `EntrySet` may only be processed when its signed amounts (credits
//! positive, debits negative) net to zero within a small tolerance. The
//! check is a pure function with no side effects and always runs before any
//! store interaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::address::LedgerAddress;
use crate::types::error::EntrySetError;

/// Selects which timestamp balance queries filter on.
///
/// `Committed` is when the entry was recorded; `Reporting` is when the entry
/// should be considered effective for reporting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeAxis {
    Committed,
    Reporting,
}

/// The direction of a ledger movement.
///
/// This is a closed set: any other textual kind in caller input is rejected
/// with [`EntrySetError::InvalidEntryType`] before the set can reach the
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Credit,
    Debit,
}

impl EntryType {
    /// Parse an untrusted kind string.
    ///
    /// Matching is case-insensitive, mirroring the lenient parsing used for
    /// journal input.
    pub fn parse(kind: &str) -> Result<Self, EntrySetError> {
        match kind.trim().to_lowercase().as_str() {
            "credit" => Ok(EntryType::Credit),
            "debit" => Ok(EntryType::Debit),
            _ => Err(EntrySetError::invalid_entry_type(kind)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Credit => "credit",
            EntryType::Debit => "debit",
        }
    }
}

/// A single immutable ledger movement.
///
/// Entries are never mutated after they are written; corrections are
/// recorded as new entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The account this movement applies to
    pub address: LedgerAddress,

    /// Credit or debit
    pub entry_type: EntryType,

    /// Non-negative amount; the sign is implied by `entry_type`
    pub amount: Decimal,

    /// Free-text description of the movement
    pub description: String,

    /// When the entry was recorded
    pub committed_at: DateTime<Utc>,

    /// When the entry becomes effective for reporting.
    ///
    /// Absent means "use the commit timestamp"; the absence itself is
    /// preserved through storage round-trips.
    pub reporting_at: Option<DateTime<Utc>>,
}

impl LedgerEntry {
    /// The amount with its bookkeeping sign applied: credits positive,
    /// debits negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Credit => self.amount,
            EntryType::Debit => -self.amount,
        }
    }

    /// The entry's timestamp on the requested axis.
    ///
    /// A missing reporting timestamp falls back to the commit timestamp.
    pub fn timestamp_on(&self, axis: TimeAxis) -> DateTime<Utc> {
        match axis {
            TimeAxis::Committed => self.committed_at,
            TimeAxis::Reporting => self.reporting_at.unwrap_or(self.committed_at),
        }
    }
}

/// One untrusted entry record as handed over by a caller.
///
/// Field types are already coerced by the transport layer (serde); the kind
/// string is validated during [`EntrySet::from_input`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryInput {
    pub address: LedgerAddress,
    pub kind: String,
    pub amount: Decimal,
    pub description: String,
    pub committed_at: DateTime<Utc>,
    #[serde(default)]
    pub reporting_at: Option<DateTime<Utc>>,
}

/// An untrusted entry set as handed over by a caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntrySetInput {
    pub entries: Vec<EntryInput>,
}

/// An ordered collection of entries recorded together as one logical
/// transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySet {
    pub entries: Vec<LedgerEntry>,
}

/// Tolerance for the double-entry balance check: 1e-5.
const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 5);

impl EntrySet {
    /// Construct an entry set from untrusted input records.
    ///
    /// Performs type coercion only: kind strings are parsed into
    /// [`EntryType`] (an unknown kind fails the whole set with
    /// [`EntrySetError::InvalidEntryType`], regardless of the numeric sum),
    /// and a missing reporting timestamp stays absent. No I/O happens here.
    pub fn from_input(input: EntrySetInput) -> Result<Self, EntrySetError> {
        let mut entries = Vec::with_capacity(input.entries.len());
        for record in input.entries {
            let entry_type = EntryType::parse(&record.kind)?;
            entries.push(LedgerEntry {
                address: record.address,
                entry_type,
                amount: record.amount,
                description: record.description,
                committed_at: record.committed_at,
                reporting_at: record.reporting_at,
            });
        }
        Ok(EntrySet { entries })
    }

    /// Enforce the double-entry bookkeeping invariant.
    ///
    /// Sums signed amounts across the set and fails with
    /// [`EntrySetError::Unbalanced`] when the absolute sum exceeds the 1e-5
    /// tolerance. Pure, no side effects; mandatory before any store write.
    pub fn check_balanced(&self) -> Result<(), EntrySetError> {
        let sum: Decimal = self.entries.iter().map(LedgerEntry::signed_amount).sum();
        if sum.abs() > BALANCE_TOLERANCE {
            return Err(EntrySetError::Unbalanced { sum });
        }
        Ok(())
    }
}
