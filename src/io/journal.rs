//! Journal CSV format and async reader
//!
//! The replay tool ingests entry sets from a CSV journal with columns:
//!
//! ```text
//! set,address,kind,amount,description,committed,reporting
//! ```
//!
//! `set` groups consecutive rows into one entry set; `address` is a
//! reference key resolved against the configured address book; `committed`
//! and `reporting` are RFC 3339 timestamps, `reporting` optional.
//!
//! Row conversion is kept pure (no I/O) for easy testing; the reader layers
//! csv-async streaming on top.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::types::{EntryInput, EntrySetInput, LedgerAddress};

/// One journal row as deserialized from CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JournalRow {
    pub set: String,
    pub address: String,
    pub kind: String,
    pub amount: String,
    pub description: String,
    pub committed: String,
    pub reporting: Option<String>,
}

/// An entry set read from the journal, tagged with its set id for error
/// reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalSet {
    pub id: String,
    pub input: EntrySetInput,
}

/// Convert a journal row into an entry input record.
///
/// Resolves the address reference against `book` and coerces the amount and
/// timestamp fields. The kind string is passed through untouched; the entry
/// model validates it.
pub fn convert_journal_row(
    row: JournalRow,
    book: &HashMap<String, LedgerAddress>,
) -> Result<(String, EntryInput), String> {
    let address = book
        .get(&row.address)
        .cloned()
        .ok_or_else(|| format!("unknown address reference '{}' in set {}", row.address, row.set))?;

    let amount = Decimal::from_str(row.amount.trim())
        .map_err(|_| format!("invalid amount '{}' in set {}", row.amount, row.set))?;

    let committed_at = parse_rfc3339(&row.committed)
        .map_err(|_| format!("invalid committed timestamp '{}' in set {}", row.committed, row.set))?;

    let reporting_at = match row.reporting {
        Some(raw) if !raw.trim().is_empty() => Some(
            parse_rfc3339(&raw)
                .map_err(|_| format!("invalid reporting timestamp '{}' in set {}", raw, row.set))?,
        ),
        _ => None,
    };

    Ok((
        row.set,
        EntryInput {
            address,
            kind: row.kind,
            amount,
            description: row.description,
            committed_at,
            reporting_at,
        },
    ))
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}

/// Asynchronous journal reader.
///
/// Streams rows and groups consecutive rows with the same set id into
/// [`JournalSet`]s. Malformed rows are logged and skipped; a skipped row
/// usually leaves its set unbalanced, so the set is then rejected by the
/// balance check instead of being silently half-recorded.
pub struct JournalReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> JournalReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read the whole journal, grouping consecutive rows by set id.
    pub async fn read_sets(
        &mut self,
        book: &HashMap<String, LedgerAddress>,
    ) -> Vec<JournalSet> {
        let mut sets: Vec<JournalSet> = Vec::new();
        let mut current: Option<JournalSet> = None;
        let mut rows = self.csv_reader.deserialize::<JournalRow>();

        while let Some(row) = rows.next().await {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!(error = %err, "skipping malformed journal row");
                    continue;
                }
            };
            let (set_id, entry) = match convert_journal_row(row, book) {
                Ok(converted) => converted,
                Err(message) => {
                    warn!(error = %message, "skipping journal row");
                    continue;
                }
            };

            match current.as_mut() {
                Some(set) if set.id == set_id => set.input.entries.push(entry),
                _ => {
                    if let Some(done) = current.take() {
                        sets.push(done);
                    }
                    current = Some(JournalSet {
                        id: set_id,
                        input: EntrySetInput {
                            entries: vec![entry],
                        },
                    });
                }
            }
        }
        if let Some(done) = current {
            sets.push(done);
        }
        sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use futures::io::Cursor;
    use rstest::rstest;

    fn book() -> HashMap<String, LedgerAddress> {
        let mut book = HashMap::new();
        for (key, account_id) in [("acme:cash", "acc-001"), ("acme:payable", "acc-002")] {
            book.insert(
                key.to_string(),
                LedgerAddress {
                    legal_entity: "acme-uk".to_string(),
                    namespace: "settlement".to_string(),
                    name: "cash".to_string(),
                    currency: "GBP".to_string(),
                    account_id: account_id.to_string(),
                },
            );
        }
        book
    }

    fn row(set: &str, address: &str, amount: &str, committed: &str, reporting: Option<&str>) -> JournalRow {
        JournalRow {
            set: set.to_string(),
            address: address.to_string(),
            kind: "credit".to_string(),
            amount: amount.to_string(),
            description: "row".to_string(),
            committed: committed.to_string(),
            reporting: reporting.map(|s| s.to_string()),
        }
    }

    #[test]
    fn converts_a_complete_row() {
        let (set_id, entry) = convert_journal_row(
            row(
                "tx-1",
                "acme:cash",
                "100.50",
                "2024-03-15T12:00:00Z",
                Some("2024-04-01T00:00:00Z"),
            ),
            &book(),
        )
        .unwrap();

        assert_eq!(set_id, "tx-1");
        assert_eq!(entry.address.account_id, "acc-001");
        assert_eq!(entry.amount, Decimal::new(10050, 2));
        assert_eq!(
            entry.committed_at,
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
        );
        assert_eq!(
            entry.reporting_at,
            Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())
        );
    }

    #[rstest]
    #[case::missing_reporting(None)]
    #[case::empty_reporting(Some(""))]
    fn absent_reporting_timestamp_stays_absent(#[case] reporting: Option<&str>) {
        let (_, entry) = convert_journal_row(
            row("tx-1", "acme:cash", "100", "2024-03-15T12:00:00Z", reporting),
            &book(),
        )
        .unwrap();
        assert_eq!(entry.reporting_at, None);
    }

    #[rstest]
    #[case::unknown_address(row("tx-1", "acme:missing", "100", "2024-03-15T12:00:00Z", None))]
    #[case::bad_amount(row("tx-1", "acme:cash", "lots", "2024-03-15T12:00:00Z", None))]
    #[case::bad_timestamp(row("tx-1", "acme:cash", "100", "yesterday", None))]
    fn malformed_rows_are_rejected(#[case] bad: JournalRow) {
        assert!(convert_journal_row(bad, &book()).is_err());
    }

    #[tokio::test]
    async fn groups_consecutive_rows_by_set_id() {
        let csv = "set,address,kind,amount,description,committed,reporting\n\
                   tx-1,acme:cash,credit,100,first,2024-03-15T12:00:00Z,\n\
                   tx-1,acme:payable,debit,100,first,2024-03-15T12:00:00Z,\n\
                   tx-2,acme:cash,debit,40,second,2024-03-16T09:00:00Z,\n\
                   tx-2,acme:payable,credit,40,second,2024-03-16T09:00:00Z,\n";
        let mut reader = JournalReader::new(Cursor::new(csv.as_bytes()));

        let sets = reader.read_sets(&book()).await;
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].id, "tx-1");
        assert_eq!(sets[0].input.entries.len(), 2);
        assert_eq!(sets[1].id, "tx-2");
        assert_eq!(sets[1].input.entries.len(), 2);
        assert_eq!(sets[1].input.entries[0].kind, "debit");
    }

    #[tokio::test]
    async fn skips_malformed_rows_and_keeps_the_rest() {
        let csv = "set,address,kind,amount,description,committed,reporting\n\
                   tx-1,acme:cash,credit,not-a-number,first,2024-03-15T12:00:00Z,\n\
                   tx-1,acme:payable,debit,100,first,2024-03-15T12:00:00Z,\n";
        let mut reader = JournalReader::new(Cursor::new(csv.as_bytes()));

        let sets = reader.read_sets(&book()).await;
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].input.entries.len(), 1);
        assert_eq!(sets[0].input.entries[0].address.account_id, "acc-002");
    }

    #[tokio::test]
    async fn empty_journal_yields_no_sets() {
        let csv = "set,address,kind,amount,description,committed,reporting\n";
        let mut reader = JournalReader::new(Cursor::new(csv.as_bytes()));
        assert!(reader.read_sets(&book()).await.is_empty());
    }
}
