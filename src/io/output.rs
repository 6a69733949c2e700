//! Balance output serialization
//!
//! Writes queried balances as CSV with columns:
//! `balance,start,end,amount,currency`.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::Balance;

/// A named balance result paired with the window it was computed over.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub balance: Balance,
}

/// Write balance reports to CSV. Reports are written in the order given;
/// callers wanting determinism sort by name first.
pub fn write_balances_csv(reports: &[BalanceReport], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["balance", "start", "end", "amount", "currency"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for report in reports {
        writer
            .write_record(&[
                report.name.clone(),
                report.start.to_rfc3339_opts(SecondsFormat::Secs, true),
                report.end.to_rfc3339_opts(SecondsFormat::Secs, true),
                report.balance.amount.to_string(),
                report.balance.currency.clone(),
            ])
            .map_err(|e| format!("Failed to write balance record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
