//! I/O handling for the replay tool
//!
//! - `journal` - async CSV journal reader producing entry set inputs
//! - `output` - balance report CSV writer

pub mod journal;
pub mod output;

pub use journal::{convert_journal_row, JournalReader, JournalRow, JournalSet};
pub use output::{write_balances_csv, BalanceReport};
