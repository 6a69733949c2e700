//! Time-bucket partition keys
//!
//! Entries are partitioned by calendar month: a deterministic, monotonically
//! ordered function of a timestamp that groups entries into scan units. The
//! bucket routes writes and bounds the number of partitions a range read has
//! to touch.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

/// A calendar-month partition unit, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeBucket {
    year: i32,
    month: u32,
}

impl TimeBucket {
    /// The bucket containing `timestamp`.
    pub fn containing(timestamp: DateTime<Utc>) -> Self {
        TimeBucket {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    /// The next calendar month.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            TimeBucket {
                year: self.year + 1,
                month: 1,
            }
        } else {
            TimeBucket {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Every bucket from the one containing `start` to the one containing
    /// `end`, inclusive, stepping one calendar month at a time. Empty when
    /// `start` is after `end`.
    pub fn span(start: DateTime<Utc>, end: DateTime<Utc>) -> BucketSpan {
        BucketSpan {
            next: Some(TimeBucket::containing(start)),
            last: TimeBucket::containing(end),
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive iterator over consecutive calendar-month buckets.
#[derive(Debug, Clone)]
pub struct BucketSpan {
    next: Option<TimeBucket>,
    last: TimeBucket,
}

impl Iterator for BucketSpan {
    type Item = TimeBucket;

    fn next(&mut self) -> Option<TimeBucket> {
        let current = self.next?;
        if current > self.last {
            self.next = None;
            return None;
        }
        self.next = Some(current.succ());
        Some(current)
    }
}
