//! Partitioned storage engine
//!
//! - `bucket` - calendar-month partition keys and range enumeration
//! - `partitioned` - the store engine implementing the `LedgerStore` port
//! - `memory` - DashMap-backed partition backend for replay and tests

pub mod bucket;
pub mod memory;
pub mod partitioned;

pub use bucket::TimeBucket;
pub use memory::MemoryBackend;
pub use partitioned::{EntryRow, PartitionBackend, PartitionKey, PartitionedStore};
