//! # Dataset Store
//!
//! In-memory catalog of records plus the loader that seeds it at startup.

pub mod coerce;
pub mod dataset;
pub mod errors;
pub mod loader;
pub mod record;

pub use dataset::{Dataset, Page, RecordFilter};
pub use errors::{StoreError, StoreResult};
pub use loader::{load_dataset, parse_dataset};
pub use record::{normalize_types, Record};
