//! Time-series bucketing and category grouping for charts.

pub mod service;
pub mod types;


pub use service::{BucketService, UNCATEGORIZED};
pub use types::{CategoryTotal, Granularity, TimeBucket};
