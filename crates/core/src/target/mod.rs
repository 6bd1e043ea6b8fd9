//! Monthly financial targets (one row per company per calendar month).

pub mod types;

pub use types::{Goals, Target};
