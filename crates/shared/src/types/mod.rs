//! Common types used across the application.

pub mod id;
pub mod week;

pub use id::*;
pub use week::WeekStart;
