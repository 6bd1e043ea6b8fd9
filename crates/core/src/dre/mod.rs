//! DRE (income statement) for restaurant operations.

pub mod service;
pub mod types;

pub use service::DreService;
pub use types::DreStatement;
