//! Revenue projections.
//!
//! Two unrelated calculations live here:
//! - run-rate: extrapolate a partial period's daily average to the full period
//! - scenarios: fixed multipliers over the trailing six-month average

pub mod service;
pub mod types;


pub use service::{ProjectionService, TRAILING_MONTHS};
pub use types::{
    ProjectionHorizon, RunRateProjection, Scenario, ScenarioKind, ScenarioProjection,
};
