//! Projection data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How far a run-rate projection extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "days", rename_all = "snake_case")]
pub enum ProjectionHorizon {
    /// Days still to come after the elapsed ones.
    DaysRemaining(u32),
    /// Full length of the period, elapsed days included.
    TotalDays(u32),
}

/// Daily run-rate extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRateProjection {
    /// Revenue recorded so far.
    pub actual: Decimal,
    /// Days the actual covers.
    pub days_elapsed: u32,
    /// Days projected forward.
    pub days_remaining: u32,
    /// `actual / days_elapsed`, zero when nothing has elapsed.
    pub daily_average: Decimal,
    /// `actual + daily_average × days_remaining`, zero when nothing has elapsed.
    pub projected_total: Decimal,
}

/// Growth scenario for the targets and projections view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// +3% over baseline.
    Conservative,
    /// +6% over baseline.
    Realistic,
    /// +10% over baseline.
    Optimistic,
}

impl ScenarioKind {
    /// All scenarios, in display order.
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Realistic, Self::Optimistic];

    /// Multiplier applied to the baseline.
    #[must_use]
    pub const fn multiplier(self) -> Decimal {
        match self {
            Self::Conservative => Decimal::from_parts(103, 0, 0, false, 2),
            Self::Realistic => Decimal::from_parts(106, 0, 0, false, 2),
            Self::Optimistic => Decimal::from_parts(110, 0, 0, false, 2),
        }
    }
}

/// One projected scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Which scenario.
    pub kind: ScenarioKind,
    /// Multiplier used.
    pub multiplier: Decimal,
    /// `baseline × multiplier`.
    pub projected_revenue: Decimal,
}

/// Scenario projection over a historical baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    /// Number of months that fed the baseline (at most six).
    pub months_considered: usize,
    /// Mean monthly revenue of those months.
    pub baseline: Decimal,
    /// Conservative, realistic and optimistic projections.
    pub scenarios: Vec<Scenario>,
}

impl ScenarioProjection {
    /// Projection for one scenario.
    #[must_use]
    pub fn get(&self, kind: ScenarioKind) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.kind == kind)
    }
}
