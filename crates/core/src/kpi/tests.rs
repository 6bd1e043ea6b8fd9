//! Property-based tests for the KPI module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::KpiService;
use super::types::{Direction, HealthStatus, VarianceStatus};
use crate::summary::{CogsSource, PeriodSummary};
use crate::target::Goals;

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With zero revenue, COGS% and margin% are zero whatever the costs.
    #[test]
    fn prop_zero_revenue_ratios_are_zero(
        cogs in amount(),
        fixed in amount(),
        variable in amount(),
    ) {
        let s = PeriodSummary::new(Decimal::ZERO, cogs, fixed, variable, CogsSource::Actual);
        let ratios = KpiService::ratios(&s);
        prop_assert_eq!(ratios.cogs_percent, Decimal::ZERO);
        prop_assert_eq!(ratios.margin_percent, Decimal::ZERO);
    }

    /// Zero revenue goal never yields a non-zero attainment.
    #[test]
    fn prop_zero_goal_attainment_is_zero(revenue in amount()) {
        let s = PeriodSummary::new(revenue, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, CogsSource::Actual);
        let goals = Goals::default();
        prop_assert_eq!(KpiService::goal_attainment(&s, Some(&goals)), Decimal::ZERO);
    }

    /// Variance is always actual minus target, and its sign decides the status.
    #[test]
    fn prop_variance_definition(actual in amount(), target in amount()) {
        let up = KpiService::variance(actual, target, Direction::HigherIsBetter);
        let down = KpiService::variance(actual, target, Direction::LowerIsBetter);

        prop_assert_eq!(up.variance, actual - target);
        prop_assert_eq!(down.variance, actual - target);
        prop_assert_eq!(up.variance_percent, down.variance_percent);

        if actual > target {
            prop_assert_eq!(up.status, VarianceStatus::Favorable);
            prop_assert_eq!(down.status, VarianceStatus::Unfavorable);
        } else if actual < target {
            prop_assert_eq!(up.status, VarianceStatus::Unfavorable);
            prop_assert_eq!(down.status, VarianceStatus::Favorable);
        } else {
            prop_assert_eq!(up.status, VarianceStatus::OnTarget);
            prop_assert_eq!(down.status, VarianceStatus::OnTarget);
        }
    }

    /// A loss is always critical, target or not.
    #[test]
    fn prop_loss_is_critical(revenue in amount(), extra in 1i64..1_000_000, goal in amount()) {
        let s = PeriodSummary::new(
            revenue,
            Decimal::ZERO,
            revenue + Decimal::new(extra, 2),
            Decimal::ZERO,
            CogsSource::Actual,
        );
        let goals = Goals { target_revenue: goal, ..Goals::default() };
        prop_assert_eq!(KpiService::status(&s, None), HealthStatus::Critical);
        prop_assert_eq!(KpiService::status(&s, Some(&goals)), HealthStatus::Critical);
    }
}
