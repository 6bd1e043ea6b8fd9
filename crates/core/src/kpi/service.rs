//! KPI service for ratios, variances and health status.

use rust_decimal::Decimal;

use super::types::{
    Direction, HealthStatus, Ratios, Scorecard, TargetComparison, Variance, VarianceStatus,
};
use crate::money::ratio;
use crate::summary::PeriodSummary;
use crate::target::Goals;

/// COGS ratio above which a period is critical (40%).
pub const CRITICAL_COGS_PERCENT: Decimal = Decimal::from_parts(40, 0, 0, false, 2);

/// Share of the revenue goal below which a profitable period is a warning (80%).
pub const WARNING_GOAL_RATIO: Decimal = Decimal::from_parts(80, 0, 0, false, 2);

/// Service for KPI calculations.
pub struct KpiService;

impl KpiService {
    /// COGS and margin ratios; both zero unless revenue is positive.
    #[must_use]
    pub fn ratios(summary: &PeriodSummary) -> Ratios {
        Ratios {
            cogs_percent: Self::share_of_revenue(summary.cogs(), summary),
            margin_percent: Self::share_of_revenue(summary.profit(), summary),
        }
    }

    /// `amount / revenue`, or zero unless revenue is positive.
    ///
    /// Saturates when the quotient leaves the decimal range.
    #[must_use]
    pub fn share_of_revenue(amount: Decimal, summary: &PeriodSummary) -> Decimal {
        if summary.revenue() > Decimal::ZERO {
            ratio(amount, summary.revenue())
        } else {
            Decimal::ZERO
        }
    }

    /// Revenue over the revenue goal, or zero without a positive goal.
    #[must_use]
    pub fn goal_attainment(summary: &PeriodSummary, goals: Option<&Goals>) -> Decimal {
        match goals {
            Some(g) if g.target_revenue > Decimal::ZERO => {
                ratio(summary.revenue(), g.target_revenue)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Variance of an actual against its target.
    ///
    /// `variance = actual - target` regardless of direction; the direction
    /// only decides whether the gap is favorable.
    #[must_use]
    pub fn variance(actual: Decimal, target: Decimal, direction: Direction) -> Variance {
        let variance = actual.saturating_sub(target);
        let variance_percent = ratio(variance, target);

        let status = match (variance.cmp(&Decimal::ZERO), direction) {
            (std::cmp::Ordering::Equal, _) => VarianceStatus::OnTarget,
            (std::cmp::Ordering::Greater, Direction::HigherIsBetter)
            | (std::cmp::Ordering::Less, Direction::LowerIsBetter) => VarianceStatus::Favorable,
            _ => VarianceStatus::Unfavorable,
        };

        Variance {
            actual,
            target,
            variance,
            variance_percent,
            status,
        }
    }

    /// Revenue, profit and expense variances against a target.
    #[must_use]
    pub fn target_comparison(summary: &PeriodSummary, goals: &Goals) -> TargetComparison {
        TargetComparison {
            revenue: Self::variance(
                summary.revenue(),
                goals.target_revenue,
                Direction::HigherIsBetter,
            ),
            profit: Self::variance(
                summary.profit(),
                goals.target_profit,
                Direction::HigherIsBetter,
            ),
            expense: Self::variance(
                summary.total_expense(),
                goals.target_expense,
                Direction::LowerIsBetter,
            ),
        }
    }

    /// Three-tier health status.
    ///
    /// Critical on a loss or COGS above 40%; warning when profitable but
    /// under 80% of the revenue goal; stable otherwise.
    #[must_use]
    pub fn status(summary: &PeriodSummary, goals: Option<&Goals>) -> HealthStatus {
        let ratios = Self::ratios(summary);
        if summary.profit() < Decimal::ZERO || ratios.cogs_percent > CRITICAL_COGS_PERCENT {
            return HealthStatus::Critical;
        }
        match goals {
            Some(g) if summary.revenue() < WARNING_GOAL_RATIO.saturating_mul(g.target_revenue) => {
                HealthStatus::Warning
            }
            _ => HealthStatus::Stable,
        }
    }

    /// Bundles ratios, attainment, status and variances.
    #[must_use]
    pub fn scorecard(summary: &PeriodSummary, goals: Option<&Goals>) -> Scorecard {
        let status = Self::status(summary, goals);
        if status != HealthStatus::Stable {
            tracing::debug!(?status, revenue = %summary.revenue(), profit = %summary.profit(), "period flagged");
        }
        Scorecard {
            summary: *summary,
            ratios: Self::ratios(summary),
            goal_attainment: Self::goal_attainment(summary, goals),
            status,
            comparison: goals.map(|g| Self::target_comparison(summary, g)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::CogsSource;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn summary(revenue: Decimal, cogs: Decimal, fixed: Decimal) -> PeriodSummary {
        PeriodSummary::new(revenue, cogs, fixed, Decimal::ZERO, CogsSource::Actual)
    }

    fn revenue_goal(target_revenue: Decimal) -> Goals {
        Goals {
            target_revenue,
            ..Goals::default()
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(CRITICAL_COGS_PERCENT, dec!(0.40));
        assert_eq!(WARNING_GOAL_RATIO, dec!(0.80));
    }

    #[test]
    fn test_critical_scenario() {
        // revenue 10000, cogs 4200, profit -200, goal 12000
        let s = summary(dec!(10000), dec!(4200), dec!(6000));
        assert_eq!(s.profit(), dec!(-200));

        let ratios = KpiService::ratios(&s);
        assert_eq!(ratios.cogs_percent, dec!(0.42));
        assert_eq!(
            KpiService::status(&s, Some(&revenue_goal(dec!(12000)))),
            HealthStatus::Critical
        );
    }

    #[test]
    fn test_goal_attainment_scenarios() {
        let s = summary(dec!(9000), dec!(0), dec!(0));
        assert_eq!(
            KpiService::goal_attainment(&s, Some(&revenue_goal(dec!(10000)))),
            dec!(0.90)
        );
        assert_eq!(
            KpiService::goal_attainment(&s, Some(&revenue_goal(dec!(0)))),
            Decimal::ZERO
        );
        assert_eq!(KpiService::goal_attainment(&s, None), Decimal::ZERO);
    }

    #[rstest]
    // profitable, cogs exactly 40% is not critical
    #[case(dec!(10000), dec!(4000), dec!(0), None, HealthStatus::Stable)]
    // cogs above 40% with profit
    #[case(dec!(10000), dec!(4001), dec!(0), None, HealthStatus::Critical)]
    // loss with low cogs
    #[case(dec!(1000), dec!(100), dec!(1000), None, HealthStatus::Critical)]
    // below 80% of goal
    #[case(dec!(7999), dec!(1000), dec!(0), Some(dec!(10000)), HealthStatus::Warning)]
    // exactly 80% of goal is not a warning
    #[case(dec!(8000), dec!(1000), dec!(0), Some(dec!(10000)), HealthStatus::Stable)]
    // break-even counts as profitable
    #[case(dec!(5000), dec!(1000), dec!(4000), Some(dec!(10000)), HealthStatus::Warning)]
    // no activity, no target
    #[case(dec!(0), dec!(0), dec!(0), None, HealthStatus::Stable)]
    fn test_status_thresholds(
        #[case] revenue: Decimal,
        #[case] cogs: Decimal,
        #[case] fixed: Decimal,
        #[case] goal: Option<Decimal>,
        #[case] expected: HealthStatus,
    ) {
        let s = summary(revenue, cogs, fixed);
        let goals = goal.map(revenue_goal);
        assert_eq!(KpiService::status(&s, goals.as_ref()), expected);
    }

    #[test]
    fn test_revenue_variance() {
        let v = KpiService::variance(dec!(9000), dec!(10000), Direction::HigherIsBetter);
        assert_eq!(v.variance, dec!(-1000));
        assert_eq!(v.variance_percent, dec!(-0.1));
        assert_eq!(v.status, VarianceStatus::Unfavorable);
    }

    #[test]
    fn test_expense_variance_under_ceiling_is_favorable() {
        let v = KpiService::variance(dec!(800), dec!(1000), Direction::LowerIsBetter);
        assert_eq!(v.variance, dec!(-200));
        assert_eq!(v.variance_percent, dec!(-0.2));
        assert_eq!(v.status, VarianceStatus::Favorable);
    }

    #[test]
    fn test_variance_zero_target() {
        let v = KpiService::variance(dec!(500), dec!(0), Direction::HigherIsBetter);
        assert_eq!(v.variance, dec!(500));
        assert_eq!(v.variance_percent, Decimal::ZERO);
    }

    #[test]
    fn test_variance_on_target() {
        let v = KpiService::variance(dec!(1000), dec!(1000), Direction::LowerIsBetter);
        assert_eq!(v.status, VarianceStatus::OnTarget);
    }

    #[test]
    fn test_target_comparison_uses_total_expense() {
        let s = PeriodSummary::new(dec!(10000), dec!(3000), dec!(2000), dec!(1000), CogsSource::Actual);
        let goals = Goals {
            target_revenue: dec!(12000),
            target_expense: dec!(5000),
            target_profit: dec!(4000),
            target_cogs_percent: None,
        };
        let cmp = KpiService::target_comparison(&s, &goals);
        assert_eq!(cmp.expense.actual, dec!(6000));
        assert_eq!(cmp.expense.status, VarianceStatus::Unfavorable);
        assert_eq!(cmp.profit.variance, dec!(0));
        assert_eq!(cmp.revenue.variance_percent, dec!(-2000) / dec!(12000));
    }

    #[test]
    fn test_scorecard_without_target() {
        let s = summary(dec!(1000), dec!(300), dec!(200));
        let card = KpiService::scorecard(&s, None);
        assert_eq!(card.ratios.margin_percent, dec!(0.5));
        assert_eq!(card.goal_attainment, Decimal::ZERO);
        assert_eq!(card.status, HealthStatus::Stable);
        assert!(card.comparison.is_none());
    }

    #[test]
    fn test_tiny_denominators_saturate_instead_of_panicking() {
        let tiny = dec!(0.00000000000000000001);

        let s = summary(tiny, dec!(10000000000), Decimal::ZERO);
        let ratios = KpiService::ratios(&s);
        assert_eq!(ratios.cogs_percent, Decimal::MAX);
        assert_eq!(ratios.margin_percent, Decimal::MIN);
        assert_eq!(KpiService::status(&s, None), HealthStatus::Critical);

        let s = summary(dec!(10000000000), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(
            KpiService::goal_attainment(&s, Some(&revenue_goal(tiny))),
            Decimal::MAX
        );
        let card = KpiService::scorecard(&s, Some(&revenue_goal(tiny)));
        assert_eq!(card.status, HealthStatus::Stable);
    }
}
