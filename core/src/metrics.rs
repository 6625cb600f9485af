//! Derived metrics — pure functions over [`RawAggregates`].
//!
//! Rounding policy: every scaled ratio truncates toward zero after scaling
//! (integer-truncation semantics), never round-half-up. Zero denominators
//! are defined case by case: runway is absent when burn is zero, coverage
//! is 0 by convention when fixed costs are zero, concentration is 0 when
//! there are no retainers.

use crate::aggregator::RawAggregates;
use crate::types::CAPACITY_HOURS;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Truncate toward zero at 1 decimal place.
pub fn truncate1(value: f64) -> f64 {
    (value * 10.0).trunc() / 10.0
}

/// Truncate toward zero at 2 decimal places.
pub fn truncate2(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}

/// Burn, runway, and margin against the latest cash position. Absent when
/// the agency has never recorded a cash snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalMetrics {
    pub cash_balance: f64,
    pub monthly_burn: f64,
    /// None when burn is zero — runway is undefined, not infinite.
    pub runway_months: Option<f64>,
    pub operating_margin: f64,
    pub total_retainers: f64,
}

pub fn survival_metrics(agg: &RawAggregates) -> Option<SurvivalMetrics> {
    let cash = agg.latest_cash?;
    let burn = agg.fixed_costs;

    let runway_months = if burn > 0.0 {
        Some(truncate1(cash / burn))
    } else {
        None
    };

    Some(SurvivalMetrics {
        cash_balance: cash,
        monthly_burn: burn,
        runway_months,
        operating_margin: agg.total_retainers - burn,
        total_retainers: agg.total_retainers,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetainerSummary {
    pub total_retainer_revenue: f64,
    pub fixed_costs: f64,
    /// 0 by convention (not absent) when fixed costs are zero.
    pub coverage_ratio: f64,
    /// 0 when there are no active retainers.
    pub top_client_percentage: f64,
}

pub fn retainer_summary(agg: &RawAggregates) -> RetainerSummary {
    RetainerSummary {
        total_retainer_revenue: agg.total_retainers,
        fixed_costs: agg.fixed_costs,
        coverage_ratio: coverage_ratio(agg),
        top_client_percentage: if agg.total_retainers > 0.0 {
            truncate2(agg.max_retainer / agg.total_retainers)
        } else {
            0.0
        },
    }
}

/// Retainer total over fixed costs, truncated to 2 decimals.
pub fn coverage_ratio(agg: &RawAggregates) -> f64 {
    if agg.fixed_costs > 0.0 {
        truncate2(agg.total_retainers / agg.fixed_costs)
    } else {
        0.0
    }
}

/// Windowed profit margin in percent. None when the window has no revenue.
pub fn profit_margin_pct(agg: &RawAggregates) -> Option<f64> {
    if agg.total_revenue > 0.0 {
        Some(((agg.total_revenue - agg.total_costs) / agg.total_revenue) * 100.0)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utilization {
    pub used_hours: f64,
    pub capacity_hours: f64,
    pub utilization_percent: f64,
}

pub fn utilization(agg: &RawAggregates) -> Utilization {
    Utilization {
        used_hours: agg.hours_logged,
        capacity_hours: CAPACITY_HOURS,
        utilization_percent: truncate1((agg.hours_logged / CAPACITY_HOURS) * 100.0),
    }
}

/// Raw (untruncated) utilization percent, used by the scoring bands.
pub fn utilization_pct(hours_logged: f64) -> f64 {
    (hours_logged / CAPACITY_HOURS) * 100.0
}

/// Today-only net of all revenue and cost entries. Variable costs are
/// included here; this view is outside scoring scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub revenue: f64,
    pub costs: f64,
    pub net: f64,
}

impl DailySummary {
    pub fn new(date: NaiveDate, revenue: f64, costs: f64) -> Self {
        Self {
            date,
            revenue,
            costs,
            net: revenue - costs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostDriver {
    pub category: String,
    pub amount: f64,
    /// Share of the fixed-cost total, truncated to 1 decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub total_fixed_costs: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub primary_driver: CostDriver,
}

/// Windowed fixed costs grouped by category, with the largest category
/// named as the primary driver. Category-name order breaks amount ties.
pub fn cost_breakdown(grouped: &[(String, f64)]) -> CostBreakdown {
    let total: f64 = grouped.iter().map(|(_, amount)| amount).sum();
    let breakdown: BTreeMap<String, f64> = grouped.iter().cloned().collect();

    let primary_driver = if total > 0.0 {
        let (category, amount) = breakdown
            .iter()
            .fold(("other", 0.0_f64), |best, (cat, &amt)| {
                if amt > best.1 {
                    (cat.as_str(), amt)
                } else {
                    best
                }
            });
        CostDriver {
            category: category.to_string(),
            amount,
            percentage: truncate1((amount / total) * 100.0),
        }
    } else {
        CostDriver {
            category: "other".to_string(),
            amount: 0.0,
            percentage: 0.0,
        }
    };

    CostBreakdown {
        total_fixed_costs: total,
        breakdown,
        primary_driver,
    }
}
