//! Primary-risk attribution — one label for the dominant risk factor.
//!
//! Independent of the scoring buckets but fed by the same aggregates.
//! Rules run in a fixed priority order; the first that fires names the
//! risk.

use crate::aggregator::RawAggregates;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimaryRisk {
    #[serde(rename = "Healthy")]
    Healthy,
    #[serde(rename = "High Fixed Costs")]
    HighFixedCosts,
    #[serde(rename = "Low Retainer Base")]
    LowRetainerBase,
    #[serde(rename = "Client Concentration")]
    ClientConcentration,
    #[serde(rename = "Low Runway")]
    LowRunway,
}

impl PrimaryRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryRisk::Healthy => "Healthy",
            PrimaryRisk::HighFixedCosts => "High Fixed Costs",
            PrimaryRisk::LowRetainerBase => "Low Retainer Base",
            PrimaryRisk::ClientConcentration => "Client Concentration",
            PrimaryRisk::LowRunway => "Low Runway",
        }
    }
}

impl std::fmt::Display for PrimaryRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Walk the priority-ordered rule list. `score` is the composite score
/// already computed from the same aggregates.
pub fn attribute(agg: &RawAggregates, score: u8) -> PrimaryRisk {
    // Rule 1: a healthy composite short-circuits everything else.
    if score >= 80 {
        return PrimaryRisk::Healthy;
    }

    // Rule 2: burn outstrips committed revenue.
    if agg.fixed_costs > agg.total_retainers && agg.fixed_costs > 0.0 {
        return PrimaryRisk::HighFixedCosts;
    }

    // Rule 3: retainer base does not cover burn. Only meaningful with a
    // nonzero fixed-cost base; with fixed_costs == 0 the rule is skipped
    // and evaluation falls through.
    if agg.fixed_costs > 0.0 && agg.total_retainers / agg.fixed_costs < 1.0 {
        return PrimaryRisk::LowRetainerBase;
    }

    // Rule 4: one client dominates the retainer base.
    let top_pct = if agg.total_retainers > 0.0 {
        (agg.max_retainer / agg.total_retainers) * 100.0
    } else {
        0.0
    };
    if top_pct > 60.0 {
        return PrimaryRisk::ClientConcentration;
    }

    // Rule 5: under two months of cash at current burn.
    if let Some(cash) = agg.latest_cash {
        if agg.fixed_costs > 0.0 && cash / agg.fixed_costs < 2.0 {
            return PrimaryRisk::LowRunway;
        }
    }

    // Rule 6: nothing fired.
    PrimaryRisk::Healthy
}
