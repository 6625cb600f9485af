//! The scoring engine — five threshold tables, one composite score.
//!
//! Every table is an ordered list evaluated top-down, first match wins.
//! The bucket values and band boundaries are product constants; changing
//! them changes what "Healthy" means, so they live here as data and
//! nowhere else.

use crate::aggregator::RawAggregates;
use crate::metrics::utilization_pct;
use serde::Serialize;

/// A lower-bound band: `value >= min` scores `points`.
struct FloorBand {
    min: f64,
    points: u8,
}

/// An upper-bound band: `value < max` scores `points`.
struct CeilBand {
    max: f64,
    points: u8,
}

/// Retainer Safety (25 max) over coverage = retainers / fixed costs.
const RETAINER_SAFETY_BANDS: [FloorBand; 4] = [
    FloorBand { min: 1.5, points: 25 },
    FloorBand { min: 1.2, points: 20 },
    FloorBand { min: 1.0, points: 15 },
    FloorBand { min: 0.8, points: 10 },
];

/// Runway (20 max) over cash / fixed costs, in months.
const RUNWAY_BANDS: [FloorBand; 4] = [
    FloorBand { min: 6.0, points: 20 },
    FloorBand { min: 4.0, points: 15 },
    FloorBand { min: 2.0, points: 8 },
    FloorBand { min: 1.0, points: 4 },
];

/// Client Concentration (20 max) over top-client percentage. Lower is
/// better, so these are ceilings.
const CONCENTRATION_BANDS: [CeilBand; 4] = [
    CeilBand { max: 30.0, points: 20 },
    CeilBand { max: 40.0, points: 15 },
    CeilBand { max: 50.0, points: 8 },
    CeilBand { max: 60.0, points: 4 },
];

/// Profitability (20 max) over windowed profit margin, in percent.
const PROFITABILITY_BANDS: [FloorBand; 4] = [
    FloorBand { min: 20.0, points: 20 },
    FloorBand { min: 10.0, points: 15 },
    FloorBand { min: 0.0, points: 8 },
    FloorBand { min: -10.0, points: 4 },
];

/// Capacity Pressure (15 max) over utilization percent. Under- and
/// over-utilization both signal risk: [40,50) and (85,100] each score 6.
/// Interval boundaries are exact and intentional.
const CAPACITY_PRESSURE_BANDS: [(fn(f64) -> bool, u8); 4] = [
    (|u| (60.0..=85.0).contains(&u), 15),
    (|u| (50.0..60.0).contains(&u), 10),
    (|u| (40.0..50.0).contains(&u), 6),
    (|u| u > 85.0 && u <= 100.0, 6),
];

fn score_floor(bands: &[FloorBand], value: f64) -> u8 {
    bands
        .iter()
        .find(|band| value >= band.min)
        .map_or(0, |band| band.points)
}

fn score_ceil(bands: &[CeilBand], value: f64) -> u8 {
    bands
        .iter()
        .find(|band| value < band.max)
        .map_or(0, |band| band.points)
}

fn score_predicates(bands: &[(fn(f64) -> bool, u8)], value: f64) -> u8 {
    bands
        .iter()
        .find(|(matches, _)| matches(value))
        .map_or(0, |(_, points)| *points)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub retainer_safety: u8,
    pub runway: u8,
    pub client_concentration: u8,
    pub profitability: u8,
    pub capacity_pressure: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.retainer_safety
            + self.runway
            + self.client_concentration
            + self.profitability
            + self.capacity_pressure
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "Healthy")]
    Healthy,
    #[serde(rename = "Watch")]
    Watch,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Danger")]
    Danger,
}

impl Status {
    pub fn classify(score: u8) -> Self {
        if score >= 80 {
            Status::Healthy
        } else if score >= 60 {
            Status::Watch
        } else if score >= 40 {
            Status::AtRisk
        } else {
            Status::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Healthy => "Healthy",
            Status::Watch => "Watch",
            Status::AtRisk => "At Risk",
            Status::Danger => "Danger",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RealityScore {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub status: Status,
}

/// Score one agency's aggregates. Each signal with an unmet precondition
/// contributes 0; the composite is always the exact sum of the five
/// buckets, in [0, 100].
pub fn score(agg: &RawAggregates) -> RealityScore {
    let mut breakdown = ScoreBreakdown::default();

    // A. Retainer Safety — needs a fixed-cost base.
    if agg.fixed_costs > 0.0 {
        let coverage = agg.total_retainers / agg.fixed_costs;
        breakdown.retainer_safety = score_floor(&RETAINER_SAFETY_BANDS, coverage);
    }

    // B. Runway — needs a cash snapshot and a fixed-cost base.
    if let Some(cash) = agg.latest_cash {
        if agg.fixed_costs > 0.0 {
            breakdown.runway = score_floor(&RUNWAY_BANDS, cash / agg.fixed_costs);
        }
    }

    // C. Client Concentration — needs at least one active retainer.
    if agg.total_retainers > 0.0 {
        let top_pct = (agg.max_retainer / agg.total_retainers) * 100.0;
        breakdown.client_concentration = score_ceil(&CONCENTRATION_BANDS, top_pct);
    }

    // D. Profitability — needs windowed revenue.
    if agg.total_revenue > 0.0 {
        let margin = ((agg.total_revenue - agg.total_costs) / agg.total_revenue) * 100.0;
        breakdown.profitability = score_floor(&PROFITABILITY_BANDS, margin);
    }

    // E. Capacity Pressure — always evaluated.
    breakdown.capacity_pressure =
        score_predicates(&CAPACITY_PRESSURE_BANDS, utilization_pct(agg.hours_logged));

    let total = breakdown.total();
    let status = Status::classify(total);

    log::debug!(
        "score: {total} ({status}) breakdown={}/{}/{}/{}/{}",
        breakdown.retainer_safety,
        breakdown.runway,
        breakdown.client_concentration,
        breakdown.profitability,
        breakdown.capacity_pressure,
    );

    RealityScore {
        score: total,
        breakdown,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bands_classify_top_down() {
        assert_eq!(Status::classify(100), Status::Healthy);
        assert_eq!(Status::classify(80), Status::Healthy);
        assert_eq!(Status::classify(79), Status::Watch);
        assert_eq!(Status::classify(60), Status::Watch);
        assert_eq!(Status::classify(59), Status::AtRisk);
        assert_eq!(Status::classify(40), Status::AtRisk);
        assert_eq!(Status::classify(39), Status::Danger);
        assert_eq!(Status::classify(0), Status::Danger);
    }

    #[test]
    fn status_wire_strings_are_exact() {
        assert_eq!(Status::AtRisk.as_str(), "At Risk");
        assert_eq!(
            serde_json::to_string(&Status::AtRisk).unwrap(),
            "\"At Risk\""
        );
    }
}
