//! Scoring engine tests — bucket tables, boundaries, composite bounds.

use chrono::NaiveDate;
use reality_core::aggregator::RawAggregates;
use reality_core::scoring::{score, Status};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Empty aggregates: every sum zero, no cash snapshot on record.
fn empty_aggregates() -> RawAggregates {
    RawAggregates {
        today: date(2026, 8, 23),
        window_start: date(2026, 7, 24),
        fixed_costs: 0.0,
        total_costs: 0.0,
        total_revenue: 0.0,
        total_retainers: 0.0,
        max_retainer: 0.0,
        hours_logged: 0.0,
        latest_cash: None,
        cash_today: None,
        cash_before_today: None,
    }
}

#[test]
fn score_is_sum_of_buckets_and_within_bounds() {
    let mut agg = empty_aggregates();
    agg.fixed_costs = 1000.0;
    agg.total_costs = 1000.0;
    agg.total_retainers = 2000.0;
    agg.max_retainer = 500.0;
    agg.total_revenue = 5000.0;
    agg.latest_cash = Some(10_000.0);
    agg.hours_logged = 112.0; // 70%

    let result = score(&agg);
    let b = result.breakdown;
    assert_eq!(
        result.score,
        b.retainer_safety + b.runway + b.client_concentration + b.profitability
            + b.capacity_pressure,
        "composite must equal the exact bucket sum"
    );
    assert!(result.score <= 100);
}

#[test]
fn perfect_inputs_score_one_hundred() {
    let mut agg = empty_aggregates();
    agg.fixed_costs = 1000.0;
    agg.total_costs = 1000.0; // margin 80%
    agg.total_retainers = 2000.0; // coverage 2.0
    agg.max_retainer = 400.0; // top 20%
    agg.total_revenue = 5000.0;
    agg.latest_cash = Some(10_000.0); // runway 10 months
    agg.hours_logged = 112.0; // 70% utilization

    let result = score(&agg);
    assert_eq!(result.score, 100);
    assert_eq!(result.status, Status::Healthy);
}

#[test]
fn empty_ledger_scores_zero() {
    let result = score(&empty_aggregates());
    assert_eq!(result.score, 0);
    assert_eq!(result.status, Status::Danger);
}

#[test]
fn retainer_safety_bands() {
    let cases = [
        (1500.0, 25), // coverage 1.5
        (1499.0, 20), // just under 1.5
        (1200.0, 20),
        (1199.0, 15),
        (1000.0, 15),
        (999.0, 10),
        (800.0, 10),
        (799.0, 0),
    ];
    for (retainers, expected) in cases {
        let mut agg = empty_aggregates();
        agg.fixed_costs = 1000.0;
        agg.total_retainers = retainers;
        agg.max_retainer = retainers;
        assert_eq!(
            score(&agg).breakdown.retainer_safety,
            expected,
            "retainers={retainers}"
        );
    }
}

#[test]
fn retainer_safety_requires_fixed_costs() {
    let mut agg = empty_aggregates();
    agg.total_retainers = 5000.0;
    agg.max_retainer = 5000.0;
    assert_eq!(score(&agg).breakdown.retainer_safety, 0);
}

#[test]
fn runway_bands() {
    let cases = [
        (6000.0, 20),
        (5999.0, 15),
        (4000.0, 15),
        (3999.0, 8),
        (2000.0, 8),
        (1999.0, 4),
        (1000.0, 4),
        (999.0, 0),
    ];
    for (cash, expected) in cases {
        let mut agg = empty_aggregates();
        agg.fixed_costs = 1000.0;
        agg.latest_cash = Some(cash);
        assert_eq!(score(&agg).breakdown.runway, expected, "cash={cash}");
    }
}

#[test]
fn runway_requires_snapshot_and_fixed_costs() {
    let mut agg = empty_aggregates();
    agg.fixed_costs = 1000.0;
    assert_eq!(score(&agg).breakdown.runway, 0, "no snapshot");

    let mut agg = empty_aggregates();
    agg.latest_cash = Some(100_000.0);
    assert_eq!(score(&agg).breakdown.runway, 0, "no fixed costs");
}

#[test]
fn client_concentration_bands() {
    // (max_retainer, total 1000) → top_pct = max / 10
    let cases = [
        (299.0, 20), // 29.9%
        (300.0, 15), // 30%
        (399.0, 15),
        (400.0, 8),
        (499.0, 8),
        (500.0, 4),
        (599.0, 4),
        (600.0, 0), // 60% is not in any <x band
        (900.0, 0),
    ];
    for (max, expected) in cases {
        let mut agg = empty_aggregates();
        agg.total_retainers = 1000.0;
        agg.max_retainer = max;
        assert_eq!(
            score(&agg).breakdown.client_concentration,
            expected,
            "max={max}"
        );
    }
}

#[test]
fn profitability_bands() {
    // revenue 1000 → margin = (1000 - costs) / 10
    let cases = [
        (800.0, 20),  // 20%
        (801.0, 15),  // 19.9%
        (900.0, 15),  // 10%
        (901.0, 8),   // 9.9%
        (1000.0, 8),  // 0%
        (1001.0, 4),  // -0.1%
        (1100.0, 4),  // -10%
        (1101.0, 0),  // -10.1%
    ];
    for (costs, expected) in cases {
        let mut agg = empty_aggregates();
        agg.total_revenue = 1000.0;
        agg.total_costs = costs;
        assert_eq!(score(&agg).breakdown.profitability, expected, "costs={costs}");
    }
}

#[test]
fn profitability_requires_revenue() {
    let mut agg = empty_aggregates();
    agg.total_costs = 500.0;
    assert_eq!(score(&agg).breakdown.profitability, 0);
}

#[test]
fn capacity_pressure_exact_boundaries() {
    // hours = utilization% × 160 / 100
    let cases = [
        (63.84, 0),   // 39.9%
        (64.0, 6),    // 40.0%
        (79.84, 6),   // 49.9%
        (80.0, 10),   // 50.0%
        (95.84, 10),  // 59.9%
        (96.0, 15),   // 60.0%
        (136.0, 15),  // 85.0%
        (136.16, 6),  // 85.1%
        (160.0, 6),   // 100.0%
        (160.16, 0),  // 100.1%
    ];
    for (hours, expected) in cases {
        let mut agg = empty_aggregates();
        agg.hours_logged = hours;
        assert_eq!(
            score(&agg).breakdown.capacity_pressure,
            expected,
            "hours={hours}"
        );
    }
}

#[test]
fn capacity_pressure_under_and_over_band_both_score_six() {
    let mut under = empty_aggregates();
    under.hours_logged = 72.0; // 45%
    let mut over = empty_aggregates();
    over.hours_logged = 144.0; // 90%
    let mut healthy = empty_aggregates();
    healthy.hours_logged = 112.0; // 70%

    let under_pts = score(&under).breakdown.capacity_pressure;
    let over_pts = score(&over).breakdown.capacity_pressure;
    let healthy_pts = score(&healthy).breakdown.capacity_pressure;

    assert_eq!(under_pts, 6);
    assert_eq!(over_pts, 6);
    assert!(under_pts < healthy_pts && over_pts < healthy_pts);
}

#[test]
fn retainer_safety_is_monotone_in_coverage() {
    let mut last = 0;
    for retainers in (0..=2000).step_by(50) {
        let mut agg = empty_aggregates();
        agg.fixed_costs = 1000.0;
        agg.total_retainers = retainers as f64;
        agg.max_retainer = retainers as f64;
        let pts = score(&agg).breakdown.retainer_safety;
        assert!(
            pts >= last,
            "retainer safety decreased at retainers={retainers}: {last} -> {pts}"
        );
        last = pts;
    }
}

#[test]
fn runway_and_profitability_are_monotone() {
    let mut last = 0;
    for cash in (0..=8000).step_by(100) {
        let mut agg = empty_aggregates();
        agg.fixed_costs = 1000.0;
        agg.latest_cash = Some(cash as f64);
        let pts = score(&agg).breakdown.runway;
        assert!(pts >= last, "runway decreased at cash={cash}");
        last = pts;
    }

    let mut last = 0;
    for margin_step in 0..=60 {
        // costs from 1300 down to 700 → margin from -30% up to +30%
        let costs = 1300.0 - (margin_step as f64) * 10.0;
        let mut agg = empty_aggregates();
        agg.total_revenue = 1000.0;
        agg.total_costs = costs;
        let pts = score(&agg).breakdown.profitability;
        assert!(pts >= last, "profitability decreased at costs={costs}");
        last = pts;
    }
}
