//! Raw aggregate collection — query orchestration, no derivation logic.
//!
//! One [`MetricAggregator::collect`] call per request gathers every sum the
//! scoring engine and the risk attributor need, so both read the same
//! immutable value object instead of re-querying.

use crate::{clock::window_start, error::LedgerResult, store::LedgerStore};
use chrono::NaiveDate;

/// Windowed sums and current-state totals for one agency at one "now"
/// anchor. Monetary sums default to 0 on empty result sets; the only
/// optional fields are the cash balances, absent when no snapshot exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAggregates {
    pub today: NaiveDate,
    pub window_start: NaiveDate,
    /// Fixed-type costs in the trailing window — the monthly burn.
    pub fixed_costs: f64,
    /// All costs (fixed + variable) in the window.
    pub total_costs: f64,
    /// All revenue in the window.
    pub total_revenue: f64,
    /// Active retainer total. Current state, not window-bound.
    pub total_retainers: f64,
    /// Largest single active retainer.
    pub max_retainer: f64,
    /// Hours logged in the window.
    pub hours_logged: f64,
    /// Most recent snapshot balance at or before today.
    pub latest_cash: Option<f64>,
    /// Balance recorded today, if any.
    pub cash_today: Option<f64>,
    /// Latest balance dated strictly before today.
    pub cash_before_today: Option<f64>,
}

pub struct MetricAggregator<'a> {
    store: &'a LedgerStore,
}

impl<'a> MetricAggregator<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Gather all raw sums for `agency_id` with the trailing window ending
    /// at `today`, inclusive. The individual queries are independent and
    /// read-only; they are not required to be mirror-consistent under
    /// concurrent writes.
    pub fn collect(&self, agency_id: &str, today: NaiveDate) -> LedgerResult<RawAggregates> {
        let since = window_start(today);

        let aggregates = RawAggregates {
            today,
            window_start: since,
            fixed_costs: self.store.sum_fixed_costs_since(agency_id, since)?,
            total_costs: self.store.sum_all_costs_since(agency_id, since)?,
            total_revenue: self.store.sum_all_revenue_since(agency_id, since)?,
            total_retainers: self.store.sum_active_retainers(agency_id)?,
            max_retainer: self.store.max_active_retainer(agency_id)?,
            hours_logged: self.store.sum_hours_since(agency_id, since)?,
            latest_cash: self.store.latest_cash_balance(agency_id)?,
            cash_today: self.store.cash_balance_on(agency_id, today)?,
            cash_before_today: self.store.latest_cash_balance_before(agency_id, today)?,
        };

        log::debug!(
            "aggregates: agency={agency_id} window={since}..{today} \
             fixed={:.2} retainers={:.2} cash={:?}",
            aggregates.fixed_costs,
            aggregates.total_retainers,
            aggregates.latest_cash,
        );

        Ok(aggregates)
    }
}
