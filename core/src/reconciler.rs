//! Cash snapshot reconciliation — one snapshot per agency per day.
//!
//! A snapshot for a given (agency, date) either does not exist or exists
//! exactly once: no updates, no deletes. Recording a duplicate fails with
//! a conflict; absence of today's snapshot is "not found" (`None`), never
//! a data error.

use crate::aggregator::RawAggregates;
use crate::error::{LedgerError, LedgerResult};
use crate::store::LedgerStore;
use chrono::NaiveDate;
use serde::Serialize;

/// Today's snapshot plus the latest strictly-earlier balance and their
/// difference. Previous balance and delta are absent when the agency has
/// no snapshot before today.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySnapshotView {
    pub date: NaiveDate,
    pub cash_balance: f64,
    pub previous_cash_balance: Option<f64>,
    pub delta: Option<f64>,
}

/// Today's snapshot with the delta against the latest prior balance,
/// derived from already-collected aggregates — no extra store round trip.
/// `None` when today has no snapshot.
pub fn today_view(agg: &RawAggregates) -> Option<DailySnapshotView> {
    let cash_balance = agg.cash_today?;
    let previous_cash_balance = agg.cash_before_today;
    let delta = previous_cash_balance.map(|prev| cash_balance - prev);

    Some(DailySnapshotView {
        date: agg.today,
        cash_balance,
        previous_cash_balance,
        delta,
    })
}

pub struct CashSnapshotReconciler<'a> {
    store: &'a LedgerStore,
}

impl<'a> CashSnapshotReconciler<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Record today's balance. Pre-checks for an existing row so the
    /// common duplicate is reported without touching the insert path; the
    /// store's UNIQUE constraint is the durable arbiter under races.
    pub fn record(&self, agency_id: &str, today: NaiveDate, balance: f64) -> LedgerResult<()> {
        if self.store.cash_balance_on(agency_id, today)?.is_some() {
            return Err(LedgerError::DuplicateSnapshot {
                agency_id: agency_id.to_string(),
                date: today.format("%Y-%m-%d").to_string(),
            });
        }
        self.store.insert_cash_snapshot(agency_id, today, balance)
    }
}
