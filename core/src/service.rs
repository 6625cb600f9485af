//! Request-scoped orchestration — the surface the transport layer calls.
//!
//! Each read gathers one [`RawAggregates`] via the aggregator and derives
//! its report from that single value object; the scoring engine and the
//! risk attributor share it rather than re-querying. The service holds no
//! state beyond the store handle and the injected clock.

use crate::{
    aggregator::MetricAggregator,
    clock::{window_start, Clock},
    error::{LedgerError, LedgerResult},
    metrics::{
        self, CostBreakdown, DailySummary, RetainerSummary, SurvivalMetrics, Utilization,
    },
    reconciler::{self, CashSnapshotReconciler, DailySnapshotView},
    risk::{self, PrimaryRisk},
    scoring::{self, ScoreBreakdown, Status},
    store::{AgencyRecord, ClientRecord, LedgerStore},
};
use serde::Serialize;

/// Cost entry type. Only fixed costs feed burn, coverage, and the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    Fixed,
    Variable,
}

impl CostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostType::Fixed => "fixed",
            CostType::Variable => "variable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    People,
    Tools,
    Other,
}

impl CostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostCategory::People => "people",
            CostCategory::Tools => "tools",
            CostCategory::Other => "other",
        }
    }
}

/// The full reality-score report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealityScoreView {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub status: Status,
    pub cash_on_hand: f64,
    pub committed_retainers: f64,
    pub primary_risk: PrimaryRisk,
}

pub struct RealityService<C: Clock> {
    store: LedgerStore,
    clock: C,
}

impl<C: Clock> RealityService<C> {
    pub fn new(store: LedgerStore, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    // ── Reads ──────────────────────────────────────────────────

    /// Composite score, bucket breakdown, status band, and primary risk.
    pub fn reality_score(&self, agency_id: &str) -> LedgerResult<RealityScoreView> {
        let agg = MetricAggregator::new(&self.store).collect(agency_id, self.clock.today())?;

        let result = scoring::score(&agg);
        let primary_risk = risk::attribute(&agg, result.score);

        log::info!(
            "reality score: agency={agency_id} score={} status={} risk={}",
            result.score,
            result.status,
            primary_risk,
        );

        Ok(RealityScoreView {
            score: result.score,
            breakdown: result.breakdown,
            status: result.status,
            cash_on_hand: agg.latest_cash.unwrap_or(0.0),
            committed_retainers: agg.total_retainers,
            primary_risk,
        })
    }

    /// Burn, runway, and margin. `None` until a cash snapshot exists.
    pub fn survival_metrics(&self, agency_id: &str) -> LedgerResult<Option<SurvivalMetrics>> {
        let agg = MetricAggregator::new(&self.store).collect(agency_id, self.clock.today())?;
        Ok(metrics::survival_metrics(&agg))
    }

    pub fn retainer_summary(&self, agency_id: &str) -> LedgerResult<RetainerSummary> {
        let agg = MetricAggregator::new(&self.store).collect(agency_id, self.clock.today())?;
        Ok(metrics::retainer_summary(&agg))
    }

    pub fn utilization(&self, agency_id: &str) -> LedgerResult<Utilization> {
        let agg = MetricAggregator::new(&self.store).collect(agency_id, self.clock.today())?;
        Ok(metrics::utilization(&agg))
    }

    /// Today's cash snapshot with the delta against the latest prior
    /// balance. `None` when today has no snapshot.
    pub fn daily_snapshot(&self, agency_id: &str) -> LedgerResult<Option<DailySnapshotView>> {
        let agg = MetricAggregator::new(&self.store).collect(agency_id, self.clock.today())?;
        Ok(reconciler::today_view(&agg))
    }

    /// Agency lookup. `None` when the id is unknown.
    pub fn agency(&self, agency_id: &str) -> LedgerResult<Option<AgencyRecord>> {
        self.store.get_agency(agency_id)
    }

    /// Active clients for an agency, ordered by name.
    pub fn clients(&self, agency_id: &str) -> LedgerResult<Vec<ClientRecord>> {
        self.store.active_clients(agency_id)
    }

    /// Today-only revenue/cost net, variable costs included.
    pub fn daily_summary(&self, agency_id: &str) -> LedgerResult<DailySummary> {
        let today = self.clock.today();
        let revenue = self.store.sum_revenue_on(agency_id, today)?;
        let costs = self.store.sum_costs_on(agency_id, today)?;
        Ok(DailySummary::new(today, revenue, costs))
    }

    /// Windowed fixed costs by category with the primary driver named.
    pub fn cost_breakdown(&self, agency_id: &str) -> LedgerResult<CostBreakdown> {
        let since = window_start(self.clock.today());
        let grouped = self.store.grouped_fixed_costs_since(agency_id, since)?;
        Ok(metrics::cost_breakdown(&grouped))
    }

    // ── Writes ─────────────────────────────────────────────────

    /// Record today's cash balance. Fails with a conflict when today
    /// already has one.
    pub fn record_cash_snapshot(&self, agency_id: &str, balance: f64) -> LedgerResult<()> {
        CashSnapshotReconciler::new(&self.store).record(agency_id, self.clock.today(), balance)
    }

    pub fn add_revenue(&self, agency_id: &str, amount: f64, source: &str) -> LedgerResult<()> {
        require_positive(amount, "revenue amount")?;
        self.store
            .insert_revenue(agency_id, self.clock.today(), amount, source)
    }

    pub fn add_cost(
        &self,
        agency_id: &str,
        amount: f64,
        cost_type: CostType,
        category: CostCategory,
        label: &str,
    ) -> LedgerResult<()> {
        require_positive(amount, "cost amount")?;
        self.store.insert_cost(
            agency_id,
            self.clock.today(),
            amount,
            cost_type.as_str(),
            category.as_str(),
            label,
        )
    }

    pub fn add_time_entry(
        &self,
        agency_id: &str,
        client_id: Option<&str>,
        hours: f64,
    ) -> LedgerResult<()> {
        require_positive(hours, "hours")?;
        self.store
            .insert_time_entry(agency_id, client_id, self.clock.today(), hours)
    }

    pub fn create_client(&self, agency_id: &str, name: &str) -> LedgerResult<ClientRecord> {
        self.store.create_client(agency_id, name)
    }

    /// Archive a client. Archived clients drop out of the listing; their
    /// ledger rows are untouched.
    pub fn archive_client(&self, client_id: &str) -> LedgerResult<()> {
        self.store.archive_client(client_id)
    }

    /// Check-then-insert for the one-active-retainer-per-client invariant.
    /// The pre-check catches the common duplicate; the store's partial
    /// unique index is the durable arbiter under concurrent creation.
    pub fn create_retainer(
        &self,
        agency_id: &str,
        client_id: &str,
        monthly_amount: f64,
    ) -> LedgerResult<()> {
        require_positive(monthly_amount, "retainer amount")?;
        if self.store.has_active_retainer(client_id)? {
            return Err(LedgerError::DuplicateRetainer {
                client_id: client_id.to_string(),
            });
        }
        self.store
            .insert_retainer(agency_id, client_id, monthly_amount)
    }
}

fn require_positive(value: f64, what: &str) -> LedgerResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput(format!(
            "{what} must be positive, got {value}"
        )))
    }
}
