use super::{sql_date, LedgerStore};
use crate::error::LedgerResult;
use chrono::NaiveDate;
use rusqlite::params;
use uuid::Uuid;

impl LedgerStore {
    pub fn insert_revenue(
        &self,
        agency_id: &str,
        date: NaiveDate,
        amount: f64,
        source: &str,
    ) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT INTO revenue_entry (entry_id, agency_id, date, amount, source)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                Uuid::new_v4().to_string(),
                agency_id,
                sql_date(date),
                amount,
                source,
            ],
        )?;
        Ok(())
    }

    pub fn insert_cost(
        &self,
        agency_id: &str,
        date: NaiveDate,
        amount: f64,
        cost_type: &str,
        category: &str,
        label: &str,
    ) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT INTO cost_entry (entry_id, agency_id, date, amount, cost_type, category, label)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                Uuid::new_v4().to_string(),
                agency_id,
                sql_date(date),
                amount,
                cost_type,
                category,
                label,
            ],
        )?;
        Ok(())
    }

    /// Sum of fixed-type costs dated `since` or later. Zero when empty.
    pub fn sum_fixed_costs_since(&self, agency_id: &str, since: NaiveDate) -> LedgerResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM cost_entry
             WHERE agency_id = ?1 AND cost_type = 'fixed' AND date >= ?2",
            params![agency_id, sql_date(since)],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Sum of all costs (fixed and variable) dated `since` or later.
    pub fn sum_all_costs_since(&self, agency_id: &str, since: NaiveDate) -> LedgerResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM cost_entry
             WHERE agency_id = ?1 AND date >= ?2",
            params![agency_id, sql_date(since)],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub fn sum_all_revenue_since(&self, agency_id: &str, since: NaiveDate) -> LedgerResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM revenue_entry
             WHERE agency_id = ?1 AND date >= ?2",
            params![agency_id, sql_date(since)],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Revenue recorded on exactly `date` (the daily net-summary view).
    pub fn sum_revenue_on(&self, agency_id: &str, date: NaiveDate) -> LedgerResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM revenue_entry
             WHERE agency_id = ?1 AND date = ?2",
            params![agency_id, sql_date(date)],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub fn sum_costs_on(&self, agency_id: &str, date: NaiveDate) -> LedgerResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM cost_entry
             WHERE agency_id = ?1 AND date = ?2",
            params![agency_id, sql_date(date)],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Windowed fixed costs grouped by category, ordered by category name.
    pub fn grouped_fixed_costs_since(
        &self,
        agency_id: &str,
        since: NaiveDate,
    ) -> LedgerResult<Vec<(String, f64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, COALESCE(SUM(amount), 0.0) FROM cost_entry
             WHERE agency_id = ?1 AND cost_type = 'fixed' AND date >= ?2
             GROUP BY category ORDER BY category ASC",
        )?;
        let rows = stmt
            .query_map(params![agency_id, sql_date(since)], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
