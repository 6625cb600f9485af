use super::{map_conflict, sql_date, LedgerStore};
use crate::error::{LedgerError, LedgerResult};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

impl LedgerStore {
    /// Insert the cash snapshot for one agency/date. Snapshots are never
    /// mutated or deleted; the UNIQUE(agency_id, date) constraint rejects a
    /// second snapshot for the same day as
    /// [`LedgerError::DuplicateSnapshot`].
    pub fn insert_cash_snapshot(
        &self,
        agency_id: &str,
        date: NaiveDate,
        cash_balance: f64,
    ) -> LedgerResult<()> {
        let date_str = sql_date(date);
        self.conn
            .execute(
                "INSERT INTO cash_snapshot (snapshot_id, agency_id, date, cash_balance)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    Uuid::new_v4().to_string(),
                    agency_id,
                    date_str,
                    cash_balance,
                ],
            )
            .map_err(|e| {
                map_conflict(e, || LedgerError::DuplicateSnapshot {
                    agency_id: agency_id.to_string(),
                    date: date_str.clone(),
                })
            })?;
        log::info!("cash snapshot: agency={agency_id} date={date_str} balance={cash_balance:.2}");
        Ok(())
    }

    /// Most recent balance on record, any date. None when the agency has
    /// never recorded a snapshot.
    pub fn latest_cash_balance(&self, agency_id: &str) -> LedgerResult<Option<f64>> {
        let balance = self
            .conn
            .query_row(
                "SELECT cash_balance FROM cash_snapshot
                 WHERE agency_id = ?1
                 ORDER BY date DESC LIMIT 1",
                params![agency_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(balance)
    }

    pub fn cash_balance_on(&self, agency_id: &str, date: NaiveDate) -> LedgerResult<Option<f64>> {
        let balance = self
            .conn
            .query_row(
                "SELECT cash_balance FROM cash_snapshot
                 WHERE agency_id = ?1 AND date = ?2",
                params![agency_id, sql_date(date)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(balance)
    }

    /// Latest balance dated strictly before `date`.
    pub fn latest_cash_balance_before(
        &self,
        agency_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<Option<f64>> {
        let balance = self
            .conn
            .query_row(
                "SELECT cash_balance FROM cash_snapshot
                 WHERE agency_id = ?1 AND date < ?2
                 ORDER BY date DESC LIMIT 1",
                params![agency_id, sql_date(date)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(balance)
    }
}
