use super::{sql_date, LedgerStore};
use crate::error::LedgerResult;
use chrono::NaiveDate;
use rusqlite::params;
use uuid::Uuid;

impl LedgerStore {
    pub fn insert_time_entry(
        &self,
        agency_id: &str,
        client_id: Option<&str>,
        date: NaiveDate,
        hours: f64,
    ) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT INTO time_entry (entry_id, agency_id, client_id, date, hours)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                Uuid::new_v4().to_string(),
                agency_id,
                client_id,
                sql_date(date),
                hours,
            ],
        )?;
        Ok(())
    }

    pub fn sum_hours_since(&self, agency_id: &str, since: NaiveDate) -> LedgerResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(hours), 0.0) FROM time_entry
             WHERE agency_id = ?1 AND date >= ?2",
            params![agency_id, sql_date(since)],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}
