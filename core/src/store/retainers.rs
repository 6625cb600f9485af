use super::{map_conflict, LedgerStore};
use crate::error::{LedgerError, LedgerResult};
use rusqlite::params;
use uuid::Uuid;

impl LedgerStore {
    /// Insert an active retainer. The partial unique index on
    /// `retainer(client_id) WHERE active = 1` rejects a second active
    /// retainer for the same client; that failure surfaces as
    /// [`LedgerError::DuplicateRetainer`].
    pub fn insert_retainer(
        &self,
        agency_id: &str,
        client_id: &str,
        monthly_amount: f64,
    ) -> LedgerResult<()> {
        self.conn
            .execute(
                "INSERT INTO retainer (retainer_id, agency_id, client_id, monthly_amount, active)
                 VALUES (?1, ?2, ?3, ?4, 1)",
                params![
                    Uuid::new_v4().to_string(),
                    agency_id,
                    client_id,
                    monthly_amount,
                ],
            )
            .map_err(|e| {
                map_conflict(e, || LedgerError::DuplicateRetainer {
                    client_id: client_id.to_string(),
                })
            })?;
        log::info!("retainer created: client={client_id} amount={monthly_amount:.2}");
        Ok(())
    }

    pub fn has_active_retainer(&self, client_id: &str) -> LedgerResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM retainer WHERE client_id = ?1 AND active = 1)",
            params![client_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Current-state total of active retainers (not window-bound).
    pub fn sum_active_retainers(&self, agency_id: &str) -> LedgerResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(monthly_amount), 0.0) FROM retainer
             WHERE agency_id = ?1 AND active = 1",
            params![agency_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub fn max_active_retainer(&self, agency_id: &str) -> LedgerResult<f64> {
        let max: f64 = self.conn.query_row(
            "SELECT COALESCE(MAX(monthly_amount), 0.0) FROM retainer
             WHERE agency_id = ?1 AND active = 1",
            params![agency_id],
            |row| row.get(0),
        )?;
        Ok(max)
    }
}
