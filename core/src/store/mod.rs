//! SQLite persistence layer — the Ledger Store.
//!
//! RULE: Only the store talks to the database.
//! The aggregator, reconciler, and service call store methods — they never
//! execute SQL directly.

use crate::error::{LedgerError, LedgerResult};
use crate::types::{AgencyId, ClientId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

mod cash;
mod finance;
mod retainers;
mod time;

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    pub fn open(path: &str) -> LedgerResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Agency ─────────────────────────────────────────────────

    pub fn create_agency(&self, name: &str, base_currency: &str) -> LedgerResult<AgencyRecord> {
        let agency_id = Uuid::new_v4().to_string();
        let created_at = chrono::Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO agency (agency_id, name, base_currency, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![agency_id, name, base_currency, created_at],
        )?;
        log::info!("agency created: {agency_id} ({name})");
        Ok(AgencyRecord {
            agency_id,
            name: name.to_string(),
            base_currency: base_currency.to_string(),
        })
    }

    pub fn get_agency(&self, agency_id: &str) -> LedgerResult<Option<AgencyRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT agency_id, name, base_currency FROM agency WHERE agency_id = ?1",
                params![agency_id],
                |row| {
                    Ok(AgencyRecord {
                        agency_id: row.get(0)?,
                        name: row.get(1)?,
                        base_currency: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    // ── Client ─────────────────────────────────────────────────

    pub fn create_client(&self, agency_id: &str, name: &str) -> LedgerResult<ClientRecord> {
        let client_id = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO client (client_id, agency_id, name, status)
             VALUES (?1, ?2, ?3, 'active')",
            params![client_id, agency_id, name],
        )?;
        Ok(ClientRecord {
            client_id,
            name: name.to_string(),
            status: "active".to_string(),
        })
    }

    pub fn archive_client(&self, client_id: &str) -> LedgerResult<()> {
        self.conn.execute(
            "UPDATE client SET status = 'archived' WHERE client_id = ?1",
            params![client_id],
        )?;
        Ok(())
    }

    pub fn active_clients(&self, agency_id: &str) -> LedgerResult<Vec<ClientRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT client_id, name, status FROM client
             WHERE agency_id = ?1 AND status = 'active'
             ORDER BY name ASC",
        )?;
        let clients = stmt
            .query_map(params![agency_id], |row| {
                Ok(ClientRecord {
                    client_id: row.get(0)?,
                    name: row.get(1)?,
                    status: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clients)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AgencyRecord {
    pub agency_id: AgencyId,
    pub name: String,
    pub base_currency: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ClientRecord {
    pub client_id: ClientId,
    pub name: String,
    pub status: String,
}

/// ISO-8601 date string for SQL binding. Lexicographic order on these
/// strings matches calendar order.
fn sql_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Map a UNIQUE-constraint failure to the domain conflict error; anything
/// else stays a database failure.
fn map_conflict(err: rusqlite::Error, conflict: impl FnOnce() -> LedgerError) -> LedgerError {
    if is_constraint_violation(&err) {
        conflict()
    } else {
        LedgerError::Database(err)
    }
}
