use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("cash snapshot already recorded for agency {agency_id} on {date}")]
    DuplicateSnapshot { agency_id: String, date: String },

    #[error("client {client_id} already has an active retainer")]
    DuplicateRetainer { client_id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LedgerError {
    /// True for client-correctable uniqueness violations, so the transport
    /// layer can map them apart from internal failures.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            LedgerError::DuplicateSnapshot { .. } | LedgerError::DuplicateRetainer { .. }
        )
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
