use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error type surfaced by every ledger operation.
///
/// Each variant is recoverable: callers report the message and keep the
/// previous in-memory ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Persisted storage exists but cannot be read back as a ledger.
    #[error("Storage read error: {0}")]
    StorageRead(String),
    /// An imported workbook does not carry the expected column layout.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    /// Input rejected before any calculation or write was attempted.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Persisting the ledger failed; the previous file content is kept.
    #[error("Storage write error: {0}")]
    StorageWrite(String),
}

impl LedgerError {
    pub(crate) fn read(context: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::StorageRead(format!("{context}: {err}"))
    }

    pub(crate) fn write(context: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::StorageWrite(format!("{context}: {err}"))
    }
}

impl From<calamine::XlsxError> for LedgerError {
    fn from(err: calamine::XlsxError) -> Self {
        Self::StorageRead(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for LedgerError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::StorageWrite(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_constructors_keep_context() {
        let err = LedgerError::write("wedding_budget.xlsx", "disk full");
        assert_eq!(
            err.to_string(),
            "Storage write error: wedding_budget.xlsx: disk full"
        );
        assert!(matches!(
            LedgerError::read("x", "y"),
            LedgerError::StorageRead(_)
        ));
    }
}
