pub mod file_backend;
pub mod memory_backend;
pub mod xlsx;

use crate::{errors::Result, ledger::Ledger};

/// Abstraction over the place the ledger table is persisted.
///
/// Implementations rewrite the whole table on every `save`; there is no
/// partial or append write.
pub trait StorageBackend: Send + Sync {
    /// Reads the persisted ledger, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<LoadReport>>;

    /// Replaces the persisted ledger with `ledger`.
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Human-readable location used in logs.
    fn describe(&self) -> String;
}

pub use file_backend::{XlsxFileStorage, DEFAULT_STORAGE_FILE};
pub use memory_backend::MemoryStorage;
pub use xlsx::{LoadReport, COLUMNS, DEFAULT_SHEET_NAME};
