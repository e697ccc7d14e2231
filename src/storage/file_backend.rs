use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{
    xlsx::{self, LoadReport, DEFAULT_SHEET_NAME},
    Result, StorageBackend,
};
use crate::{errors::LedgerError, ledger::Ledger, utils::persistence::write_atomic};

pub const DEFAULT_STORAGE_FILE: &str = "wedding_budget.xlsx";

/// Stores the ledger as an xlsx workbook at a fixed path.
#[derive(Debug, Clone)]
pub struct XlsxFileStorage {
    path: PathBuf,
    sheet_name: String,
}

impl XlsxFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_sheet_name(path, DEFAULT_SHEET_NAME)
    }

    pub fn with_sheet_name(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    pub fn new_default() -> Self {
        Self::new(DEFAULT_STORAGE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl StorageBackend for XlsxFileStorage {
    fn load(&self) -> Result<Option<LoadReport>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no ledger file yet");
            return Ok(None);
        }
        let bytes = fs::read(&self.path)
            .map_err(|err| LedgerError::read(self.path.display(), err))?;
        xlsx::decode(&bytes).map(Some)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let bytes = xlsx::encode(ledger, &self.sheet_name)?;
        write_atomic(&self.path, &bytes)
            .map_err(|err| LedgerError::write(self.path.display(), err))?;
        debug!(path = %self.path.display(), rows = ledger.len(), "ledger file rewritten");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Item;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (XlsxFileStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = XlsxFileStorage::new(temp.path().join(DEFAULT_STORAGE_FILE));
        (storage, temp)
    }

    #[test]
    fn missing_file_loads_as_none() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut ledger = Ledger::new();
        ledger.upsert(Item::new(
            "Hall",
            10_000_000,
            1_000_000,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        ));
        storage.save(&ledger).expect("save ledger");
        let loaded = storage.load().expect("load ledger").expect("file present");
        assert_eq!(loaded.ledger, ledger);
    }

    #[test]
    fn default_storage_uses_fixed_file_name() {
        let storage = XlsxFileStorage::new_default();
        assert_eq!(storage.path(), Path::new(DEFAULT_STORAGE_FILE));
        assert_eq!(storage.sheet_name(), DEFAULT_SHEET_NAME);
    }
}
