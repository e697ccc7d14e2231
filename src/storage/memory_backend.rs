use std::sync::Mutex;

use super::{
    xlsx::{self, LoadReport, DEFAULT_SHEET_NAME},
    Result, StorageBackend,
};
use crate::{errors::LedgerError, ledger::Ledger};

/// Keeps the encoded workbook in memory. Useful for isolated tests and for
/// hosts that manage the bytes themselves.
#[derive(Debug)]
pub struct MemoryStorage {
    bytes: Mutex<Option<Vec<u8>>>,
    fail_writes: Mutex<bool>,
    sheet_name: String,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            bytes: Mutex::new(None),
            fail_writes: Mutex::new(false),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from previously persisted workbook bytes.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes)),
            ..Self::default()
        }
    }

    /// Encodes saved ledgers on a sheet named `sheet_name`, like
    /// [`XlsxFileStorage::with_sheet_name`](super::XlsxFileStorage::with_sheet_name).
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Makes every subsequent `save` fail, simulating a full disk.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    /// Current persisted bytes, if any.
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.bytes.lock().ok().and_then(|bytes| bytes.clone())
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<LoadReport>> {
        let bytes = self
            .bytes
            .lock()
            .map_err(|_| LedgerError::StorageRead("memory storage lock poisoned".into()))?;
        match bytes.as_deref() {
            Some(bytes) => xlsx::decode(bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let failing = self
            .fail_writes
            .lock()
            .map(|flag| *flag)
            .map_err(|_| LedgerError::StorageWrite("memory storage lock poisoned".into()))?;
        if failing {
            return Err(LedgerError::StorageWrite("simulated write failure".into()));
        }
        let encoded = xlsx::encode(ledger, &self.sheet_name)?;
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| LedgerError::StorageWrite("memory storage lock poisoned".into()))?;
        *bytes = Some(encoded);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
