use tracing::{debug, info, warn};

use crate::{
    config::Config,
    core::clock::{Clock, SystemClock},
    errors::{LedgerError, Result},
    ledger::{
        item::{validate_amount, validate_name},
        Amounts, Item, Ledger, LedgerSummary, UpsertOutcome,
    },
    storage::{
        xlsx::{self, LoadReport},
        StorageBackend, XlsxFileStorage, DEFAULT_SHEET_NAME,
    },
};

/// Payments and contract status supplied when updating an existing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentUpdate {
    pub payment1: i64,
    pub payment2: i64,
    pub canceled: bool,
    pub refunded: bool,
}

/// Facade that owns the in-memory ledger and keeps it in step with storage.
///
/// Every mutation is written through in full before the in-memory view is
/// replaced, so a failed write leaves both sides as they were.
pub struct LedgerStore {
    ledger: Ledger,
    warnings: Vec<String>,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
    sheet_name: String,
}

impl LedgerStore {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        Self {
            ledger: Ledger::new(),
            warnings: Vec::new(),
            storage,
            clock,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    /// Store backed by the workbook file named in `config`.
    pub fn from_config(config: &Config) -> Self {
        let storage =
            XlsxFileStorage::with_sheet_name(config.storage_path.clone(), config.sheet_name.clone());
        let mut store = Self::new(Box::new(storage));
        store.sheet_name = config.sheet_name.clone();
        store
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Notes from the most recent load or import, such as recomputed amounts.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn item_names(&self) -> Vec<&str> {
        self.ledger.names()
    }

    pub fn find(&self, name: &str) -> Option<&Item> {
        self.ledger.get(name.trim())
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_ledger(&self.ledger)
    }

    /// Reads persisted storage into memory. A missing file yields an empty
    /// ledger; any read failure leaves the current in-memory ledger untouched.
    pub fn load(&mut self) -> Result<&Ledger> {
        let report = match self.storage.load() {
            Ok(Some(report)) => report,
            Ok(None) => LoadReport::default(),
            Err(LedgerError::SchemaMismatch(message)) => {
                warn!(storage = %self.storage.describe(), %message, "ledger file has unexpected columns");
                return Err(LedgerError::StorageRead(message));
            }
            Err(err) => {
                warn!(storage = %self.storage.describe(), error = %err, "ledger load failed");
                return Err(err);
            }
        };
        debug!(
            storage = %self.storage.describe(),
            items = report.ledger.len(),
            "ledger loaded"
        );
        self.ledger = report.ledger;
        self.warnings = report.warnings;
        Ok(&self.ledger)
    }

    /// Inserts or replaces the item named `item.name`, stamping today's date,
    /// then rewrites storage.
    pub fn upsert(&mut self, mut item: Item) -> Result<&Ledger> {
        item.name = item.name.trim().to_string();
        item.validate()?;
        item.date = self.clock.today();

        let name = item.name.clone();
        let mut next = self.ledger.clone();
        let outcome = next.upsert(item);
        self.commit(next)?;
        match outcome {
            UpsertOutcome::Inserted => info!(item = %name, "item registered"),
            UpsertOutcome::Replaced => info!(item = %name, "item updated"),
        }
        Ok(&self.ledger)
    }

    /// Removes the item named `name`, trimmed the same way `upsert` trims.
    /// Unknown names leave everything as is.
    pub fn delete(&mut self, name: &str) -> Result<&Ledger> {
        let name = name.trim();
        let mut next = self.ledger.clone();
        if next.remove(name) == 0 {
            debug!(item = %name, "delete skipped, no such item");
            return Ok(&self.ledger);
        }
        self.commit(next)?;
        info!(item = %name, "item deleted");
        Ok(&self.ledger)
    }

    /// Creates (or overwrites) an item with no installments paid and an
    /// active contract.
    pub fn register(&mut self, name: &str, total_price: i64, deposit: i64) -> Result<&Ledger> {
        let item = Item::new(name, total_price, deposit, self.clock.today());
        self.upsert(item)
    }

    /// Replaces the payments and contract status of an existing item, keeping
    /// its total and deposit.
    pub fn record_payments(&mut self, name: &str, update: PaymentUpdate) -> Result<&Ledger> {
        let item = self.apply_update(name, update)?;
        self.upsert(item)
    }

    /// Amounts an update would produce, without touching the ledger.
    pub fn preview_payments(&self, name: &str, update: PaymentUpdate) -> Result<Amounts> {
        Ok(self.apply_update(name, update)?.amounts())
    }

    /// Serializes `ledger` to workbook bytes without touching storage.
    pub fn export_snapshot(&self, ledger: &Ledger) -> Result<Vec<u8>> {
        xlsx::encode(ledger, &self.sheet_name)
    }

    pub fn export_current(&self) -> Result<Vec<u8>> {
        self.export_snapshot(&self.ledger)
    }

    /// Replaces the ledger with an externally supplied workbook and persists
    /// it. A workbook with the wrong columns is rejected without any change.
    pub fn import(&mut self, bytes: &[u8]) -> Result<&Ledger> {
        let report = xlsx::decode(bytes).map_err(|err| {
            warn!(error = %err, "import rejected");
            err
        })?;
        self.commit(report.ledger)?;
        self.warnings = report.warnings;
        info!(items = self.ledger.len(), "ledger imported");
        Ok(&self.ledger)
    }

    fn apply_update(&self, name: &str, update: PaymentUpdate) -> Result<Item> {
        validate_name(name)?;
        validate_amount("payment1", update.payment1)?;
        validate_amount("payment2", update.payment2)?;
        let existing = self
            .ledger
            .get(name.trim())
            .ok_or_else(|| LedgerError::Validation(format!("unknown item `{}`", name.trim())))?;
        Ok(existing
            .clone()
            .with_payments(update.payment1, update.payment2)
            .with_status(update.canceled, update.refunded))
    }

    fn commit(&mut self, next: Ledger) -> Result<()> {
        if let Err(err) = self.storage.save(&next) {
            warn!(storage = %self.storage.describe(), error = %err, "ledger write failed");
            return Err(err);
        }
        self.ledger = next;
        Ok(())
    }
}
