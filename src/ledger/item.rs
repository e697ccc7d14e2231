use chrono::NaiveDate;

use super::calculator::{calculate, Amounts};
use crate::errors::{LedgerError, Result};

/// Largest amount accepted for any money field. Workbook cells hold numbers
/// as `f64`, which represents every integer up to this value exactly.
pub const MAX_AMOUNT: i64 = (1 << 53) - 1;

/// One budgeted expense line, keyed by its name.
///
/// `actual_spend` and `balance` are not stored here; they are derived from the
/// raw fields whenever they are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub date: NaiveDate,
    pub name: String,
    pub total_price: i64,
    pub deposit: i64,
    pub payment1: i64,
    pub payment2: i64,
    pub canceled: bool,
    pub refunded: bool,
}

impl Item {
    /// A freshly contracted item: no installments paid, contract active.
    pub fn new(name: impl Into<String>, total_price: i64, deposit: i64, date: NaiveDate) -> Self {
        Self {
            date,
            name: name.into(),
            total_price,
            deposit,
            payment1: 0,
            payment2: 0,
            canceled: false,
            refunded: false,
        }
    }

    pub fn with_payments(mut self, payment1: i64, payment2: i64) -> Self {
        self.payment1 = payment1;
        self.payment2 = payment2;
        self
    }

    pub fn with_status(mut self, canceled: bool, refunded: bool) -> Self {
        self.canceled = canceled;
        self.refunded = refunded;
        self
    }

    pub fn amounts(&self) -> Amounts {
        calculate(
            self.total_price,
            self.deposit,
            self.payment1,
            self.payment2,
            self.canceled,
            self.refunded,
        )
    }

    pub fn actual_spend(&self) -> i64 {
        self.amounts().actual_spend
    }

    pub fn balance(&self) -> i64 {
        self.amounts().balance
    }

    /// Checks the name and every amount before the item reaches the ledger.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        for (label, value) in [
            ("total_price", self.total_price),
            ("deposit", self.deposit),
            ("payment1", self.payment1),
            ("payment2", self.payment2),
        ] {
            validate_amount(label, value)?;
        }
        self.deposit
            .checked_add(self.payment1)
            .and_then(|paid| paid.checked_add(self.payment2))
            .ok_or_else(|| {
                LedgerError::Validation(format!("payments for `{}` overflow", self.name))
            })?;
        Ok(())
    }
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation("item name must not be empty".into()));
    }
    Ok(())
}

pub(crate) fn validate_amount(label: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(LedgerError::Validation(format!(
            "{label} must not be negative (got {value})"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(LedgerError::Validation(format!(
            "{label} must not exceed {MAX_AMOUNT} (got {value})"
        )));
    }
    Ok(())
}
