#![doc(test(attr(deny(warnings))))]

//! Wedding Budget keeps a single-user ledger of contracted expense items,
//! derives what has actually been spent and what is still owed on each, and
//! persists the table to an xlsx workbook.

pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{LedgerStore, PaymentUpdate};
pub use errors::{LedgerError, Result};
pub use ledger::{calculate, Amounts, Item, Ledger, LedgerSummary};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Wedding Budget tracing initialized.");
    });
}
