//! Ledger domain: items, the amount rule, and read-only aggregates.

pub mod calculator;
pub mod item;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod summary;

pub use calculator::{calculate, Amounts};
pub use item::{Item, MAX_AMOUNT};
pub use ledger::{Ledger, UpsertOutcome};
pub use summary::{ItemShare, LedgerSummary};
