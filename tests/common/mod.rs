#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use wedding_budget::{
    core::FixedClock,
    storage::{XlsxFileStorage, DEFAULT_STORAGE_FILE},
    Item, LedgerStore,
};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 17).expect("valid date")
}

pub fn ledger_path(temp: &TempDir) -> PathBuf {
    temp.path().join(DEFAULT_STORAGE_FILE)
}

/// Store writing to a workbook inside `temp`, dated by a fixed clock.
pub fn file_store(temp: &TempDir) -> LedgerStore {
    let storage = XlsxFileStorage::new(ledger_path(temp));
    LedgerStore::with_clock(Box::new(storage), Box::new(FixedClock(today())))
}

/// Item with the given payments and status; the date is restamped on upsert.
pub fn item(
    name: &str,
    total_price: i64,
    deposit: i64,
    payments: (i64, i64),
    status: (bool, bool),
) -> Item {
    Item::new(name, total_price, deposit, today())
        .with_payments(payments.0, payments.1)
        .with_status(status.0, status.1)
}

/// Workbook whose first sheet holds `rows` as plain text cells.
pub fn text_workbook(rows: &[Vec<&str>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet
                .write_string(r as u32, c as u16, *value)
                .expect("write cell");
        }
    }
    workbook.save_to_buffer().expect("workbook bytes")
}
