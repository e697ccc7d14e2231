//! Workbook codec for the ledger table.
//!
//! The layout is a single sheet with a header row followed by one row per
//! item, in the fixed column order of [`COLUMNS`]. The derived columns are
//! written for readers of the file and recomputed when it is read back.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use tracing::warn;

use crate::{
    errors::{LedgerError, Result},
    ledger::{Item, Ledger, MAX_AMOUNT},
};

pub const COLUMNS: [&str; 10] = [
    "날짜",
    "품목명",
    "총금액",
    "계약금",
    "1차결제",
    "2차결제",
    "계약취소",
    "계약금환불",
    "실지출",
    "잔금",
];

pub const DEFAULT_SHEET_NAME: &str = "예산";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MARK_YES: &str = "O";
const MARK_NO: &str = "X";

/// Ledger read back from a workbook, plus anything worth telling the user.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub warnings: Vec<String>,
}

pub fn mark(flag: bool) -> &'static str {
    if flag {
        MARK_YES
    } else {
        MARK_NO
    }
}

/// Serializes the ledger into workbook bytes on a sheet named `sheet_name`.
///
/// Rows that fail [`Item::validate`] are refused, so every amount written fits
/// a spreadsheet number exactly.
pub fn encode(ledger: &Ledger, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (index, item) in ledger.iter().enumerate() {
        item.validate()?;
        let row = u32::try_from(index + 1)
            .map_err(|_| LedgerError::StorageWrite("ledger has too many rows".into()))?;
        let amounts = item.amounts();
        let date = item.date.format(DATE_FORMAT).to_string();
        worksheet.write_string(row, 0, &date)?;
        worksheet.write_string(row, 1, &item.name)?;
        worksheet.write_number(row, 2, item.total_price as f64)?;
        worksheet.write_number(row, 3, item.deposit as f64)?;
        worksheet.write_number(row, 4, item.payment1 as f64)?;
        worksheet.write_number(row, 5, item.payment2 as f64)?;
        worksheet.write_string(row, 6, mark(item.canceled))?;
        worksheet.write_string(row, 7, mark(item.refunded))?;
        worksheet.write_number(row, 8, amounts.actual_spend as f64)?;
        worksheet.write_number(row, 9, amounts.balance as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Parses workbook bytes produced by [`encode`] or an equivalent spreadsheet.
///
/// A header that differs from [`COLUMNS`] yields [`LedgerError::SchemaMismatch`];
/// every other defect yields [`LedgerError::StorageRead`].
pub fn decode(bytes: &[u8]) -> Result<LoadReport> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|err| LedgerError::read("not a readable workbook", err))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LedgerError::StorageRead("workbook has no sheets".into()))??;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| LedgerError::SchemaMismatch("missing header row".into()))?;
    check_header(header)?;

    let mut items = Vec::new();
    let mut warnings = Vec::new();
    for (index, row) in rows.enumerate() {
        // Header occupies spreadsheet row 1.
        let line = index + 2;
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let item = parse_row(row, line)?;
        let amounts = item.amounts();
        let stored_spend = integer_cell(row, 8, line)?;
        let stored_balance = integer_cell(row, 9, line)?;
        if stored_spend != as_cell_value(amounts.actual_spend)
            || stored_balance != as_cell_value(amounts.balance)
        {
            let message = format!(
                "row {line} ({}): stored amounts {stored_spend}/{stored_balance} recomputed as {}/{}",
                item.name, amounts.actual_spend, amounts.balance
            );
            warn!(row = line, item = %item.name, "derived columns out of date");
            warnings.push(message);
        }
        items.push(item);
    }

    let ledger = Ledger::from_items(items).map_err(|err| match err {
        LedgerError::Validation(message) => LedgerError::StorageRead(message),
        other => other,
    })?;
    Ok(LoadReport { ledger, warnings })
}

/// What a derived amount reads back as once it went through an `f64` cell.
fn as_cell_value(value: i64) -> i64 {
    value as f64 as i64
}

fn check_header(header: &[Data]) -> Result<()> {
    let found: Vec<String> = header.iter().map(cell_text).collect();
    let matches = found.len() == COLUMNS.len()
        && found
            .iter()
            .zip(COLUMNS.iter())
            .all(|(found, expected)| found == expected);
    if matches {
        Ok(())
    } else {
        Err(LedgerError::SchemaMismatch(format!(
            "expected columns [{}], found [{}]",
            COLUMNS.join(", "),
            found.join(", ")
        )))
    }
}

fn parse_row(row: &[Data], line: usize) -> Result<Item> {
    let name = cell_text(cell(row, 1));
    if name.is_empty() {
        return Err(LedgerError::StorageRead(format!("row {line}: empty item name")));
    }
    let item = Item {
        date: date_cell(row, 0, line)?,
        name,
        total_price: amount_cell(row, 2, line)?,
        deposit: amount_cell(row, 3, line)?,
        payment1: amount_cell(row, 4, line)?,
        payment2: amount_cell(row, 5, line)?,
        canceled: flag_cell(row, 6, line)?,
        refunded: flag_cell(row, 7, line)?,
    };
    Ok(item)
}

fn cell(row: &[Data], col: usize) -> &Data {
    row.get(col).unwrap_or(&Data::Empty)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) if value.fract() == 0.0 => format!("{}", *value as i64),
        other => other.to_string().trim().to_string(),
    }
}

fn date_cell(row: &[Data], col: usize, line: usize) -> Result<NaiveDate> {
    let value = cell(row, col);
    if let Data::String(text) = value {
        return NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
            .map_err(|err| LedgerError::read(format!("row {line}: invalid date `{text}`"), err));
    }
    value.as_date().ok_or_else(|| {
        LedgerError::StorageRead(format!("row {line}: invalid date `{}`", cell_text(value)))
    })
}

fn integer_cell(row: &[Data], col: usize, line: usize) -> Result<i64> {
    let column = COLUMNS[col];
    match cell(row, col) {
        Data::Int(value) => Ok(*value),
        Data::Float(value) if value.is_finite() && value.fract() == 0.0 => Ok(*value as i64),
        Data::String(text) => text.trim().replace(',', "").parse::<i64>().map_err(|err| {
            LedgerError::read(format!("row {line}: {column} `{text}` is not an integer"), err)
        }),
        other => Err(LedgerError::StorageRead(format!(
            "row {line}: {column} `{}` is not an integer",
            cell_text(other)
        ))),
    }
}

fn amount_cell(row: &[Data], col: usize, line: usize) -> Result<i64> {
    let value = integer_cell(row, col, line)?;
    if value < 0 {
        return Err(LedgerError::StorageRead(format!(
            "row {line}: {} must not be negative (got {value})",
            COLUMNS[col]
        )));
    }
    if value > MAX_AMOUNT {
        return Err(LedgerError::StorageRead(format!(
            "row {line}: {} exceeds {MAX_AMOUNT} (got {value})",
            COLUMNS[col]
        )));
    }
    Ok(value)
}

fn flag_cell(row: &[Data], col: usize, line: usize) -> Result<bool> {
    match cell(row, col) {
        Data::Bool(flag) => Ok(*flag),
        other => match cell_text(other).as_str() {
            MARK_YES => Ok(true),
            MARK_NO => Ok(false),
            text => Err(LedgerError::StorageRead(format!(
                "row {line}: {} must be `{MARK_YES}` or `{MARK_NO}` (got `{text}`)",
                COLUMNS[col]
            ))),
        },
    }
}
