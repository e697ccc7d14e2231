//! Display helpers for whole-unit amounts.

const GROUPING_SEPARATOR: char = ',';

/// Groups digits in threes, e.g. `-1234567` becomes `-1,234,567`.
pub fn format_number(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string(), GROUPING_SEPARATOR);
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats an amount followed by its unit label, e.g. `9,000,000 원`.
pub fn format_amount(value: i64, label: &str) -> String {
    if label.is_empty() {
        format_number(value)
    } else {
        format!("{} {}", format_number(value), label)
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
