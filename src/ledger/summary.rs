use super::ledger::Ledger;

/// Portion of the total spend attributed to a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemShare {
    pub name: String,
    pub actual_spend: i64,
    /// Percentage of the ledger's total spend, `0.0` when nothing was spent.
    pub percent: f64,
}

/// Read-only aggregates shown next to the item table.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub total_spend: i64,
    pub total_balance: i64,
    pub shares: Vec<ItemShare>,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let total_spend = ledger.total_actual_spend();
        let shares = ledger
            .iter()
            .map(|item| {
                let actual_spend = item.actual_spend();
                ItemShare {
                    name: item.name.clone(),
                    actual_spend,
                    percent: share_percent(actual_spend, total_spend),
                }
            })
            .collect();
        Self {
            total_spend,
            total_balance: ledger.total_balance(),
            shares,
        }
    }
}

fn share_percent(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
