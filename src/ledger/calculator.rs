/// Figures derived from an item's payments and contract status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Amounts {
    /// Money actually paid out, net of a refunded deposit.
    pub actual_spend: i64,
    /// What is still owed against the contracted total. Negative when
    /// payments exceed the total.
    pub balance: i64,
}

impl From<Amounts> for (i64, i64) {
    fn from(amounts: Amounts) -> Self {
        (amounts.actual_spend, amounts.balance)
    }
}

/// Derives `actual_spend` and `balance` from the raw fields of an item.
///
/// A refunded deposit only leaves the spend when the contract is canceled;
/// the balance never looks at either flag. Sums saturate at the `i64` range
/// instead of overflowing; validated items never get near it.
pub fn calculate(
    total_price: i64,
    deposit: i64,
    payment1: i64,
    payment2: i64,
    canceled: bool,
    refunded: bool,
) -> Amounts {
    let installments = payment1.saturating_add(payment2);
    let paid = deposit.saturating_add(installments);
    let actual_spend = if canceled && refunded {
        installments
    } else {
        paid
    };
    Amounts {
        actual_spend,
        balance: total_price.saturating_sub(paid),
    }
}
