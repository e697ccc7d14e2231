mod common;

use common::{file_store, item, today};
use tempfile::tempdir;
use wedding_budget::{ledger::MAX_AMOUNT, LedgerError, PaymentUpdate};

#[test]
fn scenario_hall_lifecycle() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);

    // A: freshly contracted hall.
    store
        .upsert(item("Hall", 10_000_000, 1_000_000, (0, 0), (false, false)))
        .expect("register hall");
    let hall = store.find("Hall").unwrap();
    assert_eq!(hall.actual_spend(), 1_000_000);
    assert_eq!(hall.balance(), 9_000_000);

    // B: first installment paid, then the contract is canceled.
    store
        .upsert(item("Hall", 10_000_000, 1_000_000, (2_000_000, 0), (true, false)))
        .expect("cancel hall");
    let hall = store.find("Hall").unwrap();
    assert_eq!(hall.actual_spend(), 3_000_000);
    assert_eq!(hall.balance(), 7_000_000);

    // C: deposit refunded.
    store
        .upsert(item("Hall", 10_000_000, 1_000_000, (2_000_000, 0), (true, true)))
        .expect("refund hall");
    let hall = store.find("Hall").unwrap();
    assert_eq!(hall.actual_spend(), 2_000_000);
    assert_eq!(hall.balance(), 7_000_000);
    assert_eq!(store.ledger().len(), 1);

    // D: deleted and gone after reload.
    store.delete("Hall").expect("delete hall");
    let mut reopened = file_store(&temp);
    let ledger = reopened.load().expect("reload");
    assert!(ledger.get("Hall").is_none());
}

#[test]
fn scenario_totals_over_items() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);
    store
        .upsert(item("Hall", 5_000_000, 1_000_000, (0, 0), (false, false)))
        .unwrap();
    store
        .upsert(item("Studio", 4_000_000, 500_000, (1_500_000, 0), (false, false)))
        .unwrap();

    let summary = store.summary();
    assert_eq!(summary.total_spend, 3_000_000);
    assert_eq!(summary.total_balance, 4_000_000 + 2_000_000);
    assert_eq!(summary.shares.len(), 2);
}

#[test]
fn upsert_twice_matches_upsert_once() {
    let temp_once = tempdir().unwrap();
    let temp_twice = tempdir().unwrap();
    let dress = item("Dress", 2_500_000, 300_000, (700_000, 100_000), (false, true));

    let mut once = file_store(&temp_once);
    once.upsert(dress.clone()).unwrap();

    let mut twice = file_store(&temp_twice);
    twice.upsert(dress.clone()).unwrap();
    twice.upsert(dress).unwrap();

    assert_eq!(once.ledger(), twice.ledger());
}

#[test]
fn upsert_then_load_reproduces_rows() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);
    store
        .upsert(item("Hall", 10_000_000, 1_000_000, (2_000_000, 0), (true, false)))
        .unwrap();
    store
        .upsert(item("Flowers", 800_000, 0, (900_000, 0), (false, false)))
        .unwrap();
    store
        .upsert(item("Band", 1_200_000, 200_000, (0, 0), (true, true)))
        .unwrap();

    let mut reopened = file_store(&temp);
    reopened.load().expect("reload");
    assert_eq!(reopened.ledger(), store.ledger());
    assert!(reopened.warnings().is_empty());

    let flowers = reopened.find("Flowers").unwrap();
    assert_eq!(flowers.balance(), -100_000);
    assert_eq!(flowers.date, today());
}

#[test]
fn update_keeps_row_position() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);
    store.register("Hall", 10, 1).unwrap();
    store.register("Studio", 10, 1).unwrap();
    store.register("Rings", 10, 1).unwrap();
    store
        .record_payments(
            "Studio",
            PaymentUpdate {
                payment1: 3,
                ..PaymentUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(store.item_names(), vec!["Hall", "Studio", "Rings"]);
    let studio = store.find("Studio").unwrap();
    assert_eq!((studio.total_price, studio.deposit, studio.payment1), (10, 1, 3));
}

#[test]
fn names_stay_unique_across_upserts() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);
    for round in 0..3 {
        for name in ["Hall", "Studio", "Hall", "Makeup", "Studio"] {
            store
                .upsert(item(name, 1_000 * (round + 1), 100, (0, 0), (false, false)))
                .unwrap();
        }
    }
    let mut names = store.item_names();
    let count = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), count);
    assert_eq!(count, 3);
}

#[test]
fn deleting_unknown_name_changes_nothing() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);
    store.register("Hall", 10_000_000, 1_000_000).unwrap();
    let before = store.ledger().clone();
    let bytes_before = std::fs::read(common::ledger_path(&temp)).unwrap();

    store.delete("Honeymoon").expect("no-op delete");

    assert_eq!(store.ledger(), &before);
    assert_eq!(std::fs::read(common::ledger_path(&temp)).unwrap(), bytes_before);
}

#[test]
fn invalid_input_is_rejected_before_writing() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);

    let err = store.register("", 1_000, 0).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let err = store
        .upsert(item("Hall", -1, 0, (0, 0), (false, false)))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    assert!(store.ledger().is_empty());
    assert!(!common::ledger_path(&temp).exists());
}

#[test]
fn overflowing_amounts_are_rejected_without_writing() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);

    let err = store
        .upsert(item("Big", 0, i64::MAX, (1, 0), (false, false)))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let err = store
        .upsert(item("Big", MAX_AMOUNT + 1, 0, (0, 0), (false, false)))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    assert!(store.ledger().is_empty());
    assert!(!common::ledger_path(&temp).exists());
}

#[test]
fn largest_amounts_survive_reload_exactly() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);
    store
        .upsert(item(
            "Estate",
            MAX_AMOUNT,
            MAX_AMOUNT,
            (MAX_AMOUNT, MAX_AMOUNT),
            (true, true),
        ))
        .unwrap();
    store
        .upsert(item("Odd", MAX_AMOUNT - 2, 1, (0, 0), (false, false)))
        .unwrap();

    let mut reopened = file_store(&temp);
    reopened.load().expect("reload");
    assert_eq!(reopened.ledger(), store.ledger());
    assert!(reopened.warnings().is_empty());
    assert_eq!(reopened.find("Odd").unwrap().total_price, MAX_AMOUNT - 2);
}

#[test]
fn padded_names_address_the_trimmed_item() {
    let temp = tempdir().unwrap();
    let mut store = file_store(&temp);
    store.register(" Hall ", 1, 0).unwrap();
    assert!(store.find(" Hall ").is_some());

    store.delete(" Hall ").expect("delete padded name");
    assert!(store.item_names().is_empty());

    let mut reopened = file_store(&temp);
    assert!(reopened.load().expect("reload").is_empty());
}
