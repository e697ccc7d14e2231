use super::item::Item;
use crate::errors::{LedgerError, Result};

/// Result of placing an item into the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Ordered collection of items with unique names.
///
/// Row order is insertion order; replacing an item keeps its row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    items: Vec<Item>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from rows, rejecting the first duplicated name.
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        let mut ledger = Self::new();
        for item in items {
            if ledger.position(&item.name).is_some() {
                return Err(LedgerError::Validation(format!(
                    "duplicate item name `{}`",
                    item.name
                )));
            }
            ledger.items.push(item);
        }
        Ok(ledger)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Replaces the row carrying `item.name` in place, or appends a new row.
    pub fn upsert(&mut self, item: Item) -> UpsertOutcome {
        match self.position(&item.name) {
            Some(index) => {
                self.items[index] = item;
                UpsertOutcome::Replaced
            }
            None => {
                self.items.push(item);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Drops every row named `name` and returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        before - self.items.len()
    }

    pub fn total_actual_spend(&self) -> i64 {
        self.items
            .iter()
            .map(Item::actual_spend)
            .fold(0, i64::saturating_add)
    }

    pub fn total_balance(&self) -> i64 {
        self.items
            .iter()
            .map(Item::balance)
            .fold(0, i64::saturating_add)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
