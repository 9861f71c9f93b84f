//! Grocery lists and their line items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::Item;

/// One line of a grocery list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: i64,
    pub grocery_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub purchased: bool,
    pub created_at: String,
    /// Catalog snapshot embedded by the backend, used for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

impl GroceryItem {
    /// Name of the embedded catalog item, if the backend sent one.
    pub fn item_name(&self) -> Option<&str> {
        self.item.as_ref().map(|item| item.name.as_str())
    }
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.purchased { "[x]" } else { "[ ]" };
        let name = match self.item_name() {
            Some(name) => name.to_string(),
            None => format!("item #{}", self.item_id),
        };
        write!(f, "{} {:>3} x {:<25} (#{})", check, self.quantity, name, self.id)
    }
}

/// A planned grocery list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grocery {
    pub id: i64,
    pub family_id: i64,
    pub grocery_date: NaiveDate,
    pub created_at: String,
    #[serde(default)]
    pub grocery_items: Vec<GroceryItem>,
}

impl Grocery {
    pub fn find_item(&self, grocery_item_id: i64) -> Option<&GroceryItem> {
        self.grocery_items.iter().find(|gi| gi.id == grocery_item_id)
    }

    /// Appends an item, assigning a new sequence.
    pub fn push_item(&mut self, created: GroceryItem) {
        let mut items = Vec::with_capacity(self.grocery_items.len() + 1);
        items.extend(self.grocery_items.iter().cloned());
        items.push(created);
        self.grocery_items = items;
    }

    /// Replaces the item with the same id as `updated`, assigning a new sequence.
    pub fn replace_item(&mut self, updated: GroceryItem) {
        self.grocery_items = self
            .grocery_items
            .iter()
            .map(|gi| {
                if gi.id == updated.id {
                    updated.clone()
                } else {
                    gi.clone()
                }
            })
            .collect();
    }

    /// Drops the item with the given id, assigning a new sequence.
    pub fn remove_item(&mut self, grocery_item_id: i64) {
        self.grocery_items = self
            .grocery_items
            .iter()
            .filter(|gi| gi.id != grocery_item_id)
            .cloned()
            .collect();
    }

    pub fn purchased_count(&self) -> usize {
        self.grocery_items.iter().filter(|gi| gi.purchased).count()
    }
}

impl fmt::Display for Grocery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("Grocery list #{} - {}", self.id, self.grocery_date);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f, "Family: {}", self.family_id)?;
        writeln!(
            f,
            "Purchased: {}/{}",
            self.purchased_count(),
            self.grocery_items.len()
        )?;

        if self.grocery_items.is_empty() {
            writeln!(f, "\nNo items.")?;
        } else {
            writeln!(f)?;
            for item in &self.grocery_items {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}

/// Catalog entries not already on the grocery list, in catalog order.
pub fn available_items(catalog: &[Item], grocery: &Grocery) -> Vec<Item> {
    let present: HashSet<i64> = grocery.grocery_items.iter().map(|gi| gi.item_id).collect();
    catalog
        .iter()
        .filter(|item| !present.contains(&item.id))
        .cloned()
        .collect()
}
