//! Shopping List Entity
//!
//! A named, ordered reference to the menus saved together in one confirm.

use std::fmt::Write;

use chrono::format::{Item as FormatItem, StrftimeItems};
use serde::{Deserialize, Serialize};
use super::entity::{timestamp_now, Entity};

/// chrono format of the default list name (day/month/year)
pub const DEFAULT_LIST_NAME_FORMAT: &str = "%d/%m/%Y";

/// True when every specifier in `format` is one chrono knows
pub fn is_valid_name_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| item == FormatItem::Error)
}

/// A persisted shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    /// Assigned by the store on creation (0 before that)
    pub id: u32,
    /// Defaults to the save date
    pub name: String,
    /// RFC 3339
    pub created_at: String,
    /// Soft references to menus, in slot order
    pub menu_ids: Vec<u32>,
    #[serde(default)]
    pub completed: bool,
}

impl ShoppingList {
    pub fn new(name: impl Into<String>, menu_ids: Vec<u32>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            created_at: timestamp_now(),
            menu_ids,
            completed: false,
        }
    }

    /// Name used when none is given: today's date in the given chrono format.
    /// A format chrono cannot render falls back to `DEFAULT_LIST_NAME_FORMAT`.
    pub fn default_name(format: &str) -> String {
        let now = chrono::Local::now();
        let mut name = String::new();
        if !is_valid_name_format(format) || write!(name, "{}", now.format(format)).is_err() {
            log::warn!("Invalid list name format '{}', using '{}'", format, DEFAULT_LIST_NAME_FORMAT);
            name = now.format(DEFAULT_LIST_NAME_FORMAT).to_string();
        }
        name
    }
}

impl Entity for ShoppingList {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// History row shown for a saved list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListSummary {
    pub id: u32,
    pub name: String,
    pub created_at: String,
    pub menu_count: usize,
    pub completed: bool,
}

impl From<&ShoppingList> for ShoppingListSummary {
    fn from(list: &ShoppingList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            created_at: list.created_at.clone(),
            menu_count: list.menu_ids.len(),
            completed: list.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopping_list_creation() {
        let list = ShoppingList::new("19/10/2026", vec![4, 5]);
        assert_eq!(list.id(), 0);
        assert!(!list.completed);
        assert_eq!(ShoppingListSummary::from(&list).menu_count, 2);
    }

    #[test]
    fn test_record_shape() {
        let list = ShoppingList::new("Weekly", vec![1]);
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.get("menuIds").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn test_default_name_uses_format() {
        let name = ShoppingList::default_name("%Y");
        assert_eq!(name.len(), 4);
        assert!(name.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_invalid_format_falls_back() {
        assert!(is_valid_name_format("%d/%m/%Y"));
        assert!(is_valid_name_format("Groceries %A"));
        assert!(!is_valid_name_format("%Q"));

        let name = ShoppingList::default_name("%Q");
        assert_eq!(name, chrono::Local::now().format(DEFAULT_LIST_NAME_FORMAT).to_string());
    }
}
