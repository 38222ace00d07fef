//! Item Catalog
//!
//! Static lookup of purchasable items grouped by category. Read-only.

use serde::{Deserialize, Serialize};
use super::item::{Item, Unit};

/// One purchasable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: Unit,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>, unit: Unit) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            unit,
        }
    }

    /// A fresh item with quantity 1
    pub fn to_item(&self) -> Item {
        Item::new(self.id.clone(), self.name.clone(), self.category.clone(), self.unit)
    }
}

/// A named group of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub items: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

const BUILTIN: &[(&str, &str, &[(&str, &str, Unit)])] = &[
    ("fruits", "Fruits", &[
        ("apple", "Apple", Unit::Weight),
        ("banana", "Banana", Unit::Weight),
        ("orange", "Orange", Unit::Weight),
        ("pineapple", "Pineapple", Unit::Weight),
        ("cherries", "Cherries", Unit::Weight),
        ("peaches", "Peaches", Unit::Weight),
        ("blueberries", "Blueberries", Unit::Weight),
        ("mangoes", "Mangoes", Unit::Weight),
    ]),
    ("vegetables", "Vegetables", &[
        ("spinach", "Spinach", Unit::Weight),
        ("broccoli", "Broccoli", Unit::Weight),
        ("carrots", "Carrots", Unit::Weight),
        ("avocado", "Avocado", Unit::Weight),
        ("sweetpotato", "Sweet Potato", Unit::Weight),
    ]),
    ("protein", "Protein", &[
        ("chicken", "Chicken", Unit::Count),
        ("beef", "Beef", Unit::Count),
        ("fish", "Fish", Unit::Count),
        ("eggs", "Eggs", Unit::Count),
        ("proteinbar", "Protein Bar", Unit::Count),
    ]),
];

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The catalog the app ships with
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(id, name, items)| Category {
                id: id.to_string(),
                name: name.to_string(),
                items: items
                    .iter()
                    .map(|(item_id, item_name, unit)| CatalogEntry::new(*item_id, *item_name, *id, *unit))
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Entries of one category, empty for an unknown key
    pub fn lookup(&self, category: &str) -> Vec<CatalogEntry> {
        self.categories
            .iter()
            .find(|c| c.id == category)
            .map(|c| c.items.clone())
            .unwrap_or_default()
    }

    /// Case-insensitive substring match on display names across all categories
    pub fn search(&self, term: &str) -> Vec<CatalogEntry> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn find(&self, item_id: &str) -> Option<&CatalogEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|entry| entry.id == item_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_category() {
        let catalog = Catalog::builtin();
        let fruits = catalog.lookup("fruits");
        assert_eq!(fruits.len(), 8);
        assert!(fruits.iter().all(|e| e.category == "fruits" && e.unit == Unit::Weight));
        assert!(catalog.lookup("sweets").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let hits = catalog.search("PRO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "proteinbar");
        assert_eq!(hits[0].category, "protein");

        let berries = catalog.search("berr");
        assert_eq!(berries.len(), 1);
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_find_and_to_item() {
        let catalog = Catalog::default();
        let eggs = catalog.find("eggs").unwrap().to_item();
        assert_eq!(eggs.quantity, 1.0);
        assert_eq!(eggs.unit, Unit::Count);
        assert!(catalog.find("tofu").is_none());
    }
}
