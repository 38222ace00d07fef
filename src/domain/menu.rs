//! Menu Entity and Menu Drafts
//!
//! A `MenuDraft` is the unsaved, editable list of items for one slot of the
//! workflow. Confirming a shopping list snapshots each draft into a `Menu`.

use serde::{Deserialize, Serialize};
use super::catalog::CatalogEntry;
use super::entity::{timestamp_now, DomainError, DomainResult, Entity};
use super::item::{validate_quantity, Item};

/// A persisted menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    /// Assigned by the store on first save (0 before that)
    pub id: u32,
    pub name: String,
    /// RFC 3339, set at save time
    pub created_at: String,
    pub items: Vec<Item>,
}

impl Menu {
    /// Create an unsaved menu stamped with the current time
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            created_at: timestamp_now(),
            items,
        }
    }

    /// Default menu name for a workflow slot
    pub fn slot_name(slot: usize) -> String {
        format!("Menu {}", slot)
    }
}

impl Entity for Menu {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Items previewed for a slot on the overview screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftPreview {
    pub items: Vec<Item>,
    /// How many items did not fit in the preview
    pub more: usize,
}

/// In-progress menu for one workflow slot
///
/// Items keep insertion order and are unique by catalog id. The editing
/// operations (`add_item`, `remove_item`, `update_quantity`, `toggle_unit`)
/// are what an item editor runs on its working copy before submitting it
/// with a save intent; `from_items` replays a submitted list through the
/// same insertion path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDraft {
    pub menu_number: usize,
    items: Vec<Item>,
}

impl MenuDraft {
    pub fn new(menu_number: usize) -> Self {
        Self {
            menu_number,
            items: Vec::new(),
        }
    }

    /// Build a draft from a full item list, as submitted by a save intent.
    ///
    /// Every item is validated before anything is kept. A repeated id is
    /// folded into its first entry, adding its quantity.
    pub fn from_items(menu_number: usize, items: Vec<Item>) -> DomainResult<Self> {
        for item in &items {
            item.validate()?;
        }
        let mut draft = Self::new(menu_number);
        for item in items {
            draft.insert(item);
        }
        Ok(draft)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A slot is complete once its draft holds at least one item
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty()
    }

    /// Add one of a catalog item. Re-adding an id bumps its quantity by 1.
    pub fn add_item(&mut self, entry: &CatalogEntry) -> &Item {
        let idx = self.insert(entry.to_item());
        &self.items[idx]
    }

    /// Remove an item, returning it if it was present
    pub fn remove_item(&mut self, item_id: &str) -> Option<Item> {
        self.position(item_id).map(|idx| self.items.remove(idx))
    }

    /// Set an item's quantity. Invalid quantities are rejected and the draft is left as is.
    pub fn update_quantity(&mut self, item_id: &str, quantity: f64) -> DomainResult<()> {
        let idx = self.require_position(item_id)?;
        validate_quantity(item_id, quantity, self.items[idx].unit)?;
        self.items[idx].quantity = quantity;
        Ok(())
    }

    /// Flip an item between Kg and Un. A fractional weight cannot become a count.
    pub fn toggle_unit(&mut self, item_id: &str) -> DomainResult<()> {
        let idx = self.require_position(item_id)?;
        let unit = self.items[idx].unit.toggled();
        validate_quantity(item_id, self.items[idx].quantity, unit)?;
        self.items[idx].unit = unit;
        Ok(())
    }

    pub fn preview(&self, limit: usize) -> DraftPreview {
        let shown = self.items.len().min(limit);
        DraftPreview {
            items: self.items[..shown].to_vec(),
            more: self.items.len() - shown,
        }
    }

    /// Append `item`, or add its quantity to the entry with the same id
    fn insert(&mut self, item: Item) -> usize {
        match self.position(&item.id) {
            Some(idx) => {
                self.items[idx].quantity += item.quantity;
                idx
            }
            None => {
                self.items.push(item);
                self.items.len() - 1
            }
        }
    }

    fn position(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }

    fn require_position(&self, item_id: &str) -> DomainResult<usize> {
        self.position(item_id)
            .ok_or_else(|| DomainError::NotFound(format!("item '{}' not in menu {}", item_id, self.menu_number)))
    }
}
