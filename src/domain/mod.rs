//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde, chrono and log).

mod entity;
mod item;
mod menu;
mod shopping_list;
mod catalog;

pub use entity::{Entity, DomainError, DomainResult, timestamp_now};
pub use item::{Item, Unit, validate_quantity};
pub use menu::{Menu, MenuDraft, DraftPreview};
pub use shopping_list::{is_valid_name_format, ShoppingList, ShoppingListSummary, DEFAULT_LIST_NAME_FORMAT};
pub use catalog::{Catalog, CatalogEntry, Category};
