//! Store Handle
//!
//! Bundles the two repositories the workflow needs so they can be injected
//! as one value.

use std::sync::Arc;

use crate::domain::{Menu, ShoppingList};
use super::db::DbState;
use super::menu_repo::MenuRepository;
use super::shopping_list_repo::ShoppingListRepository;
use super::traits::{CompletableRepository, Repository};

#[derive(Clone)]
pub struct Store {
    pub menus: Arc<dyn Repository<Menu>>,
    pub shopping_lists: Arc<dyn CompletableRepository<ShoppingList>>,
}

impl Store {
    pub fn new(
        menus: Arc<dyn Repository<Menu>>,
        shopping_lists: Arc<dyn CompletableRepository<ShoppingList>>,
    ) -> Self {
        Self { menus, shopping_lists }
    }

    /// SQLite repositories sharing the connection of `db_state`
    pub fn sqlite(db_state: &DbState) -> Self {
        Self {
            menus: Arc::new(MenuRepository::new(db_state.shared())),
            shopping_lists: Arc::new(ShoppingListRepository::new(db_state.shared())),
        }
    }
}
