//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod menu_repo;
mod shopping_list_repo;
mod store;

#[cfg(test)]
mod tests;

pub use traits::{Repository, CompletableRepository};
pub use db::{init_db, schema_version, DbState, SharedConnection, SCHEMA_VERSION};
pub use menu_repo::MenuRepository;
pub use shopping_list_repo::ShoppingListRepository;
pub use store::Store;
