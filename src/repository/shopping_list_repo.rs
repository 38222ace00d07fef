//! Shopping List Repository Implementation
//!
//! SQLite-backed implementation of CompletableRepository<ShoppingList>.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{timestamp_now, DomainError, DomainResult, ShoppingList};
use super::db::SharedConnection;
use super::traits::{CompletableRepository, Repository};

/// SQLite implementation of ShoppingList repository
pub struct ShoppingListRepository {
    conn: SharedConnection,
}

impl ShoppingListRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<ShoppingList> for ShoppingListRepository {
    async fn create(&self, entity: &ShoppingList) -> DomainResult<ShoppingList> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let menu_ids = serde_json::to_string(&entity.menu_ids)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let created_at = timestamp_now();

        conn.execute(
            "INSERT INTO shopping_lists (name, created_at, menu_ids, completed) VALUES (?, ?, ?, ?)",
            params![entity.name, created_at, menu_ids, if entity.completed { 1 } else { 0 }],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;

        let mut list = entity.clone();
        list.id = id;
        list.created_at = created_at;
        Ok(list)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<ShoppingList>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn.prepare("SELECT id, name, created_at, menu_ids, completed FROM shopping_lists WHERE id = ?")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt.query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let found = match rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
            Some(row) => Some(row_to_shopping_list(row)?),
            None => None,
        };
        Ok(found)
    }

    async fn list(&self) -> DomainResult<Vec<ShoppingList>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT id, name, created_at, menu_ids, completed FROM shopping_lists ORDER BY created_at ASC, id ASC",
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt.query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut lists = Vec::new();
        while let Some(row) = rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
            lists.push(row_to_shopping_list(row)?);
        }
        Ok(lists)
    }
}

#[async_trait]
impl CompletableRepository<ShoppingList> for ShoppingListRepository {
    async fn set_completed(&self, id: u32, completed: bool) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn.execute(
            "UPDATE shopping_lists SET completed = ? WHERE id = ?",
            params![if completed { 1 } else { 0 }, id],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            log::debug!("set_completed: shopping list {} not found, ignoring", id);
        }
        Ok(())
    }
}

/// Convert a database row to ShoppingList
fn row_to_shopping_list(row: &rusqlite::Row) -> DomainResult<ShoppingList> {
    let menu_ids: String = row.get(3).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))?;
    let menu_ids: Vec<u32> = serde_json::from_str(&menu_ids)
        .map_err(|e| DomainError::Internal(format!("corrupt menu_ids column: {}", e)))?;

    Ok(ShoppingList {
        id: row.get(0).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))?,
        name: row.get(1).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))?,
        created_at: row.get(2).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))?,
        menu_ids,
        completed: row.get::<_, i32>(4).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))? != 0,
    })
}
