//! Menu Repository Implementation
//!
//! SQLite-backed implementation of Repository<Menu>. Items are stored as a
//! JSON array in the `items` column.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{timestamp_now, DomainError, DomainResult, Item, Menu};
use super::db::SharedConnection;
use super::traits::Repository;

/// SQLite implementation of Menu repository
pub struct MenuRepository {
    conn: SharedConnection,
}

impl MenuRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Menu> for MenuRepository {
    async fn create(&self, entity: &Menu) -> DomainResult<Menu> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let items = serde_json::to_string(&entity.items)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let created_at = timestamp_now();

        conn.execute(
            "INSERT INTO menus (name, created_at, items) VALUES (?, ?, ?)",
            params![entity.name, created_at, items],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;

        let mut menu = entity.clone();
        menu.id = id;
        menu.created_at = created_at;
        Ok(menu)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Menu>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn.prepare("SELECT id, name, created_at, items FROM menus WHERE id = ?")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt.query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let found = match rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
            Some(row) => Some(row_to_menu(row)?),
            None => None,
        };
        Ok(found)
    }

    async fn list(&self) -> DomainResult<Vec<Menu>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn.prepare("SELECT id, name, created_at, items FROM menus ORDER BY created_at ASC, id ASC")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt.query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut menus = Vec::new();
        while let Some(row) = rows.next().map_err(|e| DomainError::Internal(e.to_string()))? {
            menus.push(row_to_menu(row)?);
        }
        Ok(menus)
    }
}

/// Convert a database row to Menu
fn row_to_menu(row: &rusqlite::Row) -> DomainResult<Menu> {
    let items: String = row.get(3).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))?;
    let items: Vec<Item> = serde_json::from_str(&items)
        .map_err(|e| DomainError::Internal(format!("corrupt items column: {}", e)))?;

    Ok(Menu {
        id: row.get(0).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))?,
        name: row.get(1).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))?,
        created_at: row.get(2).map_err(|e: rusqlite::Error| DomainError::Internal(e.to_string()))?,
        items,
    })
}
