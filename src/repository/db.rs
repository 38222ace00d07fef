//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Schema version written to `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

/// Shared connection handle used by every repository
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    pub db_path: PathBuf,
}

impl DbState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            db_path,
        }
    }

    /// Handle for constructing repositories
    pub fn shared(&self) -> SharedConnection {
        self.conn.clone()
    }

    pub async fn is_initialized(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Drop the connection; repositories fail with "not initialized" afterwards
    pub async fn close(&self) {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.take() {
            if let Err((_, e)) = conn.close() {
                log::warn!("Closing database {} failed: {}", self.db_path.display(), e);
            }
        }
    }
}

/// Open (or create) the database at `db_path` and bring its schema up to date.
///
/// `:memory:` opens a private in-memory database.
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let in_memory = db_path.as_os_str() == ":memory:";
    if !in_memory {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }

    let conn = if in_memory {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    run_migrations(&conn)?;

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);
    log::info!("Database ready at {} (schema v{})", db_path.display(), SCHEMA_VERSION);

    Ok(state)
}

/// Read `PRAGMA user_version`
pub fn schema_version(conn: &Connection) -> Result<i64, String> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| format!("Failed to read schema version: {}", e))
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    let version = schema_version(conn)?;
    if version > SCHEMA_VERSION {
        return Err(format!(
            "Database schema v{} is newer than supported v{}",
            version, SCHEMA_VERSION
        ));
    }

    // v1: menus and shopping lists, each indexed by creation time
    if version < 1 {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS menus (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                items TEXT NOT NULL DEFAULT '[]'
            );
            CREATE INDEX IF NOT EXISTS idx_menus_created ON menus(created_at);
            CREATE TABLE IF NOT EXISTS shopping_lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                menu_ids TEXT NOT NULL DEFAULT '[]',
                completed INTEGER NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS idx_shopping_lists_created ON shopping_lists(created_at);",
        )
        .map_err(|e| format!("Migration to v1 failed: {}", e))?;
        log::info!("Migrated database schema v{} -> v1", version);
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)
        .map_err(|e| format!("Failed to write schema version: {}", e))?;

    Ok(())
}
