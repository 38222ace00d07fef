//! Repository Integration Tests
//!
//! Tests for the menu and shopping list repositories with in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::domain::{Item, Menu, ShoppingList, Unit};
    use crate::repository::{
        init_db, schema_version, CompletableRepository, DbState, MenuRepository, Repository,
        ShoppingListRepository, SCHEMA_VERSION,
    };
    use std::path::PathBuf;

    async fn setup_test_db() -> DbState {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        init_db(&db_path).await.expect("Failed to init test DB")
    }

    fn apple(quantity: f64) -> Item {
        Item::new("apple", "Apple", "fruits", Unit::Weight).with_quantity(quantity)
    }

    #[tokio::test]
    async fn test_create_menu() {
        let db = setup_test_db().await;
        let repo = MenuRepository::new(db.shared());

        let menu = Menu::new("Menu 1", vec![apple(2.0)]);
        let created = repo.create(&menu).await.expect("Failed to create");

        assert!(created.id > 0);
        assert_eq!(created.name, "Menu 1");
        assert_eq!(created.items, vec![apple(2.0)]);
    }

    #[tokio::test]
    async fn test_menu_ids_strictly_increase() {
        let db = setup_test_db().await;
        let repo = MenuRepository::new(db.shared());

        let first = repo.create(&Menu::new("Menu 1", vec![])).await.unwrap();
        let second = repo.create(&Menu::new("Menu 2", vec![])).await.unwrap();
        let third = repo.create(&Menu::new("Menu 3", vec![])).await.unwrap();

        assert!(first.id < second.id);
        assert!(second.id < third.id);
    }

    #[tokio::test]
    async fn test_find_menu_by_id() {
        let db = setup_test_db().await;
        let repo = MenuRepository::new(db.shared());

        let created = repo.create(&Menu::new("Find me", vec![apple(1.5)])).await.unwrap();

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert_eq!(found, Some(created));

        let missing = repo.find_by_id(999).await.expect("Find failed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_menus_in_creation_order() {
        let db = setup_test_db().await;
        let repo = MenuRepository::new(db.shared());

        repo.create(&Menu::new("Menu 1", vec![])).await.unwrap();
        repo.create(&Menu::new("Menu 2", vec![])).await.unwrap();

        let menus = repo.list().await.expect("List failed");
        let names: Vec<&str> = menus.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Menu 1", "Menu 2"]);
        assert!(menus[0].created_at <= menus[1].created_at);
    }

    #[tokio::test]
    async fn test_shopping_list_round_trip() {
        let db = setup_test_db().await;
        let repo = ShoppingListRepository::new(db.shared());

        let created = repo.create(&ShoppingList::new("19/10/2026", vec![3, 1, 2])).await.unwrap();
        assert!(created.id > 0);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.menu_ids, vec![3, 1, 2]);
        assert!(!found.completed);
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_set_completed_only_touches_flag() {
        let db = setup_test_db().await;
        let repo = ShoppingListRepository::new(db.shared());

        let created = repo.create(&ShoppingList::new("Weekly", vec![7])).await.unwrap();

        repo.set_completed(created.id, true).await.expect("Update failed");
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(found.completed);
        assert_eq!(found.name, created.name);
        assert_eq!(found.created_at, created.created_at);
        assert_eq!(found.menu_ids, created.menu_ids);

        repo.set_completed(created.id, false).await.unwrap();
        assert!(!repo.find_by_id(created.id).await.unwrap().unwrap().completed);
    }

    #[tokio::test]
    async fn test_set_completed_missing_is_noop() {
        let db = setup_test_db().await;
        let repo = ShoppingListRepository::new(db.shared());

        repo.set_completed(42, true).await.expect("Missing id must not error");
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_completed_flag_is_an_error() {
        let db = setup_test_db().await;
        let repo = ShoppingListRepository::new(db.shared());
        let created = repo.create(&ShoppingList::new("Weekly", vec![1])).await.unwrap();

        {
            let guard = db.conn.lock().await;
            let conn = guard.as_ref().unwrap();
            conn.execute("UPDATE shopping_lists SET completed = 'maybe' WHERE id = ?", [created.id])
                .unwrap();
        }

        assert!(repo.find_by_id(created.id).await.is_err());
        assert!(repo.list().await.is_err());
    }

    #[tokio::test]
    async fn test_id_spaces_are_independent() {
        let db = setup_test_db().await;
        let menus = MenuRepository::new(db.shared());
        let lists = ShoppingListRepository::new(db.shared());

        menus.create(&Menu::new("Menu 1", vec![])).await.unwrap();
        menus.create(&Menu::new("Menu 2", vec![])).await.unwrap();
        let list = lists.create(&ShoppingList::new("List", vec![1, 2])).await.unwrap();

        assert_eq!(list.id, 1);
    }

    #[tokio::test]
    async fn test_closed_db_reports_error() {
        let db = setup_test_db().await;
        let repo = MenuRepository::new(db.shared());

        db.close().await;
        assert!(!db.is_initialized().await);
        assert!(repo.list().await.is_err());
    }

    #[tokio::test]
    async fn test_file_db_keeps_ids_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("menus.db");

        let first_id = {
            let db = init_db(&path).await.unwrap();
            let repo = MenuRepository::new(db.shared());
            let menu = repo.create(&Menu::new("Menu 1", vec![apple(1.0)])).await.unwrap();
            db.close().await;
            menu.id
        };

        let db = init_db(&path).await.unwrap();
        let repo = MenuRepository::new(db.shared());
        let again = repo.create(&Menu::new("Menu 2", vec![])).await.unwrap();
        assert!(again.id > first_id);
        assert_eq!(repo.list().await.unwrap().len(), 2);

        let guard = db.conn.lock().await;
        assert_eq!(schema_version(guard.as_ref().unwrap()).unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_newer_schema_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.db");
        {
            let conn = rusqlite::Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1).unwrap();
        }

        let err = init_db(&path).await.err().expect("newer schema must be refused");
        assert!(err.contains("newer"));
    }
}
