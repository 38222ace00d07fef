//! Aggregation Engine
//!
//! Merges the items of several menus into one shopping view, summing the
//! quantities of items that share a catalog id.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::domain::{Item, Menu};
use crate::repository::Repository;

pub struct Aggregator {
    menus: Arc<dyn Repository<Menu>>,
}

impl Aggregator {
    pub fn new(menus: Arc<dyn Repository<Menu>>) -> Self {
        Self { menus }
    }

    /// Combined items of the given menus.
    ///
    /// Missing menus and failed reads are skipped. Output order is the order
    /// in which each item id is first seen, walking `menu_ids` in order.
    pub async fn combine(&self, menu_ids: &[u32]) -> Vec<Item> {
        if menu_ids.is_empty() {
            return Vec::new();
        }

        let menus = self.fetch_all(menu_ids).await;
        merge_items(menus.iter().flatten().map(|menu| menu.items.as_slice()))
    }

    /// Fetch every menu concurrently; result `i` belongs to `menu_ids[i]`
    async fn fetch_all(&self, menu_ids: &[u32]) -> Vec<Option<Menu>> {
        let mut tasks = JoinSet::new();
        for (pos, &id) in menu_ids.iter().enumerate() {
            let repo = self.menus.clone();
            tasks.spawn(async move { (pos, id, repo.find_by_id(id).await) });
        }

        let mut fetched: Vec<Option<Menu>> = vec![None; menu_ids.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((pos, _, Ok(Some(menu)))) => fetched[pos] = Some(menu),
                Ok((_, id, Ok(None))) => log::warn!("Menu {} not found, skipping", id),
                Ok((_, id, Err(e))) => log::warn!("Failed to load menu {}: {}", id, e),
                Err(e) => log::error!("Menu fetch task failed: {}", e),
            }
        }
        fetched
    }
}

/// Fold item lists into one, keyed by item id.
///
/// The first occurrence of an id fixes its name, category and unit; later
/// occurrences only add their quantity.
pub fn merge_items<'a, I>(menus: I) -> Vec<Item>
where
    I: IntoIterator<Item = &'a [Item]>,
{
    let mut merged: Vec<Item> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for items in menus {
        for item in items {
            match index.get(&item.id) {
                Some(&idx) => {
                    let existing = &mut merged[idx];
                    if existing.unit != item.unit {
                        log::warn!(
                            "Item '{}' appears as {} and {}; keeping {}",
                            item.id,
                            existing.unit.as_str(),
                            item.unit.as_str(),
                            existing.unit.as_str()
                        );
                    }
                    existing.quantity += item.quantity;
                }
                None => {
                    index.insert(item.id.clone(), merged.len());
                    merged.push(item.clone());
                }
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, DomainResult, Unit};
    use crate::repository::{init_db, MenuRepository};
    use async_trait::async_trait;
    use std::path::PathBuf;

    fn item(id: &str, category: &str, unit: Unit, quantity: f64) -> Item {
        Item::new(id, id, category, unit).with_quantity(quantity)
    }

    async fn setup() -> (Aggregator, Arc<MenuRepository>) {
        let db = init_db(&PathBuf::from(":memory:")).await.expect("Failed to init test DB");
        let repo = Arc::new(MenuRepository::new(db.shared()));
        (Aggregator::new(repo.clone()), repo)
    }

    /// Every read fails
    struct BrokenMenus;

    #[async_trait]
    impl Repository<Menu> for BrokenMenus {
        async fn create(&self, _entity: &Menu) -> DomainResult<Menu> {
            Err(DomainError::Internal("disk full".to_string()))
        }

        async fn find_by_id(&self, _id: u32) -> DomainResult<Option<Menu>> {
            Err(DomainError::Internal("disk on fire".to_string()))
        }

        async fn list(&self) -> DomainResult<Vec<Menu>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_combine_empty() {
        let aggregator = Aggregator::new(Arc::new(BrokenMenus));
        assert!(aggregator.combine(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_combine_single_menu() {
        let (aggregator, repo) = setup().await;
        let m1 = repo.create(&Menu::new("Menu 1", vec![item("apple", "fruits", Unit::Weight, 2.0)])).await.unwrap();

        let combined = aggregator.combine(&[m1.id]).await;
        assert_eq!(combined, vec![item("apple", "fruits", Unit::Weight, 2.0)]);
    }

    #[tokio::test]
    async fn test_combine_sums_and_keeps_first_seen() {
        let (aggregator, repo) = setup().await;
        let m1 = repo.create(&Menu::new("Menu 1", vec![item("apple", "fruits", Unit::Weight, 2.0)])).await.unwrap();
        let m2 = repo.create(&Menu::new("Menu 2", vec![
            item("apple", "produce", Unit::Count, 3.0),
            item("eggs", "protein", Unit::Count, 6.0),
        ])).await.unwrap();

        let combined = aggregator.combine(&[m1.id, m2.id]).await;
        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0], item("apple", "fruits", Unit::Weight, 5.0));
        assert_eq!(combined[1], item("eggs", "protein", Unit::Count, 6.0));
    }

    #[tokio::test]
    async fn test_order_follows_input_not_storage() {
        let (aggregator, repo) = setup().await;
        let m1 = repo.create(&Menu::new("Menu 1", vec![item("apple", "fruits", Unit::Weight, 1.0)])).await.unwrap();
        let m2 = repo.create(&Menu::new("Menu 2", vec![item("eggs", "protein", Unit::Count, 1.0)])).await.unwrap();

        let combined = aggregator.combine(&[m2.id, m1.id]).await;
        let ids: Vec<&str> = combined.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["eggs", "apple"]);
    }

    #[tokio::test]
    async fn test_dangling_ids_are_skipped() {
        let (aggregator, repo) = setup().await;
        let m1 = repo.create(&Menu::new("Menu 1", vec![item("fish", "protein", Unit::Count, 2.0)])).await.unwrap();

        let combined = aggregator.combine(&[404, m1.id, 405]).await;
        assert_eq!(combined, vec![item("fish", "protein", Unit::Count, 2.0)]);
    }

    #[tokio::test]
    async fn test_read_failures_yield_nothing() {
        let aggregator = Aggregator::new(Arc::new(BrokenMenus));
        assert!(aggregator.combine(&[1, 2, 3]).await.is_empty());
    }

    #[test]
    fn test_merge_items_is_pure_fold() {
        let a = vec![item("apple", "fruits", Unit::Weight, 1.5), item("beef", "protein", Unit::Count, 1.0)];
        let b = vec![item("beef", "protein", Unit::Count, 2.0), item("apple", "fruits", Unit::Weight, 0.5)];

        let merged = merge_items([a.as_slice(), b.as_slice()]);
        assert_eq!(merged, vec![
            item("apple", "fruits", Unit::Weight, 2.0),
            item("beef", "protein", Unit::Count, 3.0),
        ]);
    }
}
