//! Commands for the Item Catalog

use serde::Serialize;

use crate::domain::CatalogEntry;
use crate::AppState;

/// Category key and display name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
}

pub fn catalog_categories(state: &AppState) -> Result<Vec<CategoryInfo>, String> {
    Ok(state.catalog
        .categories()
        .iter()
        .map(|c| CategoryInfo { id: c.id.clone(), name: c.name.clone() })
        .collect())
}

pub fn catalog_lookup(state: &AppState, category: &str) -> Result<Vec<CatalogEntry>, String> {
    Ok(state.catalog.lookup(category))
}

pub fn catalog_search(state: &AppState, term: &str) -> Result<Vec<CatalogEntry>, String> {
    Ok(state.catalog.search(term))
}
