//! Read-only projections handed to the presentation layer

use serde::Serialize;
use crate::domain::{Item, MenuDraft, ShoppingListSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum ScreenView {
    Home,
    MenuCount(MenuCountView),
    EditingMenu(EditingMenuView),
    Summary(SummaryView),
    History(HistoryView),
}

/// One slot on the menu overview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub slot: usize,
    pub complete: bool,
    pub preview: Vec<Item>,
    /// Items beyond the preview
    pub more: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCountView {
    pub count: usize,
    pub slots: Vec<SlotView>,
    pub all_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingMenuView {
    pub slot: usize,
    pub total: usize,
    pub draft: MenuDraft,
}

/// Items of one category, for the grouped summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    /// None when no shopping list could be saved
    pub list_id: Option<u32>,
    pub name: Option<String>,
    pub menu_ids: Vec<u32>,
    pub items: Vec<Item>,
    pub by_category: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryView {
    pub lists: Vec<ShoppingListSummary>,
}

/// Group items by category, categories in first-seen order
pub fn group_by_category(items: &[Item]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(CategoryGroup {
                category: item.category.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Unit;

    #[test]
    fn test_group_by_category_keeps_first_seen_order() {
        let items = vec![
            Item::new("eggs", "Eggs", "protein", Unit::Count),
            Item::new("apple", "Apple", "fruits", Unit::Weight),
            Item::new("fish", "Fish", "protein", Unit::Count),
        ];
        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "protein");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].items[0].id, "apple");
    }

    #[test]
    fn test_view_tagging() {
        let json = serde_json::to_value(ScreenView::Home).unwrap();
        assert_eq!(json, serde_json::json!({ "screen": "home" }));

        let view = ScreenView::MenuCount(MenuCountView { count: 0, slots: vec![], all_complete: false });
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["screen"], "menuCount");
        assert_eq!(json["allComplete"], false);
    }
}
