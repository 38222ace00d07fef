//! Commands for Saved Shopping Lists

use crate::domain::ShoppingListSummary;
use crate::workflow::Screen;
use crate::AppState;

/// All saved shopping lists, oldest first
pub async fn list_shopping_lists(state: &AppState) -> Result<Vec<ShoppingListSummary>, String> {
    let lists = state.store.shopping_lists.list().await.map_err(|e| e.to_string())?;
    Ok(lists.iter().map(ShoppingListSummary::from).collect())
}

/// Mark a saved list as completed (or active again)
pub async fn set_shopping_list_completed(state: &AppState, id: u32, completed: bool) -> Result<(), String> {
    state.store.shopping_lists
        .set_completed(id, completed)
        .await
        .map_err(|e| e.to_string())?;

    // Keep an open history screen in sync
    let mut workflow = state.workflow.lock().await;
    if workflow.screen() == &Screen::History {
        workflow.refresh_history().await;
    }
    Ok(())
}
