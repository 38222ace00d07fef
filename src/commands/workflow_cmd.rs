//! Commands for Workflow Intents
//!
//! Exposes the workflow state machine to the frontend.

use crate::workflow::{Intent, ScreenView};
use crate::AppState;

/// Apply one user intent and return the new screen projection
pub async fn dispatch_intent(state: &AppState, intent: Intent) -> Result<ScreenView, String> {
    let mut workflow = state.workflow.lock().await;
    let name = intent.name();
    workflow.dispatch(intent).await.map_err(|e| {
        log::info!("Intent {} rejected: {}", name, e);
        e.to_string()
    })?;
    Ok(workflow.view())
}

/// Projection of the current screen
pub async fn current_view(state: &AppState) -> Result<ScreenView, String> {
    let workflow = state.workflow.lock().await;
    Ok(workflow.view())
}
