//! JSON Request Handling
//!
//! One request per line in, one response per line out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::workflow::Intent;
use crate::AppState;
use super::{catalog_cmd, list_cmd, workflow_cmd};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum Request {
    /// A workflow intent, e.g. `{"cmd":"intent","intent":"setCount","count":2}`
    Intent(Intent),
    View,
    ListShoppingLists,
    SetListCompleted { id: u32, completed: bool },
    CatalogCategories,
    CatalogLookup { category: String },
    CatalogSearch { term: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn from_result<T: Serialize>(result: Result<T, String>) -> Self {
        match result.and_then(|data| serde_json::to_value(data).map_err(|e| e.to_string())) {
            Ok(data) => Self { ok: true, data: Some(data), error: None },
            Err(error) => Self::error(error),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self { ok: false, data: None, error: Some(error.into()) }
    }
}

pub async fn handle_request(state: &AppState, request: Request) -> Response {
    match request {
        Request::Intent(intent) => Response::from_result(workflow_cmd::dispatch_intent(state, intent).await),
        Request::View => Response::from_result(workflow_cmd::current_view(state).await),
        Request::ListShoppingLists => Response::from_result(list_cmd::list_shopping_lists(state).await),
        Request::SetListCompleted { id, completed } => {
            Response::from_result(list_cmd::set_shopping_list_completed(state, id, completed).await)
        }
        Request::CatalogCategories => Response::from_result(catalog_cmd::catalog_categories(state)),
        Request::CatalogLookup { category } => Response::from_result(catalog_cmd::catalog_lookup(state, &category)),
        Request::CatalogSearch { term } => Response::from_result(catalog_cmd::catalog_search(state, &term)),
    }
}

/// Parse and handle one raw line
pub async fn handle_line(state: &AppState, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(state, request).await,
        Err(e) => Response::error(format!("Invalid request: {}", e)),
    }
}
