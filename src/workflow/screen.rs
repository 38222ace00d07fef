//! Workflow States and Intents

use serde::{Deserialize, Serialize};
use crate::domain::{Item, MenuDraft};

/// The screen the workflow is on
///
/// `MenuCount` doubles as the menu overview: it is where the count is set,
/// slots are opened for editing and the whole list is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Screen {
    Home,
    MenuCount,
    /// Editing one slot; `draft` is the working copy, committed only on save
    EditingMenu { slot: usize, draft: MenuDraft },
    Summary,
    History,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::MenuCount => "menuCount",
            Screen::EditingMenu { .. } => "editingMenu",
            Screen::Summary => "summary",
            Screen::History => "history",
        }
    }
}

/// Discrete user intents emitted by the presentation layer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum Intent {
    StartList,
    ViewHistory,
    /// Signed so that a negative count can be rejected explicitly
    SetCount { count: i64 },
    SelectMenu { slot: usize },
    Save { items: Vec<Item> },
    Cancel,
    ConfirmAll,
    SelectList { id: u32 },
    StartOver,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::StartList => "startList",
            Intent::ViewHistory => "viewHistory",
            Intent::SetCount { .. } => "setCount",
            Intent::SelectMenu { .. } => "selectMenu",
            Intent::Save { .. } => "save",
            Intent::Cancel => "cancel",
            Intent::ConfirmAll => "confirmAll",
            Intent::SelectList { .. } => "selectList",
            Intent::StartOver => "startOver",
        }
    }
}
