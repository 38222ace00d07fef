//! Workflow Layer
//!
//! The screen state machine that collects menu drafts and commits them.

mod screen;
mod view;
mod controller;


pub use screen::{Intent, Screen};
pub use view::{
    group_by_category, CategoryGroup, EditingMenuView, HistoryView, MenuCountView, ScreenView, SlotView,
    SummaryView,
};
pub use controller::{saved_menu_ids, MAX_MENU_COUNT, SlotOutcome, Summary, Workflow, WorkflowSettings};
