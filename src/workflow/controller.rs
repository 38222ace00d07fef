//! Workflow Controller
//!
//! Drives the user from choosing how many menus to build, through filling
//! each one, to saving them as a shopping list. Each intent is a transition
//! function: it either returns the new screen or rejects the intent and
//! leaves every piece of state untouched.

use std::collections::BTreeMap;

use crate::domain::{
    DomainError, DomainResult, Item, Menu, MenuDraft, ShoppingList, ShoppingListSummary, DEFAULT_LIST_NAME_FORMAT,
};
use crate::repository::Store;
use crate::services::Aggregator;
use super::screen::{Intent, Screen};
use super::view::{
    group_by_category, EditingMenuView, HistoryView, MenuCountView, ScreenView, SlotView, SummaryView,
};

/// Largest menu count `setCount` accepts
pub const MAX_MENU_COUNT: usize = 50;

/// Presentation knobs that do not affect the state machine itself
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSettings {
    /// chrono format for the default shopping list name
    pub list_name_format: String,
    /// Items shown per slot on the overview
    pub preview_limit: usize,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            list_name_format: DEFAULT_LIST_NAME_FORMAT.to_string(),
            preview_limit: 8,
        }
    }
}

/// Result of persisting one slot during a commit
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    Saved { slot: usize, menu_id: u32 },
    Failed { slot: usize, error: DomainError },
}

/// Ids of the saved menus, in slot order
pub fn saved_menu_ids(outcomes: &[SlotOutcome]) -> Vec<u32> {
    outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            SlotOutcome::Saved { menu_id, .. } => Some(*menu_id),
            SlotOutcome::Failed { .. } => None,
        })
        .collect()
}

/// What the summary screen shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub list_id: Option<u32>,
    pub name: Option<String>,
    pub menu_ids: Vec<u32>,
    pub items: Vec<Item>,
}

pub struct Workflow {
    screen: Screen,
    menu_count: usize,
    drafts: BTreeMap<usize, MenuDraft>,
    summary: Option<Summary>,
    history: Vec<ShoppingListSummary>,
    store: Store,
    aggregator: Aggregator,
    settings: WorkflowSettings,
}

impl Workflow {
    pub fn new(store: Store, settings: WorkflowSettings) -> Self {
        let aggregator = Aggregator::new(store.menus.clone());
        Self {
            screen: Screen::Home,
            menu_count: 0,
            drafts: BTreeMap::new(),
            summary: None,
            history: Vec::new(),
            store,
            aggregator,
            settings,
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn menu_count(&self) -> usize {
        self.menu_count
    }

    pub fn draft(&self, slot: usize) -> Option<&MenuDraft> {
        self.drafts.get(&slot)
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn is_slot_complete(&self, slot: usize) -> bool {
        self.drafts.get(&slot).map_or(false, MenuDraft::is_complete)
    }

    /// False for a count of 0, otherwise true iff every slot has an item
    pub fn are_all_menus_complete(&self) -> bool {
        self.menu_count >= 1 && (1..=self.menu_count).all(|slot| self.is_slot_complete(slot))
    }

    /// Projection of the current screen for the presentation layer
    pub fn view(&self) -> ScreenView {
        match &self.screen {
            Screen::Home => ScreenView::Home,
            Screen::MenuCount => ScreenView::MenuCount(MenuCountView {
                count: self.menu_count,
                slots: (1..=self.menu_count)
                    .map(|slot| {
                        let preview = self
                            .drafts
                            .get(&slot)
                            .map(|draft| draft.preview(self.settings.preview_limit))
                            .unwrap_or_else(|| MenuDraft::new(slot).preview(0));
                        SlotView {
                            slot,
                            complete: self.is_slot_complete(slot),
                            preview: preview.items,
                            more: preview.more,
                        }
                    })
                    .collect(),
                all_complete: self.are_all_menus_complete(),
            }),
            Screen::EditingMenu { slot, draft } => ScreenView::EditingMenu(EditingMenuView {
                slot: *slot,
                total: self.menu_count,
                draft: draft.clone(),
            }),
            Screen::Summary => {
                let summary = self.summary.clone().unwrap_or_default();
                ScreenView::Summary(SummaryView {
                    by_category: group_by_category(&summary.items),
                    list_id: summary.list_id,
                    name: summary.name,
                    menu_ids: summary.menu_ids,
                    items: summary.items,
                })
            }
            Screen::History => ScreenView::History(HistoryView {
                lists: self.history.clone(),
            }),
        }
    }

    // ========================
    // Transitions
    // ========================

    /// Apply one intent
    pub async fn dispatch(&mut self, intent: Intent) -> DomainResult<Screen> {
        log::debug!("Intent {} on screen {}", intent.name(), self.screen.name());
        match intent {
            Intent::StartList => self.start_list(),
            Intent::ViewHistory => self.view_history().await,
            Intent::SetCount { count } => self.set_count(count),
            Intent::SelectMenu { slot } => self.select_menu(slot),
            Intent::Save { items } => self.save(items),
            Intent::Cancel => self.cancel(),
            Intent::ConfirmAll => self.confirm_all().await,
            Intent::SelectList { id } => self.select_list(id).await,
            Intent::StartOver => self.start_over(),
        }
    }

    /// Home -> MenuCount, dropping any previous in-progress list
    pub fn start_list(&mut self) -> DomainResult<Screen> {
        self.require(matches!(self.screen, Screen::Home), "startList")?;
        self.reset();
        Ok(self.go(Screen::MenuCount))
    }

    /// Home -> History, loading saved lists oldest first
    pub async fn view_history(&mut self) -> DomainResult<Screen> {
        self.require(matches!(self.screen, Screen::Home), "viewHistory")?;
        self.refresh_history().await;
        Ok(self.go(Screen::History))
    }

    /// Reload the history rows; a failed read shows an empty history
    pub async fn refresh_history(&mut self) {
        self.history = match self.store.shopping_lists.list().await {
            Ok(lists) => lists.iter().map(ShoppingListSummary::from).collect(),
            Err(e) => {
                log::warn!("Failed to load shopping list history: {}", e);
                Vec::new()
            }
        };
    }

    /// Set the requested number of menus (0..=MAX_MENU_COUNT). Drafts beyond the new count are dropped.
    pub fn set_count(&mut self, count: i64) -> DomainResult<Screen> {
        self.require(matches!(self.screen, Screen::MenuCount), "setCount")?;
        let count = usize::try_from(count)
            .map_err(|_| DomainError::InvalidInput(format!("menu count must not be negative, got {}", count)))?;
        if count > MAX_MENU_COUNT {
            return Err(DomainError::InvalidInput(format!(
                "menu count must be at most {}, got {}",
                MAX_MENU_COUNT, count
            )));
        }

        self.menu_count = count;
        self.drafts.retain(|slot, _| *slot <= count);
        Ok(self.screen.clone())
    }

    /// Open slot `slot` with a copy of its draft (or an empty one)
    pub fn select_menu(&mut self, slot: usize) -> DomainResult<Screen> {
        self.require(matches!(self.screen, Screen::MenuCount), "selectMenu")?;
        if slot < 1 || slot > self.menu_count {
            return Err(DomainError::InvalidInput(format!(
                "menu {} does not exist (count is {})",
                slot, self.menu_count
            )));
        }

        let draft = self.drafts.get(&slot).cloned().unwrap_or_else(|| MenuDraft::new(slot));
        Ok(self.go(Screen::EditingMenu { slot, draft }))
    }

    /// Replace the edited slot's draft with `items` and return to the overview
    pub fn save(&mut self, items: Vec<Item>) -> DomainResult<Screen> {
        let slot = match &self.screen {
            Screen::EditingMenu { slot, .. } => *slot,
            _ => return Err(self.rejected("save")),
        };
        let draft = MenuDraft::from_items(slot, items)?;

        self.drafts.insert(slot, draft);
        Ok(self.go(Screen::MenuCount))
    }

    /// Leave the editor without touching the slot's draft
    pub fn cancel(&mut self) -> DomainResult<Screen> {
        self.require(matches!(self.screen, Screen::EditingMenu { .. }), "cancel")?;
        Ok(self.go(Screen::MenuCount))
    }

    /// Persist every slot as a menu, then the shopping list, then show the combined items.
    ///
    /// Individual save failures are logged and skipped; nothing is rolled back.
    pub async fn confirm_all(&mut self) -> DomainResult<Screen> {
        self.require(matches!(self.screen, Screen::MenuCount), "confirmAll")?;
        if !self.are_all_menus_complete() {
            return Err(DomainError::InvalidInput(
                "every menu needs at least one item before confirming".to_string(),
            ));
        }

        let outcomes = self.save_menus().await;
        let menu_ids = saved_menu_ids(&outcomes);

        let summary = if menu_ids.is_empty() {
            log::error!("No menu could be saved; shopping list not created");
            Summary::default()
        } else {
            let name = ShoppingList::default_name(&self.settings.list_name_format);
            let list_id = match self.store.shopping_lists.create(&ShoppingList::new(name.clone(), menu_ids.clone())).await {
                Ok(list) => {
                    log::info!("Saved shopping list {} with menus {:?}", list.id, list.menu_ids);
                    Some(list.id)
                }
                Err(e) => {
                    log::error!("Error saving shopping list: {}", e);
                    None
                }
            };
            let items = self.aggregator.combine(&menu_ids).await;
            Summary {
                list_id,
                name: Some(name),
                menu_ids,
                items,
            }
        };

        self.summary = Some(summary);
        Ok(self.go(Screen::Summary))
    }

    /// History -> Summary for a saved list. An unknown or unreadable list keeps the history open.
    pub async fn select_list(&mut self, list_id: u32) -> DomainResult<Screen> {
        self.require(matches!(self.screen, Screen::History), "selectList")?;

        let list = match self.store.shopping_lists.find_by_id(list_id).await {
            Ok(Some(list)) => list,
            Ok(None) => {
                log::warn!("Shopping list {} not found", list_id);
                return Ok(self.screen.clone());
            }
            Err(e) => {
                log::warn!("Failed to load shopping list {}: {}", list_id, e);
                return Ok(self.screen.clone());
            }
        };

        let items = self.aggregator.combine(&list.menu_ids).await;
        self.summary = Some(Summary {
            list_id: Some(list.id),
            name: Some(list.name),
            menu_ids: list.menu_ids,
            items,
        });
        Ok(self.go(Screen::Summary))
    }

    /// Summary or History -> Home, abandoning the in-progress list
    pub fn start_over(&mut self) -> DomainResult<Screen> {
        self.require(matches!(self.screen, Screen::Summary | Screen::History), "startOver")?;
        self.reset();
        Ok(self.go(Screen::Home))
    }

    // ========================
    // Internals
    // ========================

    /// Save slots 1..=count one after another
    async fn save_menus(&self) -> Vec<SlotOutcome> {
        let mut outcomes = Vec::with_capacity(self.menu_count);
        for slot in 1..=self.menu_count {
            let items = self.drafts.get(&slot).map(|d| d.items().to_vec()).unwrap_or_default();
            let menu = Menu::new(Menu::slot_name(slot), items);
            let outcome = match self.store.menus.create(&menu).await {
                Ok(saved) => SlotOutcome::Saved { slot, menu_id: saved.id },
                Err(error) => {
                    log::error!("Error saving menu {}: {}", slot, error);
                    SlotOutcome::Failed { slot, error }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    fn reset(&mut self) {
        self.menu_count = 0;
        self.drafts.clear();
        self.summary = None;
    }

    fn go(&mut self, screen: Screen) -> Screen {
        log::debug!("Screen {} -> {}", self.screen.name(), screen.name());
        self.screen = screen;
        self.screen.clone()
    }

    fn require(&self, accepted: bool, intent: &str) -> DomainResult<()> {
        if accepted {
            Ok(())
        } else {
            Err(self.rejected(intent))
        }
    }

    fn rejected(&self, intent: &str) -> DomainError {
        DomainError::Conflict(format!("{} is not available on the {} screen", intent, self.screen.name()))
    }
}
