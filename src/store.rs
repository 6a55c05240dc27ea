//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! Board mutations compute a new list collection with `board::*` and swap it
//! in with a single write, so renderers never see a half-applied move.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::{self, BoardResult};
use crate::models::{Card, CardId, List, User};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Board lists in display order
    pub lists: Vec<List>,
    /// Card open in the detail panel
    pub selected_card: Option<CardId>,
    /// Known users (assignee picker, admin screen)
    pub users: Vec<User>,
    /// Set once the first board fetch finished
    pub loaded: bool,
    /// Why the last board fetch failed, if it did
    pub load_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Run a board operation against the current lists and swap in the result.
/// On error the store is left untouched.
pub fn store_apply<F>(store: &AppStore, op: F) -> BoardResult<()>
where
    F: FnOnce(&[List]) -> BoardResult<Vec<List>>,
{
    let next = store.lists().with_untracked(|lists| op(lists))?;
    *store.lists().write() = next;
    Ok(())
}

pub fn store_move_card(store: &AppStore, card_id: &str, from_list: &str, to_list: &str, index: usize) -> BoardResult<()> {
    store_apply(store, |lists| board::move_card(lists, card_id, from_list, to_list, index))
}

pub fn store_update_card(store: &AppStore, card: Card) -> BoardResult<()> {
    store_apply(store, |lists| board::update_card(lists, card))
}

pub fn store_delete_card(store: &AppStore, card_id: &str) -> BoardResult<()> {
    store_apply(store, |lists| board::delete_card(lists, card_id))?;
    if store.selected_card().get_untracked().as_deref() == Some(card_id) {
        store.selected_card().set(None);
    }
    Ok(())
}

/// Look up the list currently holding a card
pub fn store_list_of(store: &AppStore, card_id: &str) -> Option<List> {
    store.lists().with_untracked(|lists| {
        board::find_card(lists, card_id).map(|(li, _)| lists[li].clone())
    })
}
