//! Board View
//!
//! Horizontal row of list columns. The drag signals are created and bound
//! to the document once by `App`; a completed drop becomes a `move_card`
//! on the store followed by a save of the affected lists.

use leptos::prelude::*;
use leptos_dragdrop::{DndSignals, DropOutcome, DropTarget};

use crate::board;
use crate::components::card_detail::CardDetail;
use crate::components::list_column::ListColumn;
use crate::components::new_list_form::NewListForm;
use crate::context::{use_app_context, AppContext};
use crate::models::{CardId, ListId};
use crate::store::{store_move_card, use_app_store, AppStateStoreFields, AppStore};

/// Drag state shared by every column
pub type BoardDnd = DndSignals<CardId, ListId>;

#[component]
pub fn BoardView(dnd: BoardDnd) -> impl IntoView {
    let store = use_app_store();

    let list_ids = move || store.lists().with(|lists| lists.iter().map(|l| l.id.clone()).collect::<Vec<_>>());

    view! {
        <div class="board-layout">
            <div class="board" class:dragging=move || dnd.dragging_id().is_some()>
                <Show
                    when=move || store.loaded().get()
                    fallback=move || view! { <BoardPlaceholder /> }
                >
                    <For
                        each=list_ids
                        key=|id| id.clone()
                        children=move |id| view! { <ListColumn list_id=id dnd=dnd /> }
                    />
                    <NewListForm />
                </Show>
            </div>
            <CardDetail />
        </div>
    }
}

/// Loading indicator, or the load error with a retry button
#[component]
fn BoardPlaceholder() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    move || match store.load_error().get() {
        Some(message) => view! {
            <div class="board-error">
                <span>{format!("看板加载失败: {}", message)}</span>
                <button on:click=move |_| ctx.reload()>"重试"</button>
            </div>
        }
        .into_any(),
        None => view! { <div class="board-loading">"加载中..."</div> }.into_any(),
    }
}

/// Apply a finished drag to the store and save the touched lists
pub fn handle_drop_outcome(ctx: AppContext, store: AppStore, outcome: DropOutcome<CardId, ListId>) {
    match outcome {
        DropOutcome::Dropped { dragged, target } => {
            let (to, zone) = match target {
                DropTarget::Container(list) => (list, None),
                DropTarget::Zone(list, zone) => (list, Some(zone)),
            };
            let resolved = store.lists().with_untracked(|lists| board::resolve_drop(lists, &dragged, &to, zone));
            let mv = match resolved {
                Ok(Some(mv)) => mv,
                Ok(None) => return,
                Err(e) => {
                    tracing::warn!(card = %dragged, error = %e, "drop ignored");
                    return;
                }
            };
            match store_move_card(&store, &dragged, &mv.from, &mv.to, mv.index) {
                Ok(()) => {
                    tracing::info!(card = %dragged, from = %mv.from, to = %mv.to, index = mv.index, "card moved");
                    ctx.sync_lists(store, vec![mv.from, mv.to]);
                }
                Err(e) => tracing::warn!(card = %dragged, error = %e, "move rejected"),
            }
        }
        DropOutcome::DroppedOutside { dragged } => {
            tracing::debug!(card = %dragged, "dropped outside any list");
        }
        DropOutcome::Cancelled { dragged } => {
            tracing::debug!(card = %dragged, "drag cancelled");
        }
    }
}
