//! Drop Zone Component
//!
//! A horizontal gap between cards marking an insertion position.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, make_on_target_mouseenter, DropTarget};

use crate::components::board_view::BoardDnd;
use crate::models::ListId;

/// Gap before card `index` of `list_id` (`index == len` is the tail)
#[component]
pub fn DropZone(list_id: ListId, index: usize, dnd: BoardDnd) -> impl IntoView {
    let target = DropTarget::Zone(list_id, index);
    let is_over = {
        let target = target.clone();
        move || dnd.drop_target().as_ref() == Some(&target)
    };
    let is_visible = move || dnd.dragging_id().is_some();

    view! {
        <div
            class=move || {
                let mut c = "drop-zone".to_string();
                if is_over() { c.push_str(" active"); }
                if !is_visible() { c.push_str(" hidden"); }
                c
            }
            on:mouseenter=make_on_target_mouseenter(dnd, target)
            on:mouseleave=make_on_mouseleave(dnd)
        />
    }
}
