//! Card Tile Component
//!
//! Compact card shown inside a list column. Pressing and moving starts a
//! drag; a plain click opens the detail panel.

use leptos::prelude::*;
use leptos_dragdrop::make_on_mousedown;

use crate::board;
use crate::card::attachments::format_size;
use crate::card::checklist::completion_percent;
use crate::components::board_view::BoardDnd;
use crate::markdown::excerpt;
use crate::models::{CardId, CardStatus};
use crate::store::{use_app_store, AppStateStoreFields};

const EXCERPT_CHARS: usize = 40;

#[component]
pub fn CardTile(card_id: CardId, dnd: BoardDnd) -> impl IntoView {
    let store = use_app_store();

    let card = {
        let card_id = card_id.clone();
        Memo::new(move |_| store.lists().with(|lists| board::get_card(lists, &card_id).cloned()))
    };

    let is_dragging = {
        let card_id = card_id.clone();
        move || dnd.dragging_id().as_deref() == Some(card_id.as_str())
    };
    let is_selected = {
        let card_id = card_id.clone();
        move || store.selected_card().get().as_deref() == Some(card_id.as_str())
    };

    let on_click = {
        let card_id = card_id.clone();
        move |_| {
            if dnd.drag_just_ended.get_untracked() {
                return;
            }
            store.selected_card().set(Some(card_id.clone()));
        }
    };

    move || {
        let Some(card) = card.get() else {
            return ().into_any();
        };
        let status_class = match card.status {
            CardStatus::Pending => "status-pending",
            CardStatus::InProgress => "status-in-progress",
            CardStatus::Done => "status-done",
        };
        let progress = (!card.checklist.is_empty()).then(|| {
            let done = card.checklist.iter().filter(|i| i.checked).count();
            format!("☑ {}/{} ({}%)", done, card.checklist.len(), completion_percent(&card.checklist))
        });
        let attachment_bytes: u64 = card.attachments.iter().map(|a| a.size).sum();
        let summary = excerpt(&card.description, EXCERPT_CHARS);
        let is_dragging = is_dragging.clone();
        let is_selected = is_selected.clone();

        view! {
            <div
                class=move || {
                    let mut c = format!("card-tile {}", status_class);
                    if is_dragging() { c.push_str(" dragging"); }
                    if is_selected() { c.push_str(" selected"); }
                    c
                }
                on:mousedown=make_on_mousedown(dnd, card_id.clone())
                on:click=on_click.clone()
            >
                <div class="card-labels">
                    {card.labels.iter().map(|label| view! {
                        <span class="card-label" style=format!("background-color: {}", label.color)>
                            {label.text.clone()}
                        </span>
                    }).collect_view()}
                </div>
                <div class="card-title">{card.title.clone()}</div>
                {(!summary.is_empty()).then(|| view! { <div class="card-excerpt">{summary}</div> })}
                <div class="card-meta">
                    <span class=format!("priority priority-{}", card.priority.as_str())>
                        {card.priority.label()}
                    </span>
                    {card.due_date.map(|d| view! {
                        <span class="due-date">{d.format("%m-%d").to_string()}</span>
                    })}
                    {progress.map(|p| view! { <span class="checklist-progress">{p}</span> })}
                    {(!card.attachments.is_empty()).then(|| view! {
                        <span class="attachment-count">
                            {format!("📎 {} · {}", card.attachments.len(), format_size(attachment_bytes))}
                        </span>
                    })}
                    {(!card.comments.is_empty()).then(|| view! {
                        <span class="comment-count">{format!("💬 {}", card.comments.len())}</span>
                    })}
                </div>
                <div class="card-assignees">
                    {card.assignees.iter().map(|u| {
                        let initial: String = u.name.chars().take(1).collect();
                        view! { <span class="avatar" title=u.name.clone()>{initial}</span> }
                    }).collect_view()}
                </div>
            </div>
        }
        .into_any()
    }
}
