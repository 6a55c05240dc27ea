//! Top Bar Component
//!
//! Page tabs, notification menu and the signed-in user with logout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{auth, notifications};
use crate::app::Page;
use crate::context::use_app_context;
use crate::models::Notification;

#[component]
pub fn TopBar(page: RwSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();

    let user_name = move || ctx.session.current().map(|s| s.name).unwrap_or_default();

    let logout = move |_| {
        let api = ctx.api();
        spawn_local(async move {
            // Server-side logout is best effort; the local session goes regardless
            if let Err(e) = auth::logout(&api).await {
                tracing::debug!(error = %e, "server logout failed");
            }
            ctx.session.logout();
        });
    };

    let tab = move |target: Page, label: &'static str| {
        view! {
            <button
                class="page-tab"
                class:active=move || page.get() == target
                on:click=move |_| page.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <header class="top-bar">
            <div class="brand">"任务看板"</div>
            <nav class="page-tabs">
                {tab(Page::Board, "看板")}
                {tab(Page::Chat, "消息")}
                {tab(Page::Account, "账户")}
            </nav>
            <div class="top-bar-right">
                <button class="refresh-btn" title="刷新" on:click=move |_| ctx.reload()>"⟳"</button>
                <NotificationMenu />
                <span class="user-name">{user_name}</span>
                <button class="logout-btn" on:click=logout>"退出"</button>
            </div>
        </header>
    }
}

#[component]
fn NotificationMenu() -> impl IntoView {
    let ctx = use_app_context();

    let (open, set_open) = signal(false);
    let items = RwSignal::new(Vec::<Notification>::new());

    let unread = move || items.with(|list| list.iter().filter(|n| !n.read).count());

    let load = move || {
        let api = ctx.api();
        spawn_local(async move {
            if let Ok(list) = notifications::list_notifications(&api).await {
                items.set(list);
            }
        });
    };

    // Refresh with the board
    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load();
    });

    let mark_one = move |id: String| {
        let api = ctx.api();
        spawn_local(async move {
            if notifications::mark_read(&api, &id).await.is_ok() {
                items.update(|list| {
                    if let Some(n) = list.iter_mut().find(|n| n.id == id) {
                        n.read = true;
                    }
                });
            }
        });
    };

    let mark_all = move |_| {
        let api = ctx.api();
        spawn_local(async move {
            if notifications::mark_all_read(&api).await.is_ok() {
                items.update(|list| list.iter_mut().for_each(|n| n.read = true));
            }
        });
    };

    view! {
        <div class="notification-menu">
            <button class="notification-btn" on:click=move |_| set_open.update(|v| *v = !*v)>
                "🔔"
                {move || (unread() > 0).then(|| view! { <span class="badge">{unread()}</span> })}
            </button>
            <Show when=move || open.get()>
                <div class="notification-dropdown">
                    <div class="notification-header">
                        <span>"通知"</span>
                        <button on:click=mark_all>"全部已读"</button>
                    </div>
                    <Show
                        when=move || items.with(|list| !list.is_empty())
                        fallback=|| view! { <p class="empty-hint">"暂无通知"</p> }
                    >
                        <ul>
                            {move || items.get().into_iter().map(|n| {
                                let id = n.id.clone();
                                let is_read = n.read;
                                view! {
                                    <li
                                        class="notification"
                                        class:unread=!is_read
                                        on:click=move |_| {
                                            if !is_read {
                                                mark_one(id.clone());
                                            }
                                        }
                                    >
                                        <div class="notification-title">{n.title}</div>
                                        <div class="notification-body">{n.body}</div>
                                        <div class="notification-time">
                                            {n.created_at.with_timezone(&chrono::Local).format("%m-%d %H:%M").to_string()}
                                        </div>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
