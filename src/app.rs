//! Task Board App
//!
//! Root component: wires services into context, loads the board once a
//! session exists, and switches between the sign-in page and the main pages.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};
use reactive_stores::Store;

use crate::api::{tasks, users};
use crate::components::{handle_drop_outcome, AccountPanel, BoardDnd, BoardView, ChatPanel, SignInPage, ToastHost, TopBar};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::ChatMessage;
use crate::realtime::{self, merge_messages, ReconnectPolicy};
use crate::session::SessionContext;
use crate::store::{AppState, AppStateStoreFields};
use crate::toast::Toaster;

/// Main page shown under the top bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Board,
    Chat,
    Account,
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let toaster = Toaster::new();
    let session = SessionContext::init();
    let ctx = AppContext::new(config, session, toaster);
    let store = Store::new(AppState::default());

    provide_context(ctx);
    provide_context(store);

    // Bound once here; the board page mounts and unmounts with navigation
    let dnd: BoardDnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |outcome| handle_drop_outcome(ctx, store, outcome));

    let page = RwSignal::new(Page::Board);
    let inbox = RwSignal::new(Vec::<ChatMessage>::new());
    let signed_in = Memo::new(move |_| session.is_signed_in());

    // Load board and users when signed in or asked to reload
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        if !signed_in.get() {
            return;
        }
        tracing::debug!(trigger, "loading board");
        let api = ctx.api();
        spawn_local(async move {
            match tasks::fetch_lists(&api).await {
                Ok(lists) => {
                    tracing::info!(lists = lists.len(), "board loaded");
                    store.lists().set(lists);
                    store.load_error().set(None);
                    store.loaded().set(true);
                }
                // The client has already toasted the failure
                Err(e) => {
                    tracing::warn!(error = %e, "board load failed");
                    store.load_error().set(Some(e.toast_message()));
                }
            }
            if let Ok(list) = users::list_users(&api).await {
                store.users().set(list);
            }
        });
    });

    // Open the realtime channel once per signed-in user
    let connected_as = StoredValue::new(None::<String>);
    Effect::new(move |_| {
        let Some(current) = session.current() else { return };
        if connected_as.with_value(|c| c.as_deref() == Some(current.user_id.as_str())) {
            return;
        }
        connected_as.set_value(Some(current.user_id.clone()));

        let config = ctx.config();
        let url = realtime::socket_url(&config.ws_base, &current.user_id);
        let me = current.user_id.clone();
        realtime::connect(url, ReconnectPolicy::from_config(&config), move |msg| {
            if msg.from != me && page.get_untracked() != Page::Chat {
                toaster.info("收到新消息");
            }
            inbox.update(|inbox| merge_messages(inbox, [msg]));
        });
    });

    view! {
        <ToastHost />
        <Show
            when=move || signed_in.get()
            fallback=|| view! { <SignInPage /> }
        >
            <div class="app-layout">
                <TopBar page=page />
                <main class="main-content">
                    {move || match page.get() {
                        Page::Board => view! { <BoardView dnd=dnd /> }.into_any(),
                        Page::Chat => view! { <ChatPanel inbox=inbox /> }.into_any(),
                        Page::Account => view! { <AccountPanel /> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}
