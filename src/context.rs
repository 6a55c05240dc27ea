//! Application Context
//!
//! Shared services provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::board;
use crate::config::AppConfig;
use crate::models::ListId;
use crate::session::SessionContext;
use crate::store::{AppStateStoreFields, AppStore};
use crate::toast::Toaster;

/// App-wide services
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    api: StoredValue<ApiClient>,
    pub session: SessionContext,
    pub toaster: Toaster,
    /// Trigger to reload the board from the server - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the board from the server - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig, session: SessionContext, toaster: Toaster) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let api = StoredValue::new(ApiClient::new(&config, session, toaster));
        let config = StoredValue::new(config);
        Self { config, api, session, toaster, reload_trigger, set_reload_trigger }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Request client (cheap clone)
    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    /// Trigger a reload of the board
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Push the current state of the given lists to the server.
    ///
    /// Failures are reported by the request layer; local state is kept as is.
    pub fn sync_lists(&self, store: AppStore, list_ids: Vec<ListId>) {
        let api = self.api();
        spawn_local(async move {
            for id in dedup(list_ids) {
                let list = store.lists().with_untracked(|lists| lists.iter().find(|l| l.id == id).cloned());
                let Some(list) = list else { continue };
                match api::tasks::save_list(&api, &list).await {
                    Ok(_) => tracing::debug!(list = %id, "list saved"),
                    Err(e) => tracing::warn!(list = %id, error = %e, "list save failed; local state kept"),
                }
            }
        });
    }

    /// Sync the list holding a card
    pub fn sync_card_list(&self, store: AppStore, card_id: &str) {
        let list_id = store
            .lists()
            .with_untracked(|lists| board::find_card(lists, card_id).map(|(li, _)| lists[li].id.clone()));
        if let Some(list_id) = list_id {
            self.sync_lists(store, vec![list_id]);
        }
    }
}

fn dedup(mut ids: Vec<ListId>) -> Vec<ListId> {
    let mut seen = Vec::with_capacity(ids.len());
    ids.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(id.clone());
            true
        }
    });
    ids
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let ids = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup(ids), vec!["b".to_string(), "a".to_string()]);
    }
}
