//! UI Components
//!
//! Leptos components for the board, the card panel and the side pages.

mod account_panel;
mod attachments_module;
mod board_view;
mod card_detail;
mod card_tile;
mod chat_panel;
mod checklist_module;
mod comments_module;
mod delete_confirm_button;
mod description_module;
mod drop_zone;
mod images_module;
mod labels_module;
mod list_column;
mod members_module;
mod new_list_form;
mod sign_in;
mod toast_host;
mod top_bar;

pub use account_panel::AccountPanel;
pub use board_view::{handle_drop_outcome, BoardDnd, BoardView};
pub use chat_panel::ChatPanel;
pub use sign_in::SignInPage;
pub use toast_host::ToastHost;
pub use top_bar::TopBar;
