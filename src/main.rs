//! Task Board Frontend Entry Point

mod api;
mod app;
mod board;
mod card;
mod components;
mod config;
mod context;
mod forms;
mod logging;
mod markdown;
mod models;
mod realtime;
mod session;
mod store;
mod toast;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    logging::init(config.level_filter());
    tracing::info!(api_base = %config.api_base, "starting task board");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
