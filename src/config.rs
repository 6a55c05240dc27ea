//! Runtime Configuration
//!
//! Defaults can be overridden by the hosting page through a global
//! `window.__BOARD_CONFIG__` object, e.g.
//! `<script>window.__BOARD_CONFIG__ = { apiBase: "https://api.example.com" }</script>`.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use wasm_bindgen::JsValue;

/// Global JS property holding the override object
const CONFIG_GLOBAL: &str = "__BOARD_CONFIG__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Prefix for REST endpoints
    pub api_base: String,
    /// WebSocket base URL; empty means derive from the page location
    pub ws_base: String,
    pub request_timeout_ms: u64,
    pub reconnect_attempts: u32,
    pub reconnect_delay_ms: u32,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            ws_base: String::new(),
            request_timeout_ms: 10_000,
            reconnect_attempts: 5,
            reconnect_delay_ms: 3_000,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load defaults merged with the page-provided override, if any
    pub fn load() -> Self {
        let mut config = match read_global() {
            Some(value) => serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
                web_sys::console::warn_1(&format!("[CONFIG] Ignoring invalid {}: {}", CONFIG_GLOBAL, e).into());
                AppConfig::default()
            }),
            None => AppConfig::default(),
        };

        if config.ws_base.is_empty() {
            if let Some(location) = web_sys::window().map(|w| w.location()) {
                let protocol = location.protocol().unwrap_or_default();
                let host = location.host().unwrap_or_default();
                config.ws_base = ws_base_for(&protocol, &host);
            }
        }
        config
    }

    pub fn level_filter(&self) -> LevelFilter {
        parse_level(&self.log_level)
    }
}

fn read_global() -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// `https:` pages talk to `wss://host/ws`, anything else to `ws://host/ws`
pub fn ws_base_for(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{}://{}/ws", scheme, host)
}

pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" => LevelFilter::WARN,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"apiBase":"https://api.example.com","reconnectAttempts":2}"#).unwrap();
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.reconnect_attempts, 2);
        assert_eq!(config.reconnect_delay_ms, 3_000);
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_ws_base_for() {
        assert_eq!(ws_base_for("https:", "board.example.com"), "wss://board.example.com/ws");
        assert_eq!(ws_base_for("http:", "localhost:8080"), "ws://localhost:8080/ws");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::DEBUG);
        assert_eq!(parse_level("warn"), LevelFilter::WARN);
        assert_eq!(parse_level("nonsense"), LevelFilter::INFO);
    }
}
