//! Page-level configuration.
//!
//! Resolved once at startup from the document: an `#apiBaseUrl` input or
//! `data-*` attributes on `<body>`, falling back to the page location.

use bos_view::ViewConfig;
use std::time::Duration;
use wasm_bindgen::JsCast;

use crate::dom;

const NODE_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub ws_url: String,
    /// Serve every call from the in-memory node instead of HTTP.
    pub offline: bool,
    pub log_filter: String,
    pub view: ViewConfig,
}

impl AppConfig {
    pub fn from_page() -> Self {
        let api_base = api_base_url();
        let ws_url = body_attr("data-ws-url").unwrap_or_else(|| ws_url_for(&api_base));
        let offline = dom::window()
            .and_then(|w| w.location().search().ok())
            .is_some_and(|q| q.trim_start_matches('?').split('&').any(|p| p == "offline"));
        let log_filter = body_attr("data-log").unwrap_or_else(|| "info".to_string());

        let mut view = ViewConfig::default();
        if let Some(ms) = body_attr("data-pace-ms").and_then(|v| v.parse::<u64>().ok()) {
            view.create_delay = Duration::from_millis(ms);
            view.loading_delay = Duration::from_millis(ms);
        }

        Self {
            api_base,
            ws_url,
            offline,
            log_filter,
            view,
        }
    }
}

fn body_attr(name: &str) -> Option<String> {
    dom::document()?
        .body()?
        .get_attribute(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Priority: `#apiBaseUrl` input → `data-api-base` → same host on the node port.
fn api_base_url() -> String {
    if let Some(input) = dom::query("#apiBaseUrl")
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
    {
        let v = input.value().trim().to_string();
        if !v.is_empty() {
            return v.trim_end_matches('/').to_string();
        }
    }
    if let Some(v) = body_attr("data-api-base") {
        return v.trim_end_matches('/').to_string();
    }

    let (protocol, host) = dom::window()
        .map(|w| {
            let loc = w.location();
            (
                loc.protocol().unwrap_or_else(|_| "http:".into()),
                loc.hostname().unwrap_or_default(),
            )
        })
        .unwrap_or_else(|| ("http:".into(), "localhost".into()));
    format!("{}//{}:{}", protocol, host, NODE_PORT)
}

pub fn ws_url_for(api_base: &str) -> String {
    let rest = api_base
        .strip_prefix("https://")
        .map(|r| format!("wss://{r}"))
        .or_else(|| api_base.strip_prefix("http://").map(|r| format!("ws://{r}")))
        .unwrap_or_else(|| api_base.to_string());
    format!("{}/ws", rest.trim_end_matches('/'))
}
