//! BOS Wallet WASM Frontend
//!
//! Browser shell around `bos-view`: binds the document regions, builds the
//! controller with the `web-sys` surface and the node client, and wires
//! clicks and push notifications into it.

pub mod api;
pub mod config;
pub mod dom;
pub mod events;
pub mod logging;
pub mod notifications;
pub mod pacing;

use std::rc::Rc;

use bos_view::ViewController;
use bos_wallet_client::{InMemoryWalletApi, WalletApi};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

pub type Controller = ViewController<dom::DomSurface>;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let cfg = config::AppConfig::from_page();
    logging::init(&cfg.log_filter);

    let els = dom::Elements::bind()?;

    let api: Rc<dyn WalletApi> = if cfg.offline {
        info!("offline mode: using in-memory node");
        Rc::new(InMemoryWalletApi::new())
    } else {
        info!(api = %cfg.api_base, "using node api");
        Rc::new(api::HttpWalletApi::new(&cfg.api_base))
    };

    let ctl = Rc::new(ViewController::new(
        dom::DomSurface,
        api,
        Rc::new(pacing::TimerPacer),
        cfg.view,
    ));

    events::bind_events(&els, &ctl)?;

    if !cfg.offline {
        if let Err(e) = notifications::connect(&cfg.ws_url, &ctl) {
            warn!(error = ?e, "notification socket unavailable");
        }
    }

    ctl.initialize()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
