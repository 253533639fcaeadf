//! Push channel for "receive BOS" notifications.
//!
//! Each text frame on the node's WebSocket becomes an
//! [`Action::Receive`]. A dropped connection is retried after a fixed delay.

use std::rc::Rc;

use bos_api_types::InboundEvent;
use bos_view::Action;
use gloo_timers::callback::Timeout;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::Controller;

const RECONNECT_MS: u32 = 5_000;

/// Open the notification socket and keep it open for the page's lifetime.
pub fn connect(url: &str, ctl: &Rc<Controller>) -> Result<(), JsValue> {
    info!(url, "connecting notification socket");
    let socket = WebSocket::new(url)?;

    {
        let ctl = ctl.clone();
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(data) = event.data().as_string() else {
                debug!("ignoring non-text notification frame");
                return;
            };
            let inbound = InboundEvent {
                trusted: event.is_trusted(),
                data,
            };
            let ctl2 = ctl.clone();
            wasm_bindgen_futures::spawn_local(async move {
                ctl2.dispatch(Action::Receive(inbound)).await;
            });
        }) as Box<dyn FnMut(_)>);
        socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();
    }

    {
        let onerror = Closure::wrap(Box::new(move |event: Event| {
            warn!(kind = %event.type_(), "notification socket error");
        }) as Box<dyn FnMut(_)>);
        socket.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }

    {
        let url = url.to_string();
        let ctl = ctl.clone();
        let onclose = Closure::wrap(Box::new(move |event: CloseEvent| {
            warn!(code = event.code(), reason = %event.reason(), "notification socket closed");
            let url = url.clone();
            let ctl = ctl.clone();
            Timeout::new(RECONNECT_MS, move || {
                if let Err(e) = connect(&url, &ctl) {
                    warn!(error = ?e, "notification socket reconnect failed");
                }
            })
            .forget();
        }) as Box<dyn FnMut(_)>);
        socket.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();
    }

    Ok(())
}
