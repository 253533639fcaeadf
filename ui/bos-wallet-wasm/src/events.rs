//! Event binding.
//!
//! Clicks are delegated from each region root: the first rule whose selector
//! matches the clicked element (or an ancestor inside the root) produces an
//! [`Action`] that is dispatched on the local executor.

use std::rc::Rc;

use bos_view::{Action, LoginMode};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::Controller;
use crate::dom::{self, Elements};

type Rule = (&'static str, fn(&Element) -> Option<Action>);

const ONBOARDING: &[Rule] = &[("a.link", login_link)];

const MAIN: &[Rule] = &[
    ("header .close", |_| Some(Action::CloseToDash)),
    ("a.config", |_| Some(Action::OpenConfig)),
];

const WALLET_MENU: &[Rule] = &[(".add", |_| Some(Action::AddAccount))];

const DASH: &[Rule] = &[
    (".info-wrap a", |_| Some(Action::OpenBlockInfo)),
    (".pay > a", |_| Some(Action::OpenAccount)),
    (".ctl .receive", |_| Some(Action::QuickReceive)),
    (".ctl .send", |_| Some(Action::QuickSend)),
    (".ctl .freez", |_| Some(Action::QuickFreeze)),
];

const ACCOUNT: &[Rule] = &[
    ("button.freezing", |_| Some(Action::AskFreeze)),
    ("ul.form button.send", |_| Some(Action::AskSend)),
    ("ul.form button.cancel", |_| Some(Action::AskCancelSend)),
    (".toggle dl dt", |dt| entry_index(dt).map(Action::ToggleHeader)),
];

const CONFIG: &[Rule] = &[(".toggle dl dt", |dt| {
    entry_index(dt).map(Action::ConfigHeader)
})];

// More specific footers first; the generic layer footer only closes.
const POPUP: &[Rule] = &[
    (".freezing footer a", |_| Some(Action::ConfirmFreeze)),
    (".un-freezing footer a", |_| Some(Action::ConfirmUnfreeze)),
    (".send-bos footer a", |_| Some(Action::ConfirmSend)),
    (".layer footer a", |_| Some(Action::ClosePopup)),
];

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements, ctl: &Rc<Controller>) -> Result<(), JsValue> {
    delegate(&els.onboarding, ONBOARDING, ctl)?;
    delegate(&els.main, MAIN, ctl)?;
    delegate(&els.wallet_menu, WALLET_MENU, ctl)?;
    delegate(&els.dash, DASH, ctl)?;
    delegate(&els.account, ACCOUNT, ctl)?;
    delegate(&els.config, CONFIG, ctl)?;
    delegate(&els.popup, POPUP, ctl)?;
    Ok(())
}

fn delegate(root: &Element, rules: &'static [Rule], ctl: &Rc<Controller>) -> Result<(), JsValue> {
    let root2 = root.clone();
    let ctl = ctl.clone();
    let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        let Some(clicked) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        for (selector, to_action) in rules {
            let Ok(Some(hit)) = clicked.closest(selector) else {
                continue;
            };
            if !root2.contains(Some(hit.as_ref())) {
                continue;
            }
            event.prevent_default();
            if let Some(action) = to_action(&hit) {
                let ctl2 = ctl.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    ctl2.dispatch(action).await;
                });
            }
            return;
        }
    }) as Box<dyn FnMut(_)>);
    root.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn login_link(link: &Element) -> Option<Action> {
    let value = link.get_attribute("data-val").unwrap_or_default();
    match value.parse::<LoginMode>() {
        Ok(mode) => Some(Action::LoginLink(mode)),
        Err(err) => {
            warn!(error = %err, "ignoring onboarding link");
            None
        }
    }
}

/// Index of the `dl` that owns the clicked `dt`.
fn entry_index(dt: &Element) -> Option<usize> {
    let dl = dt.closest("dl").ok()??;
    Some(dom::index_among_same_tag(&dl))
}
