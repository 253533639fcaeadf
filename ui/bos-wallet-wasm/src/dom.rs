//! DOM element bindings and the `web-sys` [`Surface`].
//!
//! Region roots are resolved once at startup by `Elements::bind()`; every
//! other lookup goes through the selectors owned by `bos_view::surface`.

use bos_view::{Slot, Surface, Target, ViewError, ViewResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

// ── Helpers ──

pub fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(nl) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_display(el: &Element, visible: bool) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

/// Position of `el` among its siblings with the same tag name.
pub fn index_among_same_tag(el: &Element) -> usize {
    let tag = el.tag_name();
    let mut index = 0;
    let mut cursor = el.previous_element_sibling();
    while let Some(sibling) = cursor {
        if sibling.tag_name() == tag {
            index += 1;
        }
        cursor = sibling.previous_element_sibling();
    }
    index
}

// ── Elements struct ──

/// Region roots that click handlers are delegated from.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    pub onboarding: Element,
    pub main: Element,
    pub wallet_menu: Element,
    pub dash: Element,
    pub account: Element,
    pub config: Element,
    pub popup: Element,
}

macro_rules! get_el {
    ($selector:expr) => {
        query($selector).ok_or_else(|| JsValue::from_str(&format!("missing element {}", $selector)))?
    };
}

impl Elements {
    /// Resolve all region roots. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            onboarding: get_el!("article.new"),
            main: get_el!("article.main"),
            wallet_menu: get_el!("ul.account"),
            dash: get_el!("section.da"),
            account: get_el!("section.ac"),
            config: get_el!("section.co"),
            popup: get_el!("article.popup"),
        })
    }
}

// ── Surface ──

/// [`Surface`] backed by the live document.
#[derive(Clone, Default)]
pub struct DomSurface;

impl DomSurface {
    fn resolve(&self, target: &Target) -> ViewResult<Vec<Element>> {
        let selector = target.selector();
        let found = query_all(&selector);
        if found.is_empty() && !target.optional() {
            return Err(ViewError::MissingTarget(selector));
        }
        Ok(found)
    }

    fn resolve_slot(&self, slot: Slot) -> ViewResult<Vec<Element>> {
        self.resolve(&Target::Slot(slot))
    }
}

impl Surface for DomSurface {
    fn set_visible(&self, target: &Target, visible: bool) -> ViewResult {
        for el in self.resolve(target)? {
            set_display(&el, visible);
        }
        Ok(())
    }

    fn set_class(&self, target: &Target, class: &str, on: bool) -> ViewResult {
        for el in self.resolve(target)? {
            toggle_class(&el, class, on);
        }
        Ok(())
    }

    fn has_class(&self, target: &Target, class: &str) -> bool {
        query(&target.selector()).is_some_and(|el| has_class(&el, class))
    }

    fn set_text(&self, slot: Slot, text: &str) -> ViewResult {
        for el in self.resolve_slot(slot)? {
            el.set_text_content(Some(text));
        }
        Ok(())
    }

    fn replace_html(&self, slot: Slot, html: &str) -> ViewResult {
        for el in self.resolve_slot(slot)? {
            el.set_inner_html(html);
        }
        Ok(())
    }

    fn append_html(&self, slot: Slot, html: &str) -> ViewResult {
        for el in self.resolve_slot(slot)? {
            el.insert_adjacent_html("beforeend", html)
                .map_err(|e| ViewError::MissingTarget(format!("{}: {:?}", slot.selector(), e)))?;
        }
        Ok(())
    }

    fn contains(&self, target: &Target) -> bool {
        query(&target.selector()).is_some()
    }

    fn child_count(&self, slot: Slot) -> usize {
        query_all(&slot.items_selector()).len()
    }

    fn input_value(&self, slot: Slot) -> ViewResult<String> {
        let selector = slot.selector();
        query(selector)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value().trim().to_string())
            .ok_or_else(|| ViewError::MissingTarget(selector.to_owned()))
    }
}
