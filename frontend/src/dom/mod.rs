//! Bindings between the controllers and the server-rendered page.

pub mod appointment_form;
pub mod enhancements;
pub mod fields;
pub mod floating_alert;
pub mod page;
pub mod slot_select;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node};

use crate::services::logging::Logger;

/// Log a failed DOM call instead of aborting the handler
pub(crate) fn report<T>(component: &str, action: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            Logger::warn_with_component(component, &format!("{} failed: {:?}", action, err));
            None
        }
    }
}

/// All elements matching `selector`, empty when the selector is invalid
pub(crate) fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn select_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// Detach every child of `parent` other than `keep`, text nodes included
pub(crate) fn remove_children_except(parent: &Element, keep: &Element) {
    let children = parent.child_nodes();
    let stale: Vec<Node> = (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|child| !child.is_same_node(Some(keep.as_ref())))
        .collect();
    for child in stale {
        report("page", "remove placeholder", parent.remove_child(&child));
    }
}
