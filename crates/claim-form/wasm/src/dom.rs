//! `UiBinding` over the browser DOM

use claim_form_core::{Position, UiBinding};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

/// DOM access for the claim form, optionally scoped to a root element
#[derive(Debug, Clone)]
pub struct DomBinding {
    document: Document,
    root: Option<Element>,
}

impl DomBinding {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            root: None,
        }
    }

    /// Restrict lookups to the subtree under `root`
    pub fn scoped(document: Document, root: Element) -> Self {
        Self {
            document,
            root: Some(root),
        }
    }

    /// Binding for the current window's document
    pub fn from_window() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }
}

/// Toggle `display` between `block` and `none`
pub(crate) fn set_display(node: &Element, visible: bool) {
    let Some(element) = node.dyn_ref::<HtmlElement>() else {
        return;
    };
    let display = if visible { "block" } else { "none" };
    if let Err(err) = element.style().set_property("display", display) {
        warn!(?err, "failed to set display");
    }
}

impl UiBinding for DomBinding {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        let found = match &self.root {
            Some(root) => root.query_selector(selector),
            None => self.document.query_selector(selector),
        };
        found.unwrap_or_else(|err| {
            warn!(selector, ?err, "invalid selector");
            None
        })
    }

    fn query_class(&self, class: &str) -> Vec<Element> {
        // HtmlCollection is live; snapshot it before anything is removed
        let collection = match &self.root {
            Some(root) => root.get_elements_by_class_name(class),
            None => self.document.get_elements_by_class_name(class),
        };
        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .collect()
    }

    fn value(&self, node: &Element) -> Option<String> {
        node.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
    }

    fn create_element(&mut self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn set_id(&mut self, node: &Element, id: &str) {
        node.set_id(id);
    }

    fn append_text(&mut self, node: &Element, wrapper: Option<&str>, text: &str) {
        let appended = match wrapper {
            Some(tag) => self.document.create_element(tag).and_then(|child| {
                child.set_text_content(Some(text));
                node.append_child(&child)
            }),
            None => node.append_child(&self.document.create_text_node(text)),
        };
        if let Err(err) = appended {
            warn!(?err, "failed to append feedback text");
        }
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            warn!(class, ?err, "failed to add class");
        }
    }

    fn insert_adjacent(&mut self, anchor: &Element, position: Position, node: &Element) {
        if let Err(err) = anchor.insert_adjacent_element(position.as_str(), node) {
            warn!(position = position.as_str(), ?err, "failed to insert feedback");
        }
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn set_visible(&mut self, node: &Element, visible: bool) {
        set_display(node, visible);
    }
}
