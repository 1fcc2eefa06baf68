//! Browser page backed by `web_sys`.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::Page;

/// The live document of the current window.
#[derive(Debug, Clone)]
pub struct WebPage {
    document: Document,
}

impl WebPage {
    /// Wrap an existing document.
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The current window's document, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }
}

impl Page for WebPage {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_class(&self, class: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(&format!(".{class}")) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn classes(&self, node: &Element) -> Vec<String> {
        let list = node.class_list();

        (0..list.length()).filter_map(|index| list.item(index)).collect()
    }

    fn text(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlElement>() {
            Some(element) => element.inner_text(),
            None => node.text_content().unwrap_or_default(),
        }
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        match node.dyn_ref::<HtmlElement>() {
            Some(element) => element.set_inner_text(text),
            None => node.set_text_content(Some(text)),
        }
    }

    fn ancestor(&self, node: &Element, levels: usize) -> Option<Element> {
        let mut current = node.clone();

        for _ in 0..levels {
            current = current.parent_element()?;
        }

        Some(current)
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }
}
