//! Page
//!
//! The document seam. The handler only ever reads attributes and text, swaps
//! text, walks up to an ancestor and detaches a subtree, so that is all a
//! page has to offer.

use std::fmt;

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{Element, MemoryPage, MemoryPageError, NodeKey};

/// A document the cart handler can read from and render into.
pub trait Page {
    /// Handle to a node in this document.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Look up a connected element by its `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All connected elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<Self::Node>;

    /// Value of the attribute `name` on `node`.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Class list of `node`.
    fn classes(&self, node: &Self::Node) -> Vec<String>;

    /// Rendered text of `node`.
    fn text(&self, node: &Self::Node) -> String;

    /// Replace the text of `node`.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// The ancestor `levels` steps above `node`.
    fn ancestor(&self, node: &Self::Node, levels: usize) -> Option<Self::Node>;

    /// Detach `node` and its subtree. Detaching a detached node does nothing.
    fn remove(&mut self, node: &Self::Node);

    /// Whether `node` is still part of the document.
    fn is_connected(&self, node: &Self::Node) -> bool;
}
