//! In-memory page
//!
//! A small arena document used when no browser is around: headless runs and
//! tests. Nodes live in a [`SlotMap`]; detaching a node drops its whole
//! subtree from the arena, so stale handles simply stop resolving.

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use super::Page;

new_key_type! {
    /// Node Key
    pub struct NodeKey;
}

/// Errors raised while building an in-memory page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryPageError {
    /// The parent node is not part of the page.
    #[error("node is not part of the page")]
    UnknownNode,
}

/// Element description used to build a [`MemoryPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: FxHashMap<String, String>,
    text: String,
}

impl Element {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the element's `id`.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the element's own text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug)]
struct Node {
    element: Element,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// Arena-backed document.
#[derive(Debug)]
pub struct MemoryPage {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Create a page holding only a `body` root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();

        let root = nodes.insert(Node {
            element: Element::new("body"),
            parent: None,
            children: Vec::new(),
        });

        Self { nodes, root }
    }

    /// The document root.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryPageError::UnknownNode`] if `parent` is not part of the page.
    pub fn append(&mut self, parent: NodeKey, element: Element) -> Result<NodeKey, MemoryPageError> {
        if !self.nodes.contains_key(parent) {
            return Err(MemoryPageError::UnknownNode);
        }

        let key = self.nodes.insert(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });

        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(key);
        }

        Ok(key)
    }

    /// Whether the page holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Connected nodes in document order.
    fn descendants(&self) -> impl Iterator<Item = (NodeKey, &Node)> + '_ {
        let mut stack = vec![self.root];

        std::iter::from_fn(move || {
            let key = stack.pop()?;
            let node = self.nodes.get(key)?;

            stack.extend(node.children.iter().rev().copied());

            Some((key, node))
        })
    }

    fn collect_text(&self, key: NodeKey, out: &mut String) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };

        out.push_str(&node.element.text);

        for child in &node.children {
            self.collect_text(*child, out);
        }
    }

    fn drop_subtree(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.remove(key) else {
            return;
        };

        for child in node.children {
            self.drop_subtree(child);
        }
    }
}

impl Page for MemoryPage {
    type Node = NodeKey;

    fn element_by_id(&self, id: &str) -> Option<NodeKey> {
        self.descendants()
            .find(|(_, node)| node.element.id.as_deref() == Some(id))
            .map(|(key, _)| key)
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeKey> {
        self.descendants()
            .filter(|(_, node)| node.element.classes.iter().any(|c| c == class))
            .map(|(key, _)| key)
            .collect()
    }

    fn attribute(&self, node: &NodeKey, name: &str) -> Option<String> {
        self.nodes
            .get(*node)
            .and_then(|node| node.element.attributes.get(name).cloned())
    }

    fn classes(&self, node: &NodeKey) -> Vec<String> {
        self.nodes
            .get(*node)
            .map(|node| node.element.classes.clone())
            .unwrap_or_default()
    }

    fn text(&self, node: &NodeKey) -> String {
        let mut out = String::new();

        self.collect_text(*node, &mut out);

        out
    }

    fn set_text(&mut self, node: &NodeKey, text: &str) {
        let children = match self.nodes.get_mut(*node) {
            Some(node) => {
                node.element.text = text.to_string();
                std::mem::take(&mut node.children)
            }
            None => return,
        };

        for child in children {
            self.drop_subtree(child);
        }
    }

    fn ancestor(&self, node: &NodeKey, levels: usize) -> Option<NodeKey> {
        let mut current = *node;

        for _ in 0..levels {
            current = self.nodes.get(current)?.parent?;
        }

        self.nodes.contains_key(current).then_some(current)
    }

    fn remove(&mut self, node: &NodeKey) {
        if *node == self.root {
            return;
        }

        let parent = self.nodes.get(*node).and_then(|node| node.parent);

        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent.children.retain(|child| child != node);
        }

        self.drop_subtree(*node);
    }

    fn is_connected(&self, node: &NodeKey) -> bool {
        self.nodes.contains_key(*node)
    }
}
