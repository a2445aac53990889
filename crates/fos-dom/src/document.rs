//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with `html`, `head` and `body`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate `html`, `head` and `body` after the tree was built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let find = |parent: NodeId, tag: &str| {
            tree.element_children(parent)
                .find(|&id| tree.tag_name(id) == Some(tag))
                .unwrap_or(NodeId::NONE)
        };

        let html = find(tree.root(), "html");
        let (head, body) = if html.is_valid() {
            (find(html, "head"), find(html, "body"))
        } else {
            (NodeId::NONE, NodeId::NONE)
        };

        self.html_element = html;
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first `<title>` in `<head>`
    pub fn title(&self) -> String {
        let Some(head) = self.head() else {
            return String::new();
        };
        self.tree
            .element_children(head)
            .find(|&id| self.tree.tag_name(id) == Some("title"))
            .and_then(|title| self.tree.children(title).find_map(|(_, n)| n.as_text()))
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.to_option()
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element.to_option()
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element.to_option()
    }

    /// First element in tree order with the given id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(self.tree.root())
            .find(|&node| self.tree.get_attribute(node, "id") == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.tree.memory_usage() + self.url.capacity()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
