//! Host capabilities
//!
//! Everything the inspector reads from or writes to the inspected
//! document goes through `InspectHost`. Node handles are plain copyable
//! IDs; the inspector never owns or outlives the nodes behind them.

use std::fmt;

use fos_dom::{Document, NodeId};

/// Read access to the element tree plus the two host services the
/// inspector needs: selector evaluation and outline styling.
pub trait InspectHost {
    /// Non-owning element handle
    type Node: Copy + Eq + fmt::Debug;

    /// Tag name of an element. `None` for non-element nodes.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Raw `id` attribute, possibly empty
    fn id(&self, node: Self::Node) -> Option<&str>;

    /// Raw, space-delimited `class` attribute, possibly empty
    fn class_name(&self, node: Self::Node) -> Option<&str>;

    /// Parent element. `None` when the parent is the document itself or
    /// the node is detached.
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node>;

    /// Nearest preceding sibling that is an element
    fn previous_element_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Number of elements in the live document matching `selector`
    fn match_count(&self, selector: &str) -> usize;

    /// Set the element's `outline` style. An empty value removes it.
    fn set_outline(&mut self, node: Self::Node, value: &str);
}

impl InspectHost for Document {
    type Node = NodeId;

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tree().tag_name(node)
    }

    fn id(&self, node: NodeId) -> Option<&str> {
        self.tree().element(node)?.id()
    }

    fn class_name(&self, node: NodeId) -> Option<&str> {
        self.tree().element(node)?.class_name()
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.tree().parent_element(node)
    }

    fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.tree().previous_element_sibling(node)
    }

    fn match_count(&self, selector: &str) -> usize {
        fos_css::match_count(self, selector).unwrap_or_else(|err| {
            tracing::debug!("cannot evaluate {:?}: {}", selector, err);
            0
        })
    }

    fn set_outline(&mut self, node: NodeId, value: &str) {
        if let Some(elem) = self.tree_mut().element_mut(node) {
            elem.style.set_property("outline", value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_host_reads_attributes() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let tree = doc.tree_mut();
        let p = tree.create_element("P");
        tree.set_attribute(p, "id", "");
        tree.set_attribute(p, "class", "top lead");
        tree.append_child(body, p);

        assert_eq!(doc.tag_name(p), Some("p"));
        assert_eq!(doc.id(p), Some(""));
        assert_eq!(doc.class_name(p), Some("top lead"));
        assert_eq!(InspectHost::parent_element(&doc, p), Some(body));
        assert_eq!(doc.match_count("p.top"), 1);
    }

    #[test]
    fn test_unparseable_selector_counts_zero() {
        let doc = Document::default();
        assert_eq!(doc.match_count("div.a:b"), 0);
    }

    #[test]
    fn test_set_outline() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();

        doc.set_outline(body, "2px solid #E80C68");
        let style = &doc.tree().element(body).unwrap().style;
        assert_eq!(style.get_property("outline"), Some("2px solid #E80C68"));

        doc.set_outline(body, "");
        let style = &doc.tree().element(body).unwrap().style;
        assert_eq!(style.get_property("outline"), None);
    }
}
