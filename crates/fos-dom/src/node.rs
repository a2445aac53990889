//! DOM Node
//!
//! Nodes link to each other through `NodeId` indices into the owning
//! `DomTree`, never through pointers.

use crate::{DOMTokenList, NamedNodeMap, NodeId, StyleDeclaration};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(data: ElementData) -> Self {
        Self::with_data(NodeData::Element(data))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a doctype node
    pub fn doctype(name: impl Into<String>) -> Self {
        Self::with_data(NodeData::Doctype { name: name.into() })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Check if this is the document node
    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// `nodeName` as the DOM reports it
    pub fn node_name(&self) -> &str {
        match &self.data {
            NodeData::Document => "#document",
            NodeData::Doctype { name } => name,
            NodeData::Element(e) => &e.local_name,
            NodeData::Text(_) => "#text",
            NodeData::Comment(_) => "#comment",
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lowercase local name
    pub local_name: String,
    /// Attributes in source order
    pub attrs: NamedNodeMap,
    /// Parsed `class` attribute
    pub class_list: DOMTokenList,
    /// Inline style (`style` attribute)
    pub style: StyleDeclaration,
}

impl ElementData {
    pub fn new(local_name: &str) -> Self {
        Self {
            local_name: local_name.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    /// Set an attribute, keeping the class list and inline style in sync
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "class" => self.class_list.set_value(value),
            "style" => self.style = StyleDeclaration::parse(value),
            _ => {}
        }
        self.attrs.set_attribute(name, value);
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) -> bool {
        match name {
            "class" => self.class_list = DOMTokenList::new(),
            "style" => self.style = StyleDeclaration::default(),
            _ => {}
        }
        self.attrs.remove_named_item(name).is_some()
    }

    /// `id` attribute, possibly empty
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Raw `class` attribute, possibly empty
    pub fn class_name(&self) -> Option<&str> {
        self.get_attr("class")
    }
}
