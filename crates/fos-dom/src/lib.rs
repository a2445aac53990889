//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree used as the inspection host.

mod attributes;
mod classlist;
mod document;
mod events;
mod node;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::DOMTokenList;
pub use document::Document;
pub use events::{
    Dispatch, EventListener, EventPhase, EventRegistry, EventType, HandlerId, ListenerOptions,
    UiEvent,
};
pub use node::{ElementData, Node, NodeData};
pub use style::StyleDeclaration;
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Convert the sentinel into `None`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}
