//! DOM Tree (arena-based allocation)
//!
//! Node 0 is always the document node. Removed nodes stay in the arena,
//! detached, so their `NodeId`s remain valid handles.

use crate::{ElementData, Node, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Create a tree with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::document());
        Self { nodes }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Element data for `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Mutable element data for `id`, if it is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.local_name.as_str())
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(ElementData::new(tag)))
    }

    /// Create a detached element from prepared data
    pub fn create_element_with(&mut self, data: ElementData) -> NodeId {
        self.push(Node::element(data))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    /// Ignored when `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            tracing::debug!("refusing to append {:?} under its descendant {:?}", child, parent);
            return;
        }
        self.remove(child);

        let last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Detach a node from its parent. The subtree under it stays intact.
    pub fn remove(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Set an attribute on an element. Returns false for non-elements.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match self.element_mut(id) {
            Some(elem) => {
                elem.set_attr(name, value);
                true
            }
            None => false,
        }
    }

    /// Get an attribute of an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Iterate over direct children
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(parent).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate over direct children that are elements
    pub fn element_children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(parent)
            .filter(|(_, node)| node.is_element())
            .map(|(id, _)| id)
    }

    /// Parent node, document included
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.to_option()
    }

    /// Parent if it is an element. `None` when the parent is the document
    /// node or the node is detached.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        self.get(parent)?.is_element().then_some(parent)
    }

    /// Nearest preceding sibling that is an element
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.prev_sibling;
        while let Some(node) = self.get(current) {
            if node.is_element() {
                return Some(current);
            }
            current = node.prev_sibling;
        }
        None
    }

    /// Nearest following sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.next_sibling;
        while let Some(node) = self.get(current) {
            if node.is_element() {
                return Some(current);
            }
            current = node.next_sibling;
        }
        None
    }

    /// 1-based position among element siblings (`:nth-child` index)
    pub fn element_index(&self, id: NodeId) -> usize {
        let mut index = 1;
        let mut current = id;
        while let Some(prev) = self.previous_element_sibling(current) {
            index += 1;
            current = prev;
        }
        index
    }

    /// `ancestor` is `node` or lies on its parent chain
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        std::iter::successors(self.get(node).map(|_| node), |&n| self.parent(n))
            .any(|n| n == ancestor)
    }

    /// Element ancestors, innermost first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_element(id), move |&a| self.parent_element(a))
    }

    /// Nodes from the document node (or the detached subtree root) down to
    /// `id`, inclusive. This is the event propagation path.
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> =
            std::iter::successors(self.get(id).map(|_| id), |&n| self.parent(n)).collect();
        path.reverse();
        path
    }

    /// Elements under `root` in tree order (pre-order), `root` excluded
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let first = self.get(root).map_or(NodeId::NONE, |n| n.first_child);
        Descendants {
            tree: self,
            root,
            next: first,
        }
    }

    /// Rough heap usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node>()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order walk over the elements of a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Descendants<'_> {
    fn advance(&mut self, from: NodeId) -> NodeId {
        let Some(node) = self.tree.get(from) else {
            return NodeId::NONE;
        };
        if node.first_child.is_valid() {
            return node.first_child;
        }
        let mut current = from;
        while current != self.root {
            let Some(node) = self.tree.get(current) else {
                break;
            };
            if node.next_sibling.is_valid() {
                return node.next_sibling;
            }
            current = node.parent;
        }
        NodeId::NONE
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while self.next.is_valid() {
            let id = self.next;
            self.next = self.advance(id);
            if self.tree.get(id).is_some_and(Node::is_element) {
                return Some(id);
            }
        }
        None
    }
}
