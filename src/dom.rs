//! Arena-backed mutable document tree.
//!
//! html5ever builds an `RcDom`, which is then copied into a flat arena of
//! [`NodeId`]-addressed slots. Every pipeline stage mutates that arena in place:
//! relabeling tags, rewriting attributes, moving and removing subtrees. A
//! removed subtree is unlinked from its neighbours and its slots are marked
//! dead, so id lists collected before a pass can simply skip them.
//!
//! Serialization goes back through html5ever by implementing its
//! [`Serialize`](html5ever::serialize::Serialize) trait over the arena.

use crate::error::{ExtractError, Result};
use html5ever::serialize::{
    serialize, Serialize, SerializeOpts, Serializer, TraversalScope,
};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use std::io;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Stable handle to a node slot. Ids are never reused within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Document,
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    alive: bool,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            alive: true,
        }
    }
}

/// A parsed HTML document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// Parses `html` with html5ever and copies the result into the arena.
    ///
    /// Doctypes and processing instructions are dropped; `<template>` contents
    /// are not part of the main tree and are skipped as well.
    pub fn parse(html: &str) -> Result<Self> {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(|e| ExtractError::ParseError(e.to_string()))?;

        Ok(Self::from_rcdom(&dom))
    }

    fn from_rcdom(dom: &RcDom) -> Self {
        let mut doc = Self::new();
        let root = doc.root();

        let mut stack: Vec<(Handle, NodeId)> = dom
            .document
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), root))
            .collect();

        while let Some((handle, parent)) = stack.pop() {
            let data = match handle.data {
                RcNodeData::Element {
                    ref name,
                    ref attrs,
                    ..
                } => NodeData::Element {
                    tag: name.local.to_string().to_ascii_lowercase(),
                    attrs: attrs
                        .borrow()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), String::from(&*attr.value)))
                        .collect(),
                },
                RcNodeData::Text { ref contents } => {
                    NodeData::Text(String::from(&**contents.borrow()))
                }
                RcNodeData::Comment { ref contents } => {
                    NodeData::Comment(String::from(&**contents))
                }
                _ => continue,
            };

            let id = doc.push(data);
            doc.append_child(parent, id);

            for child in handle.children.borrow().iter().rev() {
                stack.push((child.clone(), id));
            }
        }

        doc
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    /// Whether the node is still part of the document (or of a detached
    /// container built from it). Removed subtrees report `false`.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).alive
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Element { .. })
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Text(_))
    }

    pub fn is_comment(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Comment(_))
    }

    /// Lowercase tag name, or `""` for non-element nodes.
    pub fn tag_name(&self, id: NodeId) -> &str {
        match &self.node(id).data {
            NodeData::Element { tag, .. } => tag,
            _ => "",
        }
    }

    /// Attribute value, or `""` when absent or not an element.
    pub fn attr(&self, id: NodeId, name: &str) -> &str {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
                .unwrap_or(""),
            _ => "",
        }
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs.iter().any(|(key, _)| key == name),
            _ => false,
        }
    }

    /// All attributes of an element in source order.
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            match attrs.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            attrs.retain(|(key, _)| key != name);
        }
    }

    /// Changes an element's tag in place, keeping attributes and children.
    pub fn rename(&mut self, id: NodeId, new_tag: &str) {
        if let NodeData::Element { tag, .. } = &mut self.node_mut(id).data {
            *tag = new_tag.to_string();
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Parent only if it is an element (the document root is not).
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&parent| self.is_element(parent))
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    #[cfg(test)]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.first_child(id),
        }
    }

    /// Element children only.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(move |&child| self.is_element(child))
    }

    /// Pre-order walk of everything below `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: self.first_child(id),
        }
    }

    /// Descendant elements with the given tag, in document order.
    ///
    /// The result is collected so callers may mutate the tree while iterating;
    /// check [`is_alive`](Self::is_alive) before touching each id.
    pub fn elements_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|&node| self.tag_name(node) == tag)
            .collect()
    }

    /// Every descendant element, in document order.
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|&node| self.is_element(node))
            .collect()
    }

    /// Whether some ancestor strictly between `id` and `stop` has the tag.
    pub fn has_ancestor_tag(&self, id: NodeId, tag: &str, stop: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == stop {
                return false;
            }
            if self.tag_name(node) == tag {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Concatenated character data of the node and all its descendants.
    pub fn text(&self, id: NodeId) -> String {
        if let NodeData::Text(text) = &self.node(id).data {
            return text.clone();
        }
        let mut out = String::new();
        for node in self.descendants(id) {
            if let NodeData::Text(text) = &self.node(node).data {
                out.push_str(text);
            }
        }
        out
    }

    /// Length of [`text`](Self::text) in characters.
    pub fn text_len(&self, id: NodeId) -> usize {
        if let NodeData::Text(text) = &self.node(id).data {
            return text.chars().count();
        }
        self.descendants(id)
            .map(|node| match &self.node(node).data {
                NodeData::Text(text) => text.chars().count(),
                _ => 0,
            })
            .sum()
    }

    pub fn is_whitespace_text(&self, id: NodeId) -> bool {
        match &self.node(id).data {
            NodeData::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
        })
    }

    /// Unlinks `id` from its parent and siblings. The subtree stays alive and
    /// can be re-inserted elsewhere.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = self.node(id);
            (node.parent, node.prev_sibling, node.next_sibling)
        };

        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = next,
            None => {
                if let Some(parent) = parent {
                    self.node_mut(parent).first_child = next;
                }
            }
        }
        match next {
            Some(next) => self.node_mut(next).prev_sibling = prev,
            None => {
                if let Some(parent) = parent {
                    self.node_mut(parent).last_child = prev;
                }
            }
        }

        let node = self.node_mut(id);
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Removes the subtree rooted at `id` permanently.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        let dead: Vec<NodeId> = std::iter::once(id).chain(self.descendants(id)).collect();
        for node in dead {
            self.node_mut(node).alive = false;
        }
    }

    /// Appends `child` as the last child of `parent`, moving it if attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.node(parent).last_child;
        {
            let node = self.node_mut(child);
            node.parent = Some(parent);
            node.prev_sibling = last;
        }
        match last {
            Some(last) => self.node_mut(last).next_sibling = Some(child),
            None => self.node_mut(parent).first_child = Some(child),
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Inserts `new` immediately before `reference`.
    pub fn insert_before(&mut self, reference: NodeId, new: NodeId) {
        self.detach(new);
        let (parent, prev) = {
            let node = self.node(reference);
            (node.parent, node.prev_sibling)
        };
        {
            let node = self.node_mut(new);
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = Some(reference);
        }
        self.node_mut(reference).prev_sibling = Some(new);
        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = Some(new),
            None => {
                if let Some(parent) = parent {
                    self.node_mut(parent).first_child = Some(new);
                }
            }
        }
    }

    /// Inserts `new` immediately after `reference`.
    pub fn insert_after(&mut self, reference: NodeId, new: NodeId) {
        match self.next_sibling(reference) {
            Some(next) => self.insert_before(next, new),
            None => {
                if let Some(parent) = self.parent(reference) {
                    self.append_child(parent, new);
                }
            }
        }
    }

    /// Wraps `id` in a new element with `tag`, returning the wrapper.
    pub fn wrap(&mut self, id: NodeId, tag: &str) -> NodeId {
        let wrapper = self.create_element(tag);
        self.insert_before(id, wrapper);
        self.append_child(wrapper, id);
        wrapper
    }

    /// Serializes the node itself and its subtree.
    #[cfg(test)]
    pub fn outer_html(&self, id: NodeId) -> io::Result<String> {
        self.serialize_with(id, TraversalScope::IncludeNode)
    }

    /// Serializes the children of the node.
    pub fn inner_html(&self, id: NodeId) -> io::Result<String> {
        self.serialize_with(id, TraversalScope::ChildrenOnly(None))
    }

    fn serialize_with(&self, id: NodeId, traversal_scope: TraversalScope) -> io::Result<String> {
        let mut bytes = Vec::new();
        let opts = SerializeOpts {
            traversal_scope,
            ..Default::default()
        };
        serialize(&mut bytes, &SerializableNode { doc: self, id }, opts)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.next_sibling(current);
        Some(current)
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;

        self.next = match self.doc.first_child(current) {
            Some(child) => Some(child),
            None => {
                let mut node = current;
                loop {
                    if node == self.root {
                        break None;
                    }
                    if let Some(sibling) = self.doc.next_sibling(node) {
                        break Some(sibling);
                    }
                    match self.doc.parent(node) {
                        Some(parent) if parent != self.root => node = parent,
                        _ => break None,
                    }
                }
            }
        };

        Some(current)
    }
}

struct SerializableNode<'a> {
    doc: &'a Document,
    id: NodeId,
}

enum SerializeOp {
    Open(NodeId),
    Close(QualName),
}

fn element_name(tag: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag))
}

fn attribute_name(key: &str) -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from(key))
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let mut ops: Vec<SerializeOp> = match traversal_scope {
            TraversalScope::IncludeNode => vec![SerializeOp::Open(self.id)],
            TraversalScope::ChildrenOnly(_) => {
                let mut children: Vec<SerializeOp> =
                    self.doc.children(self.id).map(SerializeOp::Open).collect();
                children.reverse();
                children
            }
        };

        while let Some(op) = ops.pop() {
            match op {
                SerializeOp::Open(id) => match self.doc.data(id) {
                    NodeData::Element { tag, attrs } => {
                        let name = element_name(tag);
                        let names: Vec<(QualName, &str)> = attrs
                            .iter()
                            .map(|(key, value)| (attribute_name(key), value.as_str()))
                            .collect();
                        let attrs = names.iter().map(|(key, value)| (key, *value));
                        serializer.start_elem(name.clone(), attrs)?;

                        ops.push(SerializeOp::Close(name));
                        let mut children: Vec<NodeId> = self.doc.children(id).collect();
                        children.reverse();
                        ops.extend(children.into_iter().map(SerializeOp::Open));
                    }
                    NodeData::Text(text) => serializer.write_text(text)?,
                    NodeData::Comment(text) => serializer.write_comment(text)?,
                    NodeData::Document => {
                        let mut children: Vec<NodeId> = self.doc.children(id).collect();
                        children.reverse();
                        ops.extend(children.into_iter().map(SerializeOp::Open));
                    }
                },
                SerializeOp::Close(name) => serializer.end_elem(name)?,
            }
        }

        Ok(())
    }
}
