//! Graph model: nodes and undirected links, supplied by the caller and
//! read-only once layout begins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// A graph node. `weight` and `group` are carried through for external
/// consumers (sizing, coloring) but unused by the layout core itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<i64>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            weight: None,
            group: None,
        }
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_group(mut self, group: i64) -> Self {
        self.group = Some(group);
        self
    }
}

/// An undirected link between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Graph data: an ordered node list and an ordered link list, plus an
/// id -> insertion-index cache kept in sync as nodes/links are added.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
    node_index: HashMap<String, usize>,
    link_counts: HashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, links: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            links: Vec::with_capacity(links),
            node_index: HashMap::with_capacity(nodes),
            link_counts: HashMap::with_capacity(nodes),
        }
    }

    /// Appends a node. Fails if its id is already present.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.node_index.contains_key(&node.id) {
            return Err(LayoutError::DuplicateNode(node.id));
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Appends a link. Fails if either endpoint is unknown.
    pub fn add_link(&mut self, source: impl Into<String>, target: impl Into<String>) -> Result<()> {
        let source = source.into();
        let target = target.into();
        if !self.node_index.contains_key(&source) {
            return Err(LayoutError::UnknownNode(source));
        }
        if !self.node_index.contains_key(&target) {
            return Err(LayoutError::UnknownNode(target));
        }
        *self.link_counts.entry(source.clone()).or_insert(0) += 1;
        *self.link_counts.entry(target.clone()).or_insert(0) += 1;
        self.links.push(Link::new(source, target));
        Ok(())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Index of a node by id, in insertion order. O(1) expected.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// Whether `id` is an endpoint of any link. Mirrors the original tool's
    /// node-links cache, used by consumers that skip isolated nodes when
    /// exporting.
    pub fn node_has_links(&self, id: &str) -> bool {
        self.link_counts.get(id).copied().unwrap_or(0) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_node() {
        let mut g = Graph::new();
        g.add_node(Node::new("a")).unwrap();
        assert!(matches!(
            g.add_node(Node::new("a")),
            Err(LayoutError::DuplicateNode(_))
        ));
    }

    #[test]
    fn rejects_link_to_unknown_node() {
        let mut g = Graph::new();
        g.add_node(Node::new("a")).unwrap();
        assert!(matches!(
            g.add_link("a", "b"),
            Err(LayoutError::UnknownNode(_))
        ));
    }

    #[test]
    fn tracks_link_counts() {
        let mut g = Graph::new();
        g.add_node(Node::new("a")).unwrap();
        g.add_node(Node::new("b")).unwrap();
        g.add_node(Node::new("c")).unwrap();
        g.add_link("a", "b").unwrap();
        assert!(g.node_has_links("a"));
        assert!(g.node_has_links("b"));
        assert!(!g.node_has_links("c"));
    }
}
