//! D3-style graph JSON, and position export in the JSON shape described
//! in §6: a top-level array of `{x, y, z}` objects.

use lin_alg::f64::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{Graph, Node};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionJson {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vec3> for PositionJson {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// Serializes positions to the §6 JSON shape, in graph node-insertion
/// order.
pub fn positions_to_json(positions: &[Vec3]) -> Result<String> {
    let entries: Vec<PositionJson> = positions.iter().copied().map(PositionJson::from).collect();
    Ok(serde_json::to_string(&entries)?)
}

#[derive(Debug, Serialize)]
struct D3LinkRef<'a> {
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Serialize)]
struct D3Graph<'a> {
    nodes: &'a [Node],
    links: Vec<D3LinkRef<'a>>,
}

/// Serializes a graph to D3's conventional `{nodes, links}` JSON shape.
pub fn graph_to_json(graph: &Graph) -> Result<String> {
    let links = graph
        .links()
        .iter()
        .map(|l| D3LinkRef {
            source: &l.source,
            target: &l.target,
        })
        .collect();
    let doc = D3Graph {
        nodes: graph.nodes(),
        links,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[derive(Debug, Deserialize)]
struct D3GraphInput {
    nodes: Vec<Node>,
    links: Vec<D3LinkInput>,
}

#[derive(Debug, Deserialize)]
struct D3LinkInput {
    source: String,
    target: String,
}

/// Parses D3-style graph JSON. Fails the same way [`Graph::add_node`] and
/// [`Graph::add_link`] would on malformed input (duplicate ids, unknown
/// link endpoints); a syntax error surfaces as [`crate::error::LayoutError::Json`].
pub fn graph_from_json(text: &str) -> Result<Graph> {
    let parsed: D3GraphInput = serde_json::from_str(text)?;
    let mut graph = Graph::with_capacity(parsed.nodes.len(), parsed.links.len());
    for node in parsed.nodes {
        graph.add_node(node)?;
    }
    for link in parsed.links {
        graph.add_link(link.source, link.target)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    #[test]
    fn positions_round_trip_order() {
        let positions = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 5.0)];
        let json = positions_to_json(&positions).unwrap();
        let parsed: Vec<PositionJson> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].x, 1.0);
        assert_eq!(parsed[1].z, 5.0);
    }

    #[test]
    fn graph_json_round_trips_nodes_and_links() {
        let mut g = Graph::new();
        g.add_node(Node::new("a")).unwrap();
        g.add_node(Node::new("b")).unwrap();
        g.add_link("a", "b").unwrap();

        let json = graph_to_json(&g).unwrap();
        let parsed = graph_from_json(&json).unwrap();
        assert_eq!(parsed.nodes().len(), 2);
        assert_eq!(parsed.links().len(), 1);
    }

    #[test]
    fn graph_from_json_rejects_unknown_link_endpoint() {
        let text = r#"{"nodes":[{"id":"a"}],"links":[{"source":"a","target":"missing"}]}"#;
        assert!(graph_from_json(text).is_err());
    }
}
