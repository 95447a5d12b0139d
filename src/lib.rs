//! Force-directed 3D graph layout with a Barnes-Hut accelerated
//! repelling force.
//!
//! The core loop: build a [`graph::Graph`], hand it to [`engine::Layout`]
//! along with a [`config::LayoutConfig`], then call
//! [`engine::Layout::calculate`] or [`engine::Layout::calculate_n`] and
//! read back [`engine::Layout::positions`]. Graph generation and
//! position export live alongside the core but never feed back into it;
//! both take a finished [`graph::Graph`] or position list as input.
//!
//! ```no_run
//! use force_layout3d::config::LayoutConfig;
//! use force_layout3d::engine::Layout;
//! use force_layout3d::graph::{Graph, Node};
//!
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("a")).unwrap();
//! graph.add_node(Node::new("b")).unwrap();
//! graph.add_link("a", "b").unwrap();
//!
//! let mut layout = Layout::new(graph, LayoutConfig::default()).unwrap();
//! layout.calculate_n(100).unwrap();
//! let positions = layout.positions();
//! ```

pub mod body;
pub mod config;
pub mod engine;
pub mod error;
pub mod forces;
pub mod formats;
pub mod generation;
pub mod graph;
pub mod integrator;
pub mod octree;
pub mod rules;

pub use body::Body;
pub use config::LayoutConfig;
pub use engine::Layout;
pub use error::{LayoutError, Result};
pub use graph::{Graph, Link, Node};
