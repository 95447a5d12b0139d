//! Parametric graph generators for demos, benchmarks, and tests. None of
//! these influence layout: each just builds a [`Graph`] with a
//! recognizable topology.

use rand::Rng;

use crate::error::Result;
use crate::graph::{Graph, Node};

fn node_id(i: usize) -> String {
    i.to_string()
}

fn grid_graph(rows: usize, cols: usize) -> Result<Graph> {
    let mut g = Graph::with_capacity(rows * cols, rows * cols * 2);
    for y in 0..rows {
        for x in 0..cols {
            g.add_node(Node::new(node_id(x + y * cols)))?;
        }
    }
    for y in 0..rows {
        for x in 0..cols {
            let idx = x + y * cols;
            if x > 0 {
                g.add_link(node_id(idx), node_id(idx - 1))?;
            }
            if y > 0 {
                g.add_link(node_id(idx), node_id(x + (y - 1) * cols))?;
            }
        }
    }
    Ok(g)
}

/// A path graph: node `i` linked to node `i - 1`.
pub fn line(nodes: usize) -> Result<Graph> {
    let mut g = Graph::with_capacity(nodes, nodes.saturating_sub(1));
    for i in 0..nodes {
        g.add_node(Node::new(node_id(i)))?;
        if i > 0 {
            g.add_link(node_id(i), node_id(i - 1))?;
        }
    }
    Ok(g)
}

/// A cycle graph: `nodes` nodes arranged in a ring.
pub fn circle(nodes: usize) -> Result<Graph> {
    let mut g = Graph::with_capacity(nodes, nodes);
    for i in 0..nodes {
        g.add_node(Node::new(node_id(i)))?;
    }
    for i in 0..nodes {
        let j = if i == nodes - 1 { 0 } else { i + 1 };
        g.add_link(node_id(i), node_id(j))?;
    }
    Ok(g)
}

/// A `rows` by `cols` grid, linked to left and top neighbors.
pub fn grid_2d(rows: usize, cols: usize) -> Result<Graph> {
    grid_graph(rows, cols)
}

/// A `rows` by `cols` by `levels` grid, linked to left, top, and
/// below-level neighbors.
pub fn grid_3d(rows: usize, cols: usize, levels: usize) -> Result<Graph> {
    let mut g = Graph::with_capacity(rows * cols * levels, rows * cols * levels * 3);
    for k in 0..levels {
        for i in 0..rows {
            for j in 0..cols {
                let level = k * rows * cols;
                let idx = j + i * rows + level;
                g.add_node(Node::new(node_id(idx)))?;
            }
        }
    }
    for k in 0..levels {
        for i in 0..rows {
            for j in 0..cols {
                let level = k * rows * cols;
                let idx = j + i * rows + level;
                if j > 0 {
                    g.add_link(node_id(idx), node_id(j - 1 + i * rows + level))?;
                }
                if i > 0 {
                    g.add_link(node_id(idx), node_id(j + (i - 1) * rows + level))?;
                }
                if k > 0 {
                    g.add_link(node_id(idx), node_id(j + i * rows + (k - 1) * rows * cols))?;
                }
            }
        }
    }
    Ok(g)
}

/// A king's-graph grid: like [`grid_2d`], plus diagonal neighbors, so
/// every interior node has up to 8 neighbors instead of 4.
pub fn king(rows: usize, cols: usize) -> Result<Graph> {
    let mut g = Graph::with_capacity(rows * cols, rows * cols * 4);
    for r in 0..rows {
        for c in 0..cols {
            g.add_node(Node::new(node_id(c + r * rows)))?;
        }
    }
    for r in 0..rows {
        for c in 0..cols {
            let idx = c + r * rows;
            if c > 0 {
                g.add_link(node_id(idx), node_id(c - 1 + r * rows))?;
            }
            if c > 0 && r > 0 {
                g.add_link(node_id(idx), node_id(c - 1 + (r - 1) * rows))?;
            }
            if c < cols - 1 && r > 0 {
                g.add_link(node_id(idx), node_id(c + 1 + (r - 1) * rows))?;
            }
            if r > 0 {
                g.add_link(node_id(idx), node_id(c + (r - 1) * rows))?;
            }
        }
    }
    Ok(g)
}

/// A Watts-Strogatz small-world graph: a ring lattice with each node
/// linked to its `k` nearest neighbors, then edges rewired to a random
/// target with probability `beta`.
pub fn watts_strogatz(nodes: usize, k: usize, beta: f64, rng: &mut impl Rng) -> Result<Graph> {
    let mut g = Graph::with_capacity(nodes, nodes * k);
    for i in 0..nodes {
        g.add_node(Node::new(node_id(i)))?;
    }

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for i in 0..nodes {
        for step in 1..=k / 2 {
            let j = (i + step) % nodes;
            edges.push((i, j));
        }
    }

    for (i, j) in edges {
        let target = if nodes > 2 && rng.random::<f64>() < beta {
            loop {
                let candidate = rng.random_range(0..nodes);
                if candidate != i && candidate != j {
                    break candidate;
                }
            }
        } else {
            j
        };
        g.add_link(node_id(i), node_id(target))?;
    }

    Ok(g)
}
