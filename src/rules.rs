//! Force rules: the different ways a force can be spread across the body
//! set. Grounded directly on the original tool's `ForceRule` functions
//! (`ForEachLink`, `ForEachNode`, `BarneHutMethod`) — same three shapes,
//! rewritten to accumulate into `Body::force` instead of a side map.

use std::collections::HashMap;

use crate::body::Body;
use crate::forces::{Drag, Force, Repelling, Spring};
use crate::graph::Graph;
use crate::octree::Octree;

/// Which bodies a force is applied across.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Apply to both endpoints of every link, in opposite directions.
    PerLink,
    /// Apply to every body independently (no partner).
    PerNode,
    /// Apply to every pair of bodies, approximated via the octree.
    BarnesHut,
}

/// Runs `entry`'s force across `bodies`, accumulating into `Body::force`.
/// `id_index` maps a node id to its position in `bodies`; `theta` is the
/// Barnes-Hut opening angle, used only by [`Rule::BarnesHut`].
pub fn apply(
    kind: &Force,
    rule: Rule,
    graph: &Graph,
    bodies: &mut [Body],
    id_index: &HashMap<String, usize>,
    theta: f64,
) {
    match rule {
        Rule::PerLink => apply_per_link(kind, graph, bodies, id_index),
        Rule::PerNode => apply_per_node(kind, bodies),
        Rule::BarnesHut => apply_barnes_hut(kind, bodies, theta),
    }
}

fn apply_per_link(kind: &Force, graph: &Graph, bodies: &mut [Body], id_index: &HashMap<String, usize>) {
    let Force::Spring(spring) = kind else {
        return;
    };
    for link in graph.links() {
        let (Some(&i), Some(&j)) = (id_index.get(&link.source), id_index.get(&link.target)) else {
            continue;
        };
        if i == j {
            continue;
        }
        let f = spring.apply(&bodies[i], &bodies[j]);
        bodies[i].force += f;
        bodies[j].force -= f;
    }
}

fn apply_per_node(kind: &Force, bodies: &mut [Body]) {
    let Force::Drag(drag) = kind else {
        return;
    };
    for body in bodies.iter_mut() {
        let f = drag.apply(body);
        body.force += f;
    }
}

fn apply_barnes_hut(kind: &Force, bodies: &mut [Body], theta: f64) {
    let Force::Repelling(repelling) = kind else {
        return;
    };
    barnes_hut_with(repelling, bodies, theta);
}

/// Split out so tests (and [`all_pairs`]) can drive the repelling force
/// without going through the `Force`/`Rule` wrapper types.
fn barnes_hut_with(repelling: &Repelling, bodies: &mut [Body], theta: f64) {
    let immutable: Vec<Body> = bodies.to_vec();
    let tree = Octree::build(&immutable);
    for (i, body) in bodies.iter_mut().enumerate() {
        body.force += tree.force_on(i, repelling, theta);
    }
}

/// Direct O(N^2) repelling force, used by tests to cross-check the
/// Barnes-Hut approximation stays close for small bodies sets.
#[cfg(test)]
pub fn all_pairs(repelling: &Repelling, bodies: &mut [Body]) {
    let snapshot: Vec<Body> = bodies.to_vec();
    for (i, body) in bodies.iter_mut().enumerate() {
        for (j, other) in snapshot.iter().enumerate() {
            if i == j {
                continue;
            }
            body.force += repelling.apply(body, other);
        }
    }
}
