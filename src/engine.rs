//! The layout engine: owns bodies and the graph, holds the current force
//! list behind a reader-writer lock, and drives iteration.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::RwLock;

use lin_alg::f64::Vec3;
use log::{debug, info, trace};

use crate::body::Body;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::forces::ForceEntry;
use crate::graph::{Graph, Node};
use crate::integrator;
use crate::rules;

/// Movement-energy delta below which [`Layout::calculate`] considers the
/// system stable. Matches the original tool's `stableThreshold`.
const STABLE_THRESHOLD: f64 = 2.001;

/// The force list plus the configuration that produced it, guarded
/// together so `set_config` can't race a concurrent `update_positions`
/// reading half-replaced state.
struct ForceState {
    config: LayoutConfig,
    forces: Vec<ForceEntry>,
}

/// Deterministic initial placement for the `i`-th inserted body: a point
/// on an expanding spherical spiral, per §4.5.
fn spiral_position(i: usize) -> Vec3 {
    let i = i as f64;
    let radius = 10.0 * i.cbrt();
    let roll = i * PI * (3.0 - 5.0_f64.sqrt());
    let yaw = i * PI / 24.0;
    Vec3::new(radius * roll.cos(), radius * roll.sin(), radius * yaw.sin())
}

/// Owns a graph's bodies and drives force-directed layout over them.
pub struct Layout {
    graph: Graph,
    bodies: Vec<Body>,
    id_index: HashMap<String, usize>,
    state: RwLock<ForceState>,
}

impl Layout {
    /// Builds a layout over `graph`, placing each node's body on the
    /// spiral in insertion order and constructing the default force list
    /// from `config`.
    pub fn new(graph: Graph, config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        if graph.is_empty() {
            return Err(LayoutError::EmptyGraph);
        }

        let mut bodies = Vec::with_capacity(graph.nodes().len());
        let mut id_index = HashMap::with_capacity(graph.nodes().len());
        for (i, node) in graph.nodes().iter().enumerate() {
            let mass = node.weight.map(|w| w as f64).filter(|m| *m > 0.0).unwrap_or(1.0);
            bodies.push(Body::new(node.id.clone(), spiral_position(i), mass)?);
            id_index.insert(node.id.clone(), i);
        }

        info!("layout initialized: {} nodes, {} links", bodies.len(), graph.links().len());

        let forces = config.to_forces();
        Ok(Self {
            graph,
            bodies,
            id_index,
            state: RwLock::new(ForceState { config, forces }),
        })
    }

    /// Convenience constructor that derives its configuration from the
    /// graph's own size via [`LayoutConfig::estimate`].
    pub fn new_auto(graph: Graph) -> Result<Self> {
        let config = LayoutConfig::estimate(graph.nodes().len(), graph.links().len())?;
        Self::new(graph, config)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current positions, indexed to match graph node-insertion order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    /// Appends a node to the graph and inserts a body at the next spiral
    /// position. Fails if the id already exists.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        let id = node.id.clone();
        let next_index = self.bodies.len();
        self.graph.add_node(node)?;
        self.bodies.push(Body::new(id.clone(), spiral_position(next_index), 1.0)?);
        self.id_index.insert(id, next_index);
        Ok(())
    }

    /// Atomically replaces the force list with one generated from `c`.
    pub fn set_config(&mut self, config: LayoutConfig) -> Result<()> {
        config.validate()?;
        let forces = config.to_forces();
        let mut state = self.state.write().expect("force state lock poisoned");
        state.config = config;
        state.forces = forces;
        Ok(())
    }

    /// Overwrites current body positions from a list in graph-insertion
    /// order. Velocities are left untouched.
    pub fn set_positions(&mut self, positions: &[Vec3]) -> Result<()> {
        if positions.len() != self.bodies.len() {
            return Err(LayoutError::PositionCountMismatch {
                expected: self.bodies.len(),
                got: positions.len(),
            });
        }
        for (body, &p) in self.bodies.iter_mut().zip(positions) {
            body.position = p;
        }
        Ok(())
    }

    /// One iteration: reset accumulators, apply every configured force in
    /// registered order, then integrate. Returns the iteration's energy
    /// proxy.
    pub fn update_positions(&mut self) -> Result<f64> {
        for body in self.bodies.iter_mut() {
            body.reset_force();
        }

        let state = self.state.read().expect("force state lock poisoned");
        for entry in &state.forces {
            rules::apply(
                &entry.kind,
                entry.rule,
                &self.graph,
                &mut self.bodies,
                &self.id_index,
                state.config.theta,
            );
        }
        let normalize_velocity = state.config.normalize_velocity;
        drop(state);

        let energy = integrator::integrate(&mut self.bodies, normalize_velocity)?;
        trace!("iteration energy: {energy}");
        Ok(energy)
    }

    /// Runs `update_positions` exactly `n` times.
    pub fn calculate_n(&mut self, n: usize) -> Result<f64> {
        let mut energy = 0.0;
        for _ in 0..n {
            energy = self.update_positions()?;
        }
        Ok(energy)
    }

    /// Runs `update_positions` until successive energy values differ by
    /// less than [`STABLE_THRESHOLD`]. The first iteration always runs,
    /// since there is no previous energy to compare against yet.
    pub fn calculate(&mut self) -> Result<f64> {
        let mut prev = f64::INFINITY;
        let mut energy = f64::INFINITY;
        let mut iterations = 0usize;
        let mut first = true;
        while first || (energy - prev).abs() >= STABLE_THRESHOLD {
            first = false;
            prev = energy;
            energy = self.update_positions()?;
            iterations += 1;
            if iterations % 1000 == 0 {
                debug!("{iterations} iterations, energy {energy}");
            }
        }
        info!("layout stabilized after {iterations} iterations, energy {energy}");
        Ok(energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    fn two_node_graph() -> Graph {
        let mut g = Graph::new();
        g.add_node(Node::new("a")).unwrap();
        g.add_node(Node::new("b")).unwrap();
        g.add_link("a", "b").unwrap();
        g
    }

    #[test]
    fn rejects_empty_graph() {
        let result = Layout::new(Graph::new(), LayoutConfig::default());
        assert!(matches!(result, Err(LayoutError::EmptyGraph)));
    }

    #[test]
    fn spiral_places_first_node_at_origin() {
        let p = spiral_position(0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn positions_len_matches_node_count() {
        let layout = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        assert_eq!(layout.positions().len(), 2);
    }

    #[test]
    fn add_node_rejects_duplicate_id() {
        let mut layout = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        assert!(matches!(layout.add_node(Node::new("a")), Err(LayoutError::DuplicateNode(_))));
    }

    #[test]
    fn add_node_extends_positions() {
        let mut layout = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        layout.add_node(Node::new("c")).unwrap();
        assert_eq!(layout.positions().len(), 3);
    }

    #[test]
    fn set_positions_rejects_length_mismatch() {
        let mut layout = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        let result = layout.set_positions(&[Vec3::new_zero()]);
        assert!(matches!(result, Err(LayoutError::PositionCountMismatch { .. })));
    }

    #[test]
    fn update_positions_runs_and_moves_bodies() {
        let mut layout = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        let before = layout.positions();
        layout.update_positions().unwrap();
        let after = layout.positions();
        let moved = before.iter().zip(after.iter()).any(|(b, a)| (*a - *b).magnitude() > 0.0);
        assert!(moved);
    }

    #[test]
    fn calculate_n_runs_exactly_n_iterations() {
        let mut layout = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        let mut manual = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        layout.calculate_n(5).unwrap();
        for _ in 0..5 {
            manual.update_positions().unwrap();
        }
        for (a, b) in layout.positions().iter().zip(manual.positions().iter()) {
            assert!((*a - *b).magnitude() < 1e-9);
        }
    }

    #[test]
    fn calculate_runs_at_least_one_iteration_and_stabilizes() {
        let mut layout = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        let mut config = LayoutConfig::default();
        config.repelling = 0.0;
        config.spring_stiffness = 0.0;
        config.drag = 0.5;
        config.normalize_velocity = false;
        layout.set_config(config).unwrap();
        layout.bodies[0].velocity = Vec3::new(0.6, 0.6, 0.6);

        let start = layout.bodies[0].position;
        layout.calculate().unwrap();
        let moved = (layout.bodies[0].position - start).magnitude();
        assert!(moved > 0.0, "calculate() should run at least one iteration and move the body");
    }

    #[test]
    fn set_config_changes_subsequent_forces() {
        let mut layout = Layout::new(two_node_graph(), LayoutConfig::default()).unwrap();
        let mut zeroed = LayoutConfig::default();
        zeroed.repelling = 0.0;
        zeroed.spring_stiffness = 0.0;
        zeroed.drag = 0.0;
        layout.set_config(zeroed).unwrap();
        layout.update_positions().unwrap();
        for body in &layout.bodies {
            assert_eq!(body.force.magnitude(), 0.0);
        }
    }
}
