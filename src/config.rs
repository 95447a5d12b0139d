//! Layout configuration: the four tunable coefficients, their defaults,
//! and the automatic estimator that derives them from graph size.

use log::warn;

use crate::error::{LayoutError, Result};
use crate::forces::{Drag, Force, ForceEntry, Repelling, Spring};
use crate::rules::Rule;

/// Reference world extent used by [`estimate`]. Mirrors the constant the
/// original tool's auto-config path anchors its coefficients against.
pub const WORLD_SIZE: f64 = 2000.0;

/// Rest length `estimate` falls back to when the graph has no links,
/// since `optimal_edge` would otherwise divide by zero.
const FALLBACK_SPRING_LENGTH: f64 = 10.0;

/// Barnes-Hut opening angle. Not user-configurable in the original tool;
/// kept as a named constant here rather than hardcoded inline.
pub const DEFAULT_THETA: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Coefficient `C` of the repelling force; typically negative.
    pub repelling: f64,
    /// Hooke coefficient `s` of the spring force.
    pub spring_stiffness: f64,
    /// Spring rest length `L`.
    pub spring_length: f64,
    /// Drag coefficient `gamma`.
    pub drag: f64,
    /// Barnes-Hut opening angle.
    pub theta: f64,
    /// Whether the integrator caps velocity to unit length each step.
    pub normalize_velocity: bool,
}

impl Default for LayoutConfig {
    /// A reasonable starting point for small graphs. Callers with a known
    /// node/link count should prefer [`LayoutConfig::estimate`].
    fn default() -> Self {
        Self {
            repelling: -50.0,
            spring_stiffness: 0.02,
            spring_length: 30.0,
            drag: 0.8,
            theta: DEFAULT_THETA,
            normalize_velocity: true,
        }
    }
}

impl LayoutConfig {
    /// Derives a configuration from graph size, per §4.5's automatic
    /// configuration formula. A graph with no links would make
    /// `optimal_edge` divide by zero, so that case falls back to
    /// `FALLBACK_SPRING_LENGTH` instead, logged at `warn` level.
    pub fn estimate(num_nodes: usize, num_links: usize) -> Result<Self> {
        let nodes = num_nodes.max(1) as f64;

        let spring_length = if num_links == 0 {
            warn!("estimating layout config for a graph with no links; falling back to spring_length = {FALLBACK_SPRING_LENGTH}");
            FALLBACK_SPRING_LENGTH
        } else {
            0.1 * (WORLD_SIZE * WORLD_SIZE / num_links as f64).sqrt()
        };
        let repelling = -(WORLD_SIZE / nodes.cbrt() / 40.0);

        Ok(Self {
            repelling,
            spring_stiffness: 0.02,
            spring_length,
            drag: 0.8,
            theta: DEFAULT_THETA,
            normalize_velocity: true,
        })
    }

    /// Rejects non-finite coefficients before they reach the force list.
    pub fn validate(&self) -> Result<()> {
        for c in [self.repelling, self.spring_stiffness, self.spring_length, self.drag, self.theta] {
            if !c.is_finite() {
                return Err(LayoutError::NonFiniteCoefficient(c));
            }
        }
        Ok(())
    }

    /// The default three-force list this configuration produces, in
    /// registration order: repelling (Barnes-Hut), spring (per-link),
    /// drag (per-node).
    pub fn to_forces(&self) -> Vec<ForceEntry> {
        vec![
            ForceEntry {
                kind: Force::Repelling(Repelling {
                    coefficient: self.repelling,
                }),
                rule: Rule::BarnesHut,
            },
            ForceEntry {
                kind: Force::Spring(Spring {
                    stiffness: self.spring_stiffness,
                    rest_length: self.spring_length,
                }),
                rule: Rule::PerLink,
            },
            ForceEntry {
                kind: Force::Drag(Drag { coefficient: self.drag }),
                rule: Rule::PerNode,
            },
        ]
    }
}
