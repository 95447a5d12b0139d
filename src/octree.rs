//! Barnes-Hut octree: a spatial index over the current body set used to
//! approximate the all-pairs repelling force in O(N log N).
//!
//! Cells live in a flat arena (`Vec<Cell>`) addressed by index rather than
//! as a tree of boxed nodes, following the arena-of-nodes shape the
//! `barnes_hut` crate this engine grew out of already used for its own
//! tree. Bodies are never owned here: a cell only ever stores the index
//! of a body in the caller's slice, and the whole tree is rebuilt from
//! scratch every iteration.

use std::collections::HashMap;

use lin_alg::f64::Vec3;

use crate::body::{Body, PseudoBody};
use crate::forces::repelling::{self, Repelling};

/// Minimum distance used wherever a division would otherwise be by (near)
/// zero: the repelling force's own floor, and the opening-criterion ratio
/// `width / r`. See Open Question 3 in DESIGN.md.
pub const DISTANCE_FLOOR: f64 = repelling::DISTANCE_FLOOR;

/// An axis-aligned cube: `min` is the low corner, `width` the edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub width: f64,
}

impl Aabb {
    /// The smallest cube that encloses every body's position, per §4.1:
    /// per-axis min/max, extended to a cube anchored at the min corner.
    pub fn bounding(bodies: &[Body]) -> Option<Self> {
        let mut iter = bodies.iter();
        let first = iter.next()?.position;
        let (mut min, mut max) = (first, first);
        for body in iter {
            let p = body.position;
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        let width = (max.x - min.x).max(max.y - min.y).max(max.z - min.z);
        // A single body, or several coincident ones, would otherwise yield
        // a zero-width box; floor it so octant division stays well-defined.
        let width = width.max(DISTANCE_FLOOR);
        Some(Self { min, width })
    }

    fn center(&self) -> Vec3 {
        let half = self.width / 2.0;
        Vec3::new(self.min.x + half, self.min.y + half, self.min.z + half)
    }

    /// The `i`-th octant (0..8) of this box, per the bit layout in §4.1:
    /// bit0 = +x half, bit1 = +y half, bit2 = +z half.
    fn octant(&self, i: usize) -> Self {
        let half = self.width / 2.0;
        let c = self.center();
        let min = Vec3::new(
            if i & 0b001 != 0 { c.x } else { self.min.x },
            if i & 0b010 != 0 { c.y } else { self.min.y },
            if i & 0b100 != 0 { c.z } else { self.min.z },
        );
        Self { min, width: half }
    }
}

/// Which octant of `bbox` contains `p`, per §4.1's bit layout. Ties (exact
/// equality with the center) resolve to the lower-coordinate side.
fn octant_index(bbox: &Aabb, p: Vec3) -> usize {
    let c = bbox.center();
    let mut idx = 0;
    if p.x > c.x {
        idx |= 0b001;
    }
    if p.y > c.y {
        idx |= 0b010;
    }
    if p.z > c.z {
        idx |= 0b100;
    }
    idx
}

/// Recursion cap mirroring `barnes_hut`'s `BhConfig::max_tree_depth`: past
/// this depth a leaf stops subdividing and instead accumulates every body
/// that lands in it, which keeps coincident or near-coincident positions
/// (e.g. two nodes placed at the same spot) from recursing forever.
const MAX_DEPTH: usize = 40;

#[derive(Debug)]
enum CellKind {
    Leaf { bodies: Vec<usize> },
    Internal { children: [Option<usize>; 8] },
}

#[derive(Debug)]
struct Cell {
    kind: CellKind,
    bbox: Aabb,
    center_of_mass: Vec3,
    total_mass: f64,
}

/// A handle into the tree returned by [`Octree::find_leaf`].
#[derive(Debug, Clone, Copy)]
pub struct LeafHandle {
    pub body_index: usize,
}

/// The Barnes-Hut spatial index. Holds non-owning index references into
/// `bodies` for the lifetime of one iteration; see module docs.
pub struct Octree<'b> {
    bodies: &'b [Body],
    cells: Vec<Cell>,
    root: Option<usize>,
    leaf_of: HashMap<String, usize>,
}

impl<'b> Octree<'b> {
    /// Builds a tree over `bodies` by inserting them one at a time, per
    /// §4.1's insertion algorithm. An empty slice yields an empty tree.
    pub fn build(bodies: &'b [Body]) -> Self {
        let mut tree = Self {
            bodies,
            cells: Vec::with_capacity(bodies.len() * 2),
            root: None,
            leaf_of: HashMap::with_capacity(bodies.len()),
        };

        let Some(bbox) = Aabb::bounding(bodies) else {
            return tree;
        };

        for i in 0..bodies.len() {
            tree.insert(i, bbox);
        }

        tree
    }

    fn push_leaf(&mut self, body_index: usize, bbox: Aabb) -> usize {
        let body = &self.bodies[body_index];
        let idx = self.cells.len();
        self.cells.push(Cell {
            kind: CellKind::Leaf { bodies: vec![body_index] },
            bbox,
            center_of_mass: body.position,
            total_mass: body.mass,
        });
        self.leaf_of.insert(body.id.clone(), idx);
        idx
    }

    fn insert(&mut self, body_index: usize, bbox: Aabb) {
        match self.root {
            None => {
                let idx = self.push_leaf(body_index, bbox);
                self.root = Some(idx);
            }
            Some(root) => self.insert_into(root, body_index, bbox, 0),
        }
    }

    /// Inserts `body_index` into the subtree rooted at `cell`, mutating
    /// cells in place so a cell's arena index never changes across its own
    /// promotion from leaf to internal.
    fn insert_into(&mut self, cell: usize, body_index: usize, bbox: Aabb, depth: usize) {
        match &self.cells[cell].kind {
            CellKind::Leaf { bodies } if bodies.contains(&body_index) => return,
            CellKind::Leaf { .. } if depth >= MAX_DEPTH => {
                self.leaf_of.insert(self.bodies[body_index].id.clone(), cell);
                if let CellKind::Leaf { bodies } = &mut self.cells[cell].kind {
                    bodies.push(body_index);
                }
            }
            CellKind::Leaf { .. } => {
                let existing = match std::mem::replace(&mut self.cells[cell].kind, CellKind::Internal { children: [None; 8] }) {
                    CellKind::Leaf { bodies } => bodies,
                    CellKind::Internal { .. } => unreachable!(),
                };
                for b in &existing {
                    self.leaf_of.remove(&self.bodies[*b].id);
                }
                // Re-insert the displaced bodies under the now-internal cell.
                // If any land in the same child octant this recurses again
                // and promotes that child in turn.
                for b in existing {
                    self.insert_into(cell, b, bbox, depth);
                }
                self.insert_into(cell, body_index, bbox, depth);
            }
            CellKind::Internal { children } => {
                let idx = octant_index(&bbox, self.bodies[body_index].position);
                let child_bbox = bbox.octant(idx);
                match children[idx] {
                    Some(child) => self.insert_into(child, body_index, child_bbox, depth + 1),
                    None => {
                        let child = self.push_leaf(body_index, child_bbox);
                        if let CellKind::Internal { children } = &mut self.cells[cell].kind {
                            children[idx] = Some(child);
                        }
                    }
                }
            }
        }
        self.recompute_aggregate(cell);
    }

    fn recompute_aggregate(&mut self, cell: usize) {
        let (center_of_mass, total_mass) = match &self.cells[cell].kind {
            CellKind::Leaf { bodies } => {
                let mut mass = 0.0;
                let mut weighted = Vec3::new_zero();
                for &b in bodies {
                    mass += self.bodies[b].mass;
                    weighted += self.bodies[b].position * self.bodies[b].mass;
                }
                let com = if mass > 0.0 { weighted / mass } else { Vec3::new_zero() };
                (com, mass)
            }
            CellKind::Internal { children } => {
                let mut mass = 0.0;
                let mut weighted = Vec3::new_zero();
                for child in children.iter().flatten() {
                    let c = &self.cells[*child];
                    mass += c.total_mass;
                    weighted += c.center_of_mass * c.total_mass;
                }
                let com = if mass > 0.0 {
                    weighted / mass
                } else {
                    Vec3::new_zero()
                };
                (com, mass)
            }
        };
        self.cells[cell].center_of_mass = center_of_mass;
        self.cells[cell].total_mass = total_mass;
    }

    /// Finds the leaf holding `id` in expected O(1).
    pub fn find_leaf(&self, id: &str) -> Option<LeafHandle> {
        let &cell = self.leaf_of.get(id)?;
        let bodies = match &self.cells[cell].kind {
            CellKind::Leaf { bodies } => bodies,
            CellKind::Internal { .. } => unreachable!("leaf_of only ever points at leaves"),
        };
        let &body_index = bodies.iter().find(|&&b| self.bodies[b].id == id)?;
        Some(LeafHandle { body_index })
    }

    /// The net repelling force on `target` from the whole tree, computed
    /// via the Barnes-Hut traversal in §4.1.
    pub fn force_on(&self, target: usize, force: &Repelling, theta: f64) -> Vec3 {
        match self.root {
            Some(root) => self.traverse(root, target, force, theta),
            None => Vec3::new_zero(),
        }
    }

    fn traverse(&self, cell: usize, target: usize, force: &Repelling, theta: f64) -> Vec3 {
        let c = &self.cells[cell];
        match &c.kind {
            CellKind::Leaf { bodies } => {
                let mut sum = Vec3::new_zero();
                for &body in bodies {
                    if body != target {
                        sum += force.apply(&self.bodies[target], &self.bodies[body]);
                    }
                }
                sum
            }
            CellKind::Internal { children } => {
                let target_pos = self.bodies[target].position;
                let r = (c.center_of_mass - target_pos).magnitude().max(DISTANCE_FLOOR);
                if c.bbox.width / r < theta {
                    let pseudo = PseudoBody {
                        position: c.center_of_mass,
                        mass: c.total_mass,
                    };
                    force.apply(&self.bodies[target], &pseudo)
                } else {
                    let mut sum = Vec3::new_zero();
                    for child in children.iter().flatten() {
                        sum += self.traverse(*child, target, force, theta);
                    }
                    sum
                }
            }
        }
    }

    /// Total mass and center of mass cached at the root, for tests that
    /// assert mass conservation (§8).
    pub fn root_aggregate(&self) -> Option<(Vec3, f64)> {
        self.root.map(|r| (self.cells[r].center_of_mass, self.cells[r].total_mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    fn body(id: &str, x: f64, y: f64, z: f64, mass: f64) -> Body {
        Body::new(id, Vec3::new(x, y, z), mass).unwrap()
    }

    #[test]
    fn octant_indexing_matches_spec_scenario_5() {
        let bbox = Aabb {
            min: Vec3::new(0.0, 0.0, 0.0),
            width: 10.0, // centered at (5,5,5)
        };
        assert_eq!(octant_index(&bbox, Vec3::new(9.0, 9.0, 9.0)), 7);
        assert_eq!(octant_index(&bbox, Vec3::new(1.0, 1.0, 1.0)), 0);
        assert_eq!(octant_index(&bbox, Vec3::new(9.0, 2.0, 9.0)), 5);
    }

    #[test]
    fn octant_tie_breaks_to_lower_side() {
        let bbox = Aabb {
            min: Vec3::new(0.0, 0.0, 0.0),
            width: 10.0,
        };
        assert_eq!(octant_index(&bbox, Vec3::new(5.0, 5.0, 5.0)), 0);
    }

    #[test]
    fn mass_aggregation_scenario_6() {
        let bodies = vec![body("a", 1.0, 1.0, 1.0, 10.0), body("b", 9.0, 9.0, 9.0, 10.0)];
        let tree = Octree::build(&bodies);
        let (com, mass) = tree.root_aggregate().unwrap();
        assert_eq!(mass, 20.0);
        assert!((com.x - 5.0).abs() < 1e-9);
        assert!((com.y - 5.0).abs() < 1e-9);
        assert!((com.z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn find_leaf_under_stress_scenario_7() {
        let bodies = vec![
            body("a", -2.0, 4.0, 1.0, 2.0),
            body("b", -6.0, 4.0, -1.0, 2.0),
            body("c", -1.0, -13.0, 3.0, 2.0),
            body("d", 14.0, 14.0, 5.0, 2.0),
            body("e", -19.0, -5.0, 9.0, 2.0),
        ];
        let tree = Octree::build(&bodies);
        for (i, b) in bodies.iter().enumerate() {
            let handle = tree.find_leaf(&b.id).expect("body should be indexed");
            assert_eq!(handle.body_index, i);
        }
    }

    #[test]
    fn single_leaf_subtree_equals_direct_force() {
        let bodies = vec![body("a", 0.0, 0.0, 0.0, 5.0), body("b", 50.0, 0.0, 0.0, 5.0)];
        let tree = Octree::build(&bodies);
        let force = Repelling { coefficient: -1.0 };
        let via_tree = tree.force_on(0, &force, 0.5);
        let direct = force.apply(&bodies[0], &bodies[1]);
        assert!((via_tree - direct).magnitude() < 1e-9);
    }

    #[test]
    fn empty_tree_contributes_zero() {
        let bodies: Vec<Body> = vec![];
        let tree = Octree::build(&bodies);
        assert!(tree.root_aggregate().is_none());
    }

    #[test]
    fn coincident_positions_do_not_overflow_the_stack() {
        let bodies: Vec<Body> = (0..200)
            .map(|i| body(&format!("n{i}"), 5.0, 5.0, 5.0, 1.0))
            .collect();
        let tree = Octree::build(&bodies);
        let (com, mass) = tree.root_aggregate().unwrap();
        assert_eq!(mass, 200.0);
        assert!((com.x - 5.0).abs() < 1e-9);
        for b in &bodies {
            assert!(tree.find_leaf(&b.id).is_some());
        }
    }
}
