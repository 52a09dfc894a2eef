//! Point quadtree rebuilt from scratch every time it is needed.
//!
//! Points are referenced by their index in the slice the tree was built
//! from, so callers keep ownership of the underlying particles and may
//! mutate them while visiting. Node bounds are fixed at build time.

use glam::Vec2;

/// Points closer than this (manhattan distance) are treated as coincident.
const COINCIDENT: f32 = 0.01;

/// Axis-aligned rectangle, `min` inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square window of half-size `half` around `center`.
    pub fn around(center: Vec2, half: f32) -> Self {
        Self {
            min: center - Vec2::splat(half),
            max: center + Vec2::splat(half),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// `true` if the two rectangles share no area or edge.
    pub fn disjoint(&self, other: &Bounds) -> bool {
        self.min.x > other.max.x
            || self.max.x < other.min.x
            || self.min.y > other.max.y
            || self.max.y < other.min.y
    }

    /// Bounding square of the given points.
    fn square_around(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(Vec2::ZERO, Vec2::ZERO);
        };
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        let side = (max - min).max_element();
        Self::new(min, min + Vec2::splat(side))
    }

    /// Quadrant of `p` relative to the center: bit 0 east, bit 1 north.
    fn index_of(&self, p: Vec2) -> usize {
        let mid = self.center();
        (usize::from(p.y >= mid.y) << 1) | usize::from(p.x >= mid.x)
    }

    fn quadrant(&self, index: usize) -> Bounds {
        let mid = self.center();
        let (mut min, mut max) = (self.min, self.max);
        if index & 1 == 1 {
            min.x = mid.x;
        } else {
            max.x = mid.x;
        }
        if index & 2 == 2 {
            min.y = mid.y;
        } else {
            max.y = mid.y;
        }
        Bounds::new(min, max)
    }
}

#[derive(Debug)]
pub struct QuadNode {
    /// Index of the point stored at this node, if any.
    pub point: Option<usize>,
    pub bounds: Bounds,
    children: [Option<usize>; 4],
}

impl QuadNode {
    fn new(bounds: Bounds) -> Self {
        Self {
            point: None,
            bounds,
            children: [None; 4],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

#[derive(Debug)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    positions: Vec<Vec2>,
}

impl QuadTree {
    /// Builds a tree over `positions`; point `i` refers to `positions[i]`.
    ///
    /// Non-finite positions are skipped.
    pub fn build(positions: impl IntoIterator<Item = Vec2>) -> Self {
        let positions: Vec<Vec2> = positions.into_iter().collect();
        let finite: Vec<Vec2> = positions.iter().copied().filter(|p| p.is_finite()).collect();
        let mut tree = Self {
            nodes: vec![QuadNode::new(Bounds::square_around(&finite))],
            positions,
        };
        for i in 0..tree.positions.len() {
            if tree.positions[i].is_finite() {
                tree.insert(i);
            }
        }
        tree
    }

    fn insert(&mut self, point: usize) {
        let p = self.positions[point];
        let mut node = 0;
        loop {
            let (leaf, resident) = {
                let current = &self.nodes[node];
                (current.is_leaf(), current.point)
            };
            if leaf {
                match resident {
                    None => {
                        self.nodes[node].point = Some(point);
                        return;
                    }
                    Some(existing) => {
                        let q = self.positions[existing];
                        if (q - p).abs().element_sum() >= COINCIDENT && self.splits(node, p) {
                            // Push the resident point down and keep descending with ours.
                            self.nodes[node].point = None;
                            let child = self.child_for(node, q);
                            self.nodes[child].point = Some(existing);
                        }
                        // Coincident points stay put; the newcomer goes one level down.
                    }
                }
            }
            node = self.child_for(node, p);
        }
    }

    /// Whether descending toward `p` still narrows the bounds.
    ///
    /// Far from the origin two points can sit less than one float step from
    /// a node's center; once the quadrant rounds back onto the node itself
    /// they are stored as coincident instead.
    fn splits(&self, node: usize, p: Vec2) -> bool {
        let bounds = self.nodes[node].bounds;
        bounds.quadrant(bounds.index_of(p)) != bounds
    }

    /// Child of `node` whose quadrant contains `p`, created on demand.
    fn child_for(&mut self, node: usize, p: Vec2) -> usize {
        let bounds = self.nodes[node].bounds;
        let index = bounds.index_of(p);
        if let Some(child) = self.nodes[node].children[index] {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(QuadNode::new(bounds.quadrant(index)));
        self.nodes[node].children[index] = Some(child);
        child
    }

    /// Pre-order traversal.
    ///
    /// `f` receives each node; returning `true` skips that node's children.
    pub fn visit(&self, mut f: impl FnMut(&QuadNode) -> bool) {
        let mut stack = vec![0usize];
        while let Some(node) = stack.pop() {
            let n = &self.nodes[node];
            if f(n) {
                continue;
            }
            // Reverse so children pop in quadrant order 0..4.
            for child in n.children.iter().rev().flatten() {
                stack.push(*child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> Vec<Vec2> {
        (0..n * n)
            .map(|i| Vec2::new((i % n) as f32, (i / n) as f32))
            .collect()
    }

    fn stored(tree: &QuadTree) -> Vec<usize> {
        let mut seen = Vec::new();
        tree.visit(|node| {
            if let Some(i) = node.point {
                seen.push(i);
            }
            false
        });
        seen.sort_unstable();
        seen
    }

    #[test]
    fn every_point_is_stored_once() {
        let points = grid(5);
        let tree = QuadTree::build(points.clone());
        assert_eq!(stored(&tree), (0..points.len()).collect::<Vec<_>>());
    }

    #[test]
    fn root_bounds_are_square() {
        let tree = QuadTree::build(vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 1.0)]);
        let mut root = None;
        tree.visit(|node| {
            if root.is_none() {
                root = Some(node.bounds);
            }
            true
        });
        assert_eq!(root, Some(Bounds::new(Vec2::ZERO, Vec2::splat(4.0))));
    }

    #[test]
    fn coincident_points_are_all_kept() {
        let tree = QuadTree::build(vec![Vec2::ONE, Vec2::ONE, Vec2::ONE, Vec2::new(3.0, 3.0)]);
        assert_eq!(stored(&tree), vec![0, 1, 2, 3]);
    }

    #[test]
    fn points_one_float_step_apart_far_from_origin() {
        // At 2^17 one step is 1/64: too far apart to be coincident, too close
        // for the midpoint to fall strictly between them.
        let x = 131_072.0f32;
        let next = |v: f32| f32::from_bits(v.to_bits() + 1);
        let points = vec![
            Vec2::new(x, 0.0),
            Vec2::new(next(x), 0.0),
            Vec2::new(next(next(x)), 0.0),
            Vec2::new(x, x),
        ];
        let tree = QuadTree::build(points);
        assert_eq!(stored(&tree), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_tree_visits_only_the_root() {
        let tree = QuadTree::build(Vec::new());
        assert!(stored(&tree).is_empty());
        let mut visits = 0;
        tree.visit(|_| {
            visits += 1;
            false
        });
        assert_eq!(visits, 1);
    }

    #[test]
    fn non_finite_positions_are_skipped() {
        let tree = QuadTree::build(vec![Vec2::ZERO, Vec2::NAN, Vec2::ONE]);
        assert_eq!(stored(&tree), vec![0, 2]);
    }

    #[test]
    fn pruning_skips_distant_subtrees() {
        let points = grid(8);
        let tree = QuadTree::build(points);
        let window = Bounds::around(Vec2::ZERO, 0.5);

        let mut pruned_visits = 0;
        let mut found = Vec::new();
        tree.visit(|node| {
            pruned_visits += 1;
            if let Some(i) = node.point {
                found.push(i);
            }
            node.bounds.disjoint(&window)
        });

        let mut all_visits = 0;
        tree.visit(|_| {
            all_visits += 1;
            false
        });
        assert!(pruned_visits < all_visits);
        assert!(found.contains(&0), "the point inside the window is reached");
    }
}
