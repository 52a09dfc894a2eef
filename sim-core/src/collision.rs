//! Soft collision resolution between circular particles.
//!
//! [`Collider::new`] indexes the particle set once per tick;
//! [`Collider::resolve`] is then applied to every particle in turn and pushes
//! it apart from any overlapping neighbour. Both sides of a pair move, and
//! later particles in the same pass see positions already moved by earlier
//! ones, so the result depends on traversal order. Residual overlap is left
//! for subsequent ticks.

use crate::particle::Particle;
use crate::quadtree::{Bounds, QuadTree};
use std::f32::consts::TAU;

/// Minimum centre distance allowed between two particles.
///
/// Unequal radii are allowed to overlap further, so small particles can sit
/// inside larger ones like nested shells. Can be negative, in which case
/// the pair never collides.
pub fn min_separation(a: f32, b: f32) -> f32 {
    (a + b) - TAU * (a - b).abs()
}

/// Per-tick collision pass over one particle slice.
#[derive(Debug)]
pub struct Collider {
    tree: QuadTree,
    alpha: f32,
    window: f32,
}

impl Collider {
    /// Indexes `particles` at their current positions.
    ///
    /// ### Parameters
    /// - `particles` - The slice every later [`Collider::resolve`] call must use.
    /// - `alpha` - Damping of each correction, in `(0, 1]`.
    /// - `window` - Search half-size as a multiple of the particle radius.
    ///
    /// ### Returns
    /// A collider holding a quadtree snapshot of the positions.
    pub fn new(particles: &[Particle], alpha: f32, window: f32) -> Self {
        debug_assert!(alpha > 0.0 && alpha <= 1.0, "collision alpha must be in (0, 1]");
        Self {
            tree: QuadTree::build(particles.iter().map(|p| p.pos)),
            alpha,
            window,
        }
    }

    /// Pushes particle `index` and its overlapping neighbours apart.
    ///
    /// Subtrees whose build-time bounds miss the search window are pruned;
    /// distances are measured on live positions.
    ///
    /// ### Parameters
    /// - `index` - Particle to resolve.
    /// - `particles` - The slice the collider was built from; both particles
    ///   of an overlapping pair are moved in place.
    pub fn resolve(&self, index: usize, particles: &mut [Particle]) {
        let search = Bounds::around(particles[index].pos, particles[index].radius() * self.window);

        self.tree.visit(|node| {
            if let Some(other) = node.point
                && other != index
            {
                let delta = particles[index].pos - particles[other].pos;
                let l = delta.length();
                let r = min_separation(particles[index].radius(), particles[other].radius());
                if l < r && l != 0.0 {
                    let shift = delta * ((l - r) / l * self.alpha);
                    particles[index].pos -= shift;
                    particles[other].pos += shift;
                }
            }
            node.bounds.disjoint(&search)
        });
    }

    /// Runs [`Collider::resolve`] for every particle, in slice order.
    pub fn resolve_all(&self, particles: &mut [Particle]) {
        for i in 0..particles.len() {
            self.resolve(i, particles);
        }
    }
}
