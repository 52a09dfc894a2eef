//! The phases of one force-layout tick.
//!
//! A tick runs, in order:
//! 1. [`gravity_phase`] — every particle is pulled toward the region
//!    center, moving its current position.
//! 2. [`charge_phase`] — pairwise repulsion is accumulated into a
//!    [`DeltaBuffer`] and applied to the previous positions, which the
//!    verlet step turns into velocity.
//! 3. [`verlet_phase`] — positions advance by their damped velocity and
//!    the pre-step position becomes the new previous position.
//!
//! Collision resolution is not a phase; it runs in the tick callback
//! after these (see [`crate::force::ForceLayout::step`]).

use crate::{delta_buffer::DeltaBuffer, particle::Particle};
use glam::Vec2;

/// Pulls every particle toward `center`.
///
/// Each position moves by `(center - pos) * alpha * gravity`.
///
/// ### Parameters
/// - `particles` - Particles to move; only `pos` is written.
/// - `center` - Attraction point, the middle of the layout region.
/// - `gravity` - Pull strength of the cluster.
/// - `alpha` - Current layout temperature.
pub fn gravity_phase(particles: &mut [Particle], center: Vec2, gravity: f32, alpha: f32) {
    let k = alpha * gravity;
    if k == 0.0 {
        return;
    }
    for p in particles.iter_mut() {
        p.pos += (center - p.pos) * k;
    }
}

/// Applies uniform pairwise charge between all particles.
///
/// For each ordered pair `(i, j)` with distinct positions, particle `i`
/// receives `-(pos_j - pos_i) * charge * alpha / d²` on its previous
/// position. A negative `charge` therefore pushes `prev` toward the other
/// particle, which the following [`verlet_phase`] turns into velocity away
/// from it.
///
/// ### Parameters
/// - `particles` - Particles to affect; only `prev` is written.
/// - `charge` - Charge shared by every particle (negative repels).
/// - `alpha` - Current layout temperature.
/// - `acc` - Scratch buffer, resized and cleared here.
pub fn charge_phase(particles: &mut [Particle], charge: f32, alpha: f32, acc: &mut DeltaBuffer) {
    acc.ensure_len(particles.len());
    let k = charge * alpha;
    if k == 0.0 {
        return;
    }

    for i in 0..particles.len() {
        for j in 0..particles.len() {
            if i == j {
                continue;
            }
            let d = particles[j].pos - particles[i].pos;
            let d2 = d.length_squared();
            if d2 > 0.0 {
                acc.add(i, -d * (k / d2));
            }
        }
    }

    for (i, delta) in acc.nonzero() {
        particles[i].prev += delta;
    }
}

/// Advances every particle by its damped velocity.
///
/// `pos` becomes `pos + (pos - prev) * friction` and `prev` takes the old
/// `pos`.
///
/// ### Parameters
/// - `particles` - Particles to integrate.
/// - `friction` - Fraction of the velocity kept.
pub fn verlet_phase(particles: &mut [Particle], friction: f32) {
    for p in particles.iter_mut() {
        let settled = p.pos;
        p.pos -= (p.prev - settled) * friction;
        p.prev = settled;
    }
}
