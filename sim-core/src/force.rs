//! Step-wise force layout driving a cluster's particles.
//!
//! The layout has a temperature (`alpha`) that starts at
//! [`Config::alpha_start`] on [`ForceLayout::start`] and cools by
//! [`Config::alpha_cooling`] every tick; once it falls below
//! [`Config::alpha_min`] the layout stops by itself. [`ForceLayout::stop`]
//! halts it early without touching particle state.
//!
//! The layout owns no particles. Callers pass the registry's slice to every
//! [`ForceLayout::step`], so after any add/remove the next step already sees
//! the new membership; [`ForceLayout::start`] must still be called to resize
//! the region and reheat.

use crate::{config::Config, delta_buffer::DeltaBuffer, particle::Particle, phases};
use glam::Vec2;

#[derive(Debug)]
pub struct ForceLayout {
    alpha: f32,
    size: Vec2,
    gravity: f32,
    cfg: Config,
    acc: DeltaBuffer,
    ticks: u64,
}

impl ForceLayout {
    /// Creates a stopped layout.
    pub fn new(cfg: Config) -> Self {
        Self {
            alpha: 0.0,
            size: Vec2::ZERO,
            gravity: cfg.gravity,
            cfg,
            acc: DeltaBuffer::default(),
            ticks: 0,
        }
    }

    /// Side length of the square region for a cluster of the given size.
    pub fn region_side(size_aggregate: f32) -> f32 {
        size_aggregate.max(0.0).sqrt()
    }

    /// (Re)initializes the region and reheats to `alpha_start`.
    ///
    /// ### Parameters
    /// - `size_aggregate` - Sum of member radii; the region side is its square root.
    /// - `gravity` - Pull toward the region center for this run.
    pub fn start(&mut self, size_aggregate: f32, gravity: f32) {
        let side = Self::region_side(size_aggregate);
        self.size = Vec2::splat(side);
        self.gravity = gravity;
        self.alpha = self.cfg.alpha_start;
        self.ticks = 0;
        log::debug!("force layout started: side={side:.3} gravity={gravity}");
    }

    /// Halts stepping; particle positions and velocities are kept.
    pub fn stop(&mut self) {
        self.alpha = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Ticks run since the last start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Replaces the tuning used from the next tick on.
    pub fn set_config(&mut self, cfg: Config) {
        self.cfg = cfg;
    }

    /// Runs one tick over `particles`, then hands them to `on_tick`.
    ///
    /// Cools first, then applies gravity, charge and Verlet integration.
    ///
    /// ### Parameters
    /// - `particles` - The cluster's current members.
    /// - `on_tick` - Runs after integration; collision resolution and
    ///   position write-back belong here.
    ///
    /// ### Returns
    /// - `true` if a tick ran.
    /// - `false` if the layout was stopped, or this call cooled it below
    ///   [`Config::alpha_min`]; `on_tick` is not called then.
    pub fn step(&mut self, particles: &mut [Particle], on_tick: impl FnOnce(&mut [Particle])) -> bool {
        if !self.is_running() {
            return false;
        }
        self.alpha *= self.cfg.alpha_cooling;
        if self.alpha < self.cfg.alpha_min {
            self.alpha = 0.0;
            log::debug!("force layout cooled after {} ticks", self.ticks);
            return false;
        }

        phases::gravity_phase(particles, self.center(), self.gravity, self.alpha);
        phases::charge_phase(particles, self.cfg.charge, self.alpha, &mut self.acc);
        phases::verlet_phase(particles, self.cfg.friction);
        self.ticks += 1;
        log::trace!("tick {} alpha={:.4}", self.ticks, self.alpha);

        on_tick(particles);
        true
    }
}
