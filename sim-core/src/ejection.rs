//! Timed flight of a decay product away from its source cluster.

use crate::{
    config::Config, nucleus::Nucleus, particle::Particle, scene::Scene, types::ClusterId,
};
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

/// What is being thrown out: a whole cluster (alpha) or a lone particle (beta).
#[derive(Debug)]
pub enum Ejecta {
    Cluster(Box<Nucleus>),
    Particle(Particle),
}

impl Ejecta {
    pub fn id(&self) -> &str {
        match self {
            Ejecta::Cluster(nucleus) => nucleus.id(),
            Ejecta::Particle(particle) => particle.id(),
        }
    }
}

/// Interpolated state of an ejection at some point of its flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Translation of the ejecta relative to where it was spawned.
    pub translation: Vec2,
    pub opacity: f32,
}

/// A decay product together with its trajectory.
///
/// The flight runs from `origin` to `origin + offset` over `duration` with
/// cubic-out easing while fading to transparent; afterwards the ejecta is
/// to be dropped.
#[derive(Debug)]
pub struct Ejection {
    pub source: ClusterId,
    pub ejecta: Ejecta,
    pub origin: Vec2,
    pub offset: Vec2,
    pub duration: Duration,
}

impl Ejection {
    /// Distance an ejecta travels away from a source of the given size.
    pub fn distance(source_size_aggregate: f32, factor: f32) -> f32 {
        source_size_aggregate.max(0.0).sqrt() * factor
    }

    /// Final offset for a launch at `angle_degrees`.
    pub fn offset_for(angle_degrees: f32, source_size_aggregate: f32, factor: f32) -> Vec2 {
        Vec2::from_angle(angle_degrees.to_radians()) * Self::distance(source_size_aggregate, factor)
    }

    /// Plans an ejection in a uniformly random direction.
    ///
    /// The distance scales with the *source* cluster, not with the ejecta.
    pub fn launch(
        source: impl Into<ClusterId>,
        ejecta: Ejecta,
        origin: Vec2,
        source_size_aggregate: f32,
        cfg: &Config,
        rng: &mut impl Rng,
    ) -> Self {
        let angle = rng.random_range(0.0..360.0f32);
        Self {
            source: source.into(),
            ejecta,
            origin,
            offset: Self::offset_for(angle, source_size_aggregate, cfg.ejection_distance_factor),
            duration: cfg.ejection_duration,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.origin + self.offset
    }

    /// Eased translation and opacity after `elapsed`, or `None` once the
    /// flight is over and the ejecta should be removed.
    pub fn sample(&self, elapsed: Duration) -> Option<Frame> {
        if elapsed >= self.duration {
            return None;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Some(Frame {
            translation: self.offset * cubic_out(t),
            opacity: 1.0 - t,
        })
    }

    /// Advances an ejected cluster's own simulation by one tick.
    ///
    /// Lone particles do not simulate; returns `false` for them.
    pub fn step(&mut self, scene: &mut dyn Scene) -> bool {
        match &mut self.ejecta {
            Ejecta::Cluster(nucleus) => nucleus.tick(scene),
            Ejecta::Particle(_) => false,
        }
    }
}

/// Cubic ease-out on `t` in `[0, 1]`.
pub fn cubic_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}
