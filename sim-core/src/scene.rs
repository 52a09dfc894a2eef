//! The rendering side of the simulation.
//!
//! A [`Scene`] receives every structural change and position update as a
//! callback. Nothing in the core holds on to a scene; operations that have
//! side effects take one as an argument.

use crate::{ejection::Ejection, particle::Particle, types::ClusterId, types::ParticleId};
use glam::Vec2;

pub trait Scene {
    /// A cluster was attached, either at top level or inside `parent`.
    fn cluster_attached(&mut self, _cluster: &str, _parent: Option<&str>, _origin: Vec2) {}

    fn particle_added(&mut self, _cluster: &str, _particle: &Particle) {}

    /// The particle's visual should go away. It may reappear under another
    /// cluster when an alpha decay moves it.
    fn particle_removed(&mut self, _cluster: &str, _particle: &Particle) {}

    /// Called once per integration tick with the updated positions.
    fn positions_updated(&mut self, _cluster: &str, _particles: &[Particle]) {}

    /// Takes ownership of a decay product. Fire-and-forget: the caller does
    /// not wait for the animation and never hears about it again.
    fn eject(&mut self, ejection: Ejection);
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    Attached {
        cluster: ClusterId,
        parent: Option<ClusterId>,
        origin: Vec2,
    },
    Added {
        cluster: ClusterId,
        particle: ParticleId,
    },
    Removed {
        cluster: ClusterId,
        particle: ParticleId,
    },
    Ticked {
        cluster: ClusterId,
        particles: usize,
    },
}

/// Scene that only records what it was told. Useful for headless runs.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub events: Vec<SceneEvent>,
    pub ejections: Vec<Ejection>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removed(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SceneEvent::Removed { particle, .. } => Some(particle.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn ticks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SceneEvent::Ticked { .. }))
            .count()
    }
}

impl Scene for RecordingScene {
    fn cluster_attached(&mut self, cluster: &str, parent: Option<&str>, origin: Vec2) {
        self.events.push(SceneEvent::Attached {
            cluster: cluster.to_string(),
            parent: parent.map(str::to_string),
            origin,
        });
    }

    fn particle_added(&mut self, cluster: &str, particle: &Particle) {
        self.events.push(SceneEvent::Added {
            cluster: cluster.to_string(),
            particle: particle.id().to_string(),
        });
    }

    fn particle_removed(&mut self, cluster: &str, particle: &Particle) {
        self.events.push(SceneEvent::Removed {
            cluster: cluster.to_string(),
            particle: particle.id().to_string(),
        });
    }

    fn positions_updated(&mut self, cluster: &str, particles: &[Particle]) {
        self.events.push(SceneEvent::Ticked {
            cluster: cluster.to_string(),
            particles: particles.len(),
        });
    }

    fn eject(&mut self, ejection: Ejection) {
        self.ejections.push(ejection);
    }
}
