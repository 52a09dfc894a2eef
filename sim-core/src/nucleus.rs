//! A simulated nucleus: one particle registry plus the force layout that
//! moves its members.
//!
//! Structural changes (add/remove, decays) must happen while the layout is
//! stopped and be followed by [`Nucleus::restart`]. The decay entry points
//! in [`crate::decay`] bracket themselves that way.

use crate::{
    collision::Collider,
    config::Config,
    error::AttrError,
    force::ForceLayout,
    ids::IdGenerator,
    nuclide::Nuclide,
    particle::{Particle, ParticleKind},
    registry::{Composition, ParticleRegistry},
    scene::Scene,
    types::ClusterId,
};
use glam::Vec2;
use rand::Rng;
use std::{fmt, str::FromStr};

/// Attributes exposed through [`Nucleus::attr`] and [`Nucleus::set_attr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Id,
    Gravity,
}

impl Attribute {
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Id => "id",
            Attribute::Gravity => "gravity",
        }
    }
}

impl FromStr for Attribute {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Attribute::Id),
            "gravity" => Ok(Attribute::Gravity),
            other => Err(AttrError::Unknown(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Text(String),
    Float(f32),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Float(x) => write!(f, "{x}"),
        }
    }
}

#[derive(Debug)]
pub struct Nucleus {
    pub(crate) id: ClusterId,
    pub(crate) registry: ParticleRegistry,
    force: ForceLayout,
    gravity: f32,
    pub(crate) cfg: Config,
    origin: Vec2,
    parent: Option<ClusterId>,
    attached: bool,
}

impl Nucleus {
    /// Creates an empty, detached cluster using `cfg.gravity`.
    pub fn new(id: impl Into<ClusterId>, cfg: Config) -> Self {
        Self {
            id: id.into(),
            registry: ParticleRegistry::new(),
            force: ForceLayout::new(cfg),
            gravity: cfg.gravity,
            cfg,
            origin: Vec2::ZERO,
            parent: None,
            attached: false,
        }
    }

    /// Builds a cluster with one particle per proton and neutron of `nuclide`.
    ///
    /// Protons come first in traversal order. Particles are scattered
    /// uniformly over the layout region.
    pub fn from_nuclide(
        nuclide: Nuclide,
        cfg: Config,
        ids: &mut dyn IdGenerator,
        rng: &mut impl Rng,
    ) -> Self {
        let mut nucleus = Self::new(ids.next_id(), cfg);
        for _ in 0..nuclide.protons {
            nucleus.registry.add(Particle::proton(ids.next_id(), Vec2::ZERO));
        }
        for _ in 0..nuclide.neutrons {
            nucleus.registry.add(Particle::neutron(ids.next_id(), Vec2::ZERO));
        }

        let side = ForceLayout::region_side(nucleus.registry.size_aggregate());
        for p in nucleus.registry.particles_mut() {
            let x = rng.random_range(0.0..=side);
            let y = rng.random_range(0.0..=side);
            p.place(Vec2::new(x, y));
        }
        nucleus
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Translation of this cluster's frame inside its parent's frame.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Replaces the tuning; the layout picks it up on the next tick.
    pub fn set_config(&mut self, cfg: Config) {
        self.cfg = cfg;
        self.force.set_config(cfg);
    }

    pub fn registry(&self) -> &ParticleRegistry {
        &self.registry
    }

    pub fn particles(&self) -> &[Particle] {
        self.registry.particles()
    }

    pub fn composition(&self) -> Composition {
        self.registry.composition()
    }

    pub fn count(&self, kind: ParticleKind) -> usize {
        self.registry.count(kind)
    }

    pub fn size_aggregate(&self) -> f32 {
        self.registry.size_aggregate()
    }

    pub fn force(&self) -> &ForceLayout {
        &self.force
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_running(&self) -> bool {
        self.force.is_running()
    }

    /// Reads a declared attribute by name.
    pub fn attr(&self, name: &str) -> Result<AttrValue, AttrError> {
        let attr = name.parse::<Attribute>().inspect_err(|e| log::warn!("{e}"))?;
        Ok(match attr {
            Attribute::Id => AttrValue::Text(self.id.clone()),
            Attribute::Gravity => AttrValue::Float(self.gravity),
        })
    }

    /// Sets a declared attribute from its textual value.
    ///
    /// Unknown names and unparsable values are reported and leave the
    /// cluster untouched. A new gravity takes effect on the next restart.
    pub fn set_attr(&mut self, name: &str, value: &str) -> Result<&mut Self, AttrError> {
        let attr = name.parse::<Attribute>().inspect_err(|e| log::warn!("{e}"))?;
        match attr {
            Attribute::Id => self.id = value.to_string(),
            Attribute::Gravity => {
                let gravity = value
                    .trim()
                    .parse::<f32>()
                    .ok()
                    .filter(|g| g.is_finite())
                    .ok_or_else(|| AttrError::InvalidValue {
                        name: attr.name(),
                        value: value.to_string(),
                    })
                    .inspect_err(|e| log::warn!("{e}"))?;
                self.gravity = gravity;
            }
        }
        Ok(self)
    }

    /// Attaches the cluster to `scene`, optionally inside `parent`, and starts
    /// simulating.
    pub fn append_to(&mut self, scene: &mut dyn Scene, parent: Option<&str>) -> &mut Self {
        self.parent = parent.map(str::to_string);
        self.attached = true;
        scene.cluster_attached(&self.id, parent, self.origin);
        for p in self.registry.particles() {
            scene.particle_added(&self.id, p);
        }
        log::debug!(
            "attached {} ({} particles) under {:?}",
            self.id,
            self.registry.len(),
            parent
        );
        self.restart();
        self
    }

    /// Adds a particle, showing it in `scene` if the cluster is attached.
    pub fn add(&mut self, particle: Particle, scene: &mut dyn Scene) -> &Particle {
        let attached = self.is_attached();
        let stored = self.registry.add(particle);
        if attached {
            scene.particle_added(&self.id, stored);
        }
        stored
    }

    /// Removes a particle by id and has `scene` drop its visual.
    pub fn remove(&mut self, id: &str, scene: &mut dyn Scene) -> Option<Particle> {
        let cluster = &self.id;
        self.registry
            .remove(id, |p| scene.particle_removed(cluster, p))
    }

    /// Reheats the layout over the current membership and region size.
    pub fn restart(&mut self) {
        self.force.start(self.registry.size_aggregate(), self.gravity);
    }

    pub fn stop(&mut self) {
        self.force.stop();
    }

    /// Runs one tick: force phases, then collisions, then position write-back.
    ///
    /// Returns `false` once the layout is stopped or has cooled down.
    pub fn tick(&mut self, scene: &mut dyn Scene) -> bool {
        let cfg = self.cfg;
        let cluster = &self.id;
        self.force.step(self.registry.particles_mut(), |particles| {
            Collider::new(particles, cfg.collision_alpha, cfg.collision_window)
                .resolve_all(particles);
            scene.positions_updated(cluster, particles);
        })
    }
}
