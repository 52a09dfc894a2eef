use crate::particle::{Particle, ParticleKind};

/// Proton/neutron/electron counts of a registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Composition {
    pub protons: usize,
    pub neutrons: usize,
    pub electrons: usize,
}

impl Composition {
    pub fn total(&self) -> usize {
        self.protons + self.neutrons + self.electrons
    }
}

/// Exclusive owner of the particles of one cluster.
///
/// Particles are kept in insertion order, which is the traversal order every
/// algorithm sees. `size_aggregate` is the sum of member radii, maintained
/// incrementally by [`ParticleRegistry::add`] and [`ParticleRegistry::remove`].
/// An empty registry is a valid terminal state.
#[derive(Clone, Debug, Default)]
pub struct ParticleRegistry {
    particles: Vec<Particle>,
    size_aggregate: f32,
}

impl ParticleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a particle and returns the stored copy.
    ///
    /// Callers are expected to supply fresh ids. A duplicate id replaces the
    /// existing member in place; the aggregate stays consistent either way.
    ///
    /// ### Parameters
    /// - `particle` - The particle to take ownership of.
    ///
    /// ### Returns
    /// A reference to the particle as stored in the registry.
    pub fn add(&mut self, particle: Particle) -> &Particle {
        self.size_aggregate += particle.radius();

        let index = match self.index_of(particle.id()) {
            Some(index) => {
                log::warn!("particle {} added twice; replacing", particle.id());
                self.size_aggregate -= self.particles[index].radius();
                self.particles[index] = particle;
                index
            }
            None => {
                self.particles.push(particle);
                self.particles.len() - 1
            }
        };
        &self.particles[index]
    }

    /// Removes a particle by id, handing it to `on_removed` before it is returned.
    ///
    /// ### Parameters
    /// - `id` - Id of the member to remove.
    /// - `on_removed` - Called once with the removed particle, typically to
    ///   drop its visual. Not called when `id` is not a member.
    ///
    /// ### Returns
    /// - `Some(particle)` with ownership of the removed member.
    /// - `None` if `id` was not a member; nothing changes.
    pub fn remove(&mut self, id: &str, on_removed: impl FnOnce(&Particle)) -> Option<Particle> {
        let index = self.index_of(id)?;
        let particle = self.particles.remove(index);
        self.size_aggregate -= particle.radius();
        on_removed(&particle);
        Some(particle)
    }

    /// Snapshot of the current members in traversal order.
    pub fn members(&self) -> Vec<Particle> {
        self.particles.clone()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn get(&self, id: &str) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size_aggregate(&self) -> f32 {
        self.size_aggregate
    }

    pub fn count(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind() == kind).count()
    }

    pub fn composition(&self) -> Composition {
        Composition {
            protons: self.count(ParticleKind::Proton),
            neutrons: self.count(ParticleKind::Neutron),
            electrons: self.count(ParticleKind::Electron),
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.particles.iter().position(|p| p.id() == id)
    }
}
