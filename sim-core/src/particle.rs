use crate::types::ParticleId;
use glam::Vec2;
use std::fmt;

/// The three particle species a nucleus simulation knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Proton,
    Neutron,
    Electron,
}

impl ParticleKind {
    /// Default radius for the species, in simulation units.
    pub fn radius(self) -> f32 {
        match self {
            ParticleKind::Proton | ParticleKind::Neutron => 1.0,
            ParticleKind::Electron => 0.25,
        }
    }

    pub fn style(self) -> Style {
        match self {
            ParticleKind::Proton => Style {
                fill: [232, 74, 62],
                stroke: [160, 38, 30],
                stroke_width: 0.1,
            },
            ParticleKind::Neutron => Style {
                fill: [150, 150, 160],
                stroke: [96, 96, 104],
                stroke_width: 0.1,
            },
            ParticleKind::Electron => Style {
                fill: [80, 150, 240],
                stroke: [40, 90, 180],
                stroke_width: 0.05,
            },
        }
    }

    /// Protons and neutrons; electrons are never counted as nucleons.
    pub fn is_nucleon(self) -> bool {
        matches!(self, ParticleKind::Proton | ParticleKind::Neutron)
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParticleKind::Proton => "proton",
            ParticleKind::Neutron => "neutron",
            ParticleKind::Electron => "electron",
        };
        f.write_str(name)
    }
}

/// Fill/stroke colors (sRGB) and stroke width handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: [u8; 3],
    pub stroke: [u8; 3],
    pub stroke_width: f32,
}

/// One proton, neutron or electron.
///
/// `kind`, `radius` and `style` are fixed at construction. `pos` and `prev`
/// form the verlet state: `pos - prev` is the particle's velocity and `prev`
/// is where the particle settled at the end of the previous tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    id: ParticleId,
    kind: ParticleKind,
    radius: f32,
    style: Style,
    pub pos: Vec2,
    pub prev: Vec2,
}

impl Particle {
    /// Creates a resting particle of the given kind at `pos`.
    pub fn new(id: impl Into<ParticleId>, kind: ParticleKind, pos: Vec2) -> Self {
        Self {
            id: id.into(),
            kind,
            radius: kind.radius(),
            style: kind.style(),
            pos,
            prev: pos,
        }
    }

    pub fn proton(id: impl Into<ParticleId>, pos: Vec2) -> Self {
        Self::new(id, ParticleKind::Proton, pos)
    }

    pub fn neutron(id: impl Into<ParticleId>, pos: Vec2) -> Self {
        Self::new(id, ParticleKind::Neutron, pos)
    }

    pub fn electron(id: impl Into<ParticleId>, pos: Vec2) -> Self {
        Self::new(id, ParticleKind::Electron, pos)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev
    }

    /// Moves the particle and clears its velocity.
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_is_at_rest_with_species_defaults() {
        let p = Particle::proton("p0", Vec2::new(2.0, 3.0));
        assert_eq!(p.id(), "p0");
        assert_eq!(p.kind(), ParticleKind::Proton);
        assert_eq!(p.radius(), 1.0);
        assert_eq!(p.style(), ParticleKind::Proton.style());
        assert_eq!(p.velocity(), Vec2::ZERO);
    }

    #[test]
    fn electrons_are_smaller_than_nucleons() {
        assert!(ParticleKind::Electron.radius() < ParticleKind::Proton.radius());
        assert!(!ParticleKind::Electron.is_nucleon());
        assert!(ParticleKind::Neutron.is_nucleon());
    }

    #[test]
    fn place_resets_velocity() {
        let mut p = Particle::neutron("n0", Vec2::ZERO);
        p.pos = Vec2::new(1.0, 0.0);
        assert_eq!(p.velocity(), Vec2::new(1.0, 0.0));

        p.place(Vec2::new(5.0, 5.0));
        assert_eq!(p.pos, Vec2::new(5.0, 5.0));
        assert_eq!(p.velocity(), Vec2::ZERO);
    }
}
