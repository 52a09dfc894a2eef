//! Alpha and beta decay of a [`Nucleus`].
//!
//! Both transitions check their preconditions before touching anything, so
//! a failed decay leaves membership, size and layout state exactly as they
//! were. A successful decay runs stop → mutate → restart → eject, with the
//! ejection handed to the scene and never awaited.

use crate::{
    ejection::{Ejecta, Ejection},
    error::DecayError,
    force::ForceLayout,
    ids::IdGenerator,
    nucleus::Nucleus,
    particle::{Particle, ParticleKind},
    quadtree::QuadTree,
    scene::Scene,
    types::ParticleId,
};
use glam::Vec2;
use rand::Rng;

/// Nucleons per species in an alpha particle.
const ALPHA_PER_KIND: usize = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BetaMode {
    /// A proton becomes a neutron and an electron is emitted.
    #[default]
    Minus,
    /// Accepted and run through the same proton-to-neutron mechanics.
    Plus,
}

impl BetaMode {
    /// `"+"` selects beta-plus; anything else falls back to beta-minus.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "+" => BetaMode::Plus,
            _ => BetaMode::Minus,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BetaMode::Minus => '-',
            BetaMode::Plus => '+',
        }
    }
}

/// Picks the nucleons of an alpha particle.
///
/// The anchor is the first nucleon in traversal order. Every other member is
/// ranked by distance from the anchor using *previous* positions, ties
/// broken by id, and the ranking is walked greedily until two protons and
/// two neutrons (anchor included) are collected.
///
/// Members without a finite previous position cannot be placed in the
/// quadtree; they are ranked after every other member.
///
/// Returns indices into `particles`, anchor first, or `None` if the set
/// holds fewer than two of either species.
pub fn select_alpha_nucleons(particles: &[Particle]) -> Option<Vec<usize>> {
    let anchor = particles.iter().position(|p| p.kind().is_nucleon())?;
    let first = &particles[anchor];

    let rest: Vec<usize> = (0..particles.len()).filter(|&i| i != anchor).collect();
    let tree = QuadTree::build(rest.iter().map(|&i| particles[i].prev));
    let mut ranked: Vec<(usize, f32)> = Vec::with_capacity(rest.len());
    let mut indexed = vec![false; rest.len()];
    tree.visit(|node| {
        if let Some(k) = node.point {
            let i = rest[k];
            indexed[k] = true;
            ranked.push((i, first.prev.distance(particles[i].prev)));
        }
        false
    });
    // The tree skips non-finite positions; such members still count, last.
    for (_, &i) in rest.iter().enumerate().filter(|&(k, _)| !indexed[k]) {
        log::warn!(
            "particle {} has no finite previous position; ranking it last",
            particles[i].id()
        );
        ranked.push((i, f32::INFINITY));
    }
    ranked.sort_by(|a, b| {
        a.1.total_cmp(&b.1)
            .then_with(|| particles[a.0].id().cmp(particles[b.0].id()))
    });

    let mut protons = usize::from(first.kind() == ParticleKind::Proton);
    let mut neutrons = usize::from(first.kind() == ParticleKind::Neutron);
    let mut chosen = vec![anchor];
    for (i, _) in ranked {
        if protons == ALPHA_PER_KIND && neutrons == ALPHA_PER_KIND {
            break;
        }
        match particles[i].kind() {
            ParticleKind::Proton if protons < ALPHA_PER_KIND => protons += 1,
            ParticleKind::Neutron if neutrons < ALPHA_PER_KIND => neutrons += 1,
            _ => continue,
        }
        chosen.push(i);
    }

    (protons == ALPHA_PER_KIND && neutrons == ALPHA_PER_KIND).then_some(chosen)
}

/// Index of the first particle of `kind` in traversal order.
pub fn find_first(particles: &[Particle], kind: ParticleKind) -> Option<usize> {
    particles.iter().position(|p| p.kind() == kind)
}

impl Nucleus {
    /// Ejects a helium-4 cluster made of the four nucleons closest to the
    /// anchor.
    ///
    /// The selected particles move, ids and all, into a new child cluster
    /// whose frame puts the anchor at its previous position. The child
    /// binds tighter ([`crate::config::Config::alpha_cluster_gravity`]), is
    /// attached under this cluster and then handed to the scene for
    /// ejection.
    pub fn alpha_decay(
        &mut self,
        scene: &mut dyn Scene,
        ids: &mut dyn IdGenerator,
        rng: &mut impl Rng,
    ) -> Result<&mut Self, DecayError> {
        let Some(chosen) = select_alpha_nucleons(self.particles()) else {
            let c = self.composition();
            let err = DecayError::InsufficientNucleons {
                cluster: self.id.clone(),
                protons: c.protons,
                neutrons: c.neutrons,
            };
            log::warn!("{err}");
            return Err(err);
        };
        let anchor = self.particles()[chosen[0]].prev;
        let chosen_ids: Vec<ParticleId> = chosen
            .iter()
            .map(|&i| self.particles()[i].id().to_string())
            .collect();

        self.stop();

        let mut alpha = Nucleus::new(format!("{}_alpha_{}", self.id, ids.next_id()), self.cfg)
            .with_gravity(self.cfg.alpha_cluster_gravity);
        for id in &chosen_ids {
            if let Some(p) = self.remove(id, scene) {
                alpha.registry.add(p);
            }
        }
        let center = Vec2::splat(ForceLayout::region_side(alpha.size_aggregate()) * 0.5);
        for p in alpha.registry.particles_mut() {
            p.place(p.prev - anchor + center);
        }
        let mut alpha = alpha.with_origin(anchor - center);
        alpha.append_to(scene, Some(self.id.as_str()));

        self.restart();
        log::info!(
            "{} alpha decayed; {} remaining, ejecting {}",
            self.id,
            self.registry.len(),
            alpha.id()
        );
        self.eject(Ejecta::Cluster(Box::new(alpha)), anchor, scene, rng);
        Ok(self)
    }

    /// Turns the first proton into a neutron and ejects an electron.
    ///
    /// Both products appear at the proton's previous position. Both modes
    /// share these mechanics; `mode` only shows up in the log.
    pub fn beta_decay(
        &mut self,
        mode: BetaMode,
        scene: &mut dyn Scene,
        ids: &mut dyn IdGenerator,
        rng: &mut impl Rng,
    ) -> Result<&mut Self, DecayError> {
        let Some(index) = find_first(self.particles(), ParticleKind::Proton) else {
            let err = DecayError::NoProton {
                cluster: self.id.clone(),
            };
            log::warn!("{err}");
            return Err(err);
        };
        let proton = &self.particles()[index];
        let (proton_id, spawn) = (proton.id().to_string(), proton.prev);

        self.stop();
        self.add(Particle::neutron(ids.next_id(), spawn), scene);
        self.remove(&proton_id, scene);
        self.restart();

        let electron = Particle::electron(ids.next_id(), spawn);
        log::info!(
            "{} beta{} decayed; ejecting {}",
            self.id,
            mode.symbol(),
            electron.id()
        );
        self.eject(Ejecta::Particle(electron), spawn, scene, rng);
        Ok(self)
    }

    fn eject(&self, ejecta: Ejecta, origin: Vec2, scene: &mut dyn Scene, rng: &mut impl Rng) {
        let ejection = Ejection::launch(
            self.id.clone(),
            ejecta,
            origin,
            self.size_aggregate(),
            &self.cfg,
            rng,
        );
        log::debug!(
            "ejecting {} from {} toward {:?}",
            ejection.ejecta.id(),
            self.id,
            ejection.target()
        );
        scene.eject(ejection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config, ids::SequentialIds, nuclide::Nuclide, scene::RecordingScene,
        scene::SceneEvent,
    };
    use rand::{SeedableRng, rngs::StdRng};

    struct Bench {
        scene: RecordingScene,
        ids: SequentialIds,
        rng: StdRng,
    }

    impl Bench {
        fn new() -> Self {
            Self {
                scene: RecordingScene::new(),
                ids: SequentialIds::new("id"),
                rng: StdRng::seed_from_u64(42),
            }
        }

        fn nucleus(&mut self, nuclide: Nuclide) -> Nucleus {
            let mut n = Nucleus::from_nuclide(nuclide, Config::default(), &mut self.ids, &mut self.rng);
            n.append_to(&mut self.scene, None);
            // Let the cluster settle a little so previous positions are meaningful.
            for _ in 0..20 {
                n.tick(&mut self.scene);
            }
            n
        }
    }

    fn counts(n: &Nucleus) -> (usize, usize, usize) {
        let c = n.composition();
        (c.protons, c.neutrons, c.electrons)
    }

    #[test]
    fn carbon14_alpha_decays_to_beryllium10_plus_helium4() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::CARBON_14);

        n.alpha_decay(&mut b.scene, &mut b.ids, &mut b.rng).unwrap();

        assert_eq!(counts(&n), (4, 6, 0));
        assert_eq!(n.size_aggregate(), 10.0);
        assert!(n.is_running(), "source must be restarted");

        assert_eq!(b.scene.ejections.len(), 1);
        let Ejecta::Cluster(alpha) = &b.scene.ejections[0].ejecta else {
            panic!("alpha decay should eject a cluster");
        };
        assert_eq!(counts(alpha), (2, 2, 0));
        assert_eq!(alpha.parent(), Some(n.id()));
        assert!(alpha.id().starts_with(&format!("{}_alpha_", n.id())));
        assert_eq!(alpha.gravity(), Config::default().alpha_cluster_gravity);
        assert!(alpha.is_running());

        // The four moved particles left the source for good.
        assert_eq!(b.scene.removed().len(), 4);
        for id in b.scene.removed() {
            assert!(!n.registry().contains(id));
            assert!(alpha.registry().contains(id));
        }
    }

    #[test]
    fn alpha_cluster_keeps_world_positions_of_moved_particles() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::new(3, 3));
        let before: Vec<Particle> = n.registry().members();

        n.alpha_decay(&mut b.scene, &mut b.ids, &mut b.rng).unwrap();

        let Ejecta::Cluster(alpha) = &b.scene.ejections[0].ejecta else {
            panic!("expected a cluster");
        };
        for p in alpha.particles() {
            let old = before.iter().find(|q| q.id() == p.id()).unwrap();
            let world = alpha.origin() + p.pos;
            assert!((world - old.prev).length() < 1e-4);
            assert_eq!(p.velocity(), Vec2::ZERO);
        }
        // The anchor spawns the ejection.
        let anchor = &before[0];
        assert_eq!(b.scene.ejections[0].origin, anchor.prev);
    }

    #[test]
    fn alpha_selection_takes_nearest_of_each_kind() {
        let at = |x: f32| Vec2::new(x, 0.0);
        let particles = vec![
            Particle::proton("anchor", at(0.0)),
            Particle::proton("p_far", at(9.0)),
            Particle::proton("p_near", at(1.0)),
            Particle::neutron("n_near", at(2.0)),
            Particle::neutron("n_mid", at(3.0)),
            Particle::neutron("n_far", at(8.0)),
        ];
        let chosen = select_alpha_nucleons(&particles).unwrap();
        let ids: Vec<&str> = chosen.iter().map(|&i| particles[i].id()).collect();
        assert_eq!(ids, vec!["anchor", "p_near", "n_near", "n_mid"]);
    }

    #[test]
    fn alpha_selection_ranks_by_previous_position() {
        let mut jittery = Particle::proton("jittery", Vec2::new(10.0, 0.0));
        jittery.pos = Vec2::new(0.5, 0.0);
        let particles = vec![
            Particle::neutron("anchor", Vec2::ZERO),
            jittery,
            Particle::proton("settled", Vec2::new(1.0, 0.0)),
            Particle::proton("other", Vec2::new(5.0, 0.0)),
            Particle::neutron("n", Vec2::new(2.0, 0.0)),
        ];
        let chosen = select_alpha_nucleons(&particles).unwrap();
        let ids: Vec<&str> = chosen.iter().map(|&i| particles[i].id()).collect();
        assert_eq!(ids, vec!["anchor", "settled", "n", "other"]);
    }

    #[test]
    fn alpha_selection_breaks_ties_by_id() {
        let particles = vec![
            Particle::proton("anchor", Vec2::ZERO),
            Particle::proton("b", Vec2::new(0.0, 1.0)),
            Particle::proton("a", Vec2::new(1.0, 0.0)),
            Particle::neutron("n1", Vec2::new(2.0, 0.0)),
            Particle::neutron("n2", Vec2::new(3.0, 0.0)),
        ];
        let chosen = select_alpha_nucleons(&particles).unwrap();
        assert_eq!(particles[chosen[1]].id(), "a");
    }

    #[test]
    fn alpha_selection_keeps_members_without_finite_prev() {
        let mut lost = Particle::neutron("lost", Vec2::ZERO);
        lost.prev = Vec2::NAN;
        let particles = vec![
            Particle::proton("anchor", Vec2::ZERO),
            Particle::proton("p", Vec2::new(1.0, 0.0)),
            lost,
            Particle::neutron("n", Vec2::new(2.0, 0.0)),
        ];
        let chosen = select_alpha_nucleons(&particles).expect("two of each species are present");
        let ids: Vec<&str> = chosen.iter().map(|&i| particles[i].id()).collect();
        assert_eq!(ids, vec!["anchor", "p", "n", "lost"]);
    }

    #[test]
    fn lone_proton_cannot_alpha_decay() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::HYDROGEN_1);
        let members = n.registry().members();
        let alpha = n.force().alpha();

        let err = n.alpha_decay(&mut b.scene, &mut b.ids, &mut b.rng).unwrap_err();

        assert_eq!(
            err,
            DecayError::InsufficientNucleons {
                cluster: n.id().to_string(),
                protons: 1,
                neutrons: 0
            }
        );
        assert_eq!(n.registry().members(), members);
        assert_eq!(n.size_aggregate(), 1.0);
        assert_eq!(n.force().alpha(), alpha, "layout must not be touched");
        assert!(b.scene.ejections.is_empty());
        assert!(b.scene.removed().is_empty());
    }

    #[test]
    fn alpha_decay_needs_two_of_each_species() {
        for nuclide in [Nuclide::new(1, 5), Nuclide::new(5, 1), Nuclide::new(0, 0)] {
            let mut b = Bench::new();
            let mut n = b.nucleus(nuclide);
            let size = n.size_aggregate();
            assert!(n.alpha_decay(&mut b.scene, &mut b.ids, &mut b.rng).is_err());
            assert_eq!(n.size_aggregate(), size);
            assert_eq!(n.registry().len(), nuclide.mass_number() as usize);
        }
    }

    #[test]
    fn helium4_alpha_decays_into_nothing() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::HELIUM_4);

        n.alpha_decay(&mut b.scene, &mut b.ids, &mut b.rng).unwrap();

        assert!(n.registry().is_empty());
        assert_eq!(n.size_aggregate(), 0.0);
        // Distance scales with the emptied source.
        assert_eq!(b.scene.ejections[0].offset.length(), 0.0);
    }

    #[test]
    fn beta_minus_turns_proton_into_neutron() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::HYDROGEN_1);
        let proton = n.particles()[0].clone();

        n.beta_decay(BetaMode::Minus, &mut b.scene, &mut b.ids, &mut b.rng)
            .unwrap();

        assert_eq!(counts(&n), (0, 1, 0));
        assert_eq!(n.registry().len(), 1);
        assert_eq!(n.size_aggregate(), 1.0);
        assert!(n.is_running());

        let neutron = &n.particles()[0];
        assert_eq!(neutron.pos, proton.prev);

        assert_eq!(b.scene.ejections.len(), 1);
        let ejection = &b.scene.ejections[0];
        let Ejecta::Particle(electron) = &ejection.ejecta else {
            panic!("beta decay should eject a lone particle");
        };
        assert_eq!(electron.kind(), ParticleKind::Electron);
        assert_eq!(electron.pos, proton.prev);
        assert_eq!(ejection.origin, proton.prev);
        assert_eq!(b.scene.removed(), vec![proton.id()]);
    }

    #[test]
    fn beta_minus_keeps_particle_count() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::CARBON_14);

        n.beta_decay(BetaMode::Minus, &mut b.scene, &mut b.ids, &mut b.rng)
            .unwrap()
            .beta_decay(BetaMode::Minus, &mut b.scene, &mut b.ids, &mut b.rng)
            .unwrap();

        assert_eq!(counts(&n), (4, 10, 0));
        assert_eq!(n.registry().len(), 14);
        assert_eq!(b.scene.ejections.len(), 2);
    }

    #[test]
    fn beta_decay_without_protons_fails_cleanly() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::new(0, 3));
        let members = n.registry().members();
        let events = b.scene.events.len();

        let err = n
            .beta_decay(BetaMode::Minus, &mut b.scene, &mut b.ids, &mut b.rng)
            .unwrap_err();

        assert_eq!(err.to_string(), format!("unable to beta decay {}: no protons found", n.id()));
        assert_eq!(n.registry().members(), members);
        assert_eq!(b.scene.events.len(), events);
        assert!(b.scene.ejections.is_empty());
    }

    #[test]
    fn beta_plus_runs_the_shared_mechanics() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::CARBON_14);
        let proton = n.particles()[0].clone();

        n.beta_decay(BetaMode::from_symbol("+"), &mut b.scene, &mut b.ids, &mut b.rng)
            .unwrap();

        assert_eq!(counts(&n), (5, 9, 0));
        assert_eq!(n.registry().len(), 14);
        assert!(n.is_running());
        assert_eq!(b.scene.removed(), vec![proton.id()]);
        assert_eq!(b.scene.ejections.len(), 1);
        let Ejecta::Particle(electron) = &b.scene.ejections[0].ejecta else {
            panic!("beta decay should eject a lone particle");
        };
        assert_eq!(electron.kind(), ParticleKind::Electron);
        assert_eq!(electron.pos, proton.prev);
    }

    #[test]
    fn beta_symbols_default_to_minus() {
        assert_eq!(BetaMode::from_symbol("-"), BetaMode::Minus);
        assert_eq!(BetaMode::from_symbol("?"), BetaMode::Minus);
        assert_eq!(BetaMode::default(), BetaMode::Minus);
    }

    #[test]
    fn ejected_alpha_cluster_keeps_simulating() {
        let mut b = Bench::new();
        let mut n = b.nucleus(Nuclide::CARBON_14);
        n.alpha_decay(&mut b.scene, &mut b.ids, &mut b.rng).unwrap();

        let mut flight = b.scene.ejections.pop().unwrap();
        let ticks_before = b.scene.ticks();
        assert!(flight.step(&mut b.scene));
        assert_eq!(b.scene.ticks(), ticks_before + 1);

        let attached_child = b.scene.events.iter().any(|e| {
            matches!(e, SceneEvent::Attached { parent: Some(p), .. } if p == n.id())
        });
        assert!(attached_child);
    }
}
