//! Nuclear particle simulation core.
//!
//! A nucleus is a cluster of mutually repelling particles pulled toward its
//! center, with soft collisions resolved every tick, and two decay
//! transitions that move particles out of a cluster.
//!
//! Main components:
//! - [`particle`]: protons, neutrons and electrons.
//! - [`registry`]: exclusive owner of a cluster's particles and their size aggregate.
//! - [`quadtree`]: spatial index rebuilt from scratch whenever needed.
//! - [`collision`]: single-pass soft collision resolution.
//! - [`phases`] / [`force`]: the force layout and its per-tick phases.
//! - [`delta_buffer`]: per-tick scratch for accumulated velocity changes.
//! - [`nucleus`]: a registry plus its layout, attributes and scene attachment.
//! - [`decay`]: alpha and beta decay.
//! - [`ejection`]: timed flight of decay products.
//! - [`scene`]: the rendering collaborator.
//! - [`config`], [`error`], [`ids`], [`nuclide`], [`types`]: supporting types.

pub mod collision;
pub mod config;
pub mod decay;
pub mod delta_buffer;
pub mod ejection;
pub mod error;
pub mod force;
pub mod ids;
pub mod nucleus;
pub mod nuclide;
pub mod particle;
pub mod phases;
pub mod quadtree;
pub mod registry;
pub mod scene;
pub mod types;
