/// Identifier for a [`crate::particle::Particle`].
///
/// Unique within the scene and stable for the particle's lifetime, including
/// when an alpha decay moves the particle into an ejected cluster.
pub type ParticleId = String;

/// Identifier for a [`crate::nucleus::Nucleus`].
///
/// Unique across all active clusters. Ejected alpha clusters derive theirs
/// from the parent id.
pub type ClusterId = String;
