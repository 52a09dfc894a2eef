use std::time::Duration;

/// Tunable constants for the force layout, collisions, decay and ejection.
///
/// One `Config` is shared by a nucleus and every cluster it ejects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Pairwise charge; negative values repel.
    pub charge: f32,
    /// Fraction of velocity kept per tick (verlet damping).
    pub friction: f32,
    /// Default pull toward the region center for freshly built clusters.
    pub gravity: f32,
    /// Temperature the integrator restarts at.
    pub alpha_start: f32,
    /// Per-tick multiplier applied to the temperature.
    pub alpha_cooling: f32,
    /// The integrator halts once the temperature drops below this.
    pub alpha_min: f32,
    /// Damping passed to the collision resolver each tick.
    pub collision_alpha: f32,
    /// Search window half-size as a multiple of the particle radius.
    pub collision_window: f32,
    /// Gravity of an ejected helium-4 cluster.
    pub alpha_cluster_gravity: f32,
    /// Ejection distance is `sqrt(size_aggregate) * ejection_distance_factor`.
    pub ejection_distance_factor: f32,
    pub ejection_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            charge: -0.2,
            friction: 0.5,
            gravity: 0.8,
            alpha_start: 0.1,
            alpha_cooling: 0.99,
            alpha_min: 0.005,
            collision_alpha: 0.5,
            collision_window: 1.7,
            alpha_cluster_gravity: 3.0,
            ejection_distance_factor: 6.0,
            ejection_duration: Duration::from_millis(3000),
        }
    }
}
