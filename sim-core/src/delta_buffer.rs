use glam::Vec2;

/// Scratch buffer of per-particle velocity corrections for one tick.
///
/// Forces that depend on every other particle are accumulated here first
/// and applied in one sweep afterwards, so the accumulation reads a
/// consistent snapshot of positions.
///
/// Entry `i` belongs to the particle at index `i` of the slice being
/// integrated.
#[derive(Debug, Default)]
pub struct DeltaBuffer {
    deltas: Vec<Vec2>,
}

impl DeltaBuffer {
    /// Resizes to `len` entries and zeroes every entry.
    pub fn ensure_len(&mut self, len: usize) {
        if self.deltas.len() != len {
            self.deltas.resize(len, Vec2::ZERO);
        }
        self.clear();
    }

    fn clear(&mut self) {
        for d in &mut self.deltas {
            *d = Vec2::ZERO;
        }
    }

    /// Adds `delta` to the entry of particle `i`.
    ///
    /// ### Panics
    /// Panics if `i` is out of bounds.
    #[inline]
    pub fn add(&mut self, i: usize, delta: Vec2) {
        self.deltas[i] += delta;
    }

    /// Iterates `(index, delta)` for non-zero entries only.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        self.deltas
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, d)| *d != Vec2::ZERO)
    }
}
