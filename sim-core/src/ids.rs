//! Id generation for particles and clusters.
//!
//! Every structural operation that creates an entity draws its id from an
//! [`IdGenerator`] supplied by the caller, so headless runs and tests can
//! use [`SequentialIds`] while the viewer uses [`RandomIds`].

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of fresh, unique ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Deterministic ids of the form `<prefix><n>`, starting at zero.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Random ids of the form `<Letter><unix millis>_<counter>`.
///
/// The letter keeps ids usable as identifiers in markup-like scenes (they
/// never start with a digit); the counter keeps ids produced within the
/// same millisecond apart.
#[derive(Debug, Default)]
pub struct RandomIds {
    counter: u64,
}

impl RandomIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let letter = char::from(b'A' + rand::rng().random_range(0..26u8));
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let id = format!("{letter}{millis}_{}", self.counter);
        self.counter += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_count_up_from_zero() {
        let mut ids = SequentialIds::new("p");
        assert_eq!(ids.next_id(), "p0");
        assert_eq!(ids.next_id(), "p1");
        assert_eq!(ids.next_id(), "p2");
    }

    #[test]
    fn random_ids_are_unique_and_start_with_a_letter() {
        let mut ids = RandomIds::new();
        let produced: Vec<String> = (0..200).map(|_| ids.next_id()).collect();

        let unique: HashSet<&String> = produced.iter().collect();
        assert_eq!(unique.len(), produced.len());

        for id in &produced {
            let first = id.chars().next().unwrap();
            assert!(first.is_ascii_uppercase(), "id {id} should start with A-Z");
        }
    }

    #[test]
    fn closures_act_as_generators() {
        let mut n = 10;
        let mut gen_fn = || {
            n += 1;
            format!("x{n}")
        };
        assert_eq!(IdGenerator::next_id(&mut gen_fn), "x11");
        assert_eq!(IdGenerator::next_id(&mut gen_fn), "x12");
    }
}
