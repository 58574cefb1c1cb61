//! Registry - Owns the racers of the current race
//!
//! Racers are created and replaced as one batch. Before a race starts
//! the sequence is in lane order, and the engine reorders it in place.

use rand::Rng;

use crate::race_sorter::racer::Racer;

/// The live sequence of racers
#[derive(Debug, Clone, Default)]
pub struct RacerRegistry {
    racers: Vec<Racer>,
}

impl RacerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing sequence, assigning lanes by position
    pub fn from_racers(mut racers: Vec<Racer>) -> Self {
        for (lane, racer) in racers.iter_mut().enumerate() {
            racer.lane = lane;
        }
        Self { racers }
    }

    /// Replace every racer with `count` freshly rolled ones
    pub fn initialize<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.racers.clear();
        self.racers.extend((0..count).map(|lane| Racer::random(lane, rng)));
        log::debug!("Registry initialized with {} racers", count);
    }

    /// The live sequence for in-place reordering
    pub fn as_mut_slice(&mut self) -> &mut [Racer] {
        &mut self.racers
    }

    pub fn racers(&self) -> &[Racer] {
        &self.racers
    }

    pub fn len(&self) -> usize {
        self.racers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.racers.is_empty()
    }

    /// Get racer by name
    pub fn get(&self, name: &str) -> Option<&Racer> {
        self.racers.iter().find(|r| r.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn initialize_assigns_identity_lanes() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut registry = RacerRegistry::new();
        registry.initialize(6, &mut rng);

        assert_eq!(registry.len(), 6);
        for (i, racer) in registry.racers().iter().enumerate() {
            assert_eq!(racer.lane, i);
        }

        let names: HashSet<_> = registry.racers().iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn initialize_replaces_previous_batch() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut registry = RacerRegistry::new();
        registry.initialize(6, &mut rng);
        registry.initialize(2, &mut rng);

        assert_eq!(registry.len(), 2);
        assert!(registry.get("Nitro").is_none());
        assert!(registry.get("Turbo").is_some());
    }

    #[test]
    fn initialize_zero_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut registry = RacerRegistry::new();
        registry.initialize(0, &mut rng);
        assert!(registry.is_empty());
        assert!(registry.as_mut_slice().is_empty());
    }

    #[test]
    fn mutable_view_is_live() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut registry = RacerRegistry::new();
        registry.initialize(3, &mut rng);

        registry.as_mut_slice().swap(0, 2);
        assert_eq!(registry.racers()[0].name(), "Nitro");
        assert_eq!(registry.racers()[2].name(), "Flash");
    }
}
