//! Session - One race from roll-out to finish
//!
//! Owns the registry, the race RNG and the report of the last sort, and
//! drives the `Idle -> Sorting -> Sorted -> Racing -> Finished` lifecycle.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::race_sorter::engine::{self, RngPivots, SortEngine, SortMode, SortReport};
use crate::race_sorter::error::Result;
use crate::race_sorter::race::{RaceConfig, RaceResult, RaceSnapshot, RaceState, RacerSnapshot};
use crate::race_sorter::racer::Racer;
use crate::race_sorter::registry::RacerRegistry;

/// Race session
pub struct RaceSession {
    config: RaceConfig,
    state: RaceState,
    mode: SortMode,
    registry: RacerRegistry,
    rng: StdRng,
    /// Instrumentation of the last sort, empty while idle
    report: SortReport,
    elapsed_time: f32,
    finish_order: Vec<RaceResult>,
}

impl RaceSession {
    /// Create a session and roll its first set of racers
    pub fn new(config: RaceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut session = Self {
            config,
            state: RaceState::Idle,
            mode: SortMode::default(),
            registry: RacerRegistry::new(),
            rng,
            report: SortReport::default(),
            elapsed_time: 0.0,
            finish_order: Vec::new(),
        };
        session.initialize();
        session
    }

    /// Roll new racers and return to idle
    pub fn initialize(&mut self) {
        self.registry.initialize(self.config.racer_count, &mut self.rng);
        self.report = SortReport {
            mode: self.mode,
            ..SortReport::default()
        };
        self.elapsed_time = 0.0;
        self.finish_order.clear();
        self.state = RaceState::Idle;
        log::info!("Race initialized with {} racers", self.registry.len());
    }

    /// Switch pivot policy, which also rolls a new field
    pub fn set_mode(&mut self, mode: SortMode) {
        self.mode = mode;
        log::info!("Mode set to {}", mode);
        self.initialize();
    }

    /// Sort the field, boost the median racer and start racing
    ///
    /// Only valid from `Idle`; returns `None` otherwise.
    pub fn start_race(&mut self) -> Option<&SortReport> {
        if self.state != RaceState::Idle {
            log::warn!("Cannot start race while {:?}", self.state);
            return None;
        }

        for racer in self.registry.as_mut_slice() {
            racer.reset_race_state();
        }
        self.elapsed_time = 0.0;
        self.finish_order.clear();

        self.state = RaceState::Sorting;
        let engine = SortEngine::new(self.mode).with_placement(self.config.pivot_placement);
        self.report = engine.sort(self.registry.as_mut_slice(), &mut RngPivots(&mut self.rng));
        self.state = RaceState::Sorted;

        if let Ok(index) = engine::median_index(self.registry.racers()) {
            let racer = &mut self.registry.as_mut_slice()[index];
            racer.activate_power(self.config.boost_duration);
            log::info!("{} gets the median power boost", racer.name());
        }

        self.state = RaceState::Racing;
        log::info!(
            "Race started in {} after {} sort operations",
            self.mode,
            self.report.operations
        );
        Some(&self.report)
    }

    /// Advance the race by `delta` seconds
    pub fn update(&mut self, delta: f32) {
        if self.state != RaceState::Racing {
            return;
        }

        self.elapsed_time += delta;
        let config = &self.config;

        for racer in self.registry.as_mut_slice() {
            if racer.finished {
                continue;
            }

            let boost = if racer.power_active { config.boost_factor } else { 1.0 };
            racer.update(delta, boost, config.track_length, &mut self.rng);
            racer.tick_power(delta);

            if racer.finished {
                racer.finish_time = self.elapsed_time;
                self.finish_order.push(RaceResult {
                    racer_name: racer.name().to_string(),
                    finish_time: self.elapsed_time,
                    position: (self.finish_order.len() + 1) as u32,
                });
            }
        }

        if self.finish_order.len() == self.registry.len() {
            self.state = RaceState::Finished;
            log::info!("Race finished in {:.2}s", self.elapsed_time);
        }
    }

    /// Median racer by sort key
    pub fn find_median(&self) -> Result<&Racer> {
        engine::find_median(self.registry.racers())
    }

    pub fn operation_count(&self) -> usize {
        self.report.operations
    }

    pub fn pivot_highlights(&self) -> &[usize] {
        &self.report.pivot_highlights
    }

    pub fn report(&self) -> &SortReport {
        &self.report
    }

    pub fn racers(&self) -> &[Racer] {
        self.registry.racers()
    }

    pub fn finish_order(&self) -> &[RaceResult] {
        &self.finish_order
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Get compact snapshot for the presentation layer
    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            state: self.state,
            mode: self.mode,
            elapsed_time: self.elapsed_time,
            operations: self.report.operations,
            racers: self
                .registry
                .racers()
                .iter()
                .enumerate()
                .map(|(i, racer)| RacerSnapshot::new(racer, self.report.was_pivot(i)))
                .collect(),
            finisher_count: self.finish_order.len() as u32,
        }
    }
}

impl Default for RaceSession {
    fn default() -> Self {
        Self::new(RaceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> RaceSession {
        RaceSession::new(RaceConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn new_session_is_idle() {
        let session = seeded(1);
        assert_eq!(session.state(), RaceState::Idle);
        assert_eq!(session.racers().len(), 6);
        assert_eq!(session.operation_count(), 0);
        assert!(session.pivot_highlights().is_empty());
    }

    #[test]
    fn start_race_sorts_and_boosts_median() {
        let mut session = seeded(2);
        session.set_mode(SortMode::Deterministic);

        let report = session.start_race().cloned().unwrap();
        assert_eq!(session.state(), RaceState::Racing);
        assert!(report.operations >= 1);
        assert_eq!(report.pivot_highlights[0], 5);

        let keys: Vec<f32> = session.racers().iter().map(Racer::sort_key).collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));

        // Sorted ascending, so the median sits at index 3
        assert!(session.racers()[3].power_active);
        assert_eq!(session.racers().iter().filter(|r| r.power_active).count(), 1);
        assert_eq!(session.find_median().unwrap().name(), session.racers()[3].name());
    }

    #[test]
    fn start_race_refused_while_racing() {
        let mut session = seeded(3);
        assert!(session.start_race().is_some());
        assert!(session.start_race().is_none());
    }

    #[test]
    fn race_runs_to_finish() {
        let mut session = seeded(4);
        session.start_race();

        for _ in 0..100_000 {
            session.update(1.0 / 60.0);
            if session.state() == RaceState::Finished {
                break;
            }
        }

        assert_eq!(session.state(), RaceState::Finished);
        assert_eq!(session.finish_order().len(), 6);
        let times: Vec<f32> = session.finish_order().iter().map(|r| r.finish_time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(session.finish_order()[0].position, 1);
    }

    #[test]
    fn initialize_clears_report() {
        let mut session = seeded(5);
        session.start_race();
        assert!(session.operation_count() > 0);

        session.initialize();
        assert_eq!(session.state(), RaceState::Idle);
        assert_eq!(session.operation_count(), 0);
        assert!(session.finish_order().is_empty());
    }

    #[test]
    fn empty_race_starts_without_boost() {
        let mut session = RaceSession::new(RaceConfig {
            racer_count: 0,
            seed: Some(6),
            ..Default::default()
        });

        assert!(session.start_race().is_some());
        assert_eq!(session.operation_count(), 0);
        assert!(session.find_median().is_err());
    }
}
