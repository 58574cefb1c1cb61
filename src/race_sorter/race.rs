//! Race - Race configuration, results and snapshots
//!
//! Snapshots are the compact view handed to whatever draws the track.

use serde::{Deserialize, Serialize};

use crate::race_sorter::engine::{PivotPlacement, SortMode};
use crate::race_sorter::racer::{Racer, RacerColor};

/// Race configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Number of racers
    pub racer_count: usize,
    /// Distance from start to finish line
    pub track_length: f32,
    /// Speed multiplier granted to the median racer
    pub boost_factor: f32,
    /// Seconds the median boost lasts
    pub boost_duration: f32,
    /// Where randomized picks are moved before partitioning
    pub pivot_placement: PivotPlacement,
    /// Seed for reproducible races, entropy when absent
    pub seed: Option<u64>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            racer_count: 6,
            track_length: 475.0,
            boost_factor: 1.5,
            boost_duration: 3.0,
            pivot_placement: PivotPlacement::Low,
            seed: None,
        }
    }
}

/// Race lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceState {
    /// Racers freshly rolled, lanes in identity order
    Idle,
    /// Engine running
    Sorting,
    /// Sequence ordered, report frozen
    Sorted,
    Racing,
    Finished,
}

/// A finisher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub racer_name: String,
    pub finish_time: f32,
    pub position: u32,
}

/// Compact racer state for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacerSnapshot {
    pub name: String,
    pub color: RacerColor,
    pub lane: usize,
    pub sort_key: f32,
    pub position: f32,
    pub speed: f32,
    pub finished: bool,
    pub power_active: bool,
    /// Whether this display slot was picked as a pivot in the last sort
    pub pivot_highlight: bool,
}

impl RacerSnapshot {
    pub fn new(racer: &Racer, pivot_highlight: bool) -> Self {
        Self {
            name: racer.name().to_string(),
            color: racer.color(),
            lane: racer.lane,
            sort_key: racer.sort_key(),
            position: racer.position,
            speed: racer.speed,
            finished: racer.finished,
            power_active: racer.power_active,
            pivot_highlight,
        }
    }
}

/// Compact race snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub state: RaceState,
    pub mode: SortMode,
    pub elapsed_time: f32,
    pub operations: usize,
    pub racers: Vec<RacerSnapshot>,
    pub finisher_count: u32,
}
