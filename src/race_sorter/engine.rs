//! Engine - QuickSort over the racers, instrumented for the animation
//!
//! Both pivot policies share one Lomuto partition. Each `sort` call returns
//! a [`SortReport`] holding the partition count and the pivot indices picked,
//! so the engine itself carries no state between races.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::race_sorter::error::{Result, SortError};
use crate::race_sorter::racer::Racer;

/// Pivot selection policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    /// Pivot drawn uniformly from the active range
    #[default]
    Randomized,
    /// Pivot is always the last element of the active range
    Deterministic,
}

impl SortMode {
    /// Average complexity, pivot policy and worst case, for the comparison screen
    pub fn complexity_summary(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            SortMode::Randomized => ("O(n log n) average", "Unpredictable pivots", "Better worst-case"),
            SortMode::Deterministic => ("O(n log n) average", "Fixed pivot (last)", "O(n²) worst-case"),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Randomized => f.write_str("Randomized QuickSort"),
            SortMode::Deterministic => f.write_str("Deterministic QuickSort"),
        }
    }
}

impl FromStr for SortMode {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "randomized" => Ok(SortMode::Randomized),
            "deterministic" => Ok(SortMode::Deterministic),
            _ => Err(SortError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for SortMode {
    type Error = SortError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(SortMode::Randomized),
            2 => Ok(SortMode::Deterministic),
            other => Err(SortError::InvalidMode(other.to_string())),
        }
    }
}

/// Where a randomized pick is parked before partitioning
///
/// `Low` moves the pick to the front of the range while the partition still
/// uses the element at `high` as its pivot value. `High` moves the pick to the
/// back so it becomes the pivot value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotPlacement {
    #[default]
    Low,
    High,
}

/// Supplies pivot indices for randomized mode
pub trait PivotSource {
    /// Pick an index in `[low, high]`
    ///
    /// Picks outside the range are clamped into it by the engine.
    fn pick(&mut self, low: usize, high: usize) -> usize;
}

impl<P: PivotSource + ?Sized> PivotSource for &mut P {
    fn pick(&mut self, low: usize, high: usize) -> usize {
        (**self).pick(low, high)
    }
}

/// Uniform picks from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngPivots<R>(pub R);

impl<R: Rng> PivotSource for RngPivots<R> {
    fn pick(&mut self, low: usize, high: usize) -> usize {
        self.0.gen_range(low..=high)
    }
}

/// Replays a fixed list of picks, clamped into the requested range
///
/// Once the script runs out every pick falls back to `high`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPivots {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedPivots {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            cursor: 0,
        }
    }
}

impl PivotSource for ScriptedPivots {
    fn pick(&mut self, low: usize, high: usize) -> usize {
        let pick = self.picks.get(self.cursor).copied().unwrap_or(high);
        self.cursor += 1;
        pick.clamp(low, high)
    }
}

/// Instrumentation gathered by one `sort` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortReport {
    pub mode: SortMode,
    /// Number of partition calls
    pub operations: usize,
    /// Pivot index chosen at each partition call, in call order
    pub pivot_highlights: Vec<usize>,
}

impl SortReport {
    /// Whether the index was chosen as a pivot at any point
    pub fn was_pivot(&self, index: usize) -> bool {
        self.pivot_highlights.contains(&index)
    }
}

/// QuickSort engine configured with a mode and pivot placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortEngine {
    mode: SortMode,
    placement: PivotPlacement,
}

impl SortEngine {
    pub fn new(mode: SortMode) -> Self {
        Self {
            mode,
            placement: PivotPlacement::default(),
        }
    }

    pub fn with_placement(mut self, placement: PivotPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn placement(&self) -> PivotPlacement {
        self.placement
    }

    /// Sort `racers` ascending by sort key, in place
    ///
    /// `pivots` is only consulted in randomized mode. Sequences of length
    /// zero or one are left untouched and produce an empty report.
    pub fn sort<P: PivotSource + ?Sized>(&self, racers: &mut [Racer], pivots: &mut P) -> SortReport {
        let mut run = SortRun {
            racers,
            pivots,
            mode: self.mode,
            placement: self.placement,
            report: SortReport {
                mode: self.mode,
                ..SortReport::default()
            },
        };

        if let Some(high) = run.racers.len().checked_sub(1) {
            run.quicksort(0, high);
        }

        log::debug!(
            "{} finished: {} partitions, pivots {:?}",
            self.mode,
            run.report.operations,
            run.report.pivot_highlights
        );
        run.report
    }
}

/// State of a single sort invocation
struct SortRun<'a, P: ?Sized> {
    racers: &'a mut [Racer],
    pivots: &'a mut P,
    mode: SortMode,
    placement: PivotPlacement,
    report: SortReport,
}

impl<P: PivotSource + ?Sized> SortRun<'_, P> {
    fn quicksort(&mut self, low: usize, high: usize) {
        if low >= high {
            return;
        }

        let pivot_index = match self.mode {
            SortMode::Randomized => {
                let chosen = self.pivots.pick(low, high).clamp(low, high);
                match self.placement {
                    PivotPlacement::Low => self.racers.swap(low, chosen),
                    PivotPlacement::High => self.racers.swap(high, chosen),
                }
                chosen
            }
            SortMode::Deterministic => high,
        };
        self.report.pivot_highlights.push(pivot_index);
        self.report.operations += 1;

        let settled = partition(self.racers, low, high);
        log::debug!("Partition [{}, {}] pivot {} settled at {}", low, high, pivot_index, settled);

        if settled > low {
            self.quicksort(low, settled - 1);
        }
        self.quicksort(settled + 1, high);
    }
}

/// Lomuto partition of `[low, high]` around the sort key at `high`
///
/// Returns the index where the pivot comes to rest. An empty or
/// out-of-bounds range leaves the sequence untouched and returns `low.min(high)`.
pub fn partition(racers: &mut [Racer], low: usize, high: usize) -> usize {
    if low >= high || high >= racers.len() {
        return low.min(high);
    }

    let pivot = racers[high].sort_key();
    let mut boundary = low;

    for j in low..high {
        if racers[j].sort_key() <= pivot {
            swap_with_lanes(racers, boundary, j);
            boundary += 1;
        }
    }

    swap_with_lanes(racers, boundary, high);
    boundary
}

/// Swap two racers and exchange their lanes in the same step
fn swap_with_lanes(racers: &mut [Racer], a: usize, b: usize) {
    if a == b {
        return;
    }
    racers.swap(a, b);
    let lane = racers[a].lane;
    racers[a].lane = racers[b].lane;
    racers[b].lane = lane;
    log::trace!("Swapped {} and {}", a, b);
}

/// Index of the median racer by sort key, without reordering
///
/// Picks index `len / 2` of the key-sorted order, so even lengths yield the
/// upper median.
pub fn median_index(racers: &[Racer]) -> Result<usize> {
    if racers.is_empty() {
        return Err(SortError::EmptyInput);
    }

    let mut order: Vec<usize> = (0..racers.len()).collect();
    order.sort_by(|&a, &b| racers[a].sort_key().total_cmp(&racers[b].sort_key()));
    Ok(order[racers.len() / 2])
}

/// The median racer by sort key
pub fn find_median(racers: &[Racer]) -> Result<&Racer> {
    median_index(racers).map(|i| &racers[i])
}
