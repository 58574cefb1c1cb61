//! Race Sorter Module
//!
//! QuickSort over six racers, with the pivot choices and swaps recorded
//! so the presentation layer can replay them as lane changes on a track.

pub mod engine;
pub mod error;
pub mod race;
pub mod racer;
pub mod registry;
pub mod session;

pub use engine::{
    find_median, median_index, partition, PivotPlacement, PivotSource, RngPivots, ScriptedPivots,
    SortEngine, SortMode, SortReport,
};
pub use error::{Result, SortError};
pub use race::{RaceConfig, RaceResult, RaceSnapshot, RaceState, RacerSnapshot};
pub use racer::{Racer, RacerColor};
pub use registry::RacerRegistry;
pub use session::RaceSession;
