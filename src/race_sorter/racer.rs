//! Racer - A single car and the attributes it is sorted by
//!
//! Attributes are rolled once when the racer is created and never change.
//! The sort key derived from them is the only thing the engine compares.
//! Race-state fields belong to the motion update and are left alone by sorting.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Display color of a racer (opaque to the engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RacerColor {
    pub const RED: Self = Self::rgb(255, 50, 50);
    pub const BLUE: Self = Self::rgb(50, 50, 255);
    pub const GREEN: Self = Self::rgb(50, 255, 50);
    pub const YELLOW: Self = Self::rgb(255, 255, 50);
    pub const PURPLE: Self = Self::rgb(255, 50, 255);
    pub const CYAN: Self = Self::rgb(50, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Default roster, assigned to lanes in order
const ROSTER: [(&str, RacerColor); 6] = [
    ("Flash", RacerColor::RED),
    ("Turbo", RacerColor::BLUE),
    ("Nitro", RacerColor::GREEN),
    ("Blaze", RacerColor::YELLOW),
    ("Storm", RacerColor::PURPLE),
    ("Rocket", RacerColor::CYAN),
];

/// Complete state for a single racer
///
/// Deserializing ignores any stored sort key and derives it from the attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RacerRecord")]
pub struct Racer {
    name: String,
    color: RacerColor,
    base_speed: f32,
    acceleration: f32,
    handling: f32,
    sort_key: f32,
    /// Display lane, swapped alongside the racer during partitioning
    pub lane: usize,
    /// Distance covered along the track
    pub position: f32,
    /// Current speed
    pub speed: f32,
    pub finished: bool,
    /// Elapsed race time when the finish line was crossed
    pub finish_time: f32,
    pub power_active: bool,
    /// Seconds of boost remaining
    pub power_timer: f32,
}

/// Serialized racer without its derived sort key
#[derive(Deserialize)]
struct RacerRecord {
    name: String,
    color: RacerColor,
    base_speed: f32,
    acceleration: f32,
    handling: f32,
    #[serde(default)]
    lane: usize,
    #[serde(default)]
    position: f32,
    #[serde(default)]
    speed: f32,
    #[serde(default)]
    finished: bool,
    #[serde(default)]
    finish_time: f32,
    #[serde(default)]
    power_active: bool,
    #[serde(default)]
    power_timer: f32,
}

impl From<RacerRecord> for Racer {
    fn from(record: RacerRecord) -> Self {
        let mut racer = Racer::new(
            record.name,
            record.color,
            record.base_speed,
            record.acceleration,
            record.handling,
        );
        racer.lane = record.lane;
        racer.position = record.position;
        racer.speed = record.speed;
        racer.finished = record.finished;
        racer.finish_time = record.finish_time;
        racer.power_active = record.power_active;
        racer.power_timer = record.power_timer;
        racer
    }
}

impl Racer {
    pub const BASE_SPEED_RANGE: RangeInclusive<f32> = 80.0..=120.0;
    pub const ACCELERATION_RANGE: RangeInclusive<f32> = 20.0..=40.0;
    pub const HANDLING_RANGE: RangeInclusive<f32> = 60.0..=95.0;

    /// Speed retained when a handling check fails
    const SLIP_FACTOR: f32 = 0.95;

    /// Create a racer with fixed attributes
    pub fn new(
        name: impl Into<String>,
        color: RacerColor,
        base_speed: f32,
        acceleration: f32,
        handling: f32,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            base_speed,
            acceleration,
            handling,
            sort_key: Self::sort_key_for(base_speed, acceleration, handling),
            lane: 0,
            position: 0.0,
            speed: 0.0,
            finished: false,
            finish_time: 0.0,
            power_active: false,
            power_timer: 0.0,
        }
    }

    /// Roll a fresh racer for the given lane
    pub fn random<R: Rng + ?Sized>(lane: usize, rng: &mut R) -> Self {
        let (base, color) = ROSTER[lane % ROSTER.len()];
        let name = match lane / ROSTER.len() {
            0 => base.to_string(),
            round => format!("{} {}", base, round + 1),
        };

        let mut racer = Self::new(
            name,
            color,
            rng.gen_range(Self::BASE_SPEED_RANGE),
            rng.gen_range(Self::ACCELERATION_RANGE),
            rng.gen_range(Self::HANDLING_RANGE),
        );
        racer.lane = lane;
        racer
    }

    /// Weighted blend of the three attributes
    pub fn sort_key_for(base_speed: f32, acceleration: f32, handling: f32) -> f32 {
        base_speed * 0.5 + acceleration * 0.3 + handling * 0.2
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> RacerColor {
        self.color
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn handling(&self) -> f32 {
        self.handling
    }

    pub fn sort_key(&self) -> f32 {
        self.sort_key
    }

    /// Put the racer back on the start line
    pub fn reset_race_state(&mut self) {
        self.position = 0.0;
        self.speed = 0.0;
        self.finished = false;
        self.finish_time = 0.0;
        self.power_active = false;
        self.power_timer = 0.0;
    }

    /// Grant the median power boost
    pub fn activate_power(&mut self, duration: f32) {
        self.power_active = true;
        self.power_timer = duration;
    }

    /// Count the boost down, ending it when the timer runs out
    pub fn tick_power(&mut self, delta: f32) {
        if self.power_active {
            self.power_timer -= delta;
            if self.power_timer <= 0.0 {
                self.power_active = false;
                self.power_timer = 0.0;
            }
        }
    }

    /// Advance the racer for one tick
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        delta: f32,
        boost: f32,
        track_length: f32,
        rng: &mut R,
    ) {
        if self.finished {
            return;
        }

        self.speed += self.acceleration * delta * boost;
        self.speed = self.speed.min(self.base_speed * boost);

        self.position += self.speed * delta;

        // Poor handling occasionally costs some speed
        if rng.gen::<f32>() > self.handling / 100.0 {
            self.speed *= Self::SLIP_FACTOR;
        }

        if self.position >= track_length {
            self.finished = true;
            self.position = track_length;
        }
    }
}
