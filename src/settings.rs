//! Round settings
//!
//! Chosen by the player on the settings screen and handed to the engine at
//! round start. The settings screen validates; the engine only clamps.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BUG_SPAWN_BASE_PERCENT, BUG_SPAWN_PER_SPEED_PERCENT};

pub const GAME_SPEED_RANGE: RangeInclusive<u32> = 1..=10;
pub const MAX_COCKROACHES_RANGE: RangeInclusive<u32> = 1..=20;
/// Seconds between bonus/penalty spawns (before speed scaling)
pub const BONUS_INTERVAL_RANGE: RangeInclusive<u32> = 5..=60;
/// Round length in seconds
pub const ROUND_DURATION_RANGE: RangeInclusive<u32> = 30..=300;

/// Errors from validating or decoding settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{field} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-round simulation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Discrete speed step (1 = crawl, 10 = frantic)
    pub game_speed: u32,
    /// Cap on live common/swift/rare bugs
    pub max_cockroaches: u32,
    /// Seconds between bonus/penalty spawns at speed 1
    pub bonus_interval: u32,
    /// Round length in seconds
    pub round_duration: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            game_speed: 5,
            max_cockroaches: 10,
            bonus_interval: 30,
            round_duration: 120,
        }
    }
}

fn check(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), SettingsError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

impl SimulationSettings {
    /// Report the first field outside its allowed range
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("game_speed", self.game_speed, &GAME_SPEED_RANGE)?;
        check("max_cockroaches", self.max_cockroaches, &MAX_COCKROACHES_RANGE)?;
        check("bonus_interval", self.bonus_interval, &BONUS_INTERVAL_RANGE)?;
        check("round_duration", self.round_duration, &ROUND_DURATION_RANGE)?;
        Ok(())
    }

    /// Copy with every field pulled into its range
    pub fn clamped(&self) -> Self {
        let clamp = |v: u32, r: &RangeInclusive<u32>| v.clamp(*r.start(), *r.end());
        let clamped = Self {
            game_speed: clamp(self.game_speed, &GAME_SPEED_RANGE),
            max_cockroaches: clamp(self.max_cockroaches, &MAX_COCKROACHES_RANGE),
            bonus_interval: clamp(self.bonus_interval, &BONUS_INTERVAL_RANGE),
            round_duration: clamp(self.round_duration, &ROUND_DURATION_RANGE),
        };
        if clamped != *self {
            log::warn!("Settings clamped: {:?} -> {:?}", self, clamped);
        }
        clamped
    }

    /// Position multiplier for this speed step
    pub fn speed_multiplier(&self) -> f32 {
        crate::sim::physics::speed_multiplier(self.game_speed)
    }

    /// Bonus/penalty spawn interval, shortened at higher speeds
    pub fn bonus_interval_ms(&self) -> f64 {
        let scale = self.game_speed as f64 * 0.5 + 0.5;
        (self.bonus_interval as f64 * 1000.0 / scale).floor()
    }

    /// Per-tick chance (percent) of trying to spawn a bug
    pub fn bug_spawn_percent(&self) -> u32 {
        BUG_SPAWN_BASE_PERCENT + BUG_SPAWN_PER_SPEED_PERCENT * self.game_speed
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode stored settings, falling back to defaults on anything invalid
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
