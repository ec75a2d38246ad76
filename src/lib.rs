//! Bug Tap - a tap-the-insects arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, hit testing, engine)
//! - `session`: Round session (countdown + scoring around the engine)
//! - `scoring`: Point table and score accumulator
//! - `settings`: Validated round settings
//! - `audio`: Sound cue gating for engine events
//! - `rate`: External price feed values for golden bugs
//! - `highscores`: Leaderboard of finished rounds

pub mod audio;
pub mod highscores;
pub mod rate;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{HighScores, RoundRecord};
pub use session::Session;
pub use settings::{SettingsError, SimulationSettings};
pub use sim::{EntityKind, GameEngine, SimEvent, TapOutcome};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one frame of the host's render loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tilt force applied per unit of tilt while the bonus is active (units/s²)
    pub const TILT_FORCE: f32 = 800.0;
    /// How long a tilt bonus lasts once a bonus bug is tapped
    pub const TILT_BONUS_DURATION_MS: u64 = 10_000;
    /// Speed ceiling while tilting (swift bugs get a bit more headroom)
    pub const TILT_MAX_SPEED: f32 = 500.0;
    pub const TILT_MAX_SPEED_SWIFT: f32 = 600.0;

    /// Golden bugs appear on a fixed cadence regardless of settings
    pub const GOLDEN_INTERVAL_MS: u64 = 20_000;

    /// Base chance (percent) of a bug spawn on a tick, plus per-speed-step bonus
    pub const BUG_SPAWN_BASE_PERCENT: u32 = 15;
    pub const BUG_SPAWN_PER_SPEED_PERCENT: u32 = 2;

    /// Spawn aim: screen center plus uniform jitter in [-TARGET_JITTER, TARGET_JITTER]
    pub const TARGET_JITTER: i32 = 300;

    /// Distance from any screen edge that counts as "rolling into the corner"
    pub const EDGE_THRESHOLD: f32 = 100.0;
    /// Minimum time between two rolling screams
    pub const SCREAM_INTERVAL_MS: u64 = 800;
    /// Chance (percent) that an eligible bug screams
    pub const SCREAM_CHANCE_PERCENT: u32 = 20;
}

/// Normalize `to - from`, or zero if the two points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Rescale `v` so its length does not exceed `max`
#[inline]
pub fn clamp_length(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max && len > 0.0 { v / len * max } else { v }
}
