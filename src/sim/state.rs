//! Simulation state and core types
//!
//! Everything the engine owns between ticks lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnginePhase {
    /// No round has been started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Timers frozen, entities held in place
    Paused,
    /// Round finished
    Ended,
}

/// Insect categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Common,
    Swift,
    Rare,
    Bonus,
    Penalty,
    Golden,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Common,
        EntityKind::Swift,
        EntityKind::Rare,
        EntityKind::Bonus,
        EntityKind::Penalty,
        EntityKind::Golden,
    ];

    /// Bugs count against the `max_cockroaches` cap; specials don't
    pub fn is_bug(self) -> bool {
        matches!(self, EntityKind::Common | EntityKind::Swift | EntityKind::Rare)
    }

    /// Hits needed to squash
    pub fn initial_health(self) -> u8 {
        match self {
            EntityKind::Rare => 3,
            _ => 1,
        }
    }

    /// Spawn speed range in units/s (`lo..hi`, upper bound exclusive)
    pub fn speed_range(self) -> (u32, u32) {
        match self {
            EntityKind::Common => (120, 200),
            EntityKind::Swift => (220, 320),
            EntityKind::Rare => (100, 170),
            EntityKind::Bonus => (80, 120),
            EntityKind::Penalty => (140, 220),
            EntityKind::Golden => (100, 180),
        }
    }

    /// Velocity ceiling while the tilt bonus pushes bugs around
    pub fn max_tilt_speed(self) -> f32 {
        match self {
            EntityKind::Swift => TILT_MAX_SPEED_SWIFT,
            _ => TILT_MAX_SPEED,
        }
    }

    /// Index into per-kind tables
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Visual footprint of an entity in screen units (never zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    /// Build a footprint, pinning degenerate sizes to 1
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1) as u32,
            height: height.max(1) as u32,
        }
    }

    pub fn square(size: i32) -> Self {
        Self::new(size, size)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// A spawned insect
///
/// `pos` is the top-left corner of the footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub footprint: Footprint,
    pub health: u8,
    pub max_health: u8,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, vel: Vec2, footprint: Footprint) -> Self {
        let health = kind.initial_health();
        Self {
            kind,
            pos,
            vel,
            footprint,
            health,
            max_health: health,
        }
    }

    /// Axis-aligned point test, bounds inclusive
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.pos + self.footprint.size();
        point.x >= self.pos.x && point.x <= max.x && point.y >= self.pos.y && point.y <= max.y
    }

    /// Center of the footprint (handy for aiming taps)
    pub fn center(&self) -> Vec2 {
        self.pos + self.footprint.size() * 0.5
    }

    /// Take one hit, returns remaining health
    pub fn hit(&mut self) -> u8 {
        self.health = self.health.saturating_sub(1);
        self.health
    }
}

/// Timed tilt-force mode triggered by tapping a bonus bug
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltBonusState {
    pub active: bool,
    /// Simulated time (ms) after which the bonus switches off
    pub end_ms: f64,
    /// Latest tilt reading pushed by the sensor collaborator
    pub tilt: Vec2,
}

impl TiltBonusState {
    pub fn activate(&mut self, now_ms: f64) {
        self.active = true;
        self.end_ms = now_ms + TILT_BONUS_DURATION_MS as f64;
    }

    /// Switch off and forget the last tilt reading
    pub fn deactivate(&mut self) {
        self.active = false;
        self.tilt = Vec2::ZERO;
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.active && now_ms > self.end_ms
    }

    /// Seconds left on the bonus (0 when inactive)
    pub fn time_left_secs(&self, now_ms: f64) -> f32 {
        if !self.active {
            return 0.0;
        }
        (((self.end_ms - now_ms) / 1000.0) as f32).max(0.0)
    }
}

/// Round timers, all in simulated milliseconds since round start
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundClock {
    /// Simulated time; only advances on Running ticks
    pub now_ms: f64,
    pub last_tick_ms: f64,
    pub last_bonus_spawn_ms: f64,
    pub last_golden_spawn_ms: f64,
    /// Last rolling scream (None until the first one)
    pub last_scream_ms: Option<f64>,
    pub running: bool,
}

impl RoundClock {
    /// Fresh clock for a new round
    pub fn started() -> Self {
        Self {
            running: true,
            ..Self::default()
        }
    }

    /// Advance simulated time by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.now_ms += dt as f64 * 1000.0;
        self.last_tick_ms = self.now_ms;
    }

    pub fn since_bonus_spawn(&self) -> f64 {
        self.now_ms - self.last_bonus_spawn_ms
    }

    pub fn since_golden_spawn(&self) -> f64 {
        self.now_ms - self.last_golden_spawn_ms
    }

    /// Whether the scream rate limit has elapsed
    pub fn scream_ready(&self) -> bool {
        self.last_scream_ms
            .is_none_or(|last| self.now_ms - last >= SCREAM_INTERVAL_MS as f64)
    }
}

/// Notifications emitted by the engine, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Tilt bonus switched on (also re-sent when extended) or off
    TiltBonusChanged { active: bool },
    /// External price pushed, with the derived golden bug value
    GoldRateChanged { rate: f64, points_per_golden: u32 },
    /// A bug rolled into an edge while tilting
    Scream,
    /// A new entity entered the screen
    Spawned { kind: EntityKind },
}

/// Result of resolving a tap against the live entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    Miss,
    Hit {
        /// Snapshot of the entity after the hit was applied
        entity: Entity,
        removed: bool,
        remaining_health: u8,
    },
}

impl TapOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, TapOutcome::Hit { .. })
    }

    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            TapOutcome::Miss => None,
            TapOutcome::Hit { entity, .. } => Some(entity.kind),
        }
    }
}
