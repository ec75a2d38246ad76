//! Scoring
//!
//! Pure point lookups applied by the session when the engine reports a tap.

use serde::{Deserialize, Serialize};

use crate::sim::{EntityKind, TapOutcome};

/// Points lost for tapping empty ground
pub const MISS_PENALTY: i32 = 5;

/// Points for hitting an entity of `kind`
///
/// Golden bugs are priced by the external rate, so the caller passes the
/// engine's current value.
pub fn points_for(kind: EntityKind, points_per_golden: u32) -> i32 {
    match kind {
        EntityKind::Common => 10,
        EntityKind::Swift => 15,
        EntityKind::Rare => 100,
        EntityKind::Bonus => 50,
        EntityKind::Penalty => -15,
        EntityKind::Golden => points_per_golden.min(i32::MAX as u32) as i32,
    }
}

/// Score change for a tap outcome (every hit counts, including
/// non-final hits on a rare bug)
pub fn points_for_outcome(outcome: &TapOutcome, points_per_golden: u32) -> i32 {
    match outcome {
        TapOutcome::Miss => -MISS_PENALTY,
        TapOutcome::Hit { entity, .. } => points_for(entity.kind, points_per_golden),
    }
}

/// Running score, never negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Apply a signed delta, saturating at zero
    pub fn apply(&mut self, delta: i32) -> u32 {
        self.value = if delta >= 0 {
            self.value.saturating_add(delta as u32)
        } else {
            self.value.saturating_sub(delta.unsigned_abs())
        };
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}
