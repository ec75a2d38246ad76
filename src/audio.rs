//! Sound cues
//!
//! The engine only says *that* something audible happened. This gate turns
//! those events into cues for the platform's sound player, with its own
//! throttle so overlapping screams don't turn into noise.

use crate::sim::SimEvent;

/// Minimum gap between two rolling screams reaching the speaker
pub const SCREAM_THROTTLE_MS: f64 = 500.0;

/// Sounds the platform player knows how to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Tilt mode switched on
    TiltBonusActivated,
    /// A bug rolled into a wall while tilting
    RollingScream,
}

/// Event-to-cue gate
#[derive(Debug, Clone)]
pub struct AudioCues {
    enabled: bool,
    last_scream_ms: Option<f64>,
}

impl Default for AudioCues {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCues {
    pub fn new() -> Self {
        Self {
            enabled: true,
            last_scream_ms: None,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cues to play for this frame's events at host time `now_ms`
    pub fn cues(&mut self, events: &[SimEvent], now_ms: f64) -> Vec<SoundCue> {
        if !self.enabled {
            return Vec::new();
        }

        let mut cues = Vec::new();
        for event in events {
            match event {
                SimEvent::TiltBonusChanged { active: true } => {
                    cues.push(SoundCue::TiltBonusActivated);
                }
                SimEvent::Scream => {
                    let ready = self
                        .last_scream_ms
                        .is_none_or(|last| now_ms - last >= SCREAM_THROTTLE_MS);
                    if ready {
                        self.last_scream_ms = Some(now_ms);
                        cues.push(SoundCue::RollingScream);
                    }
                }
                _ => {}
            }
        }
        cues
    }
}
