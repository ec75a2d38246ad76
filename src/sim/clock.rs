//! Fixed timestep scheduling
//!
//! Converts variable host frame times into a whole number of `SIM_DT`
//! ticks so the simulation stays deterministic regardless of frame rate.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we accept before clamping (tab switches, debugger stops)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Frame-time accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl SimulationClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step: if step.is_finite() && step > 0.0 { step } else { SIM_DT },
            max_substeps: max_substeps.max(1),
        }
    }

    /// Fixed step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Unconsumed frame time
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed one frame's elapsed time; returns how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt.min(MAX_FRAME_DT);
        }

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Drop pending time (round start, resume)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
