//! Round session
//!
//! Wraps the engine with the pieces the game screen layers on top: the
//! round countdown and the score. Scoring stays out of the engine so the
//! simulation can be replayed without caring about points.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::highscores::RoundRecord;
use crate::scoring::{Score, points_for_outcome};
use crate::settings::SimulationSettings;
use crate::sim::{GameEngine, TapOutcome};

/// A single timed round
#[derive(Debug, Clone)]
pub struct Session<R: Rng = Pcg32> {
    engine: GameEngine<R>,
    score: Score,
    time_left_ms: f64,
    finished: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        let time_left_ms = engine.settings().round_duration as f64 * 1000.0;
        Self {
            engine,
            score: Score::new(),
            time_left_ms,
            finished: false,
        }
    }

    /// Start (or restart) the round with fresh score and countdown
    pub fn start(&mut self, settings: SimulationSettings) {
        self.engine.start_round(settings);
        self.score.reset();
        self.time_left_ms = self.engine.settings().round_duration as f64 * 1000.0;
        self.finished = false;
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn resume(&mut self) {
        self.engine.resume();
    }

    /// Feed a host frame; returns true once the round is over
    pub fn advance(&mut self, frame_dt: f32) -> bool {
        if self.finished || !self.engine.is_running() {
            return self.finished;
        }
        let ticks = self.engine.advance(frame_dt);
        self.time_left_ms -= ticks as f64 * crate::consts::SIM_DT as f64 * 1000.0;
        if self.time_left_ms <= 0.0 {
            self.time_left_ms = 0.0;
            log::info!("Time up, final score {}", self.score.value());
            self.end();
        }
        self.finished
    }

    /// Resolve a tap and score it; taps outside a running round are ignored
    pub fn tap(&mut self, x: f32, y: f32) -> (TapOutcome, i32) {
        if !self.engine.is_running() {
            return (TapOutcome::Miss, 0);
        }
        let outcome = self.engine.resolve_tap(x, y);
        let delta = points_for_outcome(&outcome, self.engine.points_per_golden());
        self.score.apply(delta);
        (outcome, delta)
    }

    /// Stop the round early (player quit, screen closed)
    pub fn end(&mut self) {
        self.engine.end_round();
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    /// Whole seconds left, as shown on the countdown
    pub fn time_left_secs(&self) -> u32 {
        (self.time_left_ms / 1000.0).ceil() as u32
    }

    /// Leaderboard entry for this round
    pub fn record(&self, player: &str, timestamp: f64) -> RoundRecord {
        RoundRecord {
            player: player.to_string(),
            score: self.score.value(),
            settings: *self.engine.settings(),
            timestamp,
        }
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<R> {
        &mut self.engine
    }
}
