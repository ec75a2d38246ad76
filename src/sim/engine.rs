//! Game engine
//!
//! Owns the live entities, round timers and tilt bonus, and runs the
//! per-tick algorithm. The host drives it with `tick`/`advance`, forwards
//! taps and sensor readings, and drains `SimEvent`s after each frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::clock::SimulationClock;
use super::collision::{hit_test, is_out_of_bounds};
use super::physics::{roll_scream, step};
use super::spawn::{EntitySpawner, random_bug_kind};
use super::sprites::SpriteTable;
use super::state::{
    EnginePhase, Entity, EntityKind, RoundClock, SimEvent, TapOutcome, TiltBonusState,
};
use crate::consts::GOLDEN_INTERVAL_MS;
use crate::rate::{DEFAULT_RATE, points_per_golden};
use crate::settings::SimulationSettings;

/// The simulation core
#[derive(Debug, Clone)]
pub struct GameEngine<R: Rng = Pcg32> {
    settings: SimulationSettings,
    spawner: EntitySpawner,
    rng: R,
    phase: EnginePhase,
    /// Live entities in spawn order (hit test tie-break order)
    entities: Vec<Entity>,
    clock: RoundClock,
    tilt: TiltBonusState,
    stepper: SimulationClock,
    /// Unset until the host reports a layout
    screen: Option<(i32, i32)>,
    gold_rate: f64,
    points_per_golden: u32,
    events: Vec<SimEvent>,
}

impl GameEngine<Pcg32> {
    /// Engine with default sprites and a seeded PCG stream
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), SpriteTable::default())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(rng: R, sprites: SpriteTable) -> Self {
        Self {
            settings: SimulationSettings::default(),
            spawner: EntitySpawner::new(sprites),
            rng,
            phase: EnginePhase::Idle,
            entities: Vec::new(),
            clock: RoundClock::default(),
            tilt: TiltBonusState::default(),
            stepper: SimulationClock::default(),
            screen: None,
            gold_rate: DEFAULT_RATE,
            points_per_golden: points_per_golden(DEFAULT_RATE),
            events: Vec::new(),
        }
    }

    // === Host -> engine ===

    /// Report the play area size; degenerate sizes are pinned to 1
    pub fn set_screen_size(&mut self, width: i32, height: i32) {
        let size = (width.max(1), height.max(1));
        if size != (width, height) {
            log::warn!("Screen size {}x{} clamped to {}x{}", width, height, size.0, size.1);
        }
        self.screen = Some(size);
    }

    /// Begin a new round, discarding anything left from the previous one
    pub fn start_round(&mut self, settings: SimulationSettings) {
        if matches!(self.phase, EnginePhase::Running | EnginePhase::Paused) {
            log::warn!("start_round during {:?}, restarting", self.phase);
        }
        self.settings = settings.clamped();
        self.entities.clear();
        self.clock = RoundClock::started();
        self.stepper.reset();
        self.deactivate_tilt_bonus();
        self.phase = EnginePhase::Running;
        log::info!("Round started: {:?}", self.settings);
    }

    /// Replace settings mid-round (takes effect next tick)
    pub fn update_settings(&mut self, settings: SimulationSettings) {
        self.settings = settings.clamped();
        log::info!("Settings updated: speed={}", self.settings.game_speed);
    }

    pub fn pause(&mut self) {
        if self.phase == EnginePhase::Running {
            self.phase = EnginePhase::Paused;
            self.clock.running = false;
            log::info!("Round paused at {:.0}ms", self.clock.now_ms);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == EnginePhase::Paused {
            self.phase = EnginePhase::Running;
            self.clock.running = true;
            self.clock.last_tick_ms = self.clock.now_ms;
            self.stepper.reset();
            log::info!("Round resumed");
        }
    }

    /// End the round; safe to call repeatedly
    pub fn end_round(&mut self) {
        if !matches!(self.phase, EnginePhase::Running | EnginePhase::Paused) {
            return;
        }
        self.phase = EnginePhase::Ended;
        self.clock.running = false;
        self.deactivate_tilt_bonus();
        self.entities.clear();
        log::info!("Round ended after {:.1}s", self.clock.now_ms / 1000.0);
    }

    /// Latest device tilt; only has an effect while the bonus is active
    pub fn update_tilt(&mut self, tilt_x: f32, tilt_y: f32) {
        let tilt = Vec2::new(tilt_x, tilt_y);
        self.tilt.tilt = if tilt.is_finite() { tilt } else { Vec2::ZERO };
    }

    /// New price from the rate feed; golden bugs are worth `ceil(rate / 100)`
    pub fn update_external_rate(&mut self, rate: f64) {
        if !rate.is_finite() {
            log::warn!("Ignoring non-finite rate {}, keeping {}", rate, self.gold_rate);
            return;
        }
        self.gold_rate = rate;
        self.points_per_golden = points_per_golden(rate);
        self.events.push(SimEvent::GoldRateChanged {
            rate,
            points_per_golden: self.points_per_golden,
        });
    }

    /// Feed a host frame; runs as many fixed ticks as are due
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if self.phase != EnginePhase::Running {
            return 0;
        }
        let ticks = self.stepper.advance(frame_dt);
        let dt = self.stepper.step();
        for _ in 0..ticks {
            self.tick(dt);
        }
        ticks
    }

    /// Advance the simulation by one step of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.phase != EnginePhase::Running {
            return;
        }
        let Some((width, height)) = self.screen else {
            return;
        };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let screen = Vec2::new(width as f32, height as f32);

        self.clock.advance(dt);

        if self.tilt.is_expired(self.clock.now_ms) {
            self.deactivate_tilt_bonus();
        }

        // Bugs, gated on the live count so the cap is never exceeded
        let bug_count = self.entities.iter().filter(|e| e.kind.is_bug()).count();
        if bug_count < self.settings.max_cockroaches as usize
            && self.rng.random_range(0..100) < self.settings.bug_spawn_percent()
        {
            let kind = random_bug_kind(&mut self.rng);
            self.spawn(kind);
        }

        if self.clock.since_bonus_spawn() > self.settings.bonus_interval_ms() {
            let kind = if self.rng.random_bool(0.5) {
                EntityKind::Bonus
            } else {
                EntityKind::Penalty
            };
            self.spawn(kind);
            self.clock.last_bonus_spawn_ms = self.clock.now_ms;
        }

        if self.clock.since_golden_spawn() > GOLDEN_INTERVAL_MS as f64 {
            self.spawn(EntityKind::Golden);
            self.clock.last_golden_spawn_ms = self.clock.now_ms;
        }

        let speed = self.settings.speed_multiplier();
        for entity in &mut self.entities {
            if self.tilt.active
                && self.clock.scream_ready()
                && roll_scream(entity, screen, &mut self.rng)
            {
                self.clock.last_scream_ms = Some(self.clock.now_ms);
                self.events.push(SimEvent::Scream);
            }
            step(entity, dt, speed, &self.tilt);
        }

        self.entities.retain(|e| !is_out_of_bounds(e, screen));
    }

    /// Spawn one entity of `kind` now (also used by the tick schedule)
    ///
    /// Returns None outside a round (Running or Paused) or when no screen
    /// size has been reported yet.
    pub fn spawn(&mut self, kind: EntityKind) -> Option<&Entity> {
        if !matches!(self.phase, EnginePhase::Running | EnginePhase::Paused) {
            return None;
        }
        let (width, height) = self.screen?;
        let entity = self.spawner.spawn(kind, width, height, &mut self.rng);
        log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, entity.pos.x, entity.pos.y);
        self.entities.push(entity);
        self.events.push(SimEvent::Spawned { kind });
        self.entities.last()
    }

    /// Resolve a tap at `(x, y)`; at most one entity is affected
    pub fn resolve_tap(&mut self, x: f32, y: f32) -> TapOutcome {
        if self.phase != EnginePhase::Running {
            return TapOutcome::Miss;
        }
        let Some(index) = hit_test(Vec2::new(x, y), &self.entities) else {
            return TapOutcome::Miss;
        };

        let entity = &mut self.entities[index];
        let remaining = entity.hit();
        let snapshot = *entity;
        let removed = match snapshot.kind {
            EntityKind::Rare => remaining == 0,
            EntityKind::Bonus => {
                self.activate_tilt_bonus();
                true
            }
            _ => true,
        };
        if removed {
            self.entities.remove(index);
        }

        TapOutcome::Hit {
            entity: snapshot,
            removed,
            remaining_health: remaining,
        }
    }

    fn activate_tilt_bonus(&mut self) {
        self.tilt.activate(self.clock.now_ms);
        log::debug!("Tilt bonus active until {:.0}ms", self.tilt.end_ms);
        self.events.push(SimEvent::TiltBonusChanged { active: true });
    }

    fn deactivate_tilt_bonus(&mut self) {
        let was_active = self.tilt.active;
        self.tilt.deactivate();
        if was_active {
            log::debug!("Tilt bonus over");
            self.events.push(SimEvent::TiltBonusChanged { active: false });
        }
    }

    // === Engine -> host ===

    /// Live entities for drawing
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Live common/swift/rare bugs
    pub fn bug_count(&self) -> usize {
        self.entities.iter().filter(|e| e.kind.is_bug()).count()
    }

    /// Take all notifications emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == EnginePhase::Running
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn tilt_bonus(&self) -> &TiltBonusState {
        &self.tilt
    }

    pub fn is_tilt_bonus_active(&self) -> bool {
        self.tilt.active
    }

    pub fn tilt_bonus_time_left(&self) -> f32 {
        self.tilt.time_left_secs(self.clock.now_ms)
    }

    pub fn gold_rate(&self) -> f64 {
        self.gold_rate
    }

    pub fn points_per_golden(&self) -> u32 {
        self.points_per_golden
    }

    pub fn screen_size(&self) -> Option<(i32, i32)> {
        self.screen
    }
}
