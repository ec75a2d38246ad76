//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated time only (advanced by ticks, frozen while paused)
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod engine;
pub mod physics;
pub mod spawn;
pub mod sprites;
pub mod state;

pub use clock::SimulationClock;
pub use collision::{hit_test, is_out_of_bounds};
pub use engine::GameEngine;
pub use physics::{speed_multiplier, step};
pub use spawn::{EntitySpawner, SpawnPlan, random_bug_kind};
pub use sprites::SpriteTable;
pub use state::{
    EnginePhase, Entity, EntityKind, Footprint, RoundClock, SimEvent, TapOutcome, TiltBonusState,
};
