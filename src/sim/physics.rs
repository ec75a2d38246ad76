//! Per-tick entity motion
//!
//! Bugs fly in straight lines. While the tilt bonus is active the device
//! tilt pushes every bug, capped so they can't become untappable.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, TiltBonusState};
use crate::clamp_length;
use crate::consts::*;

/// Movement multiplier for the 1..=10 game speed setting
pub fn speed_multiplier(game_speed: u32) -> f32 {
    match game_speed {
        1 => 0.3,
        2 => 0.6,
        3 => 0.9,
        4 => 1.2,
        5 => 1.5,
        6 => 2.0,
        7 => 2.5,
        8 => 3.0,
        9 => 3.5,
        10 => 4.0,
        _ => 1.5,
    }
}

/// Push velocity by the tilt vector and clamp to the kind's ceiling
pub fn apply_tilt(entity: &mut Entity, tilt: Vec2, dt: f32) {
    entity.vel += tilt * dt * TILT_FORCE;
    entity.vel = clamp_length(entity.vel, entity.kind.max_tilt_speed());
}

/// Advance one entity by one tick
///
/// The tilt impulse uses raw `dt`; only the position update is scaled by
/// the speed multiplier.
pub fn step(entity: &mut Entity, dt: f32, speed_multiplier: f32, tilt: &TiltBonusState) {
    if tilt.active {
        apply_tilt(entity, tilt.tilt, dt);
    }
    entity.pos += entity.vel * dt * speed_multiplier;
}

/// Within `EDGE_THRESHOLD` of any screen boundary
pub fn is_near_edge(entity: &Entity, screen: Vec2) -> bool {
    let p = entity.pos;
    p.x <= EDGE_THRESHOLD
        || p.x >= screen.x - EDGE_THRESHOLD
        || p.y <= EDGE_THRESHOLD
        || p.y >= screen.y - EDGE_THRESHOLD
}

/// Roll for a rolling scream on an entity already known to be eligible
/// (tilt active, rate limit elapsed)
///
/// Only consumes randomness when the entity is near an edge.
pub fn roll_scream<R: Rng + ?Sized>(entity: &Entity, screen: Vec2, rng: &mut R) -> bool {
    is_near_edge(entity, screen) && rng.random_range(0..100) < SCREAM_CHANCE_PERCENT
}
