//! Whole-round behaviour of the engine

use bug_tap::consts::{SIM_DT, TILT_BONUS_DURATION_MS};
use bug_tap::SimulationSettings;
use bug_tap::sim::{
    EnginePhase, EntityKind, Footprint, GameEngine, SimEvent, SpriteTable, TapOutcome,
};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const TICK: f32 = 0.016;

fn scenario_settings() -> SimulationSettings {
    SimulationSettings {
        game_speed: 5,
        max_cockroaches: 10,
        bonus_interval: 30,
        round_duration: 120,
    }
}

fn running(seed: u64) -> GameEngine {
    let mut engine = GameEngine::new(seed);
    engine.set_screen_size(1000, 2000);
    engine.start_round(scenario_settings());
    engine
}

#[test]
fn seeded_round_is_deterministic() {
    let mut a = running(2024);
    let mut b = running(2024);
    for _ in 0..100 {
        a.tick(TICK);
        b.tick(TICK);
    }
    assert_eq!(a.entities(), b.entities());
    // Pinned output for this seed; changes to draw order, spawn gating or
    // purging show up here
    assert_eq!(a.entities().len(), 10);
    assert!(a.bug_count() <= 10);
}

#[test]
fn different_seeds_diverge() {
    let mut a = running(1);
    let mut b = running(2);
    for _ in 0..100 {
        a.tick(TICK);
        b.tick(TICK);
    }
    assert_ne!(a.entities(), b.entities());
}

#[test]
fn end_round_is_idempotent() {
    let mut engine = running(8);
    for _ in 0..50 {
        engine.tick(TICK);
    }
    engine.end_round();
    let phase = engine.phase();
    let clock = *engine.clock();
    let events = engine.drain_events();

    engine.end_round();
    assert_eq!(engine.phase(), phase);
    assert_eq!(engine.phase(), EnginePhase::Ended);
    assert_eq!(*engine.clock(), clock);
    assert!(engine.entities().is_empty());
    assert!(engine.drain_events().is_empty());
    assert!(!events.is_empty());
}

#[test]
fn pause_resume_keeps_entities() {
    let mut engine = running(31);
    for _ in 0..60 {
        engine.tick(TICK);
    }
    let before = engine.entities().to_vec();
    let now = engine.clock().now_ms;

    engine.pause();
    engine.resume();

    assert_eq!(engine.entities(), &before[..]);
    assert_eq!(engine.clock().now_ms, now);
    assert_eq!(engine.clock().last_tick_ms, now);
}

#[test]
fn tilt_bonus_expires_without_taps() {
    let mut engine = running(4);
    let center = engine.spawn(EntityKind::Bonus).expect("screen set").center();
    let outcome = engine.resolve_tap(center.x, center.y);
    assert_eq!(outcome.kind(), Some(EntityKind::Bonus));
    assert!(engine.is_tilt_bonus_active());
    engine.drain_events();

    engine.update_tilt(0.7, -0.4);
    let started = engine.clock().now_ms;
    let mut switched_off_at = None;
    for _ in 0..1000 {
        engine.tick(TICK);
        let off = engine
            .drain_events()
            .contains(&SimEvent::TiltBonusChanged { active: false });
        if off {
            switched_off_at = Some(engine.clock().now_ms);
            break;
        }
        assert!(engine.is_tilt_bonus_active());
    }

    let off_at = switched_off_at.expect("bonus never ended");
    let elapsed = off_at - started;
    assert!(elapsed > TILT_BONUS_DURATION_MS as f64);
    assert!(elapsed <= TILT_BONUS_DURATION_MS as f64 + TICK as f64 * 1000.0 + 0.01);
    assert!(!engine.is_tilt_bonus_active());
}

#[test]
fn rare_takes_three_taps() {
    let mut engine = running(6);
    let center = engine.spawn(EntityKind::Rare).expect("screen set").center();

    for expected in [2u8, 1] {
        match engine.resolve_tap(center.x, center.y) {
            TapOutcome::Hit {
                entity,
                removed,
                remaining_health,
            } => {
                assert_eq!(entity.kind, EntityKind::Rare);
                assert!(!removed);
                assert_eq!(remaining_health, expected);
                assert_eq!(entity.max_health, 3);
            }
            TapOutcome::Miss => panic!("expected hit"),
        }
        assert_eq!(engine.entities().len(), 1);
    }

    match engine.resolve_tap(center.x, center.y) {
        TapOutcome::Hit { removed, remaining_health, .. } => {
            assert!(removed);
            assert_eq!(remaining_health, 0);
        }
        TapOutcome::Miss => panic!("expected hit"),
    }
    assert!(engine.entities().is_empty());
}

#[test]
fn tap_resolves_only_first_overlap() {
    // On a 1x1 screen every entry point sits at a corner, so spawns from the
    // same or adjacent sides share a corner point
    let mut engine = GameEngine::with_rng(
        Pcg32::seed_from_u64(10),
        SpriteTable::uniform(Footprint::square(100)),
    );
    engine.set_screen_size(1, 1);
    engine.start_round(scenario_settings());
    for _ in 0..3 {
        engine.spawn(EntityKind::Common).expect("round running");
    }
    let before = engine.entities().to_vec();

    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 0.0),
    ];
    let (tap, covering) = corners
        .iter()
        .map(|&p| {
            let hits: Vec<usize> = (0..before.len())
                .filter(|&i| before[i].contains(p))
                .collect();
            (p, hits)
        })
        .find(|(_, hits)| hits.len() >= 2)
        .expect("three spawns always include an overlapping pair");

    match engine.resolve_tap(tap.x, tap.y) {
        TapOutcome::Hit { entity, removed, .. } => {
            assert_eq!(entity, before[covering[0]]);
            assert!(removed);
        }
        TapOutcome::Miss => panic!("expected hit"),
    }

    let mut expected = before.clone();
    expected.remove(covering[0]);
    assert_eq!(engine.entities(), &expected[..]);
    assert!(engine.entities()[covering[1] - 1].contains(tap));
}

#[test]
fn gold_rate_scenarios() {
    let mut engine = GameEngine::new(0);
    engine.update_external_rate(5000.0);
    assert_eq!(engine.points_per_golden(), 50);
    engine.update_external_rate(99.0);
    assert_eq!(engine.points_per_golden(), 1);
    assert_eq!(
        engine.drain_events(),
        vec![
            SimEvent::GoldRateChanged {
                rate: 5000.0,
                points_per_golden: 50
            },
            SimEvent::GoldRateChanged {
                rate: 99.0,
                points_per_golden: 1
            },
        ]
    );
}

#[test]
fn screams_only_while_tilting() {
    let mut engine = running(99);
    for _ in 0..600 {
        engine.tick(TICK);
    }
    assert!(!engine.drain_events().contains(&SimEvent::Scream));
}

proptest! {
    #[test]
    fn empty_spot_is_always_a_miss(seed in any::<u64>(), ticks in 0usize..200) {
        let mut engine = running(seed);
        for _ in 0..ticks {
            engine.tick(TICK);
        }
        // Far outside any possible footprint
        prop_assert_eq!(engine.resolve_tap(-10_000.0, -10_000.0), TapOutcome::Miss);
    }

    #[test]
    fn bug_cap_never_exceeded(seed in any::<u64>(), cap in 1u32..=20, speed in 1u32..=10) {
        let mut engine = GameEngine::new(seed);
        engine.set_screen_size(800, 600);
        engine.start_round(SimulationSettings {
            game_speed: speed,
            max_cockroaches: cap,
            ..SimulationSettings::default()
        });
        for _ in 0..300 {
            engine.tick(SIM_DT);
            prop_assert!(engine.bug_count() <= cap as usize);
        }
    }
}
