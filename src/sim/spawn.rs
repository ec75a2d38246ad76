//! Entity spawning
//!
//! Bugs enter from a random screen edge and head for a jittered point near
//! the center, so they cross the play field instead of hugging a wall.

use glam::Vec2;
use rand::Rng;

use super::sprites::SpriteTable;
use super::state::{Entity, EntityKind};
use crate::consts::TARGET_JITTER;
use crate::direction_to;

/// Screen edge a spawn enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySide {
    Left,
    Right,
    Top,
    Bottom,
}

impl EntrySide {
    fn from_index(i: u32) -> Self {
        match i {
            0 => EntrySide::Left,
            1 => EntrySide::Right,
            2 => EntrySide::Top,
            _ => EntrySide::Bottom,
        }
    }
}

/// Everything decided for a spawn before the entity is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub kind: EntityKind,
    pub side: EntrySide,
    pub entry: Vec2,
    pub target: Vec2,
    pub speed: f32,
}

/// Creates entities using the injected sprite table
#[derive(Debug, Clone, Default)]
pub struct EntitySpawner {
    sprites: SpriteTable,
}

impl EntitySpawner {
    pub fn new(sprites: SpriteTable) -> Self {
        Self { sprites }
    }

    pub fn sprites(&self) -> &SpriteTable {
        &self.sprites
    }

    /// Spawn an entity of `kind` on a `screen_width` x `screen_height` screen
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        kind: EntityKind,
        screen_width: i32,
        screen_height: i32,
        rng: &mut R,
    ) -> Entity {
        let plan = self.plan(kind, screen_width, screen_height, rng);
        let vel = direction_to(plan.entry, plan.target) * plan.speed;
        Entity::new(kind, plan.entry, vel, self.sprites.footprint(kind))
    }

    /// Roll entry side, entry point, target and speed
    pub fn plan<R: Rng + ?Sized>(
        &self,
        kind: EntityKind,
        screen_width: i32,
        screen_height: i32,
        rng: &mut R,
    ) -> SpawnPlan {
        let width = screen_width.max(1);
        let height = screen_height.max(1);
        let footprint = self.sprites.footprint(kind);
        let (fw, fh) = (footprint.width as i32, footprint.height as i32);

        // Span along the edge keeps the whole sprite on screen, minimum 1
        let span_y = (height - fh).max(1);
        let span_x = (width - fw).max(1);

        let side = EntrySide::from_index(rng.random_range(0..4));
        let entry = match side {
            EntrySide::Left => Vec2::new(-fw as f32, rng.random_range(0..span_y) as f32),
            EntrySide::Right => Vec2::new(width as f32, rng.random_range(0..span_y) as f32),
            EntrySide::Top => Vec2::new(rng.random_range(0..span_x) as f32, -fh as f32),
            EntrySide::Bottom => Vec2::new(rng.random_range(0..span_x) as f32, height as f32),
        };

        let target = Vec2::new(
            width as f32 / 2.0 + rng.random_range(-TARGET_JITTER..=TARGET_JITTER) as f32,
            height as f32 / 2.0 + rng.random_range(-TARGET_JITTER..=TARGET_JITTER) as f32,
        );

        let (lo, hi) = kind.speed_range();
        let speed = rng.random_range(lo..hi) as f32;

        SpawnPlan {
            kind,
            side,
            entry,
            target,
            speed,
        }
    }
}

/// Pick a bug kind: 60% common, 25% swift, 15% rare
pub fn random_bug_kind<R: Rng + ?Sized>(rng: &mut R) -> EntityKind {
    match rng.random_range(0..100) {
        0..60 => EntityKind::Common,
        60..85 => EntityKind::Swift,
        _ => EntityKind::Rare,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_health_and_footprint() {
        let spawner = EntitySpawner::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let rare = spawner.spawn(EntityKind::Rare, 1000, 2000, &mut rng);
        assert_eq!(rare.health, 3);
        assert_eq!(rare.max_health, 3);
        assert_eq!(rare.footprint.width, 140);

        let swift = spawner.spawn(EntityKind::Swift, 1000, 2000, &mut rng);
        assert_eq!(swift.health, 1);
    }

    #[test]
    fn test_spawn_speed_in_range() {
        let spawner = EntitySpawner::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for kind in EntityKind::ALL {
            let (lo, hi) = kind.speed_range();
            for _ in 0..50 {
                let e = spawner.spawn(kind, 1000, 2000, &mut rng);
                let speed = e.vel.length();
                // Degenerate aim gives zero velocity, otherwise within range
                if speed > 0.0 {
                    assert!(speed >= lo as f32 - 0.01, "{kind:?} too slow: {speed}");
                    assert!(speed < hi as f32 + 0.01, "{kind:?} too fast: {speed}");
                }
            }
        }
    }

    #[test]
    fn test_tiny_screen_never_degenerates() {
        let spawner = EntitySpawner::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let e = spawner.spawn(EntityKind::Common, 0, -10, &mut rng);
            assert!(e.pos.is_finite());
            assert!(e.vel.is_finite());
        }
    }

    #[test]
    fn test_random_bug_kind_split() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match random_bug_kind(&mut rng) {
                EntityKind::Common => counts[0] += 1,
                EntityKind::Swift => counts[1] += 1,
                EntityKind::Rare => counts[2] += 1,
                other => panic!("unexpected kind {other:?}"),
            }
        }
        assert!((5_500..6_500).contains(&counts[0]), "common: {}", counts[0]);
        assert!((2_000..3_000).contains(&counts[1]), "swift: {}", counts[1]);
        assert!((1_000..2_000).contains(&counts[2]), "rare: {}", counts[2]);
    }

    proptest! {
        #[test]
        fn spawn_enters_from_extended_edge(
            seed in any::<u64>(),
            width in -50i32..3000,
            height in -50i32..3000,
            kind_idx in 0usize..6,
        ) {
            let spawner = EntitySpawner::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let kind = EntityKind::ALL[kind_idx];
            let plan = spawner.plan(kind, width, height, &mut rng);

            let w = width.max(1) as f32;
            let h = height.max(1) as f32;
            let fp = spawner.sprites().footprint(kind).size();

            prop_assert!(plan.entry.x >= -fp.x && plan.entry.x <= w);
            prop_assert!(plan.entry.y >= -fp.y && plan.entry.y <= h);
            let on_edge = plan.entry.x == -fp.x
                || plan.entry.x == w
                || plan.entry.y == -fp.y
                || plan.entry.y == h;
            prop_assert!(on_edge);
        }

        #[test]
        fn spawn_heads_toward_target(
            seed in any::<u64>(),
            width in 1i32..3000,
            height in 1i32..3000,
            kind_idx in 0usize..6,
        ) {
            let spawner = EntitySpawner::default();
            let kind = EntityKind::ALL[kind_idx];
            // Same seed twice: the plan shows what the spawn rolled
            let plan = spawner.plan(kind, width, height, &mut Pcg32::seed_from_u64(seed));
            let entity = spawner.spawn(kind, width, height, &mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(entity.pos, plan.entry);

            let aim = plan.target - plan.entry;
            if aim.length_squared() > 0.0 {
                prop_assert!(entity.vel.dot(aim) > 0.0);
                prop_assert!((entity.vel.length() - plan.speed).abs() < 0.01);
            } else {
                prop_assert_eq!(entity.vel, Vec2::ZERO);
            }
        }
    }
}
