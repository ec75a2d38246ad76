//! Tap hit testing and screen bounds

use glam::Vec2;

use super::state::Entity;

/// Index of the first entity (in collection order) whose footprint
/// contains `point`
pub fn hit_test(point: Vec2, entities: &[Entity]) -> Option<usize> {
    entities.iter().position(|e| e.contains(point))
}

/// True once an entity has left the screen expanded by its own footprint
pub fn is_out_of_bounds(entity: &Entity, screen: Vec2) -> bool {
    let size = entity.footprint.size();
    entity.pos.x < -size.x
        || entity.pos.x > screen.x + size.x
        || entity.pos.y < -size.y
        || entity.pos.y > screen.y + size.y
}
