//! Sprite footprint table
//!
//! The renderer owns the actual images; the simulation only needs their
//! sizes. The table is handed to the spawner when the engine is built.

use serde::{Deserialize, Serialize};

use super::state::{EntityKind, Footprint};

/// Footprint per entity kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteTable {
    footprints: [Footprint; 6],
}

impl Default for SpriteTable {
    /// Placeholder sizes used when no sprites were loaded
    fn default() -> Self {
        Self {
            footprints: [
                Footprint::square(120), // Common
                Footprint::square(110), // Swift
                Footprint::square(140), // Rare
                Footprint::square(80),  // Bonus
                Footprint::square(80),  // Penalty
                Footprint::square(100), // Golden
            ],
        }
    }
}

impl SpriteTable {
    /// Same footprint for every kind
    pub fn uniform(footprint: Footprint) -> Self {
        Self {
            footprints: [footprint; 6],
        }
    }

    /// Override one kind's footprint (e.g. after decoding its bitmap)
    pub fn with_footprint(mut self, kind: EntityKind, width: i32, height: i32) -> Self {
        self.footprints[kind.index()] = Footprint::new(width, height);
        self
    }

    #[inline]
    pub fn footprint(&self, kind: EntityKind) -> Footprint {
        self.footprints[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes() {
        let table = SpriteTable::default();
        assert_eq!(table.footprint(EntityKind::Rare), Footprint::square(140));
        assert_eq!(table.footprint(EntityKind::Bonus), Footprint::square(80));
    }

    #[test]
    fn test_override_clamps() {
        let table = SpriteTable::default().with_footprint(EntityKind::Golden, 64, 0);
        assert_eq!(table.footprint(EntityKind::Golden), Footprint::new(64, 1));
        assert_eq!(table.footprint(EntityKind::Common), Footprint::square(120));
    }
}
