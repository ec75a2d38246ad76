//! High score leaderboard
//!
//! Tracks the top 10 finished rounds. Storage belongs to the host; the
//! board is plain serde data.

use serde::{Deserialize, Serialize};

use crate::settings::SimulationSettings;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Registered player name
    pub player: String,
    pub score: u32,
    /// Settings the round was played with
    pub settings: SimulationSettings,
    /// Unix timestamp (ms) when the round ended
    pub timestamp: f64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<RoundRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a round if it qualifies; returns the rank achieved
    pub fn add(&mut self, record: RoundRecord) -> Option<usize> {
        let rank = self.potential_rank(record.score)?;
        log::info!("{} placed #{} with {}", record.player, rank, record.score);
        self.entries.insert(rank - 1, record);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best round for one player
    pub fn best_for(&self, player: &str) -> Option<&RoundRecord> {
        self.entries.iter().find(|e| e.player == player)
    }
}
