use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::game::Move;

const EASY_CEILING: f64 = 100.0 / 3.0;
const MEDIUM_CEILING: f64 = 200.0 / 3.0;

/// Coarse label for the difficulty slider, shown next to the raw value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    /// Bands are half-open on the low side: a value exactly at a boundary
    /// falls into the higher tier.
    pub fn classify(difficulty: f64) -> DifficultyTier {
        if difficulty < EASY_CEILING {
            DifficultyTier::Easy
        } else if difficulty < MEDIUM_CEILING {
            DifficultyTier::Medium
        } else {
            DifficultyTier::Hard
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyTier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyTier::Easy),
            "medium" | "normal" => Ok(DifficultyTier::Medium),
            "hard" => Ok(DifficultyTier::Hard),
            _ => Err(()),
        }
    }
}

/// The two draw thresholds for a given difficulty: below the first the
/// opponent counters, below the second it mirrors, otherwise it concedes.
///
/// At difficulty 100 these are exactly `2/3` and `4/3`; the second exceeds
/// the draw range, so the concede branch is unreachable there. At difficulty
/// 0 both collapse to zero and the opponent always concedes. Both extremes
/// are deliberate.
pub fn thresholds(difficulty: f64) -> (f64, f64) {
    let d = difficulty / 50.0;
    (d * (1.0 / 3.0), d * (2.0 / 3.0))
}

/// Pure selection core: maps a uniform draw in `[0, 1)` to the opponent's
/// move. Difficulty linearly scales the mass on the counter and mirror
/// branches. Callers guarantee `difficulty` is within `[0, 100]`.
pub fn choose_with_draw(player: Move, difficulty: f64, draw: f64) -> Move {
    let (counter, mirror) = thresholds(difficulty);
    if draw < counter {
        player.beaten_by()
    } else if draw < mirror {
        player
    } else {
        player.beats()
    }
}

/// Opponent move selector owning the random source, so the pure core stays
/// deterministic under test.
pub struct OpponentAgent {
    rng: SmallRng,
}

impl OpponentAgent {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn choose_move(&mut self, player: Move, difficulty: f64) -> Move {
        let draw = self.rng.gen::<f64>();
        choose_with_draw(player, difficulty, draw)
    }
}

impl Default for OpponentAgent {
    fn default() -> Self {
        Self::new()
    }
}
