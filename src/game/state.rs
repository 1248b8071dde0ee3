use serde::{Deserialize, Serialize};

const DEFAULT_DIFFICULTY: f64 = 50.0;
const DIFFICULTY_MIN: f64 = 0.0;
const DIFFICULTY_MAX: f64 = 100.0;

/// One of the three playable moves, canonically indexed 0/1/2 with the
/// cyclic relation: `(x + 1) % 3` beats `x`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn index(self) -> u8 {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Move> {
        match index {
            0 => Some(Move::Rock),
            1 => Some(Move::Paper),
            2 => Some(Move::Scissors),
            _ => None,
        }
    }

    /// The move this one defeats, `(self + 2) % 3`.
    pub fn beats(self) -> Move {
        Move::ALL[((self.index() + 2) % 3) as usize]
    }

    /// The counter move, `(self + 1) % 3`, which defeats this one.
    pub fn beaten_by(self) -> Move {
        Move::ALL[((self.index() + 1) % 3) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one round from the player's perspective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundOutcome {
    Win,
    Loss,
    Tie,
}

/// Accumulated win/loss counters for the session. Monotonically
/// non-decreasing; ties touch neither counter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreState {
    pub wins: u32,
    pub losses: u32,
}

impl ScoreState {
    pub fn record(self, outcome: RoundOutcome) -> ScoreState {
        match outcome {
            RoundOutcome::Win => ScoreState {
                wins: self.wins + 1,
                ..self
            },
            RoundOutcome::Loss => ScoreState {
                losses: self.losses + 1,
                ..self
            },
            RoundOutcome::Tie => self,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum IntegrityError {
    DifficultyOutOfRange { value: f64 },
}

/// Session state: the shell-owned difficulty and the running score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub difficulty: f64,
    #[serde(default)]
    pub score: ScoreState,
}

impl GameState {
    pub fn new(difficulty: f64) -> Self {
        Self {
            difficulty,
            score: ScoreState::default(),
        }
    }

    /// Initial state matching the shell's defaults: mid-range difficulty,
    /// zeroed counters.
    pub fn sample() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }

    pub fn integrity_check(&self) -> Result<(), IntegrityError> {
        if !self.difficulty.is_finite()
            || self.difficulty < DIFFICULTY_MIN
            || self.difficulty > DIFFICULTY_MAX
        {
            return Err(IntegrityError::DifficultyOutOfRange {
                value: self.difficulty,
            });
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_relation_is_cyclic() {
        assert_eq!(Move::Rock.beats(), Move::Scissors);
        assert_eq!(Move::Paper.beats(), Move::Rock);
        assert_eq!(Move::Scissors.beats(), Move::Paper);

        for mv in Move::ALL {
            assert_eq!(mv.beaten_by().beats(), mv);
            assert_eq!(mv.beats().beaten_by(), mv);
        }
    }

    #[test]
    fn move_index_round_trips() {
        for mv in Move::ALL {
            assert_eq!(Move::from_index(mv.index()), Some(mv));
        }
        assert_eq!(Move::from_index(3), None);
        assert_eq!(Move::from_index(255), None);
    }

    #[test]
    fn score_record_touches_exactly_one_counter() {
        let score = ScoreState { wins: 2, losses: 5 };

        let after_win = score.record(RoundOutcome::Win);
        assert_eq!(after_win, ScoreState { wins: 3, losses: 5 });

        let after_loss = score.record(RoundOutcome::Loss);
        assert_eq!(after_loss, ScoreState { wins: 2, losses: 6 });

        let after_tie = score.record(RoundOutcome::Tie);
        assert_eq!(after_tie, score);
    }

    #[test]
    fn integrity_rejects_out_of_range_difficulty() {
        assert!(GameState::new(0.0).integrity_check().is_ok());
        assert!(GameState::new(100.0).integrity_check().is_ok());

        for value in [-0.1, 100.1, f64::NAN, f64::INFINITY] {
            let err = GameState::new(value).integrity_check();
            assert!(
                matches!(err, Err(IntegrityError::DifficultyOutOfRange { .. })),
                "difficulty {value} should be rejected"
            );
        }
    }
}
