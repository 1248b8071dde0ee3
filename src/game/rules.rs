use serde::{Deserialize, Serialize};

use super::state::{GameState, IntegrityError, Move, RoundOutcome, ScoreState};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RuleError {
    InvalidMove { index: u8 },
    IntegrityViolation { error: IntegrityError },
}

/// Everything the shell re-renders after a round: the updated state, both
/// moves, the adjudicated outcome and the result line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResolution {
    pub state: GameState,
    pub player_move: Move,
    pub opponent_move: Move,
    pub outcome: RoundOutcome,
    pub message: String,
}

impl RoundResolution {
    pub fn new(
        state: GameState,
        player_move: Move,
        opponent_move: Move,
        outcome: RoundOutcome,
        message: String,
    ) -> Self {
        Self {
            state,
            player_move,
            opponent_move,
            outcome,
            message,
        }
    }
}

#[derive(Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    fn ensure_integrity(state: &GameState) -> Result<(), RuleError> {
        state
            .integrity_check()
            .map_err(|error| RuleError::IntegrityViolation { error })
    }

    pub fn move_from_index(index: u8) -> Result<Move, RuleError> {
        Move::from_index(index).ok_or(RuleError::InvalidMove { index })
    }

    /// Adjudicates one round. Pure: the caller owns the score and receives
    /// the updated copy alongside the outcome and result line.
    pub fn resolve_round(
        player: Move,
        opponent: Move,
        score: ScoreState,
    ) -> (RoundOutcome, ScoreState, String) {
        let outcome = if opponent == player.beats() {
            RoundOutcome::Win
        } else if player == opponent.beats() {
            RoundOutcome::Loss
        } else {
            RoundOutcome::Tie
        };

        let message = match outcome {
            RoundOutcome::Win => format!("The opponent chose {}, you win!", opponent.name()),
            RoundOutcome::Loss => format!("The opponent chose {}, you lose!", opponent.name()),
            RoundOutcome::Tie => format!("The opponent chose {}, tie!", opponent.name()),
        };

        (outcome, score.record(outcome), message)
    }

    /// Applies one round to the session state and returns the resolution the
    /// shell renders. The opponent move has already been drawn by the caller.
    pub fn play_round(
        &self,
        state: &mut GameState,
        player: Move,
        opponent: Move,
    ) -> Result<RoundResolution, RuleError> {
        Self::ensure_integrity(state)?;

        let (outcome, score, message) = Self::resolve_round(player, opponent, state.score);
        state.score = score;

        Ok(RoundResolution::new(
            state.clone(),
            player,
            opponent,
            outcome,
            message,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{choose_with_draw, OpponentAgent};

    #[test]
    fn every_pairing_yields_exactly_one_outcome() {
        for player in Move::ALL {
            for opponent in Move::ALL {
                let score = ScoreState { wins: 1, losses: 1 };
                let (outcome, updated, _) = RuleEngine::resolve_round(player, opponent, score);

                let expected = if opponent == player.beats() {
                    RoundOutcome::Win
                } else if player == opponent.beats() {
                    RoundOutcome::Loss
                } else {
                    assert_eq!(player, opponent);
                    RoundOutcome::Tie
                };
                assert_eq!(outcome, expected, "{player} vs {opponent}");

                let delta = (updated.wins - score.wins, updated.losses - score.losses);
                match outcome {
                    RoundOutcome::Win => assert_eq!(delta, (1, 0)),
                    RoundOutcome::Loss => assert_eq!(delta, (0, 1)),
                    RoundOutcome::Tie => assert_eq!(delta, (0, 0)),
                }
            }
        }
    }

    #[test]
    fn result_messages_match_the_shell_wording() {
        let score = ScoreState::default();

        let (_, _, win) = RuleEngine::resolve_round(Move::Rock, Move::Scissors, score);
        assert_eq!(win, "The opponent chose Scissors, you win!");

        let (_, _, lose) = RuleEngine::resolve_round(Move::Rock, Move::Paper, score);
        assert_eq!(lose, "The opponent chose Paper, you lose!");

        let (_, _, tie) = RuleEngine::resolve_round(Move::Rock, Move::Rock, score);
        assert_eq!(tie, "The opponent chose Rock, tie!");
    }

    #[test]
    fn play_round_updates_the_session_score() {
        let engine = RuleEngine::new();
        let mut state = GameState::sample();

        let resolution = engine
            .play_round(&mut state, Move::Paper, Move::Rock)
            .expect("round should resolve");

        assert_eq!(resolution.outcome, RoundOutcome::Win);
        assert_eq!(state.score, ScoreState { wins: 1, losses: 0 });
        assert_eq!(resolution.state, state);
    }

    #[test]
    fn play_round_rejects_out_of_range_difficulty() {
        let engine = RuleEngine::new();
        let mut state = GameState::new(140.0);

        let err = engine.play_round(&mut state, Move::Rock, Move::Rock);
        assert!(matches!(
            err,
            Err(RuleError::IntegrityViolation {
                error: IntegrityError::DifficultyOutOfRange { .. }
            })
        ));
        assert_eq!(state.score, ScoreState::default(), "score must not move");
    }

    #[test]
    fn move_from_index_rejects_unknown_buttons() {
        assert_eq!(RuleEngine::move_from_index(1), Ok(Move::Paper));
        assert_eq!(
            RuleEngine::move_from_index(7),
            Err(RuleError::InvalidMove { index: 7 })
        );
    }

    // Player Rock at difficulty 50, three fixed draws covering all three
    // selection branches.
    #[test]
    fn fixed_draws_drive_the_expected_rounds() {
        let engine = RuleEngine::new();
        let mut state = GameState::new(50.0);

        let opponent = choose_with_draw(Move::Rock, state.difficulty, 0.1);
        let lost = engine
            .play_round(&mut state, Move::Rock, opponent)
            .expect("round should resolve");
        assert_eq!(lost.opponent_move, Move::Paper);
        assert_eq!(lost.message, "The opponent chose Paper, you lose!");
        assert_eq!(state.score, ScoreState { wins: 0, losses: 1 });

        let opponent = choose_with_draw(Move::Rock, state.difficulty, 0.5);
        let tied = engine
            .play_round(&mut state, Move::Rock, opponent)
            .expect("round should resolve");
        assert_eq!(tied.opponent_move, Move::Rock);
        assert_eq!(tied.outcome, RoundOutcome::Tie);
        assert_eq!(state.score, ScoreState { wins: 0, losses: 1 });

        let opponent = choose_with_draw(Move::Rock, state.difficulty, 0.9);
        let won = engine
            .play_round(&mut state, Move::Rock, opponent)
            .expect("round should resolve");
        assert_eq!(won.opponent_move, Move::Scissors);
        assert_eq!(won.message, "The opponent chose Scissors, you win!");
        assert_eq!(state.score, ScoreState { wins: 1, losses: 1 });
    }

    #[test]
    fn seeded_session_accumulates_monotonically() {
        let engine = RuleEngine::new();
        let mut agent = OpponentAgent::with_seed(7);
        let mut state = GameState::new(80.0);

        let mut previous = state.score;
        for _ in 0..50 {
            let opponent = agent.choose_move(Move::Scissors, state.difficulty);
            engine
                .play_round(&mut state, Move::Scissors, opponent)
                .expect("round should resolve");
            assert!(state.score.wins >= previous.wins);
            assert!(state.score.losses >= previous.losses);
            let rounds_scored = (state.score.wins - previous.wins)
                + (state.score.losses - previous.losses);
            assert!(rounds_scored <= 1);
            previous = state.score;
        }
    }
}
