//! Core game logic: session state and round adjudication.

pub mod rules;
pub mod state;

pub use rules::{RoundResolution, RuleEngine, RuleError};
pub use state::{GameState, IntegrityError, Move, RoundOutcome, ScoreState};
