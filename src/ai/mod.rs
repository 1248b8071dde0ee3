//! Opponent move selection and difficulty classification.

pub mod opponent;

pub use opponent::{choose_with_draw, thresholds, DifficultyTier, OpponentAgent};
