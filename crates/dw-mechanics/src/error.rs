//! Error types for the dice engine.

use crate::dice::{MAX_DICE, MAX_SIDES};

/// Errors that can occur while parsing formulas or loading mechanic configs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// The formula does not match any accepted dice grammar.
    #[error("invalid dice formula: {0}")]
    InvalidFormula(String),

    /// The formula is well-formed but asks for too many dice or sides.
    #[error("too many dice: {count}d{sides} exceeds 100 dice or 1000 sides")]
    TooManyDice {
        /// Requested number of dice.
        count: u32,
        /// Requested number of sides (0 for fudge dice).
        sides: u32,
    },

    /// A stored mechanic configuration is malformed.
    #[error("invalid mechanic config: {0}")]
    InvalidConfig(String),

    /// A mechanic type name was not recognised.
    #[error("unknown mechanic type: {0}")]
    UnknownMechanic(String),

    /// No preset exists with the given name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

impl MechError {
    /// The chat-facing message shown in place of a roll result.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidFormula(formula) => format!(
                "❌ Invalid dice format `{formula}`. Try something like `1d20`, `2d6+3` or `4dF+1`."
            ),
            Self::TooManyDice { .. } => format!(
                "❌ Too many dice! Limit is {MAX_DICE} dice with at most {MAX_SIDES} sides."
            ),
            other => format!("❌ {other}"),
        }
    }
}

/// Convenience result type for dice engine operations.
pub type MechResult<T> = Result<T, MechError>;
