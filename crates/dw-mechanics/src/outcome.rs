//! Success annotation against a caller-supplied difficulty.
//!
//! Applied after a mechanic has produced its number, independent of how that
//! number was rolled:
//! - roll-under succeeds when the total is at or below the difficulty,
//! - dice pools succeed when the success count reaches the difficulty,
//! - everything else succeeds when the total meets or beats it.

use serde::{Deserialize, Serialize};

use crate::mechanic::MechanicType;

/// How a result is compared against a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Succeed when `value >= difficulty`.
    AtLeast,
    /// Succeed when `value <= difficulty`.
    AtMost,
    /// Succeed when the success count `>= difficulty`.
    Successes,
}

impl Comparison {
    /// The comparison a mechanic uses.
    pub fn for_mechanic(mechanic: MechanicType) -> Self {
        match mechanic {
            MechanicType::RollUnder => Self::AtMost,
            MechanicType::DicePool => Self::Successes,
            _ => Self::AtLeast,
        }
    }
}

/// The result of comparing a roll to a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The roll succeeded.
    Success {
        /// How far past the difficulty the roll landed.
        margin: i64,
    },
    /// The roll failed.
    Failure {
        /// How far short of the difficulty the roll landed.
        shortfall: i64,
    },
}

impl Outcome {
    /// Returns true for a success.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { margin } => write!(f, "Success (margin {margin})"),
            Self::Failure { shortfall } => write!(f, "Failure (short by {shortfall})"),
        }
    }
}

/// Compare `value` (a total, or a success count) against `difficulty`.
pub fn annotate(comparison: Comparison, value: i64, difficulty: i64) -> Outcome {
    let succeeded = match comparison {
        Comparison::AtLeast | Comparison::Successes => value >= difficulty,
        Comparison::AtMost => value <= difficulty,
    };
    let distance = i64::try_from(value.abs_diff(difficulty)).unwrap_or(i64::MAX);
    if succeeded {
        Outcome::Success { margin: distance }
    } else {
        Outcome::Failure {
            shortfall: distance,
        }
    }
}
