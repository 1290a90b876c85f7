//! Dice types, formula parsing, pools, and rolling.
//!
//! Supports standard polyhedral dice (d4 through d100), dice with any number
//! of sides up to [`MAX_SIDES`], and fudge dice (`dF`). Dice can be tagged
//! (hope, fear) for mechanic-specific display.

pub mod expr;
pub mod pool;
pub mod roll;
pub mod roller;

pub use expr::{DiceExpression, is_dice_formula, parse_formula};
pub use pool::DicePool;
pub use roll::{DieResult, RollOutcome, evaluate};
pub use roller::{Roller, ScriptedRoller};

use serde::{Deserialize, Serialize};

/// Maximum number of dice a single formula may roll.
pub const MAX_DICE: u32 = 100;

/// Maximum number of sides a standard die may have.
pub const MAX_SIDES: u32 = 1000;

/// A die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
    /// A fudge die with faces -1, 0 and +1.
    Fudge,
}

impl Die {
    /// Returns the die for a side count, using the named variants where possible.
    pub fn from_sides(sides: u32) -> Self {
        match sides {
            4 => Self::D4,
            6 => Self::D6,
            8 => Self::D8,
            10 => Self::D10,
            12 => Self::D12,
            20 => Self::D20,
            100 => Self::D100,
            n => Self::Custom(n),
        }
    }

    /// Returns the number of faces on this die (3 for fudge dice).
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
            Self::Fudge => 3,
        }
    }

    /// Returns true for fudge dice.
    pub fn is_fudge(self) -> bool {
        self == Self::Fudge
    }

    /// Roll this die once.
    pub fn roll(self, roller: &mut impl Roller) -> i64 {
        if self.is_fudge() {
            roller.roll_fudge()
        } else {
            i64::from(roller.roll_die(self.sides()))
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fudge => write!(f, "dF"),
            other => write!(f, "d{}", other.sides()),
        }
    }
}

/// A tag applied to a die for mechanic-specific display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiceTag {
    /// No special tag.
    #[default]
    Default,
    /// The Hope die of a duality roll.
    Hope,
    /// The Fear die of a duality roll.
    Fear,
}

impl std::fmt::Display for DiceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Hope => write!(f, "Hope"),
            Self::Fear => write!(f, "Fear"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D4.sides(), 4);
        assert_eq!(Die::D10.sides(), 10);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::Custom(30).sides(), 30);
        assert_eq!(Die::Fudge.sides(), 3);
    }

    #[test]
    fn from_sides_prefers_named_variants() {
        assert_eq!(Die::from_sides(20), Die::D20);
        assert_eq!(Die::from_sides(7), Die::Custom(7));
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D20.to_string(), "d20");
        assert_eq!(Die::Custom(30).to_string(), "d30");
        assert_eq!(Die::Fudge.to_string(), "dF");
    }

    #[test]
    fn dice_tag_display() {
        assert_eq!(DiceTag::Default.to_string(), "default");
        assert_eq!(DiceTag::Hope.to_string(), "Hope");
        assert_eq!(DiceTag::Fear.to_string(), "Fear");
    }
}
