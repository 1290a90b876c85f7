//! Dice formula grammar.
//!
//! Two grammars are accepted, case-insensitively and with all whitespace
//! removed first:
//!
//! - standard: `{count}d{sides}{+N|-N}*`, count defaults to 1 (`2d6+3-2`, `d100`)
//! - fudge: `{count}dF{+N|-N}*`, count defaults to 4 (`4dF+1`, `dF`)
//!
//! The whole input must match. Recognition lives behind [`parse_formula`] so
//! callers never see the regular expressions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Die, MAX_DICE, MAX_SIDES};
use crate::error::{MechError, MechResult};

static STANDARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d*)d(\d+)((?:[+-]\d+)*)$").expect("standard dice regex"));

static FUDGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d*)df((?:[+-]\d+)*)$").expect("fudge dice regex"));

static DICE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d*d\d+").expect("dice prefix regex"));

static FLAT_TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+-]\d+").expect("flat term regex"));

/// Default count when a standard formula omits it (`d20`).
const DEFAULT_STANDARD_COUNT: u32 = 1;

/// Default count when a fudge formula omits it (`dF`).
const DEFAULT_FUDGE_COUNT: u32 = 4;

/// A parsed dice formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    /// Number of dice to roll.
    pub count: u32,
    /// The die being rolled.
    pub die: Die,
    /// Flat signed modifiers, in formula order.
    pub modifiers: Vec<i64>,
}

impl DiceExpression {
    /// Create an expression with no flat modifiers.
    pub fn new(count: u32, die: Die) -> Self {
        Self {
            count,
            die,
            modifiers: Vec::new(),
        }
    }

    /// Sum of all flat modifiers.
    pub fn modifier_total(&self) -> i64 {
        self.modifiers
            .iter()
            .fold(0_i64, |acc, m| acc.saturating_add(*m))
    }

    /// Returns true for fudge formulas.
    pub fn is_fudge(&self) -> bool {
        self.die.is_fudge()
    }
}

impl std::fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)?;
        for m in &self.modifiers {
            if *m >= 0 {
                write!(f, "+{m}")?;
            } else {
                write!(f, "{m}")?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for DiceExpression {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_formula(s)
    }
}

/// Parse a dice formula such as `2d6+3`, `d100` or `4dF+1`.
///
/// Returns [`MechError::InvalidFormula`] when the text matches neither
/// grammar, and [`MechError::TooManyDice`] when it matches but asks for more
/// than [`MAX_DICE`] dice or more than [`MAX_SIDES`] sides.
pub fn parse_formula(formula: &str) -> MechResult<DiceExpression> {
    let compact = normalize(formula);
    let invalid = || MechError::InvalidFormula(formula.trim().to_string());

    if let Some(caps) = STANDARD.captures(&compact) {
        let count = parse_count(&caps[1], DEFAULT_STANDARD_COUNT);
        let sides = parse_bounded(&caps[2]);
        if sides == 0 {
            return Err(invalid());
        }
        if count > MAX_DICE || sides > MAX_SIDES {
            return Err(MechError::TooManyDice { count, sides });
        }
        let modifiers = parse_flat_terms(&caps[3]).ok_or_else(invalid)?;
        return Ok(DiceExpression {
            count,
            die: Die::from_sides(sides),
            modifiers,
        });
    }

    if let Some(caps) = FUDGE.captures(&compact) {
        let count = parse_count(&caps[1], DEFAULT_FUDGE_COUNT);
        if count > MAX_DICE {
            return Err(MechError::TooManyDice { count, sides: 0 });
        }
        let modifiers = parse_flat_terms(&caps[2]).ok_or_else(invalid)?;
        return Ok(DiceExpression {
            count,
            die: Die::Fudge,
            modifiers,
        });
    }

    Err(invalid())
}

/// Returns true if the text starts like a standard dice formula (`1d6`, `d12+9`).
///
/// Whitespace is ignored. A match here does not guarantee [`parse_formula`]
/// accepts the whole text.
pub fn is_dice_formula(text: &str) -> bool {
    DICE_PREFIX.is_match(&normalize(text))
}

/// Strip all whitespace and lowercase.
pub(crate) fn normalize(formula: &str) -> String {
    formula
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// An omitted or zero count means the grammar default.
fn parse_count(digits: &str, default: u32) -> u32 {
    match parse_bounded(digits) {
        0 => default,
        n => n,
    }
}

/// Digits-only input; anything too large for `u32` saturates so the bounds
/// check reports it as too many dice.
fn parse_bounded(digits: &str) -> u32 {
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

fn parse_flat_terms(terms: &str) -> Option<Vec<i64>> {
    FLAT_TERM
        .find_iter(terms)
        .map(|m| m.as_str().parse::<i64>().ok())
        .collect()
}
