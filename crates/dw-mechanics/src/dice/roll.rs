//! Evaluation of parsed formulas into roll outcomes.

use serde::{Deserialize, Serialize};

use super::{DiceExpression, DicePool, DiceTag, Die, Roller};

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The tag on this die.
    pub tag: DiceTag,
    /// The face rolled (-1, 0 or +1 for fudge dice).
    pub value: i64,
}

/// The result of evaluating a [`DiceExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The die that was rolled.
    pub die: Die,
    /// Individual faces, in roll order.
    pub rolls: Vec<i64>,
    /// Sum of the formula's flat modifiers.
    pub modifier_total: i64,
    /// Sum of the faces plus `modifier_total`.
    pub total: i64,
}

impl RollOutcome {
    /// Count faces at or above the given threshold.
    pub fn count_at_or_above(&self, threshold: i64) -> u32 {
        self.rolls.iter().filter(|v| **v >= threshold).count() as u32
    }

    /// Display symbols for each face: `+`, `-` and `0` for fudge dice,
    /// the number itself otherwise.
    pub fn symbols(&self) -> Vec<String> {
        self.rolls
            .iter()
            .map(|v| {
                if self.die.is_fudge() {
                    fudge_symbol(*v).to_string()
                } else {
                    v.to_string()
                }
            })
            .collect()
    }
}

/// The display symbol for a fudge face.
pub fn fudge_symbol(face: i64) -> &'static str {
    match face.signum() {
        1 => "+",
        -1 => "-",
        _ => "0",
    }
}

/// Roll a parsed formula.
///
/// Each die is drawn independently from `roller`; the total is the sum of
/// the faces plus every flat modifier.
pub fn evaluate(expr: &DiceExpression, roller: &mut impl Roller) -> RollOutcome {
    let rolls: Vec<i64> = DicePool::new()
        .add(expr.die, expr.count)
        .roll(roller)
        .into_iter()
        .map(|r| r.value)
        .collect();
    let modifier_total = expr.modifier_total();
    let total = rolls
        .iter()
        .fold(modifier_total, |acc, v| acc.saturating_add(*v));
    RollOutcome {
        die: expr.die,
        rolls,
        modifier_total,
        total,
    }
}
