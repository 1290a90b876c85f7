//! Dice-pool resolution (storyteller-style).
//!
//! Roll a pool of same-sized dice and count every die at or above a
//! threshold. The pool size comes from a modifier named `pool`, `dice` or
//! `pool_size` when one is present (falling back to the count in the
//! configured formula, then 1); every other modifier adds its value to the
//! pool instead of the total. The pool never drops below one die.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dice::{DiceExpression, Die, MAX_DICE, MAX_SIDES, Roller, evaluate};
use crate::error::{MechError, MechResult};
use crate::format;
use crate::mechanic::{MechanicType, RollMechanicConfig};
use crate::modifier::Resolution;
use crate::outcome::Comparison;
use crate::strategy::MechanicRoll;

/// Modifier names that set the base pool size.
pub const POOL_SIZE_NAMES: [&str; 3] = ["pool", "dice", "pool_size"];

/// Die size used when the formula names none.
pub const DEFAULT_DIE_SIDES: u32 = 10;

/// Success threshold used when the criteria are absent or unreadable.
pub const DEFAULT_THRESHOLD: i64 = 8;

static DIE_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"d(\d+)").expect("die size regex"));

static LEADING_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*[dD]").expect("leading count regex"));

static AT_LEAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">=\s*(\d+)").expect("at-least criteria regex"));

static TRAILING_PLUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*\+\s*$").expect("trailing plus criteria regex"));

/// The die, threshold and size of a pool before rolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPlan {
    /// The die every pool member uses.
    pub die: Die,
    /// Faces at or above this count as successes.
    pub threshold: i64,
    /// Number of dice to roll.
    pub size: u32,
}

impl PoolPlan {
    /// Work out the pool for `config` and the resolved modifiers.
    pub fn from_config(config: &RollMechanicConfig, resolution: &Resolution) -> MechResult<Self> {
        let sides = die_sides(&config.dice_formula);
        if sides > MAX_SIDES {
            return Err(MechError::TooManyDice { count: 1, sides });
        }
        let threshold = config
            .success_criteria
            .as_deref()
            .and_then(parse_threshold)
            .unwrap_or(DEFAULT_THRESHOLD);

        let base_modifier = resolution.find_any(&POOL_SIZE_NAMES);
        let base = match base_modifier {
            Some(m) => m.value.max(1),
            None => leading_count(&config.dice_formula).unwrap_or(1),
        };
        let adjustment = resolution
            .modifiers
            .iter()
            .filter(|m| !base_modifier.is_some_and(|b| std::ptr::eq(*m, b)))
            .fold(0_i64, |acc, m| acc.saturating_add(m.value));
        let size = base.saturating_add(adjustment).max(1);
        let size = u32::try_from(size).unwrap_or(u32::MAX);
        if size > MAX_DICE {
            return Err(MechError::TooManyDice { count: size, sides });
        }

        Ok(Self {
            die: Die::from_sides(sides),
            threshold,
            size,
        })
    }
}

/// Roll a dice pool and count successes.
pub fn roll(
    config: &RollMechanicConfig,
    resolution: &Resolution,
    roller: &mut impl Roller,
) -> MechResult<MechanicRoll> {
    let plan = PoolPlan::from_config(config, resolution)?;
    let outcome = evaluate(&DiceExpression::new(plan.size, plan.die), roller);
    let successes = i64::from(outcome.count_at_or_above(plan.threshold));

    let base = format!("{}{} ({}+)", plan.size, plan.die, plan.threshold);
    let parts = vec![
        format::roll_line(
            &base,
            &format::pool_faces(&outcome.rolls, plan.threshold),
            &resolution.fragments(),
        ),
        format::successes_line(successes),
    ];

    Ok(MechanicRoll {
        mechanic: MechanicType::DicePool,
        comparison: Comparison::Successes,
        value: successes,
        rolls: outcome.rolls,
        dominance: None,
        message: format::assemble(&parts, None),
    })
}

/// Read a success threshold from `N+` or `>=N` criteria.
pub fn parse_threshold(criteria: &str) -> Option<i64> {
    AT_LEAST
        .captures(criteria)
        .or_else(|| TRAILING_PLUS.captures(criteria))
        .and_then(|caps| caps[1].parse().ok())
}

pub(crate) fn die_sides(formula: &str) -> u32 {
    DIE_SIZE
        .captures(&formula.to_lowercase())
        .and_then(|caps| match caps[1].parse::<u32>() {
            Ok(0) => None,
            Ok(n) => Some(n),
            Err(_) => Some(u32::MAX),
        })
        .unwrap_or(DEFAULT_DIE_SIDES)
}

fn leading_count(formula: &str) -> Option<i64> {
    LEADING_COUNT
        .captures(formula)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .filter(|n| *n > 0)
}
