//! Standard formula evaluation (d20, 2d6, generic).
//!
//! Roll the formula, add every resolved modifier, and meet or beat the
//! difficulty. A lone d20 also calls out natural 20s and natural 1s.

use crate::dice::{Die, Roller, evaluate, parse_formula};
use crate::error::MechResult;
use crate::format;
use crate::mechanic::MechanicType;
use crate::modifier::Resolution;
use crate::outcome::Comparison;
use crate::strategy::MechanicRoll;

/// Roll `formula` plus the resolved modifiers.
pub fn roll(
    mechanic: MechanicType,
    formula: &str,
    resolution: &Resolution,
    roller: &mut impl Roller,
) -> MechResult<MechanicRoll> {
    let expr = parse_formula(formula)?;
    let outcome = evaluate(&expr, roller);
    let total = outcome.total.saturating_add(resolution.total());

    let mut parts = vec![format::roll_line(
        &expr.to_string(),
        &outcome.symbols(),
        &resolution.fragments(),
    )];
    if expr.count == 1 && expr.die == Die::D20 {
        match outcome.rolls.first() {
            Some(20) => parts.push("🎯 Natural 20!".to_string()),
            Some(1) => parts.push("💀 Natural 1!".to_string()),
            _ => {}
        }
    }

    Ok(MechanicRoll {
        mechanic,
        comparison: Comparison::for_mechanic(mechanic),
        value: total,
        rolls: outcome.rolls,
        dominance: None,
        message: format::assemble(&parts, Some(total)),
    })
}
