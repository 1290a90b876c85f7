//! Exploding dice (savage-style).
//!
//! Each die that lands at or above the explosion threshold is rolled again
//! and the new face added, chaining until a face falls short.

use crate::dice::{Roller, parse_formula};
use crate::error::{MechError, MechResult};
use crate::format;
use crate::mechanic::{MechanicType, RollMechanicConfig};
use crate::modifier::Resolution;
use crate::outcome::Comparison;
use crate::strategy::MechanicRoll;

/// Extra rolls a single die may add before its chain is cut off.
pub const MAX_EXPLOSIONS: usize = 10;

/// Roll `config.dice_formula` with explosions, then add modifiers.
pub fn roll(
    config: &RollMechanicConfig,
    resolution: &Resolution,
    roller: &mut impl Roller,
) -> MechResult<MechanicRoll> {
    let expr = parse_formula(&config.dice_formula)?;
    if expr.is_fudge() {
        return Err(MechError::InvalidFormula(config.dice_formula.clone()));
    }
    let threshold = i64::from(config.explode_on.unwrap_or_else(|| expr.die.sides()));

    let chains: Vec<Vec<i64>> = (0..expr.count)
        .map(|_| {
            let mut chain = vec![expr.die.roll(roller)];
            while chain.len() <= MAX_EXPLOSIONS && chain.last().is_some_and(|v| *v >= threshold) {
                chain.push(expr.die.roll(roller));
            }
            tracing::trace!(die = %expr.die, ?chain, "explosion chain");
            chain
        })
        .collect();

    let explosions: usize = chains.iter().map(|c| c.len() - 1).sum();
    let dice_sum = chains
        .iter()
        .flatten()
        .fold(0_i64, |acc, v| acc.saturating_add(*v));
    let total = dice_sum
        .saturating_add(expr.modifier_total())
        .saturating_add(resolution.total());

    let mut parts = vec![format::exploding_line(
        &expr.to_string(),
        &chains,
        &resolution.fragments(),
    )];
    if explosions > 0 {
        parts.push(format::explosions_line(explosions));
    }

    Ok(MechanicRoll {
        mechanic: MechanicType::Exploding,
        comparison: Comparison::AtLeast,
        value: total,
        rolls: chains.into_iter().flatten().collect(),
        dominance: None,
        message: format::assemble(&parts, Some(total)),
    })
}
