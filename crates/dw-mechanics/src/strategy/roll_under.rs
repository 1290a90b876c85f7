//! Roll-under resolution (percentile-style).
//!
//! Roll the configured formula and add modifiers; the check succeeds when
//! the total is at or below the difficulty (usually a skill value). On a
//! single d100, doubles (11, 22, ..., 99, and 100 as "00") are called out.

use crate::dice::{Die, Roller, evaluate, parse_formula};
use crate::error::MechResult;
use crate::format;
use crate::mechanic::{MechanicType, RollMechanicConfig};
use crate::modifier::Resolution;
use crate::outcome::Comparison;
use crate::strategy::MechanicRoll;

/// Roll `config.dice_formula` plus the resolved modifiers.
pub fn roll(
    config: &RollMechanicConfig,
    resolution: &Resolution,
    roller: &mut impl Roller,
) -> MechResult<MechanicRoll> {
    let expr = parse_formula(&config.dice_formula)?;
    let outcome = evaluate(&expr, roller);
    let total = outcome.total.saturating_add(resolution.total());

    let mut parts = vec![format::roll_line(
        &expr.to_string(),
        &outcome.symbols(),
        &resolution.fragments(),
    )];
    let doubles = expr.count == 1
        && expr.die == Die::D100
        && outcome.rolls.first().is_some_and(|v| is_doubles(*v));
    if doubles {
        parts.push("✨ Doubles!".to_string());
    }

    Ok(MechanicRoll {
        mechanic: MechanicType::RollUnder,
        comparison: Comparison::AtMost,
        value: total,
        rolls: outcome.rolls,
        dominance: None,
        message: format::assemble(&parts, Some(total)),
    })
}

/// Check if a d100 roll shows doubles (11, 22, 33, ..., 99, or 100 as "00").
fn is_doubles(value: i64) -> bool {
    if value == 100 {
        return true;
    }
    if !(10..=99).contains(&value) {
        return false;
    }
    value / 10 == value % 10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use crate::error::MechError;
    use crate::modifier::{ModifierBag, resolve_modifiers};
    use crate::sheet::NoCharacter;

    fn percentile() -> RollMechanicConfig {
        RollMechanicConfig::new(MechanicType::RollUnder).with_formula("1d100")
    }

    #[test]
    fn rolls_configured_formula() {
        let rolled = roll(
            &percentile(),
            &Resolution::default(),
            &mut ScriptedRoller::new([45]),
        )
        .unwrap();
        assert_eq!(rolled.value, 45);
        assert_eq!(rolled.comparison, Comparison::AtMost);
        assert_eq!(rolled.message, "🎲 1d100 [45]\n🧮 Total: 45");
    }

    #[test]
    fn modifiers_add_to_total() {
        let bag = ModifierBag::new().with("Wounded", 10);
        let resolution = resolve_modifiers(&bag, &NoCharacter, &mut ScriptedRoller::default());
        let rolled = roll(&percentile(), &resolution, &mut ScriptedRoller::new([45])).unwrap();
        assert_eq!(rolled.value, 55);
        assert!(rolled.message.contains("+ Wounded (+10)"));
    }

    #[test]
    fn doubles_are_called_out() {
        let rolled = roll(
            &percentile(),
            &Resolution::default(),
            &mut ScriptedRoller::new([33]),
        )
        .unwrap();
        assert!(rolled.message.contains("✨ Doubles!"));
    }

    #[test]
    fn other_formulas_work() {
        let config = percentile().with_formula("3d6");
        let rolled = roll(
            &config,
            &Resolution::default(),
            &mut ScriptedRoller::new([1, 1, 1]),
        )
        .unwrap();
        assert_eq!(rolled.value, 3);
        assert!(!rolled.message.contains("Doubles"));
    }

    #[test]
    fn oversized_formula_is_rejected() {
        let config = percentile().with_formula("1d5000");
        assert!(matches!(
            roll(&config, &Resolution::default(), &mut ScriptedRoller::default()),
            Err(MechError::TooManyDice { .. })
        ));
    }

    #[test]
    fn doubles_check() {
        assert!(is_doubles(11));
        assert!(is_doubles(55));
        assert!(is_doubles(99));
        assert!(is_doubles(100));
        assert!(!is_doubles(12));
        assert!(!is_doubles(50));
        assert!(!is_doubles(1));
    }
}
