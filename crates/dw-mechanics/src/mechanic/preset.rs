//! Pre-configured mechanics for common TTRPG families.
//!
//! These produce the same [`RollMechanicConfig`] an operator would store by
//! hand, without having to know every field.

use crate::error::{MechError, MechResult};
use crate::mechanic::{MechanicType, RollMechanicConfig};

/// Names accepted by [`by_name`], in display order.
pub const PRESET_NAMES: [&str; 7] = [
    "d20_system",
    "pbta",
    "percentile",
    "storyteller",
    "savage",
    "duality",
    "generic",
];

/// d20 system: roll 1d20, add modifiers, meet or beat the DC.
pub fn d20_system() -> RollMechanicConfig {
    RollMechanicConfig::new(MechanicType::D20)
        .with_description("Roll 1d20 + modifiers against a DC")
}

/// Powered by the Apocalypse: 2d6 plus a stat, 10+ full hit, 7-9 partial.
pub fn pbta() -> RollMechanicConfig {
    RollMechanicConfig::new(MechanicType::TwoD6)
        .with_success_criteria("7+")
        .with_description("Roll 2d6 + stat; 10+ strong hit, 7-9 weak hit")
}

/// Percentile roll-under: 1d100 at or below the skill value.
pub fn percentile() -> RollMechanicConfig {
    RollMechanicConfig::new(MechanicType::RollUnder)
        .with_target(50)
        .with_success_criteria("<=")
        .with_description("Roll 1d100 at or under your skill")
}

/// Storyteller pools: d10s, each 8 or higher is a success.
pub fn storyteller() -> RollMechanicConfig {
    RollMechanicConfig::new(MechanicType::DicePool)
        .with_formula("d10")
        .with_success_criteria("8+")
        .with_description("Roll a pool of d10s; each 8+ is a success")
}

/// Savage-style aces: a d6 that rerolls and adds on a 6.
pub fn savage() -> RollMechanicConfig {
    RollMechanicConfig::new(MechanicType::Exploding)
        .with_formula("1d6")
        .with_explode_on(6)
        .with_description("Roll 1d6; a 6 aces and is rolled again")
}

/// Hope and Fear: two d12s, the higher one sets the tone.
pub fn duality() -> RollMechanicConfig {
    RollMechanicConfig::new(MechanicType::Duality)
        .with_hope_fear(true)
        .with_description("Roll a Hope d12 and a Fear d12; the higher sets the tone")
}

/// Generic: any formula, 1d20 by default.
pub fn generic() -> RollMechanicConfig {
    RollMechanicConfig::new(MechanicType::Generic).with_description("Roll any formula")
}

/// Look up a preset by name (case-insensitive).
pub fn by_name(name: &str) -> MechResult<RollMechanicConfig> {
    match name.trim().to_lowercase().replace('-', "_").as_str() {
        "d20_system" | "d20" => Ok(d20_system()),
        "pbta" | "2d6" => Ok(pbta()),
        "percentile" | "roll_under" => Ok(percentile()),
        "storyteller" | "dice_pool" => Ok(storyteller()),
        "savage" | "exploding" => Ok(savage()),
        "duality" => Ok(duality()),
        "generic" => Ok(generic()),
        _ => Err(MechError::UnknownPreset(name.to_string())),
    }
}

/// Every preset, in display order.
pub fn all() -> Vec<(&'static str, RollMechanicConfig)> {
    vec![
        ("d20_system", d20_system()),
        ("pbta", pbta()),
        ("percentile", percentile()),
        ("storyteller", storyteller()),
        ("savage", savage()),
        ("duality", duality()),
        ("generic", generic()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mechanic_has_a_preset() {
        for mechanic in MechanicType::ALL {
            assert!(
                all().iter().any(|(_, cfg)| cfg.mechanic_type == mechanic),
                "no preset for {mechanic}"
            );
        }
    }

    #[test]
    fn names_resolve() {
        for name in PRESET_NAMES {
            assert!(by_name(name).is_ok(), "{name} did not resolve");
        }
        assert_eq!(by_name("Savage").unwrap(), savage());
        assert!(matches!(
            by_name("gurps"),
            Err(MechError::UnknownPreset(_))
        ));
    }

    #[test]
    fn all_matches_names() {
        let names: Vec<&str> = all().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, PRESET_NAMES);
    }

    #[test]
    fn storyteller_preset() {
        let cfg = storyteller();
        assert_eq!(cfg.mechanic_type, MechanicType::DicePool);
        assert_eq!(cfg.dice_formula, "d10");
        assert_eq!(cfg.success_criteria.as_deref(), Some("8+"));
    }

    #[test]
    fn presets_have_descriptions() {
        for (name, cfg) in all() {
            assert!(!cfg.description.is_empty(), "{name} has no description");
        }
    }
}
