//! Roll mechanic strategies.
//!
//! Each server rolls with one mechanic:
//! - **d20 / 2d6 / generic**: a standard formula plus modifiers
//! - **roll under**: a configured formula, succeeding low
//! - **dice pool**: count dice meeting a threshold
//! - **exploding**: dice that reroll and add on high faces
//! - **duality**: a Hope d12 against a Fear d12
//!
//! [`evaluate`] is the single dispatch point over [`MechanicType`].

pub mod duality;
pub mod exploding;
pub mod pool;
pub mod roll_under;
pub mod standard;

pub use duality::Dominance;

use serde::{Deserialize, Serialize};

use crate::dice::Roller;
use crate::error::MechResult;
use crate::mechanic::{MechanicType, RollMechanicConfig};
use crate::modifier::Resolution;
use crate::outcome::Comparison;

/// What a mechanic produced for one roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanicRoll {
    /// The mechanic that rolled.
    pub mechanic: MechanicType,
    /// How `value` is compared against a difficulty.
    pub comparison: Comparison,
    /// The total, or the success count for dice pools.
    pub value: i64,
    /// Every face rolled, in order (explosion chains flattened).
    pub rolls: Vec<i64>,
    /// Hope/Fear dominance for duality rolls.
    pub dominance: Option<Dominance>,
    /// The formatted trace.
    pub message: String,
}

/// Roll `config`'s mechanic with already-resolved modifiers.
pub fn evaluate(
    config: &RollMechanicConfig,
    resolution: &Resolution,
    roller: &mut impl Roller,
) -> MechResult<MechanicRoll> {
    match config.mechanic_type {
        MechanicType::D20 => standard::roll(MechanicType::D20, "1d20", resolution, roller),
        MechanicType::TwoD6 => standard::roll(MechanicType::TwoD6, "2d6", resolution, roller),
        MechanicType::RollUnder => roll_under::roll(config, resolution, roller),
        MechanicType::DicePool => pool::roll(config, resolution, roller),
        MechanicType::Exploding => exploding::roll(config, resolution, roller),
        MechanicType::Duality => duality::roll(config, resolution, roller),
        MechanicType::Generic => standard::roll(
            MechanicType::Generic,
            config.generic_formula(),
            resolution,
            roller,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use crate::mechanic::preset;

    #[test]
    fn dispatch_reports_the_mechanic() {
        for (_, config) in preset::all() {
            let mut roller = ScriptedRoller::new([3; 20]);
            let rolled = evaluate(&config, &Resolution::default(), &mut roller).unwrap();
            assert_eq!(rolled.mechanic, config.mechanic_type);
            assert_eq!(
                rolled.comparison,
                Comparison::for_mechanic(config.mechanic_type)
            );
        }
    }

    #[test]
    fn d20_ignores_configured_formula() {
        let config = RollMechanicConfig::new(MechanicType::D20).with_formula("3d6");
        let rolled = evaluate(
            &config,
            &Resolution::default(),
            &mut ScriptedRoller::new([17]),
        )
        .unwrap();
        assert_eq!(rolled.rolls, vec![17]);
        assert_eq!(rolled.value, 17);
    }

    #[test]
    fn generic_uses_custom_formula() {
        let config = RollMechanicConfig::new(MechanicType::Generic)
            .with_formula("1d20")
            .with_custom_formula("3d6+1");
        let rolled = evaluate(
            &config,
            &Resolution::default(),
            &mut ScriptedRoller::new([1, 2, 3]),
        )
        .unwrap();
        assert_eq!(rolled.value, 7);
        assert!(rolled.message.starts_with("🎲 3d6+1 [1, 2, 3]"));
    }
}
