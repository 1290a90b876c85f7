//! Duality dice: a Hope d12 against a Fear d12.
//!
//! The higher die is the result; which die was higher colours the outcome.
//! Matching dice are a critical.

use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, DiceTag, Die, Roller};
use crate::error::MechResult;
use crate::format;
use crate::mechanic::{MechanicType, RollMechanicConfig};
use crate::modifier::Resolution;
use crate::outcome::Comparison;
use crate::strategy::MechanicRoll;

/// Which die of a duality roll came out on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dominance {
    /// The Hope die was higher.
    Hope,
    /// The Fear die was higher.
    Fear,
    /// Both dice matched.
    Balanced,
}

impl Dominance {
    /// Compare the two dice.
    pub fn from_dice(hope: i64, fear: i64) -> Self {
        match hope.cmp(&fear) {
            std::cmp::Ordering::Greater => Self::Hope,
            std::cmp::Ordering::Less => Self::Fear,
            std::cmp::Ordering::Equal => Self::Balanced,
        }
    }

    /// The trace line for this dominance.
    pub fn line(self) -> &'static str {
        match self {
            Self::Hope => "💛 With Hope",
            Self::Fear => "🖤 With Fear",
            Self::Balanced => "⚖️ Balanced ✨ Critical!",
        }
    }
}

impl std::fmt::Display for Dominance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hope => write!(f, "Hope"),
            Self::Fear => write!(f, "Fear"),
            Self::Balanced => write!(f, "Balanced"),
        }
    }
}

/// Roll Hope and Fear, keep the higher, and add modifiers.
///
/// With `hope_fear_enabled` off the dice are still rolled, but the trace shows
/// them as plain d12s and no dominance is reported.
pub fn roll(
    config: &RollMechanicConfig,
    resolution: &Resolution,
    roller: &mut impl Roller,
) -> MechResult<MechanicRoll> {
    let results = DicePool::new()
        .add_tagged(Die::D12, DiceTag::Hope, 1)
        .add_tagged(Die::D12, DiceTag::Fear, 1)
        .roll(roller);
    let value_of = |tag: DiceTag| {
        results
            .iter()
            .find(|r| r.tag == tag)
            .map_or(1, |r| r.value)
    };
    let hope = value_of(DiceTag::Hope);
    let fear = value_of(DiceTag::Fear);
    let total = hope.max(fear).saturating_add(resolution.total());

    let (faces, dominance) = if config.hope_fear_enabled {
        (
            vec![format!("💛 Hope: {hope}"), format!("🖤 Fear: {fear}")],
            Some(Dominance::from_dice(hope, fear)),
        )
    } else {
        (vec![hope.to_string(), fear.to_string()], None)
    };

    let mut parts = vec![format::roll_line("2d12", &faces, &resolution.fragments())];
    if let Some(dominance) = dominance {
        parts.push(dominance.line().to_string());
    }

    Ok(MechanicRoll {
        mechanic: MechanicType::Duality,
        comparison: Comparison::AtLeast,
        value: total,
        rolls: vec![hope, fear],
        dominance,
        message: format::assemble(&parts, Some(total)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use crate::modifier::{ModifierBag, resolve_modifiers};
    use crate::sheet::NoCharacter;

    fn duality() -> RollMechanicConfig {
        RollMechanicConfig::new(MechanicType::Duality).with_hope_fear(true)
    }

    #[test]
    fn hope_wins() {
        let bag = ModifierBag::new().with("Agility", 2);
        let resolution = resolve_modifiers(&bag, &NoCharacter, &mut ScriptedRoller::default());
        let rolled = roll(&duality(), &resolution, &mut ScriptedRoller::new([9, 4])).unwrap();
        assert_eq!(rolled.value, 11);
        assert_eq!(rolled.dominance, Some(Dominance::Hope));
        insta::assert_snapshot!(rolled.message, @r"
        🎲 2d12 [💛 Hope: 9, 🖤 Fear: 4] + Agility (+2)
        💛 With Hope
        🧮 Total: 11
        ");
    }

    #[test]
    fn fear_wins() {
        let rolled = roll(
            &duality(),
            &Resolution::default(),
            &mut ScriptedRoller::new([3, 10]),
        )
        .unwrap();
        assert_eq!(rolled.value, 10);
        assert_eq!(rolled.dominance, Some(Dominance::Fear));
        assert!(rolled.message.contains("🖤 With Fear"));
    }

    #[test]
    fn matching_dice_are_critical() {
        let rolled = roll(
            &duality(),
            &Resolution::default(),
            &mut ScriptedRoller::new([7, 7]),
        )
        .unwrap();
        assert_eq!(rolled.value, 7);
        assert_eq!(rolled.dominance, Some(Dominance::Balanced));
        assert!(rolled.message.contains("✨ Critical!"));
    }

    #[test]
    fn disabled_labels_show_plain_dice() {
        let config = duality().with_hope_fear(false);
        let rolled = roll(
            &config,
            &Resolution::default(),
            &mut ScriptedRoller::new([9, 4]),
        )
        .unwrap();
        assert_eq!(rolled.value, 9);
        assert_eq!(rolled.dominance, None);
        assert_eq!(rolled.message, "🎲 2d12 [9, 4]\n🧮 Total: 9");
    }

    #[test]
    fn dominance_from_dice() {
        assert_eq!(Dominance::from_dice(12, 1), Dominance::Hope);
        assert_eq!(Dominance::from_dice(1, 12), Dominance::Fear);
        assert_eq!(Dominance::from_dice(5, 5), Dominance::Balanced);
        assert_eq!(Dominance::Balanced.to_string(), "Balanced");
    }
}
