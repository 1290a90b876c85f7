//! Dice pool construction and rolling.

use super::roll::DieResult;
use super::{DiceTag, Die, Roller};

/// A collection of dice to be rolled together.
#[derive(Debug, Clone, Default)]
pub struct DicePool {
    /// The dice in this pool with their tags.
    pub dice: Vec<(Die, DiceTag)>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self { dice: Vec::new() }
    }

    /// Add `count` dice of the given type with the default tag.
    pub fn add(self, die: Die, count: u32) -> Self {
        self.add_tagged(die, DiceTag::Default, count)
    }

    /// Add `count` dice of the given type with a specific tag.
    pub fn add_tagged(mut self, die: Die, tag: DiceTag, count: u32) -> Self {
        for _ in 0..count {
            self.dice.push((die, tag.clone()));
        }
        self
    }

    /// Roll every die in the pool once, in insertion order.
    pub fn roll(&self, roller: &mut impl Roller) -> Vec<DieResult> {
        self.dice
            .iter()
            .map(|(die, tag)| DieResult {
                die: *die,
                tag: tag.clone(),
                value: die.roll(roller),
            })
            .collect()
    }
}
