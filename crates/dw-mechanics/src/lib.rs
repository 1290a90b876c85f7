//! Configurable dice-roll evaluation engine for Dicewarden.
//!
//! Parses roll formulas (`2d6+3`, `4dF+1`), resolves named modifiers (flat
//! numbers, dice sub-formulas, character stats), rolls one of seven core
//! mechanics chosen per server, and renders the trace shown to players.
//! Randomness is always injected through [`Roller`], so every roll can be
//! replayed with a seeded RNG or a [`ScriptedRoller`].

pub mod dice;
pub mod engine;
pub mod error;
pub mod format;
pub mod mechanic;
pub mod modifier;
pub mod outcome;
pub mod sheet;
pub mod strategy;
pub mod validate;

pub use dice::{
    DiceExpression, DicePool, DiceTag, Die, DieResult, RollOutcome, Roller, ScriptedRoller,
    evaluate, is_dice_formula, parse_formula,
};
pub use engine::{RollRequest, RollResponse, perform_roll};
pub use error::{MechError, MechResult};
pub use mechanic::{MechanicType, RollMechanicConfig, SettingValue, SettingsMap, preset};
pub use modifier::{ModifierBag, ModifierValue, Resolution, ResolvedModifier, resolve_modifiers};
pub use outcome::{Comparison, Outcome, annotate};
pub use sheet::{CharacterContext, CharacterSheet, NoCharacter};
pub use strategy::{Dominance, MechanicRoll};
pub use validate::{ValidationIssue, validate_config};
