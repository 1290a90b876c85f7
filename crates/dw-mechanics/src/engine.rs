//! The roll entry point: modifiers in, formatted trace and total out.
//!
//! [`perform_roll`] never fails. Bad formulas come back as a user-facing
//! message with no total, a missing config falls back to the generic
//! mechanic, and modifiers that cannot be read are skipped and listed.

use serde::{Deserialize, Serialize};

use crate::dice::Roller;
use crate::error::MechResult;
use crate::format;
use crate::mechanic::{MechanicType, RollMechanicConfig, SettingsMap};
use crate::modifier::{ModifierBag, Resolution, resolve_modifiers};
use crate::outcome::{Comparison, Outcome, annotate};
use crate::sheet::CharacterContext;
use crate::strategy::{self, MechanicRoll, standard};

/// Base formula used when neither the request nor any config names one.
pub const FALLBACK_FORMULA: &str = "1d20";

/// Everything a caller supplies for one roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    /// An explicit base formula, overriding the configured mechanic.
    pub formula: Option<String>,
    /// Named modifiers, in the order they were given.
    pub modifiers: ModifierBag,
    /// The server's mechanic; `None` falls back to generic.
    pub config: Option<RollMechanicConfig>,
    /// Difficulty to annotate success against.
    pub difficulty: Option<i64>,
    /// The server's older single base-roll setting, used by the fallback.
    pub legacy_base_roll: Option<String>,
}

impl RollRequest {
    /// An empty request: generic `1d20`, no modifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll `formula` instead of the mechanic's own dice.
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Replace the modifier bag.
    pub fn with_modifiers(mut self, modifiers: ModifierBag) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Roll with `config`'s mechanic.
    pub fn with_config(mut self, config: RollMechanicConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the mechanic from stored settings; unreadable settings fall
    /// back to the generic default.
    pub fn with_settings(mut self, settings: Option<&SettingsMap>) -> Self {
        self.config = settings.map(|map| RollMechanicConfig::from_map_or_default(Some(map)));
        self
    }

    /// Annotate success against `difficulty`.
    pub fn with_difficulty(mut self, difficulty: i64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// The legacy base roll used when no config is present.
    pub fn with_legacy_base_roll(mut self, formula: impl Into<String>) -> Self {
        self.legacy_base_roll = Some(formula.into());
        self
    }
}

/// What the caller gets back from a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResponse {
    /// The formatted trace, or a user-facing error message.
    pub message: String,
    /// The total (or success count for dice pools); `None` on error.
    pub total: Option<i64>,
    /// Success or failure, when a difficulty was given and the roll worked.
    pub outcome: Option<Outcome>,
    /// Names of modifiers that were neither numbers nor dice formulas.
    pub skipped: Vec<String>,
    /// The mechanic that handled the roll (generic when an explicit formula
    /// overrode the configured dice).
    pub mechanic: MechanicType,
}

/// Resolve modifiers, roll the mechanic, and annotate the result.
pub fn perform_roll(
    request: &RollRequest,
    character: &dyn CharacterContext,
    roller: &mut impl Roller,
) -> RollResponse {
    let resolution = resolve_modifiers(&request.modifiers, character, roller);
    let skipped = resolution.skipped.clone();

    let (mechanic, rolled) = match &request.config {
        Some(config) => (
            match request.formula {
                Some(_) => MechanicType::Generic,
                None => config.mechanic_type,
            },
            roll_configured(request, config, &resolution, roller),
        ),
        None => {
            let formula = request
                .formula
                .as_deref()
                .or(request.legacy_base_roll.as_deref())
                .unwrap_or(FALLBACK_FORMULA);
            tracing::debug!(formula, "no mechanic configured, rolling generic");
            (
                MechanicType::Generic,
                standard::roll(MechanicType::Generic, formula, &resolution, roller),
            )
        }
    };

    match rolled {
        Ok(rolled) => {
            let outcome = request
                .difficulty
                .map(|d| (annotate(rolled.comparison, rolled.value, d), d));
            let mut message = rolled.message;
            if let Some((outcome, difficulty)) = outcome {
                message.push('\n');
                message.push_str(&format::outcome_line(outcome, rolled.comparison, difficulty));
            }
            RollResponse {
                message,
                total: Some(rolled.value),
                outcome: outcome.map(|(o, _)| o),
                skipped,
                mechanic: rolled.mechanic,
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "roll rejected");
            RollResponse {
                message: e.user_message(),
                total: None,
                outcome: None,
                skipped,
                mechanic,
            }
        }
    }
}

/// An explicit formula bypasses the mechanic's dice and is reported as
/// generic, but keeps roll-under's low-is-good comparison.
fn roll_configured(
    request: &RollRequest,
    config: &RollMechanicConfig,
    resolution: &Resolution,
    roller: &mut impl Roller,
) -> MechResult<MechanicRoll> {
    match request.formula.as_deref() {
        Some(formula) => {
            let mut rolled = standard::roll(MechanicType::Generic, formula, resolution, roller)?;
            if config.mechanic_type == MechanicType::RollUnder {
                rolled.comparison = Comparison::AtMost;
            }
            Ok(rolled)
        }
        None => strategy::evaluate(config, resolution, roller),
    }
}
