//! Core roll mechanic configuration.
//!
//! A server operator picks one [`RollMechanicConfig`] per server. It is
//! stored by the host as a flat key/value [`SettingsMap`] through
//! [`RollMechanicConfig::to_map`] and [`RollMechanicConfig::from_map`], or
//! built programmatically from the functions in [`preset`].

pub mod preset;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MechError, MechResult};

/// The core roll mechanics a server can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MechanicType {
    /// 1d20 plus modifiers, beat the difficulty.
    #[serde(rename = "d20")]
    D20,
    /// 2d6 plus modifiers.
    #[serde(rename = "2d6")]
    TwoD6,
    /// Roll at or under a target.
    #[serde(rename = "roll_under")]
    RollUnder,
    /// Count dice meeting a threshold.
    #[serde(rename = "dice_pool")]
    DicePool,
    /// Dice that reroll and add on high faces.
    #[serde(rename = "exploding")]
    Exploding,
    /// Paired Hope and Fear d12s.
    #[serde(rename = "duality")]
    Duality,
    /// Any standard formula.
    #[serde(rename = "generic")]
    Generic,
}

impl MechanicType {
    /// Every mechanic, in display order.
    pub const ALL: [Self; 7] = [
        Self::D20,
        Self::TwoD6,
        Self::RollUnder,
        Self::DicePool,
        Self::Exploding,
        Self::Duality,
        Self::Generic,
    ];

    /// The storage name of this mechanic.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::D20 => "d20",
            Self::TwoD6 => "2d6",
            Self::RollUnder => "roll_under",
            Self::DicePool => "dice_pool",
            Self::Exploding => "exploding",
            Self::Duality => "duality",
            Self::Generic => "generic",
        }
    }

    /// The base formula used when a config does not name one.
    pub fn default_formula(self) -> &'static str {
        match self {
            Self::D20 | Self::Generic => "1d20",
            Self::TwoD6 => "2d6",
            Self::RollUnder => "1d100",
            Self::DicePool => "1d10",
            Self::Exploding => "1d6",
            Self::Duality => "2d12",
        }
    }
}

impl std::fmt::Display for MechanicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MechanicType {
    type Err = MechError;

    /// Accepts storage names (`dice_pool`) and enum-style names (`DICE_POOL`,
    /// `D20_SYSTEM`, `TWO_D6`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "d20" | "d20_system" => Ok(Self::D20),
            "2d6" | "two_d6" => Ok(Self::TwoD6),
            "roll_under" => Ok(Self::RollUnder),
            "dice_pool" | "pool" => Ok(Self::DicePool),
            "exploding" => Ok(Self::Exploding),
            "duality" => Ok(Self::Duality),
            "generic" | "custom" => Ok(Self::Generic),
            _ => Err(MechError::UnknownMechanic(s.to_string())),
        }
    }
}

/// A stored setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// A boolean value.
    Boolean(bool),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A text value.
    String(String),
    /// An explicitly empty value.
    Null,
}

/// A flat key/value mapping as held by a settings store.
pub type SettingsMap = BTreeMap<String, SettingValue>;

/// A server's core roll mechanic.
///
/// Only the fields relevant to `mechanic_type` are consulted when rolling;
/// the rest are carried along so a stored config round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollMechanicConfig {
    /// Which mechanic to roll with.
    pub mechanic_type: MechanicType,
    /// Base formula, e.g. `1d20`, `2d6`, `1d100`, `5d10`.
    pub dice_formula: String,
    /// Success comparator, e.g. `8+` or `>=6` for dice pools.
    pub success_criteria: Option<String>,
    /// Usual target for roll-under style systems. Informational only; the
    /// verdict is always against the caller's difficulty.
    pub target_number: Option<i64>,
    /// Explosion threshold for exploding dice.
    pub explode_on: Option<u32>,
    /// Show Hope/Fear labels on duality rolls.
    pub hope_fear_enabled: bool,
    /// Free-form formula for the generic mechanic.
    pub custom_formula: Option<String>,
    /// Free-text label.
    pub description: String,
}

impl Default for RollMechanicConfig {
    fn default() -> Self {
        Self::new(MechanicType::Generic)
    }
}

impl RollMechanicConfig {
    /// Create a config for `mechanic_type` with its default formula.
    pub fn new(mechanic_type: MechanicType) -> Self {
        Self {
            mechanic_type,
            dice_formula: mechanic_type.default_formula().to_string(),
            success_criteria: None,
            target_number: None,
            explode_on: None,
            hope_fear_enabled: mechanic_type == MechanicType::Duality,
            custom_formula: None,
            description: String::new(),
        }
    }

    /// Set the base formula.
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.dice_formula = formula.into();
        self
    }

    /// Set the success criteria.
    pub fn with_success_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.success_criteria = Some(criteria.into());
        self
    }

    /// Set the target number.
    pub fn with_target(mut self, target: i64) -> Self {
        self.target_number = Some(target);
        self
    }

    /// Set the explosion threshold.
    pub fn with_explode_on(mut self, threshold: u32) -> Self {
        self.explode_on = Some(threshold);
        self
    }

    /// Enable or disable Hope/Fear labels.
    pub fn with_hope_fear(mut self, enabled: bool) -> Self {
        self.hope_fear_enabled = enabled;
        self
    }

    /// Set the custom formula.
    pub fn with_custom_formula(mut self, formula: impl Into<String>) -> Self {
        self.custom_formula = Some(formula.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The formula the generic mechanic rolls: the custom formula when set,
    /// otherwise the base formula.
    pub fn generic_formula(&self) -> &str {
        self.custom_formula
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(&self.dice_formula)
    }

    /// Flatten into a key/value map for storage. Unset optional fields are
    /// omitted.
    pub fn to_map(&self) -> SettingsMap {
        let mut map = SettingsMap::new();
        map.insert(
            "mechanic_type".to_string(),
            SettingValue::String(self.mechanic_type.as_str().to_string()),
        );
        map.insert(
            "dice_formula".to_string(),
            SettingValue::String(self.dice_formula.clone()),
        );
        if let Some(criteria) = &self.success_criteria {
            map.insert(
                "success_criteria".to_string(),
                SettingValue::String(criteria.clone()),
            );
        }
        if let Some(target) = self.target_number {
            map.insert("target_number".to_string(), SettingValue::Integer(target));
        }
        if let Some(explode_on) = self.explode_on {
            map.insert(
                "explode_on".to_string(),
                SettingValue::Integer(i64::from(explode_on)),
            );
        }
        map.insert(
            "hope_fear_enabled".to_string(),
            SettingValue::Boolean(self.hope_fear_enabled),
        );
        if let Some(custom) = &self.custom_formula {
            map.insert(
                "custom_formula".to_string(),
                SettingValue::String(custom.clone()),
            );
        }
        map.insert(
            "description".to_string(),
            SettingValue::String(self.description.clone()),
        );
        map
    }

    /// Rebuild a config from a stored key/value map.
    ///
    /// `mechanic_type` is required. Integers stored as strings and booleans
    /// stored as `"true"`/`"false"` are accepted.
    pub fn from_map(map: &SettingsMap) -> MechResult<Self> {
        let type_name = extract_string(map, "mechanic_type")
            .ok_or_else(|| MechError::InvalidConfig("missing mechanic_type".to_string()))?;
        let mechanic_type: MechanicType = type_name.parse()?;

        let explode_on = match map.get("explode_on") {
            None | Some(SettingValue::Null) => None,
            Some(_) => Some(extract_u32(map, "explode_on").ok_or_else(|| {
                MechError::InvalidConfig("explode_on must be a non-negative integer".to_string())
            })?),
        };
        let target_number = match map.get("target_number") {
            None | Some(SettingValue::Null) => None,
            Some(_) => Some(extract_i64(map, "target_number").ok_or_else(|| {
                MechError::InvalidConfig("target_number must be an integer".to_string())
            })?),
        };

        Ok(Self {
            mechanic_type,
            dice_formula: extract_string(map, "dice_formula")
                .unwrap_or_else(|| mechanic_type.default_formula().to_string()),
            success_criteria: extract_string(map, "success_criteria"),
            target_number,
            explode_on,
            hope_fear_enabled: extract_bool(map, "hope_fear_enabled")
                .unwrap_or(mechanic_type == MechanicType::Duality),
            custom_formula: extract_string(map, "custom_formula"),
            description: extract_string(map, "description").unwrap_or_default(),
        })
    }

    /// Like [`RollMechanicConfig::from_map`], but a missing or corrupt map
    /// yields the generic default instead of an error.
    pub fn from_map_or_default(map: Option<&SettingsMap>) -> Self {
        match map.map(Self::from_map) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                debug!(error = %e, "falling back to generic mechanic");
                Self::default()
            }
            None => Self::default(),
        }
    }
}

// --- Helper functions for reading stored settings ---

/// Extract a string from a settings map.
fn extract_string(map: &SettingsMap, key: &str) -> Option<String> {
    match map.get(key)? {
        SettingValue::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Extract an i64 from a settings map.
fn extract_i64(map: &SettingsMap, key: &str) -> Option<i64> {
    match map.get(key)? {
        SettingValue::Integer(n) => Some(*n),
        SettingValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        SettingValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extract a u32 from a settings map.
fn extract_u32(map: &SettingsMap, key: &str) -> Option<u32> {
    extract_i64(map, key).and_then(|n| u32::try_from(n).ok())
}

/// Extract a boolean from a settings map.
fn extract_bool(map: &SettingsMap, key: &str) -> Option<bool> {
    match map.get(key)? {
        SettingValue::Boolean(b) => Some(*b),
        SettingValue::Integer(n) => Some(*n != 0),
        SettingValue::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mechanic_names_parse() {
        assert_eq!("d20".parse::<MechanicType>().unwrap(), MechanicType::D20);
        assert_eq!(
            "D20_SYSTEM".parse::<MechanicType>().unwrap(),
            MechanicType::D20
        );
        assert_eq!(
            "TWO_D6".parse::<MechanicType>().unwrap(),
            MechanicType::TwoD6
        );
        assert_eq!(
            "Dice-Pool".parse::<MechanicType>().unwrap(),
            MechanicType::DicePool
        );
        assert!(matches!(
            "poker".parse::<MechanicType>(),
            Err(MechError::UnknownMechanic(_))
        ));
    }

    #[test]
    fn storage_names_round_trip() {
        for t in MechanicType::ALL {
            assert_eq!(t.as_str().parse::<MechanicType>().unwrap(), t);
        }
    }

    #[test]
    fn new_uses_default_formula() {
        let cfg = RollMechanicConfig::new(MechanicType::RollUnder);
        assert_eq!(cfg.dice_formula, "1d100");
        assert!(!cfg.hope_fear_enabled);
        assert!(RollMechanicConfig::new(MechanicType::Duality).hope_fear_enabled);
    }

    #[test]
    fn builder_methods() {
        let cfg = RollMechanicConfig::new(MechanicType::DicePool)
            .with_formula("5d10")
            .with_success_criteria("8+")
            .with_target(2)
            .with_description("Storyteller");
        assert_eq!(cfg.dice_formula, "5d10");
        assert_eq!(cfg.success_criteria.as_deref(), Some("8+"));
        assert_eq!(cfg.target_number, Some(2));
        assert_eq!(cfg.description, "Storyteller");
    }

    #[test]
    fn generic_formula_prefers_custom() {
        let cfg = RollMechanicConfig::new(MechanicType::Generic).with_formula("1d12");
        assert_eq!(cfg.generic_formula(), "1d12");
        let cfg = cfg.with_custom_formula("3d6+2");
        assert_eq!(cfg.generic_formula(), "3d6+2");
        let cfg = cfg.with_custom_formula("  ");
        assert_eq!(cfg.generic_formula(), "1d12");
    }

    #[test]
    fn map_round_trip() {
        let cfg = RollMechanicConfig::new(MechanicType::Exploding)
            .with_formula("2d6")
            .with_explode_on(5)
            .with_target(4)
            .with_success_criteria(">=4")
            .with_custom_formula("1d8")
            .with_description("Aces");
        assert_eq!(RollMechanicConfig::from_map(&cfg.to_map()).unwrap(), cfg);
    }

    #[test]
    fn to_map_omits_unset_fields() {
        let map = RollMechanicConfig::new(MechanicType::D20).to_map();
        assert!(!map.contains_key("explode_on"));
        assert!(!map.contains_key("custom_formula"));
        assert_eq!(
            map.get("mechanic_type"),
            Some(&SettingValue::String("d20".to_string()))
        );
    }

    #[test]
    fn from_map_accepts_loose_types() {
        let mut map = SettingsMap::new();
        map.insert(
            "mechanic_type".to_string(),
            SettingValue::String("EXPLODING".to_string()),
        );
        map.insert(
            "explode_on".to_string(),
            SettingValue::String("6".to_string()),
        );
        map.insert("target_number".to_string(), SettingValue::Float(12.0));
        map.insert(
            "hope_fear_enabled".to_string(),
            SettingValue::String("false".to_string()),
        );
        let cfg = RollMechanicConfig::from_map(&map).unwrap();
        assert_eq!(cfg.mechanic_type, MechanicType::Exploding);
        assert_eq!(cfg.dice_formula, "1d6");
        assert_eq!(cfg.explode_on, Some(6));
        assert_eq!(cfg.target_number, Some(12));
        assert!(!cfg.hope_fear_enabled);
    }

    #[test]
    fn from_map_rejects_corrupt_data() {
        let mut map = SettingsMap::new();
        assert!(matches!(
            RollMechanicConfig::from_map(&map),
            Err(MechError::InvalidConfig(_))
        ));
        map.insert(
            "mechanic_type".to_string(),
            SettingValue::String("exploding".to_string()),
        );
        map.insert("explode_on".to_string(), SettingValue::Integer(-3));
        assert!(matches!(
            RollMechanicConfig::from_map(&map),
            Err(MechError::InvalidConfig(_))
        ));
    }

    #[test]
    fn from_map_or_default_falls_back() {
        let mut map = SettingsMap::new();
        map.insert(
            "mechanic_type".to_string(),
            SettingValue::String("tarot".to_string()),
        );
        let cfg = RollMechanicConfig::from_map_or_default(Some(&map));
        assert_eq!(cfg, RollMechanicConfig::default());
        assert_eq!(cfg.mechanic_type, MechanicType::Generic);
        assert_eq!(
            RollMechanicConfig::from_map_or_default(None),
            RollMechanicConfig::default()
        );
    }

    #[test]
    fn settings_map_json_shape() {
        let cfg = RollMechanicConfig::new(MechanicType::TwoD6);
        let json = serde_json::to_string(&cfg.to_map()).unwrap();
        assert_eq!(
            json,
            r#"{"description":"","dice_formula":"2d6","hope_fear_enabled":false,"mechanic_type":"2d6"}"#
        );
        let back: SettingsMap = serde_json::from_str(&json).unwrap();
        assert_eq!(RollMechanicConfig::from_map(&back).unwrap(), cfg);
    }
}
