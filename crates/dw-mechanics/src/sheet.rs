//! Character context for modifier lookups.
//!
//! The roll engine only ever asks a character for a named stat. Hosts pass
//! [`NoCharacter`] when no sheet is bound to the roll, or a
//! [`CharacterSheet`] built from stored attributes and skills.

use std::collections::HashMap;

use crate::mechanic::{SettingValue, SettingsMap};

/// A character whose stats modifiers may reference by name.
pub trait CharacterContext {
    /// Look up a stat (attribute or skill) by name, case-insensitively.
    fn stat(&self, name: &str) -> Option<i64>;
}

/// The context used when no character is bound to a roll.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCharacter;

impl CharacterContext for NoCharacter {
    fn stat(&self, _name: &str) -> Option<i64> {
        None
    }
}

/// A character's attributes and skills.
#[derive(Debug, Clone, Default)]
pub struct CharacterSheet {
    /// Character name.
    pub name: String,
    /// Attribute scores keyed by lowercase name (e.g., strength: 3).
    pub attributes: HashMap<String, i64>,
    /// Skill ranks keyed by lowercase name (e.g., stealth: 2).
    pub skills: HashMap<String, i64>,
}

impl CharacterSheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set an attribute score.
    pub fn with_attribute(mut self, name: &str, value: i64) -> Self {
        self.attributes.insert(name.to_lowercase(), value);
        self
    }

    /// Set a skill rank.
    pub fn with_skill(mut self, name: &str, value: i64) -> Self {
        self.skills.insert(name.to_lowercase(), value);
        self
    }

    /// Build a sheet from stored `attribute.<name>` / `skill.<name>` entries.
    ///
    /// Keys without either prefix are treated as attributes. Values that are
    /// not integers (or integer strings) are ignored.
    pub fn from_map(name: impl Into<String>, map: &SettingsMap) -> Self {
        let mut sheet = Self::new(name);
        for (key, value) in map {
            let Some(n) = extract_i64(value) else {
                continue;
            };
            if let Some(skill) = key.strip_prefix("skill.") {
                sheet.skills.insert(skill.to_lowercase(), n);
            } else {
                let attr = key.strip_prefix("attribute.").unwrap_or(key);
                sheet.attributes.insert(attr.to_lowercase(), n);
            }
        }
        sheet
    }
}

impl CharacterContext for CharacterSheet {
    fn stat(&self, name: &str) -> Option<i64> {
        let key = name.trim().to_lowercase();
        self.attributes
            .get(&key)
            .or_else(|| self.skills.get(&key))
            .copied()
    }
}

fn extract_i64(value: &SettingValue) -> Option<i64> {
    match value {
        SettingValue::Integer(n) => Some(*n),
        SettingValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
