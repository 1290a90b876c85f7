//! Named roll modifiers and their resolution.
//!
//! A [`ModifierBag`] maps names to raw values in insertion order. Resolution
//! turns each entry into a number plus a display fragment:
//!
//! 1. a value that starts like a dice formula (`1d6`, `1d12+9`) is rolled
//!    as a sub-formula,
//! 2. an integer (or integer string) is used as-is,
//! 3. a name the bound character knows (`Strength`, `@Strength`) uses that stat,
//! 4. anything else is skipped without error and listed in
//!    [`Resolution::skipped`].
//!
//! Sub-formulas are plain [`DiceExpression`]s and cannot carry named
//! modifiers of their own, so resolution never recurses past one level.
//!
//! [`DiceExpression`]: crate::dice::DiceExpression

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::expr::normalize;
use crate::dice::{Roller, evaluate, is_dice_formula, parse_formula};
use crate::sheet::CharacterContext;

/// The raw value supplied for a modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierValue {
    /// A flat integer.
    Integer(i64),
    /// Text: an integer string, a dice formula, or a stat name.
    Text(String),
}

impl From<i64> for ModifierValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for ModifierValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ModifierValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl std::fmt::Display for ModifierValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Insertion-ordered modifiers keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierBag {
    entries: Vec<(String, ModifierValue)>,
}

impl ModifierBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ModifierBag::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ModifierValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a modifier. Re-inserting a name replaces its value but keeps
    /// its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ModifierValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a modifier's raw value.
    pub fn get(&self, name: &str) -> Option<&ModifierValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModifierValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bag holds no modifiers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ModifierValue>> FromIterator<(K, V)> for ModifierBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (k, v) in iter {
            bag.insert(k, v);
        }
        bag
    }
}

/// A modifier reduced to a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModifier {
    /// The modifier's name.
    pub name: String,
    /// Its numeric contribution.
    pub value: i64,
    /// How it is shown in the roll trace, e.g. `Bless (1d4 [3])`.
    pub display: String,
}

/// The outcome of resolving a [`ModifierBag`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolved modifiers, in bag order.
    pub modifiers: Vec<ResolvedModifier>,
    /// Names of entries that could not be resolved and were dropped.
    pub skipped: Vec<String>,
}

impl Resolution {
    /// Sum of every resolved value.
    pub fn total(&self) -> i64 {
        self.modifiers
            .iter()
            .fold(0_i64, |acc, m| acc.saturating_add(m.value))
    }

    /// Display fragments, in bag order.
    pub fn fragments(&self) -> Vec<String> {
        self.modifiers.iter().map(|m| m.display.clone()).collect()
    }

    /// The first resolved modifier whose name matches one of `names`
    /// (case-insensitive).
    pub fn find_any(&self, names: &[&str]) -> Option<&ResolvedModifier> {
        self.modifiers
            .iter()
            .find(|m| names.iter().any(|n| m.name.eq_ignore_ascii_case(n)))
    }
}

/// Resolve every entry of `bag`, rolling dice-valued modifiers with `roller`.
pub fn resolve_modifiers(
    bag: &ModifierBag,
    character: &dyn CharacterContext,
    roller: &mut impl Roller,
) -> Resolution {
    let mut resolution = Resolution::default();
    for (name, value) in bag.iter() {
        match resolve_one(name, value, character, roller) {
            Some(resolved) => resolution.modifiers.push(resolved),
            None => {
                debug!(modifier = name, value = %value, "skipping unresolvable modifier");
                resolution.skipped.push(name.to_string());
            }
        }
    }
    resolution
}

fn resolve_one(
    name: &str,
    value: &ModifierValue,
    character: &dyn CharacterContext,
    roller: &mut impl Roller,
) -> Option<ResolvedModifier> {
    let raw = match value {
        ModifierValue::Integer(n) => return Some(flat(name, *n)),
        ModifierValue::Text(raw) => raw,
    };

    let compact = normalize(raw);
    if is_dice_formula(&compact) {
        let expr = parse_formula(&compact)
            .inspect_err(|e| debug!(modifier = name, error = %e, "modifier formula rejected"))
            .ok()?;
        let outcome = evaluate(&expr, roller);
        return Some(ResolvedModifier {
            name: name.to_string(),
            value: outcome.total,
            display: format!("{name} ({compact} [{}])", outcome.total),
        });
    }

    if let Ok(n) = raw.trim().parse::<i64>() {
        return Some(flat(name, n));
    }

    let stat_name = raw.trim().trim_start_matches('@');
    let n = character.stat(stat_name)?;
    Some(ResolvedModifier {
        name: name.to_string(),
        value: n,
        display: format!("{name} ({stat_name} {})", signed(n)),
    })
}

fn flat(name: &str, n: i64) -> ResolvedModifier {
    ResolvedModifier {
        name: name.to_string(),
        value: n,
        display: format!("{name} ({})", signed(n)),
    }
}

/// Format with an explicit `+` for non-negative values.
pub(crate) fn signed(n: i64) -> String {
    if n >= 0 { format!("+{n}") } else { n.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use crate::sheet::{CharacterSheet, NoCharacter};

    #[test]
    fn bag_keeps_insertion_order() {
        let bag = ModifierBag::new()
            .with("zeal", 1)
            .with("armor", 2)
            .with("bless", "1d4");
        let names: Vec<&str> = bag.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zeal", "armor", "bless"]);
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut bag = ModifierBag::new().with("a", 1).with("b", 2);
        bag.insert("a", 5);
        let entries: Vec<(&str, &ModifierValue)> = bag.iter().collect();
        assert_eq!(entries[0], ("a", &ModifierValue::Integer(5)));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn bag_from_iterator() {
        let bag: ModifierBag = [("STR", "3"), ("DEX", "-1")].into_iter().collect();
        assert_eq!(bag.get("DEX"), Some(&ModifierValue::Text("-1".to_string())));
    }

    #[test]
    fn integer_modifiers() {
        let bag = ModifierBag::new()
            .with("STR", 3)
            .with("Wound", "-2")
            .with("Luck", " 0 ");
        let r = resolve_modifiers(&bag, &NoCharacter, &mut ScriptedRoller::default());
        assert_eq!(r.total(), 1);
        assert_eq!(r.fragments(), vec!["STR (+3)", "Wound (-2)", "Luck (+0)"]);
        assert!(r.skipped.is_empty());
    }

    #[test]
    fn dice_modifier_is_rolled() {
        let bag = ModifierBag::new().with("Sneak Attack", "1d6");
        let r = resolve_modifiers(&bag, &NoCharacter, &mut ScriptedRoller::new([4]));
        assert_eq!(r.total(), 4);
        assert_eq!(r.fragments(), vec!["Sneak Attack (1d6 [4])"]);
    }

    #[test]
    fn dice_modifier_with_flat_part() {
        let bag = ModifierBag::new().with("Smite", "1d12 + 9");
        let r = resolve_modifiers(&bag, &NoCharacter, &mut ScriptedRoller::new([5]));
        assert_eq!(r.total(), 14);
        assert_eq!(r.fragments(), vec!["Smite (1d12+9 [14])"]);
    }

    #[test]
    fn unparseable_modifiers_are_skipped() {
        let bag = ModifierBag::new()
            .with("STR", 2)
            .with("vibes", "excellent")
            .with("broken", "1d6 plus two")
            .with("huge", "500d6");
        let r = resolve_modifiers(&bag, &NoCharacter, &mut ScriptedRoller::default());
        assert_eq!(r.total(), 2);
        assert_eq!(r.modifiers.len(), 1);
        assert_eq!(r.skipped, vec!["vibes", "broken", "huge"]);
    }

    #[test]
    fn split_digits_are_not_an_integer() {
        let bag = ModifierBag::new().with("Typo", "1 2").with("Sign", "+ 3");
        let r = resolve_modifiers(&bag, &NoCharacter, &mut ScriptedRoller::default());
        assert!(r.modifiers.is_empty());
        assert_eq!(r.skipped, vec!["Typo", "Sign"]);
    }

    #[test]
    fn character_stats_resolve_by_name() {
        let sheet = CharacterSheet::new("Kael").with_attribute("Strength", 3);
        let bag = ModifierBag::new()
            .with("Might", "@Strength")
            .with("Also", "strength")
            .with("Charm", "@Charisma");
        let r = resolve_modifiers(&bag, &sheet, &mut ScriptedRoller::default());
        assert_eq!(r.total(), 6);
        assert_eq!(r.fragments(), vec!["Might (Strength +3)", "Also (strength +3)"]);
        assert_eq!(r.skipped, vec!["Charm"]);
    }

    #[test]
    fn find_any_is_case_insensitive() {
        let bag = ModifierBag::new().with("Pool", 5).with("bonus", 1);
        let r = resolve_modifiers(&bag, &NoCharacter, &mut ScriptedRoller::default());
        assert_eq!(r.find_any(&["pool", "dice"]).map(|m| m.value), Some(5));
        assert!(r.find_any(&["pool_size"]).is_none());
    }

    #[test]
    fn signed_formatting() {
        assert_eq!(signed(0), "+0");
        assert_eq!(signed(4), "+4");
        assert_eq!(signed(-3), "-3");
    }
}
