//! Validation of an operator-chosen mechanic configuration.
//!
//! Rolling never fails on a bad config (it falls back or reports a message),
//! so these checks exist to tell the operator about problems up front.

use crate::dice::{DiceExpression, MAX_SIDES, parse_formula};
use crate::mechanic::{MechanicType, RollMechanicConfig};
use crate::strategy::exploding::MAX_EXPLOSIONS;
use crate::strategy::pool::{die_sides, parse_threshold};

/// A warning or error found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The config field the issue is about.
    pub field: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
            is_error: true,
        }
    }

    fn warning(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.field, self.message)
    }
}

/// Check `config` for formulas that will not roll and settings that do
/// nothing. An empty list means the config is clean.
pub fn validate_config(config: &RollMechanicConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mechanic = config.mechanic_type;

    match mechanic {
        MechanicType::D20 | MechanicType::TwoD6 | MechanicType::Duality => {
            let fixed = mechanic.default_formula();
            if !config.dice_formula.eq_ignore_ascii_case(fixed) {
                issues.push(ValidationIssue::warning(
                    "dice_formula",
                    format!(
                        "'{}' is ignored; {mechanic} always rolls {fixed}",
                        config.dice_formula
                    ),
                ));
            }
        }
        MechanicType::RollUnder => {
            check_formula("dice_formula", &config.dice_formula, &mut issues);
        }
        MechanicType::DicePool => validate_pool(config, &mut issues),
        MechanicType::Exploding => validate_exploding(config, &mut issues),
        MechanicType::Generic => {
            let field = if config.custom_formula.is_some() {
                "custom_formula"
            } else {
                "dice_formula"
            };
            check_formula(field, config.generic_formula(), &mut issues);
        }
    }

    if mechanic != MechanicType::Exploding && config.explode_on.is_some() {
        issues.push(ignored("explode_on", mechanic));
    }
    if mechanic != MechanicType::Generic && config.custom_formula.is_some() {
        issues.push(ignored("custom_formula", mechanic));
    }
    if mechanic != MechanicType::Duality && config.hope_fear_enabled {
        issues.push(ignored("hope_fear_enabled", mechanic));
    }

    issues
}

fn validate_pool(config: &RollMechanicConfig, issues: &mut Vec<ValidationIssue>) {
    let sides = die_sides(&config.dice_formula);
    if sides > MAX_SIDES {
        issues.push(ValidationIssue::error(
            "dice_formula",
            format!("d{sides} has more than {MAX_SIDES} sides"),
        ));
    }
    match config.success_criteria.as_deref() {
        None => issues.push(ValidationIssue::warning(
            "success_criteria",
            "not set; successes count at 8+".to_string(),
        )),
        Some(criteria) => match parse_threshold(criteria) {
            None => issues.push(ValidationIssue::error(
                "success_criteria",
                format!("'{criteria}' is not of the form N+ or >=N"),
            )),
            Some(threshold) if threshold > i64::from(sides) => {
                issues.push(ValidationIssue::warning(
                    "success_criteria",
                    format!("threshold {threshold} is beyond d{sides}; no die can succeed"),
                ));
            }
            Some(_) => {}
        },
    }
}

fn validate_exploding(config: &RollMechanicConfig, issues: &mut Vec<ValidationIssue>) {
    let Some(expr) = check_formula("dice_formula", &config.dice_formula, issues) else {
        return;
    };
    if expr.is_fudge() {
        issues.push(ValidationIssue::error(
            "dice_formula",
            "fudge dice cannot explode".to_string(),
        ));
        return;
    }
    match config.explode_on {
        Some(threshold) if threshold <= 1 => issues.push(ValidationIssue::warning(
            "explode_on",
            format!(
                "{threshold} explodes every roll; chains stop after {MAX_EXPLOSIONS} extra rolls"
            ),
        )),
        Some(threshold) if threshold > expr.die.sides() => issues.push(ValidationIssue::warning(
            "explode_on",
            format!("{threshold} is beyond {}; dice never explode", expr.die),
        )),
        _ => {}
    }
}

fn check_formula(
    field: &str,
    formula: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<DiceExpression> {
    match parse_formula(formula) {
        Ok(expr) => Some(expr),
        Err(e) => {
            issues.push(ValidationIssue::error(field, e.to_string()));
            None
        }
    }
}

fn ignored(field: &str, mechanic: MechanicType) -> ValidationIssue {
    ValidationIssue::warning(field, format!("set but ignored by {mechanic}"))
}
