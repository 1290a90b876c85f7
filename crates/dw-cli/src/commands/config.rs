use std::path::Path;

use colored::Colorize;

use dw_mechanics::{RollMechanicConfig, preset, validate_config};

pub fn show(name: &str) -> Result<(), String> {
    let config = preset::by_name(name).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&config.to_map())
        .map_err(|e| format!("cannot encode settings: {e}"))?;
    println!("{json}");
    Ok(())
}

pub fn check(path: &Path) -> Result<(), String> {
    let settings = super::read_settings(path)?;
    let config = RollMechanicConfig::from_map(&settings).map_err(|e| e.to_string())?;
    let issues = validate_config(&config);

    for issue in &issues {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        return Err(format!(
            "{errors} error{}, {warnings} warning{}",
            if errors == 1 { "" } else { "s" },
            if warnings == 1 { "" } else { "s" },
        ));
    }

    println!(
        "  All checks passed for {} mechanic '{}'.",
        config.mechanic_type, config.dice_formula
    );
    if warnings > 0 {
        println!(
            "  {warnings} warning{}",
            if warnings == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
