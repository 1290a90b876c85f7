use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dw_mechanics::{MechanicType, RollMechanicConfig, preset};

pub fn run() -> Result<(), String> {
    let presets = preset::all();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Preset", "Mechanic", "Dice", "Rule"]);

    for (name, config) in &presets {
        table.add_row(vec![
            name.to_string(),
            config.mechanic_type.to_string(),
            dice_summary(config),
            config.description.clone(),
        ]);
    }

    println!("  {}", "Roll mechanics".bold());
    println!("{table}");
    println!();
    println!(
        "  {} presets {}",
        presets.len(),
        "(dw roll --preset NAME)".dimmed()
    );

    Ok(())
}

fn dice_summary(config: &RollMechanicConfig) -> String {
    match config.mechanic_type {
        MechanicType::DicePool => format!(
            "{} pool, {}",
            config.dice_formula,
            config.success_criteria.as_deref().unwrap_or("8+")
        ),
        MechanicType::Exploding => match config.explode_on {
            Some(n) => format!("{}, explodes on {n}+", config.dice_formula),
            None => format!("{}, explodes on max", config.dice_formula),
        },
        MechanicType::RollUnder => match config.target_number {
            Some(n) => format!("{} under {n}", config.dice_formula),
            None => format!("{} under target", config.dice_formula),
        },
        MechanicType::Generic => config.generic_formula().to_string(),
        _ => config.dice_formula.clone(),
    }
}
