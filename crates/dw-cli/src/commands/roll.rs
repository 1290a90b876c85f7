use std::path::PathBuf;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use dw_mechanics::{
    CharacterContext, CharacterSheet, ModifierBag, NoCharacter, RollMechanicConfig, RollRequest,
    ScriptedRoller, perform_roll, preset,
};

/// Everything `dw roll` was given on the command line.
pub struct RollArgs {
    pub formula: Option<String>,
    pub modifiers: Vec<(String, String)>,
    pub preset: Option<String>,
    pub config: Option<PathBuf>,
    pub difficulty: Option<i64>,
    pub base_roll: Option<String>,
    pub character: Option<PathBuf>,
    pub seed: Option<u64>,
    pub rolls: Option<Vec<i64>>,
    pub json: bool,
}

/// Parse a `NAME=VALUE` modifier argument.
pub fn parse_modifier(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("modifier name is empty in '{arg}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

pub fn run(args: RollArgs) -> Result<(), String> {
    let mut request = RollRequest::new().with_modifiers(
        args.modifiers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect::<ModifierBag>(),
    );
    if let Some(formula) = &args.formula {
        request = request.with_formula(formula);
    }
    if let Some(difficulty) = args.difficulty {
        request = request.with_difficulty(difficulty);
    }
    if let Some(base_roll) = &args.base_roll {
        request = request.with_legacy_base_roll(base_roll);
    }
    if let Some(name) = &args.preset {
        request = request.with_config(preset::by_name(name).map_err(|e| e.to_string())?);
    } else if let Some(path) = &args.config {
        let settings = super::read_settings(path)?;
        request = request.with_config(RollMechanicConfig::from_map_or_default(Some(&settings)));
    }

    let sheet = match &args.character {
        Some(path) => {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Some(CharacterSheet::from_map(name, &super::read_settings(path)?))
        }
        None => None,
    };
    let character: &dyn CharacterContext = match &sheet {
        Some(sheet) => sheet,
        None => &NoCharacter,
    };

    let response = match (&args.rolls, args.seed) {
        (Some(faces), _) => perform_roll(
            &request,
            character,
            &mut ScriptedRoller::new(faces.iter().copied()),
        ),
        (None, Some(seed)) => perform_roll(&request, character, &mut StdRng::seed_from_u64(seed)),
        (None, None) => perform_roll(&request, character, &mut rand::rng()),
    };

    for name in &response.skipped {
        eprintln!(
            "{}",
            format!("warning: ignored modifier '{name}' (not a number, dice formula or known stat)")
                .yellow()
        );
    }

    if args.json {
        let json = serde_json::to_string_pretty(&response)
            .map_err(|e| format!("cannot encode response: {e}"))?;
        println!("{json}");
        return match response.total {
            Some(_) => Ok(()),
            None => Err("roll failed".into()),
        };
    }

    match response.total {
        Some(_) => {
            println!("{}", response.message);
            Ok(())
        }
        None => Err(response.message),
    }
}
