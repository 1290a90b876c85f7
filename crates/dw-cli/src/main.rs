//! CLI frontend for the Dicewarden roll engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dw",
    about = "Dicewarden: configurable dice rolls for tabletop games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions (skipped modifiers, fallbacks) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll dice with the configured mechanic or an explicit formula
    Roll {
        /// Formula such as 2d6+3 or 4dF+1 (default: the mechanic's own dice)
        formula: Option<String>,

        /// Named modifier, e.g. -m STR=3 -m Bless=1d4 (repeatable)
        #[arg(short, long = "modifier", value_name = "NAME=VALUE", value_parser = commands::roll::parse_modifier)]
        modifiers: Vec<(String, String)>,

        /// Roll with a built-in preset mechanic
        #[arg(short, long, conflicts_with = "config")]
        preset: Option<String>,

        /// Roll with a mechanic stored in a JSON settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Difficulty to report success against
        #[arg(short, long, allow_hyphen_values = true)]
        difficulty: Option<i64>,

        /// Base roll used when no mechanic is configured
        #[arg(long)]
        base_roll: Option<String>,

        /// JSON file of character stats that modifiers may name
        #[arg(long)]
        character: Option<PathBuf>,

        /// RNG seed for a reproducible roll
        #[arg(short, long, conflicts_with = "rolls")]
        seed: Option<u64>,

        /// Fixed die faces to use instead of random rolls, e.g. --rolls 4,5
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        rolls: Option<Vec<i64>>,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in preset mechanics
    Presets,

    /// Inspect and validate mechanic settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print a preset as a JSON settings file
    Show {
        /// Preset name (see `dw presets`)
        preset: String,
    },

    /// Validate a JSON settings file
    Check {
        /// Settings file to validate
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("DW_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            formula,
            modifiers,
            preset,
            config,
            difficulty,
            base_roll,
            character,
            seed,
            rolls,
            json,
        } => commands::roll::run(commands::roll::RollArgs {
            formula,
            modifiers,
            preset,
            config,
            difficulty,
            base_roll,
            character,
            seed,
            rolls,
            json,
        }),
        Commands::Presets => commands::presets::run(),
        Commands::Config { action } => match action {
            ConfigAction::Show { preset } => commands::config::show(&preset),
            ConfigAction::Check { file } => commands::config::check(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
