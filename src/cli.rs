use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use log::LevelFilter;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::generator::ProjectGenerator;
use crate::input::OptionSpec;

/// Static command-line arguments. One additional `--<option-name>` string
/// flag per registered input is added dynamically, so the option surface
/// always mirrors the input registry.
#[derive(Parser, Debug, Clone)]
#[command(name = "pyforge", version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Resolve unanswered questions from their defaults instead of prompting
    #[arg(long)]
    pub non_interactive: bool,

    /// Skip the final "poetry install" bootstrap run
    #[arg(long)]
    pub skip_install: bool,
}

pub fn get_log_level_from_verbose(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Builds the full command: the static args plus one flag per input.
pub fn build_command(options: &[OptionSpec]) -> clap::Command {
    let mut command = Args::command();
    for option in options {
        command = command.arg(
            clap::Arg::new(option.name.clone())
                .long(option.name.clone())
                .help(option.description.clone())
                .value_name("VALUE")
                .action(ArgAction::Set),
        );
    }
    command
}

/// Parses the process arguments into the static args and the flat map of
/// per-input option values actually supplied on the command line.
pub fn parse(options: &[OptionSpec]) -> (Args, Map<String, Value>) {
    let matches = build_command(options).get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let mut option_values = Map::new();
    for option in options {
        if let Some(value) = matches.get_one::<String>(&option.name) {
            option_values.insert(option.name.clone(), Value::String(value.clone()));
        }
    }
    (args, option_values)
}

/// Drives the generator through its lifecycle phases.
pub fn run(
    args: &Args,
    option_values: Value,
    generator: &mut ProjectGenerator,
) -> Result<()> {
    generator.initialize(&option_values)?;
    generator.prompt(!args.non_interactive)?;
    generator.write()?;

    if args.skip_install {
        log::debug!("Skipping poetry install");
    } else {
        generator.install()?;
    }

    println!(
        "Project scaffolding completed successfully in {}.",
        generator.project_dir().display()
    );
    Ok(())
}
