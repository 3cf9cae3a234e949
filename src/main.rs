use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod color;
mod converters;
mod core;
mod crypto;
mod generators;
mod logging;
mod models;
mod storage;
mod tools;
mod utils;

use crate::cli::handlers::{self, Output, PolicyOverrides, PomodoroOverrides};
use crate::cli::{Args, CliCommand};
use crate::core::config::Config;
use crate::storage::{JsonFileStore, KeyValueStore};

fn main() -> Result<()> {
    // Load environment variables
    let dotenv_loaded = Path::new(".env").exists() && dotenvy::dotenv().is_ok();

    let args = Args::parse();
    let mut config = Config::load();
    if let Some(state) = &args.state {
        config.state_file = state.clone();
    }

    logging::init(&config).context("Failed to initialize logging")?;
    for warning in &config.warnings {
        log::warn!("{}", warning);
    }
    if dotenv_loaded {
        log::debug!("Loaded .env file");
    }
    log::debug!("Loaded config: {:?}", config);

    let mut store = JsonFileStore::open(&config.state_file);
    log::debug!("Using state file {}", store.path().display());

    match args.command {
        Some(command) => {
            let output = run_command(command, &mut store, &config)?;
            output.print(args.json)?;
        }
        None => {
            log::debug!("Launching interactive menu");
            cli::menu::run_cli_menu(&mut store, &config)?;
        }
    }

    Ok(())
}

fn run_command<S: KeyValueStore>(command: CliCommand, store: &mut S, config: &Config) -> Result<Output> {
    match command {
        CliCommand::Password {
            length,
            lower,
            upper,
            numbers,
            symbols,
            exclude_ambiguous,
            no_repeat,
        } => {
            let overrides = PolicyOverrides {
                length,
                lower,
                upper,
                numbers,
                symbols,
                exclude_ambiguous,
                no_repeat,
            };
            handlers::handle_password(store, config, &overrides)
        }
        CliCommand::Strength { password } => handlers::handle_strength(&password),
        CliCommand::Color { value } => handlers::handle_color(store, value.as_deref()),
        CliCommand::Convert { category, value, from, to } => {
            handlers::handle_convert(store, category, value, &from, &to)
        }
        CliCommand::Units { category } => handlers::handle_units(category),
        CliCommand::Epoch { value, seconds } => handlers::handle_epoch(store, value, seconds),
        CliCommand::Codec { direction, input, mode } => {
            handlers::handle_codec(store, direction, input.as_deref(), mode)
        }
        CliCommand::Json { action, input, indent } => {
            let input = match input {
                Some(input) => input,
                None => io::read_to_string(io::stdin()).context("Failed to read JSON from stdin")?,
            };
            handlers::handle_json(store, action, &input, indent)
        }
        CliCommand::Regex { pattern, flags, input } => {
            handlers::handle_regex(store, pattern.as_deref(), flags.as_deref(), input.as_deref())
        }
        CliCommand::Uuid { count, inspect } => match inspect {
            Some(text) => handlers::handle_uuid_inspect(&text),
            None => handlers::handle_uuid(store, count),
        },
        CliCommand::Pomodoro {
            work,
            short,
            long,
            intervals,
            phases,
        } => {
            let overrides = PomodoroOverrides {
                work,
                short,
                long,
                intervals,
            };
            handlers::handle_pomodoro(store, &overrides, phases)
        }
        CliCommand::Theme { value } => handlers::handle_theme(store, value),
        CliCommand::State { action } => handlers::handle_state(store, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn run(argv: &[&str], store: &mut MemoryStore) -> Output {
        let args = Args::try_parse_from(argv).unwrap();
        let config = Config::from_lookup(|_| None);
        run_command(args.command.unwrap(), store, &config).unwrap()
    }

    #[test]
    fn commands_dispatch_to_their_tools() {
        let mut store = MemoryStore::new();

        let output = run(&["utility-hub", "color", "#fff"], &mut store);
        assert_eq!(output.text, "HEX  #ffffff\nRGB  rgb(255, 255, 255)\nHSL  hsl(0, 0%, 100%)");

        let output = run(&["utility-hub", "units", "volume"], &mut store);
        assert_eq!(output.json[0], "liter");

        let output = run(&["utility-hub", "epoch", "0"], &mut store);
        assert_eq!(output.json["iso"], "1970-01-01T00:00:00.000Z");

        let output = run(&["utility-hub", "strength", "aaaaaaaa"], &mut store);
        assert_eq!(output.json["label"], "Weak");
    }

    #[test]
    fn uuid_inspect_takes_precedence() {
        let mut store = MemoryStore::new();
        let output = run(
            &["utility-hub", "uuid", "--inspect", "F47AC10B-58CC-4372-A567-0E02B2C3D479"],
            &mut store,
        );
        assert_eq!(output.json["version"], 4);
        assert_eq!(output.json["uuid"], "f47ac10b-58cc-4372-a567-0e02b2c3d479");
    }
}
