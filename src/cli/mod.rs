// src/cli/mod.rs
use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod menu;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Everyday developer utilities", long_about = None)]
pub struct Args {
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// State file (overrides STATE_FILE)
    #[arg(long, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Command to execute; opens the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_menu() {
        let args = Args::try_parse_from(["utility-hub", "--json"]).unwrap();
        assert!(args.json);
        assert!(args.command.is_none());
    }
}
