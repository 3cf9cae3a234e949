// src/cli/commands.rs
use clap::{Subcommand, ValueEnum};

use crate::converters::units::Category;
use crate::models::Theme;
use crate::tools::codec::CodecMode;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a password (unset options reuse the last policy)
    Password {
        /// Password length (1-128)
        #[arg(long, short)]
        length: Option<usize>,

        /// Include lowercase letters
        #[arg(long)]
        lower: Option<bool>,

        /// Include uppercase letters
        #[arg(long)]
        upper: Option<bool>,

        /// Include numbers
        #[arg(long)]
        numbers: Option<bool>,

        /// Include symbols
        #[arg(long)]
        symbols: Option<bool>,

        /// Leave out look-alike characters (O0Il1|S5B8Z2)
        #[arg(long)]
        exclude_ambiguous: Option<bool>,

        /// Never repeat a character
        #[arg(long)]
        no_repeat: Option<bool>,
    },

    /// Estimate the strength of a password
    Strength {
        /// Password to score
        #[arg(required = true)]
        password: String,
    },

    /// Show a color as HEX, RGB and HSL
    Color {
        /// `#rrggbb`, `#rgb`, `rgb(r, g, b)` or `hsl(h, s%, l%)`; defaults to the last color
        value: Option<String>,
    },

    /// Convert a value between units
    Convert {
        /// length, weight, volume or temperature
        #[arg(required = true)]
        category: Category,

        /// Value to convert
        #[arg(required = true, allow_negative_numbers = true)]
        value: f64,

        /// Source unit
        #[arg(required = true)]
        from: String,

        /// Target unit
        #[arg(required = true)]
        to: String,
    },

    /// List the units of a category
    Units {
        #[arg(required = true)]
        category: Category,
    },

    /// Describe a Unix timestamp (milliseconds unless --seconds)
    Epoch {
        /// Timestamp; defaults to now
        #[arg(allow_negative_numbers = true)]
        value: Option<i64>,

        /// Treat the value as seconds
        #[arg(long)]
        seconds: bool,
    },

    /// Base64 or URL encode/decode text
    Codec {
        #[arg(value_enum)]
        direction: Direction,

        /// Text to convert; defaults to the last input
        input: Option<String>,

        /// base64 or url; defaults to the last mode
        #[arg(long, short)]
        mode: Option<CodecMode>,
    },

    /// Format, minify or sort JSON
    Json {
        #[arg(value_enum)]
        action: JsonAction,

        /// JSON text; read from stdin when omitted
        input: Option<String>,

        /// Indent width (0-10)
        #[arg(long, short)]
        indent: Option<usize>,
    },

    /// Test a regular expression
    Regex {
        /// Pattern; defaults to the last pattern
        #[arg(long, short)]
        pattern: Option<String>,

        /// Flags from g, i, m, s, u
        #[arg(long, short)]
        flags: Option<String>,

        /// Text to search; defaults to the last input
        input: Option<String>,
    },

    /// Generate or inspect UUIDs
    Uuid {
        /// How many to generate (1-1000)
        #[arg(long, short)]
        count: Option<usize>,

        /// Validate a UUID instead of generating
        #[arg(long, conflicts_with = "count")]
        inspect: Option<String>,
    },

    /// Plan pomodoro work and break phases
    Pomodoro {
        /// Work minutes
        #[arg(long)]
        work: Option<u32>,

        /// Short break minutes
        #[arg(long)]
        short: Option<u32>,

        /// Long break minutes
        #[arg(long)]
        long: Option<u32>,

        /// Work sessions before a long break
        #[arg(long)]
        intervals: Option<u32>,

        /// Number of phases to list
        #[arg(long, default_value_t = 8)]
        phases: usize,
    },

    /// Show or set the color theme
    Theme {
        #[arg(value_enum)]
        value: Option<Theme>,
    },

    /// Show or clear saved state
    State {
        #[arg(value_enum, default_value_t = StateAction::Show)]
        action: StateAction,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonAction {
    Format,
    Minify,
    Sort,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateAction {
    Show,
    Clear,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Args;

    #[test]
    fn convert_accepts_negative_values() {
        let args = Args::try_parse_from([
            "utility-hub", "convert", "temperature", "-40", "celsius", "fahrenheit",
        ])
        .unwrap();

        match args.command {
            Some(CliCommand::Convert { category, value, .. }) => {
                assert_eq!(category, Category::Temperature);
                assert_eq!(value, -40.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn password_flags_are_optional_overrides() {
        let args = Args::try_parse_from([
            "utility-hub", "password", "--length", "24", "--symbols", "false",
        ])
        .unwrap();

        match args.command {
            Some(CliCommand::Password { length, symbols, lower, .. }) => {
                assert_eq!(length, Some(24));
                assert_eq!(symbols, Some(false));
                assert_eq!(lower, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn codec_mode_parses_aliases() {
        let args = Args::try_parse_from(["utility-hub", "codec", "decode", "aGk=", "--mode", "b64"]).unwrap();
        match args.command {
            Some(CliCommand::Codec { direction, mode, .. }) => {
                assert_eq!(direction, Direction::Decode);
                assert_eq!(mode, Some(CodecMode::Base64));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
