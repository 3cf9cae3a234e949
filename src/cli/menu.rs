// src/cli/menu.rs
use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use console::style;
use inquire::{Confirm, CustomType, InquireError, Password, PasswordDisplayMode, Select, Text};

use crate::cli::commands::{Direction, JsonAction};
use crate::cli::handlers::{self, PolicyOverrides, PomodoroOverrides};
use crate::converters::units::{self, Category};
use crate::core::config::Config;
use crate::models::{
    CodecToolState, ColorToolState, ConvertToolState, EpochToolState, JsonToolState,
    RegexToolState, Theme, UuidToolState,
};
use crate::storage::{keys, KeyValueStore};
use crate::tools::codec::CodecMode;
use crate::tools::pomodoro::{PomodoroSettings, PomodoroTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    Password,
    Strength,
    Color,
    Convert,
    Epoch,
    Codec,
    Json,
    Regex,
    Uuid,
    Pomodoro,
    Theme,
    Exit,
}

impl Tool {
    const ALL: [Tool; 12] = [
        Tool::Password,
        Tool::Strength,
        Tool::Color,
        Tool::Convert,
        Tool::Epoch,
        Tool::Codec,
        Tool::Json,
        Tool::Regex,
        Tool::Uuid,
        Tool::Pomodoro,
        Tool::Theme,
        Tool::Exit,
    ];

    // Name stored under `lastTool`
    fn key(self) -> &'static str {
        match self {
            Tool::Password => "password",
            Tool::Strength => "strength",
            Tool::Color => "color",
            Tool::Convert => "convert",
            Tool::Epoch => "epoch",
            Tool::Codec => "codec",
            Tool::Json => "json",
            Tool::Regex => "regex",
            Tool::Uuid => "uuid",
            Tool::Pomodoro => "pomodoro",
            Tool::Theme => "theme",
            Tool::Exit => "exit",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tool::Password => "🔐  Password generator",
            Tool::Strength => "📶  Password strength",
            Tool::Color => "🎨  Color converter",
            Tool::Convert => "📏  Unit converter",
            Tool::Epoch => "🕒  Epoch converter",
            Tool::Codec => "🔤  Base64 / URL codec",
            Tool::Json => "🧾  JSON formatter",
            Tool::Regex => "🔍  Regex tester",
            Tool::Uuid => "🆔  UUID generator",
            Tool::Pomodoro => "🍅  Pomodoro planner",
            Tool::Theme => "🌓  Theme",
            Tool::Exit => "❌  Exit",
        };
        write!(f, "{}", label)
    }
}

fn heading(theme: Theme, text: &str) -> String {
    match theme {
        Theme::Dark => style(text).cyan().bold().to_string(),
        Theme::Light => style(text).blue().bold().to_string(),
    }
}

// Index of the last tool opened, or the first tool
fn starting_cursor<S: KeyValueStore>(store: &S) -> usize {
    let last: String = store.get(keys::LAST_TOOL, String::new());
    Tool::ALL
        .iter()
        .position(|tool| tool.key() == last)
        .unwrap_or(0)
}

pub fn run_cli_menu<S: KeyValueStore>(store: &mut S, config: &Config) -> Result<()> {
    let theme = handlers::current_theme(store);
    println!("{}", heading(theme, "╔══════════════════════════════════════╗"));
    println!("{}", heading(theme, "║          🧰 UTILITY HUB              ║"));
    println!("{}", heading(theme, "╚══════════════════════════════════════╝"));

    loop {
        let selection = Select::new("Choose a tool:", Tool::ALL.to_vec())
            .with_help_message("Type to filter, arrow keys to navigate, Enter to select, Esc to exit")
            .with_starting_cursor(starting_cursor(store))
            .with_page_size(15)
            .prompt_skippable();

        let tool = match selection {
            Ok(Some(Tool::Exit)) | Ok(None) => break,
            Ok(Some(tool)) => tool,
            Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = store.set(keys::LAST_TOOL, &tool.key()) {
            log::warn!("Failed to remember last tool: {}", e);
        }

        let theme = handlers::current_theme(store);
        println!("\n{}", heading(theme, &tool.to_string()));

        match run_tool(tool, store, config) {
            Ok(()) => {}
            Err(e) => match e.downcast_ref::<InquireError>() {
                Some(InquireError::OperationCanceled) => continue,
                Some(InquireError::OperationInterrupted) => break,
                _ => {
                    log::debug!("{} failed: {:?}", tool.key(), e);
                    println!("{} {}", style("❌").red(), e);
                }
            },
        }

        let _ = Text::new("Press enter to continue...").prompt();
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn run_tool<S: KeyValueStore>(tool: Tool, store: &mut S, config: &Config) -> Result<()> {
    match tool {
        Tool::Password => password_tool(store, config),
        Tool::Strength => strength_tool(),
        Tool::Color => color_tool(store),
        Tool::Convert => convert_tool(store),
        Tool::Epoch => epoch_tool(store),
        Tool::Codec => codec_tool(store),
        Tool::Json => json_tool(store),
        Tool::Regex => regex_tool(store),
        Tool::Uuid => uuid_tool(store),
        Tool::Pomodoro => pomodoro_tool(store),
        Tool::Theme => theme_tool(store),
        Tool::Exit => Ok(()),
    }
}

fn password_tool<S: KeyValueStore>(store: &mut S, config: &Config) -> Result<()> {
    let saved = handlers::saved_policy(store, config);

    let overrides = PolicyOverrides {
        length: Some(
            CustomType::<usize>::new("Password length:")
                .with_default(saved.length)
                .with_error_message("Please type a number")
                .prompt()?,
        ),
        lower: Some(Confirm::new("Include lowercase letters?").with_default(saved.include_lower).prompt()?),
        upper: Some(Confirm::new("Include uppercase letters?").with_default(saved.include_upper).prompt()?),
        numbers: Some(Confirm::new("Include numbers?").with_default(saved.include_number).prompt()?),
        symbols: Some(Confirm::new("Include symbols?").with_default(saved.include_symbol).prompt()?),
        exclude_ambiguous: Some(
            Confirm::new("Exclude look-alike characters (O0Il1|S5B8Z2)?")
                .with_default(saved.exclude_ambiguous)
                .prompt()?,
        ),
        no_repeat: Some(
            Confirm::new("Never repeat a character?")
                .with_default(saved.no_repeat_chars)
                .prompt()?,
        ),
    };

    loop {
        let output = handlers::handle_password(store, config, &overrides)?;
        println!("\n{}\n", output.text);

        let again = Confirm::new("Generate another with the same settings?")
            .with_default(false)
            .prompt()?;
        if !again {
            return Ok(());
        }
    }
}

fn strength_tool() -> Result<()> {
    let password = Password::new("Password to check:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    println!("{}", handlers::handle_strength(&password)?.text);
    Ok(())
}

fn color_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let saved = store.get(keys::COLOR, ColorToolState::default());
    let value = Text::new("Color (hex, rgb() or hsl()):")
        .with_default(&saved.hex)
        .prompt()?;
    println!("{}", handlers::handle_color(store, Some(&value))?.text);
    Ok(())
}

fn convert_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let saved = store.get(keys::CONVERT, ConvertToolState::default());

    let category_cursor = Category::ALL
        .iter()
        .position(|c| *c == saved.category)
        .unwrap_or(0);
    let category = Select::new("Category:", Category::ALL.to_vec())
        .with_starting_cursor(category_cursor)
        .prompt()?;

    let names = units::units(category);
    let cursor_of = |unit: &str, fallback: usize| {
        if category == saved.category {
            names.iter().position(|n| *n == unit).unwrap_or(fallback)
        } else {
            fallback
        }
    };
    let from_cursor = cursor_of(&saved.from, 0);
    let to_cursor = cursor_of(&saved.to, 1.min(names.len().saturating_sub(1)));

    let from = Select::new("From:", names.clone())
        .with_starting_cursor(from_cursor)
        .prompt()?;
    let to = Select::new("To:", names.clone())
        .with_starting_cursor(to_cursor)
        .prompt()?;
    let value = CustomType::<f64>::new("Value:")
        .with_default(saved.value)
        .with_error_message("Please type a number")
        .prompt()?;

    println!("{}", handlers::handle_convert(store, category, value, from, to)?.text);
    Ok(())
}

fn epoch_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let saved: Option<EpochToolState> = store.get(keys::EPOCH, None);
    let default = saved.map_or_else(|| "now".to_string(), |s| s.ms.to_string());

    let input = Text::new("Timestamp in milliseconds (or 'now'):")
        .with_default(&default)
        .prompt()?;
    let trimmed = input.trim();

    let value = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("now") {
        None
    } else {
        Some(trimmed.parse::<i64>()?)
    };

    println!("{}", handlers::handle_epoch(store, value, false)?.text);
    Ok(())
}

fn codec_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let saved = store.get(keys::CODEC, CodecToolState::default());

    let modes = vec![CodecMode::Base64, CodecMode::Url];
    let mode_cursor = modes.iter().position(|m| *m == saved.mode).unwrap_or(0);
    let mode = Select::new("Mode:", modes)
        .with_starting_cursor(mode_cursor)
        .prompt()?;

    let direction = Select::new("Direction:", vec!["Encode", "Decode"]).prompt()?;
    let direction = if direction == "Encode" {
        Direction::Encode
    } else {
        Direction::Decode
    };

    let input = Text::new("Input:").with_default(&saved.input).prompt()?;
    println!("{}", handlers::handle_codec(store, direction, Some(&input), Some(mode))?.text);
    Ok(())
}

fn json_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let saved = store.get(keys::JSON, JsonToolState::default());

    let action = match Select::new("Action:", vec!["Format", "Minify", "Sort keys"]).prompt()? {
        "Minify" => JsonAction::Minify,
        "Sort keys" => JsonAction::Sort,
        _ => JsonAction::Format,
    };
    let indent = if action == JsonAction::Minify {
        None
    } else {
        Some(
            CustomType::<usize>::new("Indent (0-10):")
                .with_default(saved.indent)
                .with_error_message("Please type a number")
                .prompt()?,
        )
    };
    let input = Text::new("JSON:").with_default(&saved.input).prompt()?;

    println!("{}", handlers::handle_json(store, action, &input, indent)?.text);
    Ok(())
}

fn regex_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let saved = store.get(keys::REGEX, RegexToolState::default());

    let pattern = Text::new("Pattern:").with_default(&saved.source).prompt()?;
    let flags = Text::new("Flags (g, i, m, s, u):")
        .with_default(&saved.flags)
        .prompt()?;
    let input = Text::new("Text:").with_default(&saved.input).prompt()?;

    let output = handlers::handle_regex(store, Some(&pattern), Some(&flags), Some(&input))?;
    println!("{}", output.text);
    Ok(())
}

fn uuid_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let action = Select::new("Action:", vec!["Generate", "Inspect"]).prompt()?;

    if action == "Inspect" {
        let text = Text::new("UUID:").prompt()?;
        println!("{}", handlers::handle_uuid_inspect(&text)?.text);
        return Ok(());
    }

    let saved = store.get(keys::UUID, UuidToolState::default());
    let count = CustomType::<usize>::new("How many (1-1000)?")
        .with_default(saved.count)
        .with_error_message("Please type a number")
        .prompt()?;
    println!("{}", handlers::handle_uuid(store, Some(count))?.text);
    Ok(())
}

fn pomodoro_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let saved = store.get(keys::POMODORO, PomodoroSettings::default());
    let minutes = |message: &str, default: u32| {
        CustomType::<u32>::new(message)
            .with_default(default)
            .with_error_message("Please type a number")
            .prompt()
    };

    let overrides = PomodoroOverrides {
        work: Some(minutes("Work minutes:", saved.work_minutes)?),
        short: Some(minutes("Short break minutes:", saved.short_break_minutes)?),
        long: Some(minutes("Long break minutes:", saved.long_break_minutes)?),
        intervals: Some(minutes("Work sessions before a long break:", saved.intervals)?),
    };
    let phases = CustomType::<usize>::new("Phases to plan:")
        .with_default(8)
        .with_error_message("Please type a number")
        .prompt()?;

    println!("{}", handlers::handle_pomodoro(store, &overrides, phases)?.text);

    let start = Confirm::new("Start the timer now?")
        .with_default(false)
        .prompt()?;
    if start {
        let settings = store.get(keys::POMODORO, PomodoroSettings::default());
        run_timer(settings, phases)?;
    }
    Ok(())
}

// Drive the timer from the wall clock until `phases` phases have finished
fn run_timer(settings: PomodoroSettings, phases: usize) -> Result<()> {
    let mut timer = PomodoroTimer::new(settings);
    timer.start(None);

    let mut finished = 0;
    while finished < phases && timer.is_running() {
        print!("\r{:<12} {}  ", timer.label(), timer.display());
        io::stdout().flush()?;

        thread::sleep(Duration::from_secs(1));
        if let Some(transition) = timer.tick() {
            finished += 1;
            println!(
                "\r🔔 {} finished, {} next ({} work session(s) done)",
                transition.finished,
                transition.next,
                timer.completed_work()
            );
        }
    }

    timer.reset();
    Ok(())
}

fn theme_tool<S: KeyValueStore>(store: &mut S) -> Result<()> {
    let current = handlers::current_theme(store);
    let themes = vec![Theme::Light, Theme::Dark];
    let cursor = themes.iter().position(|t| *t == current).unwrap_or(0);

    let theme = Select::new("Theme:", themes)
        .with_starting_cursor(cursor)
        .prompt()?;
    handlers::handle_theme(store, Some(theme))?;
    println!("✅ Theme set to {}", theme);
    Ok(())
}
