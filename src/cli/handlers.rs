// src/cli/handlers.rs
//! One handler per tool. Handlers read defaults from the state store, run the
//! tool and save what was used, returning an `Output` the caller prints.

use anyhow::{Context, Result};
use console::style;
use rand::rngs::OsRng;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::cli::commands::{Direction, JsonAction, StateAction};
use crate::color::{self, ColorReport};
use crate::converters::{epoch, units};
use crate::converters::units::Category;
use crate::core::config::Config;
use crate::generators::{self, uuid, Strength};
use crate::models::{
    CodecToolState, ColorToolState, ConvertToolState, EpochToolState, JsonToolState,
    PasswordPolicy, RegexToolState, Theme, UuidToolState,
};
use crate::storage::{keys, KeyValueStore};
use crate::tools::codec::{self, CodecMode};
use crate::tools::json as json_tool;
use crate::tools::pomodoro::{self, PomodoroSettings};
use crate::tools::regex as regex_tool;
use crate::utils::{format_clock, truncate_string};

/// A handler result in both machine and human form.
#[derive(Debug)]
pub struct Output {
    pub json: Value,
    pub text: String,
}

impl Output {
    fn new<T: Serialize>(data: &T, text: impl Into<String>) -> Result<Self> {
        Ok(Self {
            json: serde_json::to_value(data).context("Failed to serialize output")?,
            text: text.into(),
        })
    }

    pub fn print(&self, as_json: bool) -> Result<()> {
        if as_json {
            println!("{}", serde_json::to_string_pretty(&self.json)?);
        } else {
            println!("{}", self.text);
        }
        Ok(())
    }
}

// Optional overrides on top of the saved password policy
#[derive(Debug, Default, Clone)]
pub struct PolicyOverrides {
    pub length: Option<usize>,
    pub lower: Option<bool>,
    pub upper: Option<bool>,
    pub numbers: Option<bool>,
    pub symbols: Option<bool>,
    pub exclude_ambiguous: Option<bool>,
    pub no_repeat: Option<bool>,
}

impl PolicyOverrides {
    fn apply(&self, mut policy: PasswordPolicy) -> PasswordPolicy {
        if let Some(length) = self.length {
            policy.length = length;
        }
        if let Some(on) = self.lower {
            policy.include_lower = on;
        }
        if let Some(on) = self.upper {
            policy.include_upper = on;
        }
        if let Some(on) = self.numbers {
            policy.include_number = on;
        }
        if let Some(on) = self.symbols {
            policy.include_symbol = on;
        }
        if let Some(on) = self.exclude_ambiguous {
            policy.exclude_ambiguous = on;
        }
        if let Some(on) = self.no_repeat {
            policy.no_repeat_chars = on;
        }
        policy
    }
}

#[derive(Debug, Serialize)]
struct GeneratedPassword {
    password: String,
    strength: Strength,
    policy: PasswordPolicy,
}

pub fn saved_policy<S: KeyValueStore>(store: &S, config: &Config) -> PasswordPolicy {
    store.get(keys::PASSWORD, config.default_policy())
}

pub fn handle_password<S: KeyValueStore>(
    store: &mut S,
    config: &Config,
    overrides: &PolicyOverrides,
) -> Result<Output> {
    let policy = overrides.apply(saved_policy(store, config));
    let password = generators::generate_password(&policy, &mut OsRng)
        .context("Could not generate a password")?;
    store.set(keys::PASSWORD, &policy)?;

    let strength = generators::estimate_strength(&password);
    let text = format!(
        "{}\nStrength: {} ({}/10)",
        style(&password).bold(),
        strength.label,
        strength.score
    );

    Output::new(&GeneratedPassword { password, strength, policy }, text)
}

pub fn handle_strength(password: &str) -> Result<Output> {
    let strength = generators::estimate_strength(password);
    let text = format!(
        "{} ({}/10, meter {}%)",
        strength.label,
        strength.score,
        strength.meter_percent()
    );
    Output::new(&strength, text)
}

pub fn handle_color<S: KeyValueStore>(store: &mut S, value: Option<&str>) -> Result<Output> {
    let input = match value {
        Some(value) => value.to_string(),
        None => store.get(keys::COLOR, ColorToolState::default()).hex,
    };

    let rgb = color::parse_any(&input)?;
    let report = ColorReport::from(rgb);
    store.set(keys::COLOR, &ColorToolState { hex: report.hex.clone() })?;

    let text = format!("HEX  {}\nRGB  {}\nHSL  {}", report.hex, report.rgb, report.hsl);
    Output::new(&report, text)
}

#[derive(Debug, Serialize)]
struct Conversion {
    category: Category,
    from: String,
    to: String,
    value: f64,
    result: f64,
}

pub fn handle_convert<S: KeyValueStore>(
    store: &mut S,
    category: Category,
    value: f64,
    from: &str,
    to: &str,
) -> Result<Output> {
    let result = units::convert(category, from, to, value)?;
    store.set(
        keys::CONVERT,
        &ConvertToolState {
            category,
            from: from.to_string(),
            to: to.to_string(),
            value,
        },
    )?;

    let text = format!("{} {} = {} {}", value, from, result, to);
    Output::new(
        &Conversion {
            category,
            from: from.to_string(),
            to: to.to_string(),
            value,
            result,
        },
        text,
    )
}

pub fn handle_units(category: Category) -> Result<Output> {
    let names = units::units(category);
    let text = names.join("\n");
    Output::new(&names, text)
}

pub fn handle_epoch<S: KeyValueStore>(
    store: &mut S,
    value: Option<i64>,
    seconds: bool,
) -> Result<Output> {
    let report = match value {
        Some(v) if seconds => epoch::from_seconds(v)?,
        Some(v) => epoch::describe(v)?,
        None => epoch::now()?,
    };
    store.set(keys::EPOCH, &EpochToolState { ms: report.millis })?;

    let text = format!(
        "Milliseconds  {}\nSeconds       {}\nISO 8601      {}\nUTC           {}\nLocal         {} ({})",
        report.millis, report.seconds, report.iso, report.utc, report.local, report.offset
    );
    Output::new(&report, text)
}

pub fn handle_codec<S: KeyValueStore>(
    store: &mut S,
    direction: Direction,
    input: Option<&str>,
    mode: Option<CodecMode>,
) -> Result<Output> {
    let saved = store.get(keys::CODEC, CodecToolState::default());
    let state = CodecToolState {
        input: input.map_or(saved.input, str::to_string),
        mode: mode.unwrap_or(saved.mode),
    };

    let result = match direction {
        Direction::Encode => codec::encode(state.mode, &state.input),
        Direction::Decode => codec::decode(state.mode, &state.input)?,
    };
    store.set(keys::CODEC, &state)?;

    Output::new(&json!({ "mode": state.mode, "result": result }), result.clone())
}

pub fn handle_json<S: KeyValueStore>(
    store: &mut S,
    action: JsonAction,
    input: &str,
    indent: Option<usize>,
) -> Result<Output> {
    let indent = indent
        .unwrap_or_else(|| store.get(keys::JSON, JsonToolState::default()).indent)
        .min(json_tool::MAX_INDENT);

    let result = match action {
        JsonAction::Format => json_tool::format(input, indent)?,
        JsonAction::Minify => json_tool::minify(input)?,
        JsonAction::Sort => json_tool::sort_keys(input, indent)?,
    };
    store.set(
        keys::JSON,
        &JsonToolState {
            input: input.to_string(),
            indent,
        },
    )?;

    Output::new(&json!({ "result": result }), result.clone())
}

pub fn handle_regex<S: KeyValueStore>(
    store: &mut S,
    pattern: Option<&str>,
    flags: Option<&str>,
    input: Option<&str>,
) -> Result<Output> {
    let saved = store.get(keys::REGEX, RegexToolState::default());
    let state = RegexToolState {
        source: pattern.map_or(saved.source, str::to_string),
        flags: flags.map_or(saved.flags, str::to_string),
        input: input.map_or(saved.input, str::to_string),
    };

    let report = regex_tool::run(&state.source, &state.flags, &state.input)?;
    store.set(keys::REGEX, &state)?;

    let mut text = format!("{} match(es)", report.count);
    for (i, m) in report.matches.iter().enumerate() {
        text.push_str(&format!("\n{:>3}: {}", i + 1, m));
        if let Some(groups) = report.groups.get(i) {
            for (name, value) in groups {
                text.push_str(&format!("\n     {} = {}", name, value));
            }
        }
    }
    Output::new(&report, text)
}

pub fn handle_uuid<S: KeyValueStore>(store: &mut S, count: Option<usize>) -> Result<Output> {
    let count = count
        .unwrap_or_else(|| store.get(keys::UUID, UuidToolState::default()).count)
        .clamp(1, uuid::MAX_UUIDS);

    let ids = uuid::generate(count);
    store.set(keys::UUID, &UuidToolState { count })?;

    let text = ids.join("\n");
    Output::new(&ids, text)
}

pub fn handle_uuid_inspect(text: &str) -> Result<Output> {
    let info = uuid::inspect(text)?;
    let summary = format!("{} (version {}, {} variant)", info.uuid, info.version, info.variant);
    Output::new(&info, summary)
}

#[derive(Debug, Default, Clone)]
pub struct PomodoroOverrides {
    pub work: Option<u32>,
    pub short: Option<u32>,
    pub long: Option<u32>,
    pub intervals: Option<u32>,
}

pub fn handle_pomodoro<S: KeyValueStore>(
    store: &mut S,
    overrides: &PomodoroOverrides,
    phases: usize,
) -> Result<Output> {
    let mut settings = store.get(keys::POMODORO, PomodoroSettings::default());
    if let Some(minutes) = overrides.work {
        settings.work_minutes = minutes;
    }
    if let Some(minutes) = overrides.short {
        settings.short_break_minutes = minutes;
    }
    if let Some(minutes) = overrides.long {
        settings.long_break_minutes = minutes;
    }
    if let Some(intervals) = overrides.intervals {
        settings.intervals = intervals;
    }

    let plan = pomodoro::schedule(&settings, phases);
    store.set(keys::POMODORO, &settings)?;

    let text = plan
        .iter()
        .map(|p| {
            format!(
                "+{:>6}  {:<11} {}",
                format_clock(p.starts_at),
                p.label,
                format_clock(p.seconds)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    Output::new(&plan, text)
}

pub fn current_theme<S: KeyValueStore>(store: &S) -> Theme {
    store.get(keys::THEME, Theme::default())
}

pub fn handle_theme<S: KeyValueStore>(store: &mut S, value: Option<Theme>) -> Result<Output> {
    let theme = match value {
        Some(theme) => {
            store.set(keys::THEME, &theme)?;
            log::info!("Theme set to {}", theme);
            theme
        }
        None => current_theme(store),
    };
    Output::new(&theme, theme.to_string())
}

pub fn handle_state<S: KeyValueStore>(store: &mut S, action: StateAction) -> Result<Output> {
    match action {
        StateAction::Show => {
            let mut entries = Map::new();
            let mut lines = Vec::new();
            for key in store.keys() {
                if let Some(value) = store.get_value(&key) {
                    lines.push(format!("{:<14} {}", key, truncate_string(&value.to_string(), 60)));
                    entries.insert(key, value);
                }
            }
            if lines.is_empty() {
                lines.push("No saved state".to_string());
            }
            Output::new(&entries, lines.join("\n"))
        }
        StateAction::Clear => {
            store.clear()?;
            Output::new(&json!({ "cleared": true }), "Saved state cleared")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn config() -> Config {
        Config::from_lookup(|_| None)
    }

    #[test]
    fn password_policy_is_remembered() {
        let mut store = MemoryStore::new();
        let overrides = PolicyOverrides {
            length: Some(20),
            symbols: Some(false),
            ..Default::default()
        };

        let output = handle_password(&mut store, &config(), &overrides).unwrap();
        let password = output.json["password"].as_str().unwrap();
        assert_eq!(password.chars().count(), 20);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

        let saved = saved_policy(&store, &config());
        assert_eq!(saved.length, 20);
        assert!(!saved.include_symbol);
    }

    #[test]
    fn rejected_policy_is_not_saved() {
        let mut store = MemoryStore::new();
        let overrides = PolicyOverrides {
            lower: Some(false),
            upper: Some(false),
            numbers: Some(false),
            symbols: Some(false),
            ..Default::default()
        };

        assert!(handle_password(&mut store, &config(), &overrides).is_err());
        assert!(store.get_value(keys::PASSWORD).is_none());
    }

    #[test]
    fn color_defaults_to_the_saved_value() {
        let mut store = MemoryStore::new();
        let output = handle_color(&mut store, None).unwrap();
        assert_eq!(output.json["hex"], "#4f46e5");

        handle_color(&mut store, Some("rgb(255, 0, 0)")).unwrap();
        let output = handle_color(&mut store, None).unwrap();
        assert_eq!(output.json["hsl"], "hsl(0, 100%, 50%)");
    }

    #[test]
    fn invalid_color_is_an_error() {
        let mut store = MemoryStore::new();
        assert!(handle_color(&mut store, Some("#12")).is_err());
    }

    #[test]
    fn convert_reports_and_saves() {
        let mut store = MemoryStore::new();
        let output =
            handle_convert(&mut store, Category::Temperature, -40.0, "celsius", "fahrenheit").unwrap();
        assert_eq!(output.json["result"], -40.0);

        let saved = store.get(keys::CONVERT, ConvertToolState::default());
        assert_eq!(saved.category, Category::Temperature);
        assert_eq!(saved.from, "celsius");
    }

    #[test]
    fn codec_reuses_saved_mode() {
        let mut store = MemoryStore::new();
        handle_codec(&mut store, Direction::Encode, Some("a b"), Some(CodecMode::Url)).unwrap();

        let output = handle_codec(&mut store, Direction::Decode, Some("a%20b"), None).unwrap();
        assert_eq!(output.text, "a b");
        assert_eq!(output.json["mode"], "url");
    }

    #[test]
    fn json_indent_is_clamped_and_saved() {
        let mut store = MemoryStore::new();
        handle_json(&mut store, JsonAction::Format, "{\"a\":1}", Some(40)).unwrap();
        assert_eq!(store.get(keys::JSON, JsonToolState::default()).indent, 10);

        let output = handle_json(&mut store, JsonAction::Minify, "{ \"a\" : 1 }", None).unwrap();
        assert_eq!(output.text, "{\"a\":1}");
    }

    #[test]
    fn json_input_is_remembered() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.get(keys::JSON, JsonToolState::default()).input,
            r#"{"hello": "world"}"#
        );

        handle_json(&mut store, JsonAction::Sort, r#"{"b":2,"a":1}"#, Some(0)).unwrap();
        let saved = store.get(keys::JSON, JsonToolState::default());
        assert_eq!(saved.input, r#"{"b":2,"a":1}"#);
        assert_eq!(saved.indent, 0);
    }

    #[test]
    fn regex_uses_saved_defaults() {
        let mut store = MemoryStore::new();
        let output = handle_regex(&mut store, None, None, None).unwrap();
        assert_eq!(output.json["count"], 3);
        assert!(output.text.starts_with("3 match(es)"));
    }

    #[test]
    fn uuid_count_is_clamped() {
        let mut store = MemoryStore::new();
        let output = handle_uuid(&mut store, Some(0)).unwrap();
        assert_eq!(output.json.as_array().unwrap().len(), 1);
        assert_eq!(store.get(keys::UUID, UuidToolState::default()).count, 1);
    }

    #[test]
    fn pomodoro_overrides_are_saved() {
        let mut store = MemoryStore::new();
        let overrides = PomodoroOverrides {
            work: Some(50),
            intervals: Some(2),
            ..Default::default()
        };
        let output = handle_pomodoro(&mut store, &overrides, 4).unwrap();
        assert_eq!(output.json[0]["seconds"], 3000);
        assert_eq!(output.json[3]["phase"], "long");

        let saved = store.get(keys::POMODORO, PomodoroSettings::default());
        assert_eq!(saved.work_minutes, 50);
        assert_eq!(saved.short_break_minutes, 5);
    }

    #[test]
    fn theme_and_state_management() {
        let mut store = MemoryStore::new();
        assert_eq!(handle_theme(&mut store, None).unwrap().text, "dark");
        handle_theme(&mut store, Some(Theme::Light)).unwrap();
        assert_eq!(current_theme(&store), Theme::Light);

        let shown = handle_state(&mut store, StateAction::Show).unwrap();
        assert_eq!(shown.json["theme"], "light");

        handle_state(&mut store, StateAction::Clear).unwrap();
        assert_eq!(current_theme(&store), Theme::Dark);
        let shown = handle_state(&mut store, StateAction::Show).unwrap();
        assert_eq!(shown.text, "No saved state");
    }
}
