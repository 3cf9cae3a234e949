// src/core/config.rs
use std::env;
use std::path::PathBuf;
use log::LevelFilter;

use crate::models::{PasswordPolicy, MAX_PASSWORD_LENGTH};

// Configuration for the utility hub
#[derive(Debug, Clone)]
pub struct Config {
    // Password Generation
    pub default_password_length: usize,
    pub default_password_exclude_ambiguous: bool,

    // State
    pub state_file: PathBuf,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,

    // Settings that were rejected while loading, reported once logging is up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Password Generation
            default_password_length: 16,
            default_password_exclude_ambiguous: false,

            // State
            state_file: PathBuf::from("./state.json"),

            // Logging
            log_level: LevelFilter::Info,
            log_file: None,

            warnings: Vec::new(),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Build configuration from any key lookup; unset or invalid keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Default state file lives in the app config dir
        match crate::utils::get_app_config_dir() {
            Some(dir) => config.state_file = dir.join("state.json"),
            None => config.warnings.push(format!(
                "Could not determine config directory, using {}",
                config.state_file.display()
            )),
        }

        // Password Generation
        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.trim().parse::<usize>() {
                Ok(length) if (1..=MAX_PASSWORD_LENGTH).contains(&length) => {
                    config.default_password_length = length;
                }
                _ => config.warnings.push(format!(
                    "Invalid DEFAULT_PASSWORD_LENGTH '{}', using {}",
                    val, config.default_password_length
                )),
            }
        }

        if let Some(val) = lookup("DEFAULT_PASSWORD_EXCLUDE_AMBIGUOUS") {
            match val.trim().to_lowercase().parse() {
                Ok(exclude) => config.default_password_exclude_ambiguous = exclude,
                Err(_) => config.warnings.push(format!(
                    "Invalid DEFAULT_PASSWORD_EXCLUDE_AMBIGUOUS '{}', ignoring",
                    val
                )),
            }
        }

        // State
        if let Some(file) = lookup("STATE_FILE") {
            if !file.trim().is_empty() {
                config.state_file = PathBuf::from(file);
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => config.warnings.push(format!(
                    "Unknown LOG_LEVEL '{}', using {}",
                    level, config.log_level
                )),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            if !file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(file));
            }
        }

        config
    }

    // Password policy seeded from the configured defaults
    pub fn default_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            length: self.default_password_length,
            exclude_ambiguous: self.default_password_exclude_ambiguous,
            ..PasswordPolicy::default()
        }
    }
}
