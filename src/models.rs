// src/models.rs
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::converters::units::Category;
use crate::tools::codec::CodecMode;

pub const MAX_PASSWORD_LENGTH: usize = 128;

// Password generation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    pub length: usize,
    pub include_lower: bool,
    pub include_upper: bool,
    pub include_number: bool,
    pub include_symbol: bool,
    pub exclude_ambiguous: bool,
    pub no_repeat_chars: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            include_lower: true,
            include_upper: true,
            include_number: true,
            include_symbol: true,
            exclude_ambiguous: false,
            no_repeat_chars: false,
        }
    }
}

// Persisted per-tool state, stored under the keys in `storage::keys`

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToolState {
    pub hex: String,
}

impl Default for ColorToolState {
    fn default() -> Self {
        Self {
            hex: "#4f46e5".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonToolState {
    pub input: String,
    pub indent: usize,
}

impl Default for JsonToolState {
    fn default() -> Self {
        Self {
            input: r#"{"hello": "world"}"#.to_string(),
            indent: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexToolState {
    pub source: String,
    pub flags: String,
    pub input: String,
}

impl Default for RegexToolState {
    fn default() -> Self {
        Self {
            source: "(foo|bar)".to_string(),
            flags: "g".to_string(),
            input: "foobar foo baz".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecToolState {
    pub input: String,
    pub mode: CodecMode,
}

impl Default for CodecToolState {
    fn default() -> Self {
        Self {
            input: "Hello, world!".to_string(),
            mode: CodecMode::Base64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UuidToolState {
    pub count: usize,
}

impl Default for UuidToolState {
    fn default() -> Self {
        Self { count: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertToolState {
    pub category: Category,
    pub from: String,
    pub to: String,
    pub value: f64,
}

impl Default for ConvertToolState {
    fn default() -> Self {
        Self {
            category: Category::Length,
            from: "meter".to_string(),
            to: "kilometer".to_string(),
            value: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochToolState {
    pub ms: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_enables_every_category() {
        let policy = PasswordPolicy::default();
        assert!(policy.include_lower && policy.include_upper);
        assert!(policy.include_number && policy.include_symbol);
        assert_eq!(policy.length, 16);
    }

    #[test]
    fn partial_policy_fills_in_defaults() {
        let policy: PasswordPolicy = serde_json::from_str(r#"{"length": 8}"#).unwrap();
        assert_eq!(policy.length, 8);
        assert!(policy.include_symbol);
        assert!(!policy.no_repeat_chars);
    }

    #[test]
    fn theme_defaults_to_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme.to_string(), "light");
    }
}
