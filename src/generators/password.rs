// src/generators/password.rs
//! Policy-driven password generation and a coarse strength estimate.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::crypto::{self, RandomSource};
use crate::models::{PasswordPolicy, MAX_PASSWORD_LENGTH};

pub const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*(){}[]<>/\\`~.,;:-_+|=?";

/// Characters that are easy to confuse with one another.
pub const AMBIGUOUS: &str = "O0Il1|S5B8Z2";

// Draws allowed per fill character before a no-repeat policy gives up
const MAX_DRAWS_PER_CHAR: usize = 1_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("No character set selected")]
    NoCharsetSelected,

    #[error("Policy cannot be satisfied: {0}")]
    PolicyUnsatisfiable(String),

    #[error("Password length must be between 1 and {max}, got {0}", max = MAX_PASSWORD_LENGTH)]
    InvalidLength(usize),
}

pub type Result<T> = std::result::Result<T, PasswordError>;

/// Alphabets of the enabled categories, in lower/upper/number/symbol order,
/// with ambiguous characters removed when requested.
pub fn category_alphabets(policy: &PasswordPolicy) -> Vec<Vec<char>> {
    [
        (policy.include_lower, LOWER),
        (policy.include_upper, UPPER),
        (policy.include_number, NUMBERS),
        (policy.include_symbol, SYMBOLS),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, alphabet)| {
        alphabet
            .chars()
            .filter(|c| !policy.exclude_ambiguous || !AMBIGUOUS.contains(*c))
            .collect()
    })
    .collect()
}

/// The deduplicated pool the fill phase draws from.
pub fn build_charset(policy: &PasswordPolicy) -> Vec<char> {
    let mut seen = HashSet::new();
    category_alphabets(policy)
        .into_iter()
        .flatten()
        .filter(|c| seen.insert(*c))
        .collect()
}

// Generate a password that satisfies the policy
pub fn generate_password<R: RandomSource + ?Sized>(
    policy: &PasswordPolicy,
    rng: &mut R,
) -> Result<String> {
    let charset = build_charset(policy);
    if charset.is_empty() {
        return Err(PasswordError::NoCharsetSelected);
    }
    if policy.length == 0 || policy.length > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::InvalidLength(policy.length));
    }

    // One character from every enabled category first
    let guaranteed: Vec<char> = category_alphabets(policy)
        .iter()
        .filter_map(|alphabet| crypto::choose(rng, alphabet).copied())
        .collect();

    let remaining = policy.length.saturating_sub(guaranteed.len());
    let fill = fill_characters(policy, &charset, remaining, rng)?;

    let mut combined = guaranteed;
    combined.extend(fill);
    crypto::shuffle(rng, &mut combined);
    combined.truncate(policy.length);

    log::debug!(
        "Generated {} character password from a pool of {}",
        combined.len(),
        charset.len()
    );

    Ok(combined.into_iter().collect())
}

fn fill_characters<R: RandomSource + ?Sized>(
    policy: &PasswordPolicy,
    charset: &[char],
    count: usize,
    rng: &mut R,
) -> Result<Vec<char>> {
    let mut result = Vec::with_capacity(count);

    if !policy.no_repeat_chars {
        while result.len() < count {
            result.push(charset[rng.below(charset.len())]);
        }
        return Ok(result);
    }

    if count > charset.len() {
        log::warn!(
            "Rejected no-repeat policy: {} unique characters needed, {} available",
            count,
            charset.len()
        );
        return Err(PasswordError::PolicyUnsatisfiable(format!(
            "{} unique characters needed but only {} available",
            count,
            charset.len()
        )));
    }

    let mut placed = HashSet::with_capacity(count);
    let mut budget = count.saturating_mul(MAX_DRAWS_PER_CHAR);
    while result.len() < count {
        if budget == 0 {
            return Err(PasswordError::PolicyUnsatisfiable(
                "gave up drawing unique characters".to_string(),
            ));
        }
        budget -= 1;

        let ch = charset[rng.below(charset.len())];
        if placed.insert(ch) {
            result.push(ch);
        }
    }

    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    Empty,
    Weak,
    Good,
    Strong,
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthLabel::Empty => write!(f, "Empty"),
            StrengthLabel::Weak => write!(f, "Weak"),
            StrengthLabel::Good => write!(f, "Good"),
            StrengthLabel::Strong => write!(f, "Strong"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    pub score: u8,
    pub label: StrengthLabel,
}

impl Strength {
    /// Width of a strength meter in percent, never below 10.
    pub fn meter_percent(&self) -> u8 {
        (self.score.saturating_mul(10)).clamp(10, 100)
    }
}

// Estimate password strength on a 0-10 scale
pub fn estimate_strength(password: &str) -> Strength {
    if password.is_empty() {
        return Strength {
            score: 0,
            label: StrengthLabel::Empty,
        };
    }

    let variety = [
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .iter()
    .filter(|present| **present)
    .count();

    let length = password.chars().count();
    let unique = password.chars().collect::<HashSet<_>>().len();
    let length_score = (length / 8).min(4);

    let score = (variety * 2 + length_score + unique / 6).min(10) as u8;
    let label = if score >= 8 {
        StrengthLabel::Strong
    } else if score >= 5 {
        StrengthLabel::Good
    } else {
        StrengthLabel::Weak
    };

    Strength { score, label }
}
