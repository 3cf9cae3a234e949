// src/tools/regex.rs
use std::collections::BTreeMap;

use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegexToolError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Unsupported flag: {0}")]
    UnsupportedFlag(char),
}

pub type Result<T> = std::result::Result<T, RegexToolError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub global: bool,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
}

impl RegexFlags {
    pub fn parse(flags: &str) -> Result<Self> {
        let mut parsed = RegexFlags::default();
        for flag in flags.chars().filter(|c| !c.is_whitespace()) {
            match flag {
                'g' => parsed.global = true,
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_all = true,
                // Patterns are always Unicode-aware
                'u' => {}
                other => return Err(RegexToolError::UnsupportedFlag(other)),
            }
        }
        Ok(parsed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegexReport {
    pub count: usize,
    pub matches: Vec<String>,
    pub groups: Vec<BTreeMap<String, String>>,
}

pub fn compile(pattern: &str, flags: &RegexFlags) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_all)
        .build()?)
}

// Run a pattern against the input, collecting matches and named groups
pub fn run(pattern: &str, flags: &str, input: &str) -> Result<RegexReport> {
    let flags = RegexFlags::parse(flags)?;
    let re = compile(pattern, &flags)?;
    let names: Vec<&str> = re.capture_names().flatten().collect();

    let limit = if flags.global { usize::MAX } else { 1 };
    let mut matches = Vec::new();
    let mut groups = Vec::new();

    for caps in re.captures_iter(input).take(limit) {
        matches.push(caps.get(0).map_or(String::new(), |m| m.as_str().to_string()));
        if !names.is_empty() {
            groups.push(named_groups(&caps, &names));
        }
    }

    log::debug!("Pattern {:?} produced {} match(es)", pattern, matches.len());

    Ok(RegexReport {
        count: matches.len(),
        matches,
        groups,
    })
}

fn named_groups(caps: &Captures<'_>, names: &[&str]) -> BTreeMap<String, String> {
    names
        .iter()
        .map(|name| {
            let text = caps.name(name).map_or("", |m| m.as_str());
            (name.to_string(), text.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flag_collects_every_match() {
        let report = run("(foo|bar)", "g", "foobar foo baz").unwrap();
        assert_eq!(report.count, 3);
        assert_eq!(report.matches, vec!["foo", "bar", "foo"]);
        assert!(report.groups.is_empty());
    }

    #[test]
    fn without_global_only_the_first_match() {
        let report = run("ba.", "", "foobar foo baz").unwrap();
        assert_eq!(report.matches, vec!["bar"]);
    }

    #[test]
    fn case_insensitive_and_named_groups() {
        let report = run(r"(?P<word>[a-z]+)-(?P<num>\d+)?", "gi", "ABC-12 def-").unwrap();
        assert_eq!(report.count, 2);
        assert_eq!(report.groups[0]["word"], "ABC");
        assert_eq!(report.groups[0]["num"], "12");
        assert_eq!(report.groups[1]["num"], "");
    }

    #[test]
    fn multi_line_and_dot_all() {
        assert_eq!(run("^b", "gm", "a\nb").unwrap().count, 1);
        assert_eq!(run("^b", "g", "a\nb").unwrap().count, 0);
        assert_eq!(run("a.b", "s", "a\nb").unwrap().count, 1);
    }

    #[test]
    fn empty_matches_terminate() {
        let report = run("x*", "g", "ab").unwrap();
        assert_eq!(report.count, 3);
    }

    #[test]
    fn bad_flags_and_patterns_are_errors() {
        assert!(matches!(run("a", "gy", "a"), Err(RegexToolError::UnsupportedFlag('y'))));
        assert!(matches!(run("(", "", "a"), Err(RegexToolError::Pattern(_))));
    }
}
