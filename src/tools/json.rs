// src/tools/json.rs
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use thiserror::Error;

pub const MAX_INDENT: usize = 10;

#[derive(Debug, Error)]
pub enum JsonToolError {
    #[error("Invalid JSON: {0}")]
    Invalid(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JsonToolError>;

// Pretty-print keeping key order; an indent of 0 gives compact output
pub fn format(input: &str, indent: usize) -> Result<String> {
    let value: Value = serde_json::from_str(input)?;
    render(&value, indent)
}

pub fn minify(input: &str) -> Result<String> {
    let value: Value = serde_json::from_str(input)?;
    Ok(serde_json::to_string(&value)?)
}

// Sort the keys of a top-level object; nested objects keep their order
pub fn sort_keys(input: &str, indent: usize) -> Result<String> {
    let mut value: Value = serde_json::from_str(input)?;
    if let Value::Object(map) = &mut value {
        let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        map.extend(entries);
    }
    render(&value, indent)
}

fn render(value: &Value, indent: usize) -> Result<String> {
    let indent = indent.min(MAX_INDENT);
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }

    let spaces = vec![b' '; indent];
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&spaces));
    value.serialize(&mut ser)?;

    // serde_json only writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"zeta": 1, "alpha": {"y": true, "b": null}, "list": [1, 2]}"#;

    #[test]
    fn format_preserves_key_order() {
        let out = format(SAMPLE, 2).unwrap();
        let zeta = out.find("zeta").unwrap();
        let alpha = out.find("alpha").unwrap();
        assert!(zeta < alpha);
        assert!(out.contains("\n  \"zeta\": 1"));
    }

    #[test]
    fn indent_is_clamped_and_zero_is_compact() {
        let compact = format(SAMPLE, 0).unwrap();
        assert!(!compact.contains('\n'));

        let wide = format(r#"{"a": 1}"#, 50).unwrap();
        assert_eq!(wide, format!("{{\n{}\"a\": 1\n}}", " ".repeat(MAX_INDENT)));
    }

    #[test]
    fn minify_strips_whitespace() {
        assert_eq!(
            minify(SAMPLE).unwrap(),
            r#"{"zeta":1,"alpha":{"y":true,"b":null},"list":[1,2]}"#
        );
    }

    #[test]
    fn sort_keys_only_touches_the_top_level() {
        assert_eq!(
            sort_keys(SAMPLE, 0).unwrap(),
            r#"{"alpha":{"y":true,"b":null},"list":[1,2],"zeta":1}"#
        );
        assert_eq!(sort_keys("[3, 1]", 0).unwrap(), "[3,1]");
    }

    #[test]
    fn invalid_json_reports_the_parser_error() {
        let err = format("{\"a\": }", 2).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON"));
    }
}
