//! Front matter extraction.
//!
//! A front matter block starts with a `---` line at the very top of the document and ends at the
//! next `---` line. Its contents are YAML and must describe a mapping.

use crate::error::EnrichmentError;
use serde_json::{Map, Value};

const DELIMITER: &str = "---";

/// Split `source` into its parsed front matter (if any) and the remaining body.
pub fn split(source: &str) -> Result<(Option<Map<String, Value>>, &str), EnrichmentError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(after_open) = strip_delimiter_line(source) else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((Some(parse_yaml(yaml)?), body));
        }
        offset += line.len();
    }
    Err(EnrichmentError::UnterminatedFrontMatter)
}

/// Remainder after an opening `---` line, or None when the document does not start with one.
fn strip_delimiter_line(source: &str) -> Option<&str> {
    let (first, rest) = match source.find('\n') {
        Some(idx) => (&source[..idx], &source[idx + 1..]),
        None => (source, ""),
    };
    (first.trim_end() == DELIMITER).then_some(rest)
}

fn parse_yaml(yaml: &str) -> Result<Map<String, Value>, EnrichmentError> {
    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| EnrichmentError::FrontMatter(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(EnrichmentError::FrontMatterShape(json_type_name(&other).to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
