use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::InputError;
use crate::models::SubtitleLine;

/// Parse a subtitle JSON file into validated lines
pub fn parse_subtitle_file(path: &Path) -> Result<Vec<SubtitleLine>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_subtitle_json(&content)
}

/// Parse subtitle JSON: either `{"body": [...]}` or a bare entry array
pub fn parse_subtitle_json(json: &str) -> Result<Vec<SubtitleLine>> {
    let value: Value = serde_json::from_str(json).context("Failed to parse subtitle JSON")?;
    let entries: &[Value] = match &value {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(map) => match map.get("body") {
            Some(Value::Array(entries)) => entries.as_slice(),
            Some(_) => anyhow::bail!("Subtitle JSON field \"body\" is not an array"),
            None => &[],
        },
        _ => anyhow::bail!("Subtitle JSON must be an object or an array"),
    };
    Ok(parse_subtitle_entries(entries)?)
}

/// Validate raw `{from, to, content}` entries
///
/// Entries with blank content are skipped. A missing `to` falls back to
/// `from`; a missing `from` is treated as zero.
pub fn parse_subtitle_entries(entries: &[Value]) -> Result<Vec<SubtitleLine>, InputError> {
    let mut lines = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(fields) = entry else {
            return Err(InputError::MalformedEntry {
                index,
                reason: "entry is not an object".to_string(),
            });
        };

        let text = match fields.get("content") {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(InputError::MalformedEntry {
                    index,
                    reason: format!("content is not a string: {}", other),
                });
            }
        };
        if text.trim().is_empty() {
            continue;
        }

        let start = number_field(fields.get("from"), index, "from")?.unwrap_or(0.0);
        let end = number_field(fields.get("to"), index, "to")?.unwrap_or(start);

        lines.push(SubtitleLine::new(index, start, end, text)?);
    }

    Ok(lines)
}

fn number_field(value: Option<&Value>, index: usize, field: &str) -> Result<Option<f64>, InputError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| InputError::MalformedEntry {
            index,
            reason: format!("{} is not representable as a float", field),
        }),
        Some(other) => Err(InputError::MalformedEntry {
            index,
            reason: format!("{} is not a number: {}", field, other),
        }),
    }
}
