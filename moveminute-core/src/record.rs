//! Encodes and parses the flat CSV log file.
//!
//! One record per row, quoted fields when needed, so notes may contain
//! commas, quotes and newlines. Malformed values never fail a read: each
//! field has a coercion function that falls back to a default, and rows
//! with missing columns are padded with defaults.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::entry::ActivityEntry;

/// The canonical column set, superset of both observed file layouts.
pub const HEADER: &str = "date,activity,duration_min,distance_miles,notes,timestamp";

/// Stored date layout (`2025-08-15`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored creation-instant layout, second precision (`2025-08-15T18:05:00`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a `YYYY-MM-DD` field. `None` for anything else.
pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parses a duration field. Non-numeric text coerces to 0, fractional
/// text truncates.
///
/// Truncation happens per row, not on the window sum: durations are
/// integers in the data model, so two stored rows of `30.5` count as 60
/// minutes rather than 61.
pub fn coerce_minutes(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u32>() {
        return v;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.trunc() as u32,
        _ => 0,
    }
}

/// Parses a distance field. The empty field means "not recorded", which
/// stays distinct from `0`.
pub fn coerce_distance(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn coerce_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

/// Parses the full content of the log file into entries.
///
/// A leading header row is skipped. Rows from a file written without the
/// `timestamp` column load with `timestamp: None`; extra columns are
/// ignored. This never fails: unreadable values fall back per field.
pub fn parse_file(content: &str) -> Vec<ActivityEntry> {
    let mut records = split_records(content);
    if records
        .first()
        .and_then(|fields| fields.first())
        .map(|s| s.trim() == "date")
        .unwrap_or(false)
    {
        records.remove(0);
    }
    records.iter().map(|fields| entry_from_fields(fields)).collect()
}

/// Renders the full file content: header plus one row per entry, in order.
pub fn encode_file(entries: &[ActivityEntry]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(&encode_row(entry));
        out.push('\n');
    }
    out
}

fn encode_row(entry: &ActivityEntry) -> String {
    let distance = entry
        .distance_miles
        .map(|v| v.to_string())
        .unwrap_or_default();
    let timestamp = entry
        .timestamp
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default();
    [
        escape_field(&entry.date),
        escape_field(&entry.activity),
        entry.duration_min.to_string(),
        distance,
        escape_field(&entry.notes),
        timestamp,
    ]
    .join(",")
}

fn escape_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn entry_from_fields(fields: &[String]) -> ActivityEntry {
    if fields.len() < 5 {
        warn!(columns = fields.len(), "short row in log file, padding with defaults");
    }
    let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");
    ActivityEntry {
        date: field(0).to_string(),
        activity: field(1).to_string(),
        duration_min: coerce_minutes(field(2)),
        distance_miles: coerce_distance(field(3)),
        notes: field(4).to_string(),
        timestamp: coerce_timestamp(field(5)),
    }
}

/// Splits CSV text into records of fields, honoring quoted fields that may
/// span lines and doubled quotes inside them. Blank lines are skipped.
fn split_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    let mut end_record = |fields: &mut Vec<String>, field: &mut String| {
        fields.push(std::mem::take(field));
        if !(fields.len() == 1 && fields[0].is_empty()) {
            records.push(std::mem::take(fields));
        } else {
            fields.clear();
        }
    };

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_record(&mut fields, &mut field);
            }
            '\n' => end_record(&mut fields, &mut field),
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !fields.is_empty() {
        end_record(&mut fields, &mut field);
    }
    records
}
