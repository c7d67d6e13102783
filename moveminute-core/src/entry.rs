use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::record::{DATE_FORMAT, coerce_date};

/// The suggestion-list sentinel. Picking it means "type your own label".
pub const OTHER_SENTINEL: &str = "Other";

/// One persisted activity row.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    /// The stored `YYYY-MM-DD` text, kept raw so that a hand-edited row
    /// survives a full-file rewrite unchanged. Use [`ActivityEntry::day`]
    /// for the parsed date.
    pub date: String,
    pub activity: String,
    pub duration_min: u32,
    /// `None` means the field was left empty, which is distinct from `0`.
    pub distance_miles: Option<f64>,
    pub notes: String,
    /// Creation instant, second precision. `None` for rows written before
    /// the column existed.
    pub timestamp: Option<NaiveDateTime>,
}

impl ActivityEntry {
    /// The single coercion point for the stored date text.
    ///
    /// Returns `None` for anything that is not a `YYYY-MM-DD` date. Such
    /// rows are excluded from window metrics and sort last on the dashboard.
    pub fn day(&self) -> Option<NaiveDate> {
        coerce_date(&self.date)
    }
}

/// Caller-supplied input for a new entry, before validation.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub date: NaiveDate,
    /// The picked suggestion, or the literal `"Other"`.
    pub choice: String,
    /// Free-typed label, required when `choice` is `"Other"`.
    pub custom_label: Option<String>,
    pub duration_min: u32,
    pub distance_miles: Option<f64>,
    pub notes: String,
}

/// Entry-time rejections. The entry is never persisted when one of these
/// is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("type the activity name when choosing 'Other'")]
    MissingLabel,
    #[error("add at least a duration or a distance")]
    NoEffort,
}

impl NewEntry {
    /// Checks the entry invariants and resolves the final activity label.
    ///
    /// A free-typed label is normalized to title case; a picked suggestion
    /// is kept verbatim.
    pub fn validate(&self) -> Result<String, ValidationError> {
        let activity = if self.choice == OTHER_SENTINEL {
            match &self.custom_label {
                Some(label) if !label.trim().is_empty() => title_case(label.trim()),
                _ => return Err(ValidationError::MissingLabel),
            }
        } else {
            self.choice.clone()
        };

        if self.duration_min == 0 && self.distance_miles.unwrap_or(0.0) <= 0.0 {
            return Err(ValidationError::NoEffort);
        }

        Ok(activity)
    }

    /// The `YYYY-MM-DD` text this entry will be stored under.
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Uppercases the first alphabetic character of each whitespace-separated
/// word and lowercases the rest (`"gym  RUN"` becomes `"Gym Run"`).
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_new_entry() -> NewEntry {
        NewEntry {
            date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
            choice: "Hike".to_string(),
            custom_label: None,
            duration_min: 30,
            distance_miles: None,
            notes: String::new(),
        }
    }

    #[test]
    fn validate_keeps_picked_suggestion_verbatim() {
        let entry = mk_new_entry();
        assert_eq!(entry.validate().unwrap(), "Hike");
    }

    #[test]
    fn validate_title_cases_custom_label() {
        let entry = NewEntry {
            choice: OTHER_SENTINEL.to_string(),
            custom_label: Some("  cold water SWIM ".to_string()),
            ..mk_new_entry()
        };
        assert_eq!(entry.validate().unwrap(), "Cold Water Swim");
    }

    #[test]
    fn validate_rejects_other_without_label() {
        let missing = NewEntry {
            choice: OTHER_SENTINEL.to_string(),
            ..mk_new_entry()
        };
        assert_eq!(missing.validate(), Err(ValidationError::MissingLabel));

        let blank = NewEntry {
            choice: OTHER_SENTINEL.to_string(),
            custom_label: Some("   ".to_string()),
            ..mk_new_entry()
        };
        assert_eq!(blank.validate(), Err(ValidationError::MissingLabel));
    }

    #[test]
    fn validate_rejects_entry_without_effort() {
        let zeroes = NewEntry {
            duration_min: 0,
            distance_miles: Some(0.0),
            ..mk_new_entry()
        };
        assert_eq!(zeroes.validate(), Err(ValidationError::NoEffort));

        let absent = NewEntry {
            duration_min: 0,
            distance_miles: None,
            ..mk_new_entry()
        };
        assert_eq!(absent.validate(), Err(ValidationError::NoEffort));
    }

    #[test]
    fn validate_accepts_distance_only_entry() {
        let entry = NewEntry {
            duration_min: 0,
            distance_miles: Some(3.1),
            ..mk_new_entry()
        };
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn day_parses_stored_date_text() {
        let entry = ActivityEntry {
            date: "2025-08-15".to_string(),
            activity: "Hike".to_string(),
            duration_min: 30,
            distance_miles: None,
            notes: String::new(),
            timestamp: None,
        };
        assert_eq!(entry.day(), NaiveDate::from_ymd_opt(2025, 8, 15));
    }

    #[test]
    fn day_is_none_for_malformed_date_text() {
        let entry = ActivityEntry {
            date: "not a date".to_string(),
            activity: "Hike".to_string(),
            duration_min: 30,
            distance_miles: None,
            notes: String::new(),
            timestamp: None,
        };
        assert_eq!(entry.day(), None);
    }
}
