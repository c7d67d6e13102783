//! Dashboard summary metrics.
//!
//! Pure functions over the full record set and a reference "today": same
//! inputs, same numbers. Entries whose stored date does not parse are
//! excluded from every window, never an error.

use chrono::{Duration, NaiveDate};

use crate::entry::ActivityEntry;

/// Activities that count toward the running-distance metric, compared
/// trimmed and lowercased.
const RUNNING_ACTIVITIES: &[&str] = &["gym run", "outdoor run"];

/// Sum of `duration_min` over entries dated within the inclusive 7-day
/// window ending today (today minus 6 days through today).
pub fn recent_minutes(entries: &[ActivityEntry], today: NaiveDate) -> u64 {
    entries
        .iter()
        .filter(|e| in_window(e, today, 7))
        .map(|e| u64::from(e.duration_min))
        .sum()
}

/// Sum of `distance_miles` over running entries ("gym run"/"outdoor run",
/// case-insensitive) dated within the inclusive 30-day window ending today.
/// Absent distances count as zero.
pub fn running_distance_30d(entries: &[ActivityEntry], today: NaiveDate) -> f64 {
    entries
        .iter()
        .filter(|e| in_window(e, today, 30))
        .filter(|e| is_running(&e.activity))
        .map(|e| e.distance_miles.unwrap_or(0.0))
        .sum()
}

fn is_running(activity: &str) -> bool {
    let label = activity.trim().to_lowercase();
    RUNNING_ACTIVITIES.contains(&label.as_str())
}

/// Inclusive trailing window of `days` calendar days ending at `today`.
/// Future-dated entries fall outside it.
fn in_window(entry: &ActivityEntry, today: NaiveDate, days: i64) -> bool {
    match entry.day() {
        Some(d) => d > today - Duration::days(days) && d <= today,
        None => false,
    }
}
