//! The activity suggestion list and its derivation from stored data.

use crate::entry::{ActivityEntry, OTHER_SENTINEL};

/// Default suggestion list. "Other" stays last: it is the free-text escape
/// hatch, not a real activity.
pub const BASE_ACTIVITIES: &[&str] = &[
    "Gym run",
    "Outdoor run",
    "Hike",
    "Rock Climbing",
    "Badminton",
    OTHER_SENTINEL,
];

/// Returns the base list plus every distinct stored label that is not
/// already on it and is not the sentinel, in first-occurrence order.
///
/// Learned labels are slotted in immediately before a trailing "Other", so
/// the sentinel is always last and never duplicated.
pub fn activity_options(base: &[String], entries: &[ActivityEntry]) -> Vec<String> {
    let mut options: Vec<String> = base.to_vec();
    for entry in entries {
        let label = &entry.activity;
        if label.is_empty() || label == OTHER_SENTINEL || options.contains(label) {
            continue;
        }
        if options.last().map(String::as_str) == Some(OTHER_SENTINEL) {
            let before_sentinel = options.len() - 1;
            options.insert(before_sentinel, label.clone());
        } else {
            options.push(label.clone());
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Vec<String> {
        BASE_ACTIVITIES.iter().map(|s| s.to_string()).collect()
    }

    fn entry_with(activity: &str) -> ActivityEntry {
        ActivityEntry {
            date: "2025-08-15".to_string(),
            activity: activity.to_string(),
            duration_min: 30,
            distance_miles: None,
            notes: String::new(),
            timestamp: None,
        }
    }

    #[test]
    fn novel_label_lands_before_the_sentinel() {
        let entries = vec![entry_with("Yoga")];
        let options = activity_options(&base(), &entries);
        let yoga = options.iter().position(|o| o == "Yoga").unwrap();
        assert_eq!(options.last().map(String::as_str), Some(OTHER_SENTINEL));
        assert_eq!(yoga + 1, options.len() - 1);
        assert_eq!(options.iter().filter(|o| *o == OTHER_SENTINEL).count(), 1);
    }

    #[test]
    fn known_and_sentinel_labels_are_not_duplicated() {
        let entries = vec![
            entry_with("Hike"),
            entry_with("Other"),
            entry_with("Yoga"),
            entry_with("Yoga"),
        ];
        let options = activity_options(&base(), &entries);
        assert_eq!(options.len(), BASE_ACTIVITIES.len() + 1);
        assert_eq!(options.iter().filter(|o| *o == "Yoga").count(), 1);
        assert_eq!(options.iter().filter(|o| *o == "Hike").count(), 1);
    }

    #[test]
    fn list_without_sentinel_appends_at_the_end() {
        let custom = vec!["Swim".to_string(), "Row".to_string()];
        let options = activity_options(&custom, &[entry_with("Yoga")]);
        assert_eq!(options, vec!["Swim", "Row", "Yoga"]);
    }

    #[test]
    fn empty_labels_are_ignored() {
        let options = activity_options(&base(), &[entry_with("")]);
        assert_eq!(options.len(), BASE_ACTIVITIES.len());
    }
}
