//! The activity log store: full-file read, validate-and-append write.

use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::entry::{ActivityEntry, NewEntry};
use crate::record::{encode_file, parse_file};

/// Read/append access to the activity log.
///
/// Implementations keep insertion order and never mutate or delete rows.
/// The trait exists so callers can swap in an in-memory store for tests.
pub trait Store {
    /// Reads the full record set. A missing backing file is an empty log,
    /// not an error; any other I/O failure propagates.
    fn load_all(&self) -> Result<Vec<ActivityEntry>>;

    /// Validates the entry, stamps its creation instant, and persists it.
    /// Returns the entry exactly as it was written.
    fn append(&self, entry: &NewEntry) -> Result<ActivityEntry>;
}

/// The flat CSV file behind the log.
///
/// `append` rewrites the whole file from the combined set. There is no
/// locking and no temp-file-and-rename: two concurrent writers race and
/// the last full rewrite wins.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(config: &Config) -> Self {
        Self::from_path(config.log_file.clone())
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for CsvStore {
    fn load_all(&self) -> Result<Vec<ActivityEntry>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let entries = parse_file(&content);
                debug!(count = entries.len(), path = %self.path.display(), "loaded log");
                Ok(entries)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => {
                Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        }
    }

    fn append(&self, entry: &NewEntry) -> Result<ActivityEntry> {
        let activity = entry.validate()?;

        let now = Local::now().naive_local();
        let persisted = ActivityEntry {
            date: entry.date_text(),
            activity,
            duration_min: entry.duration_min,
            distance_miles: entry.distance_miles,
            notes: entry.notes.clone(),
            timestamp: Some(now.with_nanosecond(0).unwrap_or(now)),
        };

        let mut entries = self.load_all()?;
        entries.push(persisted.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {}", parent.display()))?;
        }
        fs::write(&self.path, encode_file(&entries))
            .with_context(|| format!("writing {}", self.path.display()))?;
        debug!(activity = %persisted.activity, path = %self.path.display(), "appended entry");

        Ok(persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::mk_config;
    use crate::entry::{OTHER_SENTINEL, ValidationError};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn mk_store() -> (CsvStore, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let cfg = mk_config(tmp.path().join("moveminute").join("exercise_log.csv"));
        (CsvStore::new(&cfg), tmp)
    }

    fn mk_new_entry(date: NaiveDate) -> NewEntry {
        NewEntry {
            date,
            choice: "Gym run".to_string(),
            custom_label: None,
            duration_min: 30,
            distance_miles: Some(3.1),
            notes: "easy pace".to_string(),
        }
    }

    #[test]
    fn load_all_on_missing_file_is_empty_not_an_error() {
        let (store, _tmp) = mk_store();
        assert!(!store.path().exists());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_creates_the_file_and_round_trips_the_entry() {
        let (store, _tmp) = mk_store();
        let date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

        let saved = store.append(&mk_new_entry(date)).unwrap();
        assert!(store.path().exists());
        assert!(saved.timestamp.is_some());

        let entries = store.load_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.last(), Some(&saved));
    }

    #[test]
    fn append_grows_the_log_by_exactly_one() {
        let (store, _tmp) = mk_store();
        let date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

        for expected in 1..=3 {
            let before = store.load_all().unwrap().len();
            store.append(&mk_new_entry(date)).unwrap();
            let after = store.load_all().unwrap();
            assert_eq!(before + 1, after.len());
            assert_eq!(after.len(), expected);
        }
    }

    #[test]
    fn append_preserves_insertion_order() {
        let (store, _tmp) = mk_store();
        let date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

        for choice in ["Hike", "Badminton", "Gym run"] {
            store
                .append(&NewEntry {
                    choice: choice.to_string(),
                    ..mk_new_entry(date)
                })
                .unwrap();
        }
        let labels: Vec<String> = store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|e| e.activity)
            .collect();
        assert_eq!(labels, vec!["Hike", "Badminton", "Gym run"]);
    }

    #[test]
    fn append_rejects_invalid_entries_without_touching_the_file() {
        let (store, _tmp) = mk_store();
        let date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

        let invalid = NewEntry {
            duration_min: 0,
            distance_miles: Some(0.0),
            ..mk_new_entry(date)
        };
        let err = store.append(&invalid).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NoEffort)
        );
        assert!(!store.path().exists());
    }

    #[test]
    fn append_title_cases_custom_labels() {
        let (store, _tmp) = mk_store();
        let date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

        let entry = NewEntry {
            choice: OTHER_SENTINEL.to_string(),
            custom_label: Some("cold water swim".to_string()),
            ..mk_new_entry(date)
        };
        let saved = store.append(&entry).unwrap();
        assert_eq!(saved.activity, "Cold Water Swim");
        assert_eq!(store.load_all().unwrap()[0].activity, "Cold Water Swim");
    }

    #[test]
    fn append_keeps_rows_written_by_the_old_schema() {
        let (store, _tmp) = mk_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "date,activity,duration_min,distance_miles,notes\n\
             2025-08-10,Hike,90,5.0,up the ridge\n",
        )
        .unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        store.append(&mk_new_entry(date)).unwrap();

        let entries = store.load_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].activity, "Hike");
        assert_eq!(entries[0].timestamp, None);
        assert!(entries[1].timestamp.is_some());
    }

    #[test]
    fn load_all_propagates_non_not_found_errors() {
        let tmp = tempdir().unwrap();
        // The path is a directory, so the read fails with something other
        // than NotFound.
        let store = CsvStore::from_path(tmp.path().to_path_buf());
        assert!(store.load_all().is_err());
    }
}
