//! Daily log persistence.
//!
//! A user's logs live as one JSON-encoded map under their `logs_` store key,
//! keyed by calendar date. Saving an entry for a date that already has one
//! replaces it; there are no cross-entry invariants.

use crate::store::{keys, Store};
use crate::{LogEntry, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use uuid::Uuid;

/// All log entries for a user, ordered by date
pub fn entries(store: &Store, user_id: &Uuid) -> BTreeMap<NaiveDate, LogEntry> {
    store
        .get_json::<BTreeMap<NaiveDate, LogEntry>>(&keys::logs(user_id))
        .unwrap_or_default()
}

/// The entry for one date, if any
pub fn entry_for(store: &Store, user_id: &Uuid, date: NaiveDate) -> Option<LogEntry> {
    entries(store, user_id).remove(&date)
}

/// Insert or overwrite the entry for a date
pub fn save_entry(store: &mut Store, user_id: &Uuid, date: NaiveDate, entry: LogEntry) -> Result<()> {
    let mut all = entries(store, user_id);
    all.insert(date, entry);
    store.set_json(keys::logs(user_id), &all)?;
    tracing::debug!("Saved log entry for {} ({} total)", date, all.len());
    Ok(())
}

/// Remove the entry for a date, reporting whether one existed
pub fn remove_entry(store: &mut Store, user_id: &Uuid, date: NaiveDate) -> Result<bool> {
    let mut all = entries(store, user_id);
    let existed = all.remove(&date).is_some();
    if existed {
        store.set_json(keys::logs(user_id), &all)?;
    }
    Ok(existed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlowIntensity;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_entry() -> LogEntry {
        LogEntry {
            symptoms: BTreeSet::from(["Cramps".to_string(), "Fatigue".to_string()]),
            mood: Some("😴 Tired".into()),
            flow: Some(FlowIntensity::Medium),
            notes: "slept badly".into(),
        }
    }

    #[test]
    fn test_save_and_read_back() {
        let uid = Uuid::new_v4();
        let mut store = Store::default();

        save_entry(&mut store, &uid, date(2024, 3, 4), sample_entry()).unwrap();

        let loaded = entry_for(&store, &uid, date(2024, 3, 4)).unwrap();
        assert_eq!(loaded, sample_entry());
        assert!(entry_for(&store, &uid, date(2024, 3, 5)).is_none());
    }

    #[test]
    fn test_resave_overwrites() {
        let uid = Uuid::new_v4();
        let mut store = Store::default();
        let day = date(2024, 3, 4);

        save_entry(&mut store, &uid, day, sample_entry()).unwrap();

        let replacement = LogEntry {
            notes: "felt better by evening".into(),
            ..LogEntry::default()
        };
        save_entry(&mut store, &uid, day, replacement.clone()).unwrap();

        assert_eq!(entry_for(&store, &uid, day), Some(replacement));
        assert_eq!(entries(&store, &uid).len(), 1);
    }

    #[test]
    fn test_entries_ordered_by_date() {
        let uid = Uuid::new_v4();
        let mut store = Store::default();

        save_entry(&mut store, &uid, date(2024, 3, 9), sample_entry()).unwrap();
        save_entry(&mut store, &uid, date(2024, 2, 1), sample_entry()).unwrap();
        save_entry(&mut store, &uid, date(2024, 3, 1), sample_entry()).unwrap();

        let dates: Vec<_> = entries(&store, &uid).into_keys().collect();
        assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 3, 1), date(2024, 3, 9)]);
    }

    #[test]
    fn test_remove_entry() {
        let uid = Uuid::new_v4();
        let mut store = Store::default();
        let day = date(2024, 3, 4);

        save_entry(&mut store, &uid, day, sample_entry()).unwrap();

        assert!(remove_entry(&mut store, &uid, day).unwrap());
        assert!(!remove_entry(&mut store, &uid, day).unwrap());
        assert!(entry_for(&store, &uid, day).is_none());
    }

    #[test]
    fn test_users_do_not_share_logs() {
        let alice = Uuid::new_v4();
        let bella = Uuid::new_v4();
        let mut store = Store::default();

        save_entry(&mut store, &alice, date(2024, 3, 4), sample_entry()).unwrap();

        assert!(entries(&store, &bella).is_empty());
        assert_eq!(entries(&store, &alice).len(), 1);
    }

    #[test]
    fn test_free_form_labels_accepted() {
        let uid = Uuid::new_v4();
        let mut store = Store::default();

        let entry = LogEntry {
            symptoms: BTreeSet::from(["Lower back ache".to_string()]),
            mood: Some("meh".into()),
            flow: None,
            notes: String::new(),
        };
        save_entry(&mut store, &uid, date(2024, 3, 4), entry.clone()).unwrap();

        assert_eq!(entry_for(&store, &uid, date(2024, 3, 4)), Some(entry));
    }

    #[test]
    fn test_roundtrip_through_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = crate::store::store_path(temp_dir.path());
        let uid = Uuid::new_v4();

        let mut store = Store::default();
        save_entry(&mut store, &uid, date(2024, 3, 4), sample_entry()).unwrap();
        store.save(&path).unwrap();

        let reloaded = Store::load(&path).unwrap();
        assert_eq!(entry_for(&reloaded, &uid, date(2024, 3, 4)), Some(sample_entry()));
    }
}
