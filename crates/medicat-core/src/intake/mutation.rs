//! Recording and undoing intakes.
//!
//! Every mutation is a single read-modify-write of one medicine's intake
//! list: the list is read strictly (a failed read aborts instead of starting
//! from an empty list), changed in memory, and written back with one `set`.
//! If the write fails the stored list is left as it was.

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use super::access::{load_intakes, save_intakes};
use super::Intake;
use crate::error::{CoreError, Result};
use crate::medicine::ScheduleTime;
use crate::storage::KvStore;

/// Mark the `scheduled_time` dose of `medicine_id` as taken at `taken_at`.
///
/// The intake counts toward the local calendar day of `taken_at`.
///
/// # Errors
/// - [`CoreError::AlreadyTaken`] if that dose already has an intake on that day
/// - [`CoreError::Store`] if the list cannot be read, decoded or written
pub fn record_intake<S: KvStore + ?Sized>(
    store: &S,
    medicine_id: &str,
    scheduled_time: ScheduleTime,
    taken_at: DateTime<FixedOffset>,
) -> Result<Intake> {
    let date = taken_at.date_naive();
    let mut intakes = load_intakes(store, medicine_id)?;

    if intakes.iter().any(|i| i.fulfils(scheduled_time, date)) {
        return Err(CoreError::AlreadyTaken {
            medicine_id: medicine_id.to_string(),
            scheduled_time: scheduled_time.to_string(),
            date,
        });
    }

    let intake = Intake {
        id: Uuid::new_v4().to_string(),
        medicine_id: medicine_id.to_string(),
        scheduled_time,
        taken_at,
        date,
    };
    intakes.push(intake.clone());
    save_intakes(store, medicine_id, &intakes)?;

    tracing::info!(
        medicine_id,
        intake_id = %intake.id,
        scheduled_time = %scheduled_time,
        %date,
        "intake recorded"
    );
    Ok(intake)
}

/// Remove intake `intake_id` from the list of `medicine_id`.
///
/// Returns whether an intake was removed. An unknown id is a no-op and
/// nothing is written.
///
/// # Errors
/// Returns an error if the list cannot be read, decoded or written.
pub fn remove_intake<S: KvStore + ?Sized>(
    store: &S,
    medicine_id: &str,
    intake_id: &str,
) -> Result<bool> {
    let mut intakes = load_intakes(store, medicine_id)?;
    let before = intakes.len();
    intakes.retain(|i| i.id != intake_id);

    if intakes.len() == before {
        tracing::debug!(medicine_id, intake_id, "intake not found, nothing to remove");
        return Ok(false);
    }

    save_intakes(store, medicine_id, &intakes)?;
    tracing::info!(medicine_id, intake_id, "intake removed");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::{intakes_key, MemoryStore};
    use chrono::TimeZone;

    fn at(day: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, day, h, m, 0)
            .unwrap()
    }

    fn t(s: &str) -> ScheduleTime {
        s.parse().unwrap()
    }

    #[test]
    fn record_appends_and_returns() {
        let store = MemoryStore::new();
        let first = record_intake(&store, "m1", t("08:00"), at(19, 8, 5)).unwrap();
        let second = record_intake(&store, "m1", t("20:00"), at(19, 20, 1)).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.date.to_string(), "2026-10-19");

        let stored = load_intakes(&store, "m1").unwrap();
        assert_eq!(stored, vec![first, second]);
    }

    #[test]
    fn record_rejects_same_dose_same_day() {
        let store = MemoryStore::new();
        record_intake(&store, "m1", t("08:00"), at(19, 8, 5)).unwrap();
        let err = record_intake(&store, "m1", t("08:00"), at(19, 9, 0)).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyTaken { .. }));
        assert_eq!(load_intakes(&store, "m1").unwrap().len(), 1);
    }

    #[test]
    fn record_allows_same_dose_next_day() {
        let store = MemoryStore::new();
        record_intake(&store, "m1", t("08:00"), at(19, 8, 5)).unwrap();
        record_intake(&store, "m1", t("08:00"), at(20, 8, 5)).unwrap();
        assert_eq!(load_intakes(&store, "m1").unwrap().len(), 2);
    }

    #[test]
    fn failed_write_leaves_history_unchanged() {
        let store = MemoryStore::new();
        let kept = record_intake(&store, "m1", t("08:00"), at(19, 8, 5)).unwrap();
        store.fail_writes(true);
        let err = record_intake(&store, "m1", t("20:00"), at(19, 20, 0)).unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Unavailable { .. })));
        assert!(remove_intake(&store, "m1", &kept.id).is_err());
        assert_eq!(load_intakes(&store, "m1").unwrap(), vec![kept]);
    }

    #[test]
    fn corrupt_history_is_not_overwritten() {
        let store = MemoryStore::new();
        store.set(&intakes_key("m1"), "garbage").unwrap();
        let err = record_intake(&store, "m1", t("08:00"), at(19, 8, 0)).unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Corrupt { .. })));
        assert_eq!(store.get(&intakes_key("m1")).unwrap().as_deref(), Some("garbage"));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = MemoryStore::new();
        let a = record_intake(&store, "m1", t("08:00"), at(19, 8, 0)).unwrap();
        let b = record_intake(&store, "m1", t("20:00"), at(19, 20, 0)).unwrap();

        assert!(remove_intake(&store, "m1", &a.id).unwrap());
        let after_first = store.get(&intakes_key("m1")).unwrap();

        assert!(!remove_intake(&store, "m1", &a.id).unwrap());
        assert_eq!(store.get(&intakes_key("m1")).unwrap(), after_first);
        assert_eq!(load_intakes(&store, "m1").unwrap(), vec![b]);
    }

    #[test]
    fn remove_on_unknown_medicine_writes_nothing() {
        let store = MemoryStore::new();
        assert!(!remove_intake(&store, "ghost", "nope").unwrap());
        assert!(store.is_empty());
    }
}
