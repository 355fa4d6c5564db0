//! Medicine create, update and delete.
//!
//! The medicine collection lives under a single key as a JSON array, so every
//! operation here is one read-modify-write of that array. Drafts are validated
//! before the store is touched; a validation failure never writes.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::intake::purge_intakes;
use crate::medicine::{Medicine, MedicineDraft};
use crate::storage::{read_list, write_list, KvStore, MEDICINES_KEY};

/// All medicines, in creation order.
///
/// # Errors
/// Returns an error if the store cannot be read or the list cannot be decoded.
pub fn list_medicines<S: KvStore + ?Sized>(store: &S) -> Result<Vec<Medicine>, StoreError> {
    read_list(store, MEDICINES_KEY)
}

/// Like [`list_medicines`] but an unreadable list counts as empty.
pub fn list_medicines_or_empty<S: KvStore + ?Sized>(store: &S) -> Vec<Medicine> {
    match list_medicines(store) {
        Ok(medicines) => medicines,
        Err(e) => {
            tracing::warn!(error = %e, "medicine list unreadable, treating as empty");
            Vec::new()
        }
    }
}

/// Look up one medicine by id.
pub fn find_medicine<S: KvStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Option<Medicine>, StoreError> {
    Ok(list_medicines(store)?.into_iter().find(|m| m.id == id))
}

/// Validate `draft`, assign an id and `created_at`, and append it.
///
/// # Errors
/// - [`CoreError::Validation`](crate::CoreError::Validation) if the draft breaks an invariant
/// - [`CoreError::Store`](crate::CoreError::Store) if the list cannot be read or written
pub fn create_medicine<S: KvStore + ?Sized>(
    store: &S,
    draft: MedicineDraft,
    created_at: DateTime<Utc>,
) -> Result<Medicine> {
    let draft = draft.validate()?;
    let mut medicines = list_medicines(store)?;

    let medicine = Medicine {
        id: Uuid::new_v4().to_string(),
        name: draft.name,
        icon: draft.icon,
        schedule_times: draft.schedule_times,
        active_days: draft.active_days,
        repeat_weeks: draft.repeat_weeks,
        created_at,
    };
    medicines.push(medicine.clone());
    write_list(store, MEDICINES_KEY, &medicines)?;

    tracing::info!(medicine_id = %medicine.id, name = %medicine.name, "medicine created");
    Ok(medicine)
}

/// Replace the editable fields of medicine `id`, keeping `id` and `created_at`.
///
/// Returns `None` without writing if no medicine has that id.
pub fn update_medicine<S: KvStore + ?Sized>(
    store: &S,
    id: &str,
    draft: MedicineDraft,
) -> Result<Option<Medicine>> {
    let draft = draft.validate()?;
    let mut medicines = list_medicines(store)?;

    let Some(slot) = medicines.iter_mut().find(|m| m.id == id) else {
        tracing::debug!(medicine_id = id, "update skipped, medicine not found");
        return Ok(None);
    };
    slot.name = draft.name;
    slot.icon = draft.icon;
    slot.schedule_times = draft.schedule_times;
    slot.active_days = draft.active_days;
    slot.repeat_weeks = draft.repeat_weeks;
    let updated = slot.clone();

    write_list(store, MEDICINES_KEY, &medicines)?;
    tracing::info!(medicine_id = id, "medicine updated");
    Ok(Some(updated))
}

/// Remove medicine `id` and purge its intake history.
///
/// The intake key is deleted even when the medicine is not in the list, so
/// history left behind by an earlier partial failure is cleaned up, and when
/// the list itself cannot be read (the read error is still returned).
/// Returns whether the medicine was in the list.
pub fn delete_medicine<S: KvStore + ?Sized>(store: &S, id: &str) -> Result<bool> {
    let mut medicines = match list_medicines(store) {
        Ok(medicines) => medicines,
        Err(e) => {
            purge_intakes(store, id)?;
            tracing::warn!(
                medicine_id = id,
                error = %e,
                "medicine list unreadable, purged intakes only"
            );
            return Err(e.into());
        }
    };
    let before = medicines.len();
    medicines.retain(|m| m.id != id);
    let removed = medicines.len() != before;

    if removed {
        write_list(store, MEDICINES_KEY, &medicines)?;
    }
    purge_intakes(store, id)?;

    tracing::info!(medicine_id = id, removed, "medicine deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::intake::{load_intakes, save_intakes, Intake};
    use crate::medicine::{Icon, ScheduleTime};
    use crate::storage::{intakes_key, MemoryStore, WELCOME_SEEN_KEY};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Weekday};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 7, 0, 0).unwrap()
    }

    fn t(s: &str) -> ScheduleTime {
        s.parse().unwrap()
    }

    #[test]
    fn create_assigns_identity_and_persists() {
        let store = MemoryStore::new();
        let med = create_medicine(&store, MedicineDraft::new(" Aspirin "), now()).unwrap();
        assert!(!med.id.is_empty());
        assert_eq!(med.name, "Aspirin");
        assert_eq!(med.created_at, now());
        assert_eq!(list_medicines(&store).unwrap(), vec![med]);
    }

    #[test]
    fn create_rejects_invalid_without_writing() {
        let store = MemoryStore::new();
        let err = create_medicine(&store, MedicineDraft::new(""), now()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyName)));
        assert!(store.get(MEDICINES_KEY).unwrap().is_none());
    }

    #[test]
    fn create_fails_cleanly_when_store_is_read_only() {
        let store = MemoryStore::new();
        let kept = create_medicine(&store, MedicineDraft::new("A"), now()).unwrap();
        store.fail_writes(true);
        assert!(create_medicine(&store, MedicineDraft::new("B"), now()).is_err());
        store.fail_writes(false);
        assert_eq!(list_medicines(&store).unwrap(), vec![kept]);
    }

    #[test]
    fn update_replaces_in_place() {
        let store = MemoryStore::new();
        let a = create_medicine(&store, MedicineDraft::new("A"), now()).unwrap();
        let b = create_medicine(&store, MedicineDraft::new("B"), now()).unwrap();

        let draft = MedicineDraft::new("A2")
            .with_icon(Icon::Blue)
            .with_times(vec![t("07:00"), t("19:00")])
            .with_days(vec![Weekday::Sat])
            .with_repeat_weeks(2);
        let updated = update_medicine(&store, &a.id, draft).unwrap().unwrap();

        assert_eq!(updated.id, a.id);
        assert_eq!(updated.created_at, a.created_at);
        assert_eq!(updated.name, "A2");
        assert_eq!(updated.repeat_weeks, 2);
        assert_eq!(list_medicines(&store).unwrap(), vec![updated, b]);
    }

    #[test]
    fn update_missing_is_absent() {
        let store = MemoryStore::new();
        create_medicine(&store, MedicineDraft::new("A"), now()).unwrap();
        let before = store.get(MEDICINES_KEY).unwrap();
        assert!(update_medicine(&store, "ghost", MedicineDraft::new("X"))
            .unwrap()
            .is_none());
        assert_eq!(store.get(MEDICINES_KEY).unwrap(), before);
    }

    #[test]
    fn update_validates_first() {
        let store = MemoryStore::new();
        let a = create_medicine(&store, MedicineDraft::new("A"), now()).unwrap();
        let draft = MedicineDraft::new("A").with_days(vec![]);
        let err = update_medicine(&store, &a.id, draft).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::NoActiveDays)));
        assert_eq!(find_medicine(&store, &a.id).unwrap(), Some(a));
    }

    #[test]
    fn delete_cascades_to_intakes() {
        let store = MemoryStore::new();
        let med = create_medicine(&store, MedicineDraft::new("A"), now()).unwrap();
        let offset = FixedOffset::east_opt(0).unwrap();
        let intakes: Vec<Intake> = (17..20)
            .map(|day| Intake {
                id: format!("i{day}"),
                medicine_id: med.id.clone(),
                scheduled_time: t("08:00"),
                taken_at: offset.with_ymd_and_hms(2026, 10, day, 8, 0, 0).unwrap(),
                date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            })
            .collect();
        save_intakes(&store, &med.id, &intakes).unwrap();

        assert!(delete_medicine(&store, &med.id).unwrap());
        assert!(load_intakes(&store, &med.id).unwrap().is_empty());
        assert!(list_medicines(&store).unwrap().is_empty());
    }

    #[test]
    fn delete_purges_orphaned_history() {
        let store = MemoryStore::new();
        store.set(&intakes_key("gone"), "[]").unwrap();
        assert!(!delete_medicine(&store, "gone").unwrap());
        assert!(store.get(&intakes_key("gone")).unwrap().is_none());
        assert!(store.get(MEDICINES_KEY).unwrap().is_none());
    }

    #[test]
    fn delete_purges_history_when_list_is_corrupt() {
        let store = MemoryStore::new();
        store.set(MEDICINES_KEY, "{broken").unwrap();
        store.set(&intakes_key("m1"), "[]").unwrap();

        let err = delete_medicine(&store, "m1").unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Corrupt { .. })));
        assert!(store.get(&intakes_key("m1")).unwrap().is_none());
        assert_eq!(store.get(MEDICINES_KEY).unwrap().as_deref(), Some("{broken"));
    }

    #[test]
    fn welcome_flag_is_left_alone() {
        let store = MemoryStore::new();
        store.set(WELCOME_SEEN_KEY, "true").unwrap();
        let med = create_medicine(&store, MedicineDraft::new("A"), now()).unwrap();
        delete_medicine(&store, &med.id).unwrap();
        assert_eq!(store.get(WELCOME_SEEN_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn unreadable_list_degrades_to_empty() {
        let store = MemoryStore::new();
        store.set(MEDICINES_KEY, "{}").unwrap();
        assert!(list_medicines(&store).is_err());
        assert!(list_medicines_or_empty(&store).is_empty());
    }
}
