//! Reading and writing a medicine's intake list.

use chrono::NaiveDate;

use super::Intake;
use crate::error::StoreError;
use crate::storage::{intakes_key, read_list, write_list, KvStore};

/// Load every intake recorded for `medicine_id`, oldest first.
///
/// # Errors
/// Returns an error if the store cannot be read or the list cannot be decoded.
pub fn load_intakes<S: KvStore + ?Sized>(
    store: &S,
    medicine_id: &str,
) -> Result<Vec<Intake>, StoreError> {
    read_list(store, &intakes_key(medicine_id))
}

/// Like [`load_intakes`] but an unreadable or corrupt list counts as no history.
pub fn load_intakes_or_empty<S: KvStore + ?Sized>(store: &S, medicine_id: &str) -> Vec<Intake> {
    match load_intakes(store, medicine_id) {
        Ok(intakes) => intakes,
        Err(e) => {
            tracing::warn!(medicine_id, error = %e, "intake history unreadable, treating as empty");
            Vec::new()
        }
    }
}

/// Intakes of `medicine_id` that count toward `date`.
pub fn intakes_on<S: KvStore + ?Sized>(
    store: &S,
    medicine_id: &str,
    date: NaiveDate,
) -> Result<Vec<Intake>, StoreError> {
    Ok(load_intakes(store, medicine_id)?
        .into_iter()
        .filter(|intake| intake.is_on(date))
        .collect())
}

/// Replace the whole intake list of `medicine_id`.
pub fn save_intakes<S: KvStore + ?Sized>(
    store: &S,
    medicine_id: &str,
    intakes: &[Intake],
) -> Result<(), StoreError> {
    write_list(store, &intakes_key(medicine_id), intakes)
}

/// Drop the intake list of `medicine_id`. Succeeds if there was none.
pub fn purge_intakes<S: KvStore + ?Sized>(store: &S, medicine_id: &str) -> Result<(), StoreError> {
    store.delete(&intakes_key(medicine_id))
}
