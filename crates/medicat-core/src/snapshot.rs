//! One reload cycle: medicines, today's progress, and the due set.
//!
//! The caller owns the [`Snapshot`] and decides when to refresh it (after a
//! mutation, on a timer tick). Nothing is cached inside the core; every
//! [`Snapshot::reload`] reads the store again.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::intake::load_intakes_or_empty;
use crate::lifecycle::list_medicines_or_empty;
use crate::medicine::{Medicine, RelevantMedicine, ScheduleTime};
use crate::progress::{progress_for, Progress};
use crate::relevance::{due_times, DueWindow};
use crate::storage::KvStore;

/// A medicine together with its progress for the snapshot's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineStatus {
    pub medicine: Medicine,
    pub progress: Progress,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    at: NaiveDateTime,
    statuses: Vec<MedicineStatus>,
    due: Vec<(usize, ScheduleTime)>,
}

impl Snapshot {
    /// Reload medicines, then progress per medicine, then the due set.
    ///
    /// Read failures are logged and treated as empty, so a reload always
    /// produces a snapshot.
    pub fn reload<S: KvStore + ?Sized>(store: &S, now: NaiveDateTime, window: DueWindow) -> Self {
        let today = now.date();
        let mut statuses = Vec::new();
        let mut due = Vec::new();

        for (index, medicine) in list_medicines_or_empty(store).into_iter().enumerate() {
            let intakes = load_intakes_or_empty(store, &medicine.id);
            let progress = progress_for(&medicine, &intakes, today);
            due.extend(
                due_times(&medicine, &intakes, now, window)
                    .into_iter()
                    .map(|time| (index, time)),
            );
            statuses.push(MedicineStatus { medicine, progress });
        }
        due.sort_by_key(|(_, time)| time.minutes_of_day());

        tracing::debug!(medicines = statuses.len(), due = due.len(), "snapshot reloaded");
        Self {
            at: now,
            statuses,
            due,
        }
    }

    /// Instant the snapshot was computed for.
    pub fn at(&self) -> NaiveDateTime {
        self.at
    }

    pub fn statuses(&self) -> &[MedicineStatus] {
        &self.statuses
    }

    /// Due doses, earliest scheduled time first.
    pub fn due(&self) -> Vec<RelevantMedicine<'_>> {
        self.due
            .iter()
            .map(|(index, schedule_time)| RelevantMedicine {
                medicine: &self.statuses[*index].medicine,
                schedule_time: *schedule_time,
            })
            .collect()
    }

    pub fn progress_of(&self, medicine_id: &str) -> Option<Progress> {
        self.statuses
            .iter()
            .find(|s| s.medicine.id == medicine_id)
            .map(|s| s.progress)
    }

    /// Whether `other` shows the same due doses and progress.
    pub fn same_state_as(&self, other: &Snapshot) -> bool {
        self.statuses == other.statuses && self.due == other.due
    }
}
