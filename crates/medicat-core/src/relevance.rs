//! Due-dose relevance engine.
//!
//! Decides which scheduled doses should be shown to the user right now.
//! A dose is due when all of the following hold:
//!
//! - today's weekday is one of the medicine's active days
//! - no intake exists for that exact scheduled time today
//! - the scheduled time lies within the due window around the current
//!   minute: from `lead_minutes` before it until `grace_minutes` after it
//!
//! Minute-of-day arithmetic does not wrap across midnight, so a 23:30 dose
//! is not due at 00:15 the next day. `repeat_weeks` is not consulted: every
//! active weekday of every week is treated as due.

use chrono::{Datelike, NaiveDateTime};

use crate::intake::{load_intakes_or_empty, Intake};
use crate::medicine::{Medicine, RelevantMedicine, ScheduleTime};
use crate::storage::KvStore;

/// Minutes before and after a scheduled time during which it is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    pub lead_minutes: i32,
    pub grace_minutes: i32,
}

impl Default for DueWindow {
    fn default() -> Self {
        Self {
            lead_minutes: 60,
            grace_minutes: 120,
        }
    }
}

impl DueWindow {
    /// `delta` is scheduled minutes minus current minutes. Both ends inclusive.
    pub fn contains(&self, delta: i32) -> bool {
        delta <= self.lead_minutes && delta >= self.grace_minutes.saturating_neg()
    }
}

/// Scheduled times of `medicine` that are due at `now`, in schedule order.
///
/// Only entries of `intakes` dated `now`'s calendar day suppress a time.
pub fn due_times(
    medicine: &Medicine,
    intakes: &[Intake],
    now: NaiveDateTime,
    window: DueWindow,
) -> Vec<ScheduleTime> {
    if !medicine.is_active_on(now.weekday()) {
        return Vec::new();
    }

    let today = now.date();
    let now_minutes = ScheduleTime::of(&now).minutes_of_day();

    medicine
        .schedule_times
        .iter()
        .copied()
        .filter(|time| !intakes.iter().any(|i| i.fulfils(*time, today)))
        .filter(|time| window.contains(time.minutes_of_day() - now_minutes))
        .collect()
}

/// Compute the due set across `medicines` with the default 60/120 window.
///
/// Intake history is loaded from `store`; unreadable history is treated as
/// empty, so this never fails.
pub fn compute_relevant<'a, S: KvStore + ?Sized>(
    store: &S,
    medicines: &'a [Medicine],
    now: NaiveDateTime,
) -> Vec<RelevantMedicine<'a>> {
    compute_relevant_with(store, medicines, now, DueWindow::default())
}

/// [`compute_relevant`] with an explicit due window.
pub fn compute_relevant_with<'a, S: KvStore + ?Sized>(
    store: &S,
    medicines: &'a [Medicine],
    now: NaiveDateTime,
    window: DueWindow,
) -> Vec<RelevantMedicine<'a>> {
    let weekday = now.weekday();
    let mut relevant = Vec::new();

    for medicine in medicines {
        if !medicine.is_active_on(weekday) {
            tracing::debug!(medicine_id = %medicine.id, %weekday, "not active today");
            continue;
        }
        let intakes = load_intakes_or_empty(store, &medicine.id);
        relevant.extend(
            due_times(medicine, &intakes, now, window)
                .into_iter()
                .map(|schedule_time| RelevantMedicine {
                    medicine,
                    schedule_time,
                }),
        );
    }

    sort_by_schedule(&mut relevant);
    relevant
}

/// Stable ascending sort on scheduled minute of day.
pub fn sort_by_schedule(relevant: &mut [RelevantMedicine<'_>]) {
    relevant.sort_by_key(|r| r.schedule_time.minutes_of_day());
}
