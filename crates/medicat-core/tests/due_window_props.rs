//! Property tests for the due window.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use medicat_core::medicine::days::ALL_DAYS;
use medicat_core::relevance::due_times;
use medicat_core::{compute_relevant, DueWindow, Icon, MemoryStore, Medicine, ScheduleTime};
use proptest::prelude::*;

fn medicine(id: &str, times: Vec<ScheduleTime>, days: Vec<Weekday>) -> Medicine {
    Medicine {
        id: id.into(),
        name: id.into(),
        icon: Icon::Pill,
        schedule_times: times,
        active_days: days,
        repeat_weeks: 1,
        created_at: created(),
    }
}

fn created() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn schedule_time() -> impl Strategy<Value = ScheduleTime> {
    (0u8..24, 0u8..60).prop_map(|(h, m)| ScheduleTime::new(h, m).unwrap())
}

fn instant() -> impl Strategy<Value = NaiveDateTime> {
    (0u32..28, 0u32..24, 0u32..60, 0u32..60).prop_map(|(day, h, m, s)| {
        NaiveDate::from_ymd_opt(2026, 10, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(day as u64))
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    })
}

proptest! {
    #[test]
    fn due_iff_within_window(time in schedule_time(), now in instant()) {
        let med = medicine("m", vec![time], ALL_DAYS.to_vec());
        let now_minutes = ScheduleTime::of(&now).minutes_of_day();
        let delta = time.minutes_of_day() - now_minutes;

        let due = due_times(&med, &[], now, DueWindow::default());
        prop_assert_eq!(!due.is_empty(), (-120..=60).contains(&delta));
    }

    #[test]
    fn inactive_weekday_is_never_due(
        times in prop::collection::vec(schedule_time(), 1..6),
        now in instant(),
    ) {
        let days: Vec<Weekday> = ALL_DAYS.iter().copied().filter(|d| *d != now.weekday()).collect();
        let med = medicine("m", times, days);
        prop_assert!(due_times(&med, &[], now, DueWindow::default()).is_empty());
    }

    #[test]
    fn relevant_set_is_sorted(
        per_medicine in prop::collection::vec(prop::collection::vec(schedule_time(), 1..5), 1..5),
        now in instant(),
    ) {
        let store = MemoryStore::new();
        let meds: Vec<Medicine> = per_medicine
            .into_iter()
            .enumerate()
            .map(|(i, times)| medicine(&format!("m{i}"), times, ALL_DAYS.to_vec()))
            .collect();

        let relevant = compute_relevant(&store, &meds, now);
        let minutes: Vec<i32> = relevant.iter().map(|r| r.schedule_time.minutes_of_day()).collect();
        prop_assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
        for r in &relevant {
            let delta = r.schedule_time.minutes_of_day() - ScheduleTime::of(&now).minutes_of_day();
            prop_assert!(DueWindow::default().contains(delta));
        }
    }
}
