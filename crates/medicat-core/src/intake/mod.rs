//! Intake records: one taken dose of one medicine on one day.
//!
//! Each medicine owns its own ordered list of intakes, stored under
//! `intakes_{medicineId}`. [`access`] reads and writes those lists;
//! [`mutation`] records and removes single intakes.

pub mod access;
pub mod mutation;

pub use access::{intakes_on, load_intakes, load_intakes_or_empty, purge_intakes, save_intakes};
pub use mutation::{record_intake, remove_intake};

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::medicine::ScheduleTime;

/// A record that one scheduled dose was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intake {
    pub id: String,
    /// Owning medicine. Weak reference: intakes do not keep a medicine alive.
    pub medicine_id: String,
    pub scheduled_time: ScheduleTime,
    pub taken_at: DateTime<FixedOffset>,
    /// Calendar day the dose counts toward.
    #[serde(with = "day_key")]
    pub date: NaiveDate,
}

impl Intake {
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    pub fn fulfils(&self, scheduled_time: ScheduleTime, date: NaiveDate) -> bool {
        self.date == date && self.scheduled_time == scheduled_time
    }
}

/// Calendar-day keys. Written as `YYYY-MM-DD`; the `Mon Oct 19 2026` form
/// produced by older app versions is accepted on read.
pub(crate) mod day_key {
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const CANONICAL: &str = "%Y-%m-%d";
    const LEGACY: &str = "%a %b %d %Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(CANONICAL))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid day key '{raw}'")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, CANONICAL)
            .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Intake {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        Intake {
            id: "i1".into(),
            medicine_id: "m1".into(),
            scheduled_time: "08:00".parse().unwrap(),
            taken_at: offset.with_ymd_and_hms(2026, 10, 19, 8, 12, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        }
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["medicineId"], "m1");
        assert_eq!(json["scheduledTime"], "08:00");
        assert_eq!(json["takenAt"], "2026-10-19T08:12:00+02:00");
        assert_eq!(json["date"], "2026-10-19");
    }

    #[test]
    fn reads_legacy_record() {
        let legacy = r#"{
            "id": "1729321920000",
            "medicineId": "1729321200000",
            "scheduledTime": "08:00",
            "takenAt": "2026-10-19T06:12:00.000Z",
            "date": "Mon Oct 19 2026"
        }"#;
        let intake: Intake = serde_json::from_str(legacy).unwrap();
        assert_eq!(intake.date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    }

    #[test]
    fn rejects_unknown_day_key() {
        let bad = r#"{"id":"x","medicineId":"m","scheduledTime":"08:00",
            "takenAt":"2026-10-19T06:12:00Z","date":"yesterday"}"#;
        assert!(serde_json::from_str::<Intake>(bad).is_err());
    }

    #[test]
    fn fulfils_matches_time_and_day() {
        let intake = sample();
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(intake.fulfils("08:00".parse().unwrap(), day));
        assert!(!intake.fulfils("09:00".parse().unwrap(), day));
        assert!(!intake.fulfils("08:00".parse().unwrap(), day.succ_opt().unwrap()));
    }
}
