//! Weekday labels (`Mon`..`Sun`) for active-day sets.

use chrono::Weekday;

use crate::error::ValidationError;

pub const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse a weekday label. Accepts short or full names in any case.
pub fn parse_weekday(label: &str) -> Result<Weekday, ValidationError> {
    label
        .trim()
        .parse::<Weekday>()
        .map_err(|_| ValidationError::InvalidWeekday(label.to_string()))
}

/// Three-letter label, e.g. `Mon`.
pub fn label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Human summary of a day set: `Daily`, `Weekdays`, `Weekends`, or the labels.
pub fn describe(days: &[Weekday]) -> String {
    let has = |d: Weekday| days.contains(&d);
    let weekend = [Weekday::Sat, Weekday::Sun];

    if ALL_DAYS.iter().all(|d| has(*d)) {
        return "Daily".to_string();
    }
    let weekday_count = ALL_DAYS[..5].iter().filter(|d| has(**d)).count();
    let weekend_count = weekend.iter().filter(|d| has(**d)).count();
    if weekday_count == 5 && weekend_count == 0 {
        return "Weekdays".to_string();
    }
    if weekday_count == 0 && weekend_count == 2 {
        return "Weekends".to_string();
    }
    days.iter().map(|d| label(*d)).collect::<Vec<_>>().join(", ")
}

/// Serde adapter writing `Vec<Weekday>` as an array of three-letter labels.
pub(crate) mod labels {
    use chrono::Weekday;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(days.iter().map(|d| super::label(*d)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Weekday>, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| super::parse_weekday(s).map_err(D::Error::custom))
            .collect()
    }
}
