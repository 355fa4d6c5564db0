//! Subcommand handlers and the argument parsing they share.

pub mod config;
pub mod due;
pub mod intake;
pub mod medicine;
pub mod progress;
pub mod watch;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use medicat_core::medicine::days::parse_weekday;
use medicat_core::{Config, ScheduleTime, SqliteStore};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Open the SQLite store named by the configuration.
pub(crate) fn open_store(config: &Config) -> CliResult<SqliteStore> {
    let path = config.database_path()?;
    tracing::debug!(path = %path.display(), "opening store");
    Ok(SqliteStore::open_at(&path)?)
}

/// `--at` value as local wall time, or the current local time.
pub(crate) fn local_now(at: Option<&str>) -> CliResult<NaiveDateTime> {
    match at {
        Some(raw) => NaiveDateTime::parse_from_str(raw.trim(), AT_FORMAT)
            .map_err(|e| format!("invalid time '{raw}' (expected YYYY-MM-DD HH:MM): {e}").into()),
        None => Ok(Local::now().naive_local()),
    }
}

/// Attach the local UTC offset to a wall time.
pub(crate) fn with_local_offset(at: NaiveDateTime) -> CliResult<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&at)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| {
            format!("{} does not exist in the local time zone", at.format(AT_FORMAT)).into()
        })
}

/// `--date` value, or today's local date.
pub(crate) fn day_or_today(date: Option<&str>) -> CliResult<NaiveDate> {
    match date {
        Some(raw) => raw
            .trim()
            .parse::<NaiveDate>()
            .map_err(|e| format!("invalid date '{raw}' (expected YYYY-MM-DD): {e}").into()),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn parse_times(raw: &[String]) -> CliResult<Vec<ScheduleTime>> {
    Ok(raw
        .iter()
        .map(|s| s.parse::<ScheduleTime>())
        .collect::<Result<_, _>>()?)
}

pub(crate) fn parse_days(raw: &[String]) -> CliResult<Vec<chrono::Weekday>> {
    Ok(raw
        .iter()
        .map(|s| parse_weekday(s))
        .collect::<Result<_, _>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};

    #[test]
    fn parses_at_argument() {
        let at = local_now(Some("2026-10-19 09:05")).unwrap();
        assert_eq!(at.date(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!((at.hour(), at.minute()), (9, 5));
        assert!(local_now(Some("09:05")).is_err());
    }

    #[test]
    fn parses_day_and_time_lists() {
        let days = parse_days(&["mon".into(), "Friday".into()]).unwrap();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Fri]);
        assert!(parse_days(&["someday".into()]).is_err());

        let times = parse_times(&["8:00".into(), "20:30".into()]).unwrap();
        assert_eq!(times[1].to_string(), "20:30");
        assert!(parse_times(&["25:00".into()]).is_err());
    }

    #[test]
    fn explicit_date_wins() {
        let day = day_or_today(Some("2026-10-20")).unwrap();
        assert_eq!(day.weekday(), Weekday::Tue);
    }
}
