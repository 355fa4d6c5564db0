//! Time-of-day values used in medicine schedules.
//!
//! Stored as `"HH:MM"` (24-hour) strings in JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};

use crate::error::ValidationError;

/// One intended dose per active day, at local wall-clock `hour:minute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleTime {
    hour: u8,
    minute: u8,
}

impl ScheduleTime {
    /// First dose time offered by the add form.
    pub const DEFAULT_FIRST_DOSE: ScheduleTime = ScheduleTime { hour: 8, minute: 0 };

    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTime(format!("{hour}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since local midnight.
    pub fn minutes_of_day(&self) -> i32 {
        i32::from(self.hour) * 60 + i32::from(self.minute)
    }

    /// Wall-clock time of `now`, truncated to the minute.
    pub fn of(now: &NaiveDateTime) -> Self {
        Self {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
        }
    }

    /// 12-hour rendering, e.g. `8:00 AM`, `12:30 PM`.
    pub fn to_12h(&self) -> String {
        let suffix = if self.hour >= 12 { "PM" } else { "AM" };
        let display_hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{display_hour}:{:02} {suffix}", self.minute)
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ScheduleTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour = h.parse::<u8>().map_err(|_| invalid())?;
        let minute = m.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ScheduleTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScheduleTime> for String {
    fn from(value: ScheduleTime) -> Self {
        value.to_string()
    }
}
