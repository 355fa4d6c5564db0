//! Medicine schedule model.
//!
//! A [`Medicine`] is a recurring medication entry: a list of daily dose times
//! and the weekdays on which those doses are due. Medicines are persisted as a
//! single JSON array under the `medicines` key (see [`crate::lifecycle`]).

pub mod days;
mod icon;
mod time;

pub use icon::Icon;
pub use time::ScheduleTime;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A user-defined recurring medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: String,
    pub name: String,
    #[serde(alias = "emoji", default)]
    pub icon: Icon,
    pub schedule_times: Vec<ScheduleTime>,
    #[serde(alias = "days", with = "days::labels")]
    pub active_days: Vec<Weekday>,
    /// "Every N weeks". Carried but not consulted by the relevance engine.
    #[serde(default = "default_repeat_weeks")]
    pub repeat_weeks: u32,
    pub created_at: DateTime<Utc>,
}

fn default_repeat_weeks() -> u32 {
    1
}

impl Medicine {
    pub fn is_active_on(&self, day: Weekday) -> bool {
        self.active_days.contains(&day)
    }

    pub fn describe_days(&self) -> String {
        days::describe(&self.active_days)
    }
}

/// User-editable fields of a medicine, as submitted by the add/edit forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDraft {
    pub name: String,
    #[serde(default)]
    pub icon: Icon,
    pub schedule_times: Vec<ScheduleTime>,
    #[serde(with = "days::labels")]
    pub active_days: Vec<Weekday>,
    #[serde(default = "default_repeat_weeks")]
    pub repeat_weeks: u32,
}

impl MedicineDraft {
    /// A draft with the form defaults: one 08:00 dose, every day, every week.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: Icon::default(),
            schedule_times: vec![ScheduleTime::DEFAULT_FIRST_DOSE],
            active_days: days::ALL_DAYS.to_vec(),
            repeat_weeks: 1,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_times(mut self, times: Vec<ScheduleTime>) -> Self {
        self.schedule_times = times;
        self
    }

    pub fn with_days(mut self, days: Vec<Weekday>) -> Self {
        self.active_days = days;
        self
    }

    pub fn with_repeat_weeks(mut self, weeks: u32) -> Self {
        self.repeat_weeks = weeks;
        self
    }

    /// Check the medicine invariants and return the normalized draft.
    ///
    /// The name is trimmed and duplicate active days are dropped (first
    /// occurrence wins). Schedule times are kept as given.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.schedule_times.is_empty() {
            return Err(ValidationError::NoScheduleTimes);
        }
        let mut active_days: Vec<Weekday> = Vec::with_capacity(self.active_days.len());
        for day in self.active_days {
            if !active_days.contains(&day) {
                active_days.push(day);
            }
        }
        if active_days.is_empty() {
            return Err(ValidationError::NoActiveDays);
        }
        if self.repeat_weeks < 1 {
            return Err(ValidationError::InvalidRepeatWeeks(self.repeat_weeks));
        }
        Ok(Self {
            name,
            active_days,
            ..self
        })
    }
}

impl From<&Medicine> for MedicineDraft {
    fn from(medicine: &Medicine) -> Self {
        Self {
            name: medicine.name.clone(),
            icon: medicine.icon,
            schedule_times: medicine.schedule_times.clone(),
            active_days: medicine.active_days.clone(),
            repeat_weeks: medicine.repeat_weeks,
        }
    }
}

/// One due-now dose: a medicine and the scheduled time that is currently due.
///
/// Produced by [`crate::relevance::compute_relevant`]; borrows the medicine
/// list it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevantMedicine<'a> {
    pub medicine: &'a Medicine,
    pub schedule_time: ScheduleTime,
}
