//! Per-day dose progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::intake::Intake;
use crate::medicine::Medicine;

/// Doses taken versus doses scheduled for one medicine on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub taken: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.taken >= self.total
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.taken)
    }
}

/// Count `intakes` dated `date` against the number of scheduled times.
///
/// Not clamped: `taken` exceeds `total` if more intakes than schedule
/// entries were recorded that day (for instance after times were removed).
pub fn progress_for(medicine: &Medicine, intakes: &[Intake], date: NaiveDate) -> Progress {
    Progress {
        taken: intakes.iter().filter(|i| i.is_on(date)).count(),
        total: medicine.schedule_times.len(),
    }
}
