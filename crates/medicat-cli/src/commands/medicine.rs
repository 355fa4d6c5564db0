//! Medicine management commands for CLI.

use chrono::{Local, Utc};
use clap::Subcommand;
use medicat_core::medicine::days::ALL_DAYS;
use medicat_core::{
    create_medicine, delete_medicine, find_medicine, update_medicine, Config, Icon, Medicine,
    MedicineDraft, Progress, Snapshot,
};
use serde::Serialize;

use super::{open_store, parse_days, parse_times};

#[derive(Subcommand)]
pub enum MedicineAction {
    /// Add a medicine
    Add {
        /// Display name
        name: String,
        /// Icon symbol or name (e.g. "blue")
        #[arg(long)]
        icon: Option<String>,
        /// Dose time HH:MM (repeatable or comma-separated)
        #[arg(long = "time", value_delimiter = ',')]
        times: Vec<String>,
        /// Active weekday (repeatable or comma-separated; default every day)
        #[arg(long = "day", value_delimiter = ',')]
        days: Vec<String>,
        /// Repeat every N weeks
        #[arg(long, default_value = "1")]
        repeat_weeks: u32,
    },
    /// List medicines with today's progress
    List,
    /// Show one medicine
    Show {
        /// Medicine ID
        id: String,
    },
    /// Edit a medicine; omitted fields keep their values
    Edit {
        /// Medicine ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Replaces all dose times
        #[arg(long = "time", value_delimiter = ',')]
        times: Vec<String>,
        /// Replaces all active days
        #[arg(long = "day", value_delimiter = ',')]
        days: Vec<String>,
        #[arg(long)]
        repeat_weeks: Option<u32>,
    },
    /// Delete a medicine and its intake history
    Delete {
        /// Medicine ID
        id: String,
    },
}

/// One row of `medicine list`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedMedicine<'a> {
    #[serde(flatten)]
    medicine: &'a Medicine,
    schedule: String,
    today: Progress,
}

pub fn run(action: MedicineAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store(&config)?;

    match action {
        MedicineAction::Add {
            name,
            icon,
            times,
            days,
            repeat_weeks,
        } => {
            let icon = match icon {
                Some(raw) => raw.parse::<Icon>()?,
                None => config.default_icon(),
            };
            let times = if times.is_empty() {
                vec![config.default_time()]
            } else {
                parse_times(&times)?
            };
            let days = if days.is_empty() {
                ALL_DAYS.to_vec()
            } else {
                parse_days(&days)?
            };
            let draft = MedicineDraft::new(name)
                .with_icon(icon)
                .with_times(times)
                .with_days(days)
                .with_repeat_weeks(repeat_weeks);

            let medicine = create_medicine(&store, draft, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&medicine)?);
        }
        MedicineAction::List => {
            let now = Local::now().naive_local();
            let snapshot = Snapshot::reload(&store, now, config.due_window());
            let rows: Vec<ListedMedicine<'_>> = snapshot
                .statuses()
                .iter()
                .map(|status| ListedMedicine {
                    medicine: &status.medicine,
                    schedule: status.medicine.describe_days(),
                    today: status.progress,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        MedicineAction::Show { id } => {
            let medicine =
                find_medicine(&store, &id)?.ok_or(format!("medicine not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(&medicine)?);
        }
        MedicineAction::Edit {
            id,
            name,
            icon,
            times,
            days,
            repeat_weeks,
        } => {
            let current =
                find_medicine(&store, &id)?.ok_or(format!("medicine not found: {id}"))?;
            let mut draft = MedicineDraft::from(&current);

            if let Some(n) = name {
                draft.name = n;
            }
            if let Some(raw) = icon {
                draft.icon = raw.parse()?;
            }
            if !times.is_empty() {
                draft.schedule_times = parse_times(&times)?;
            }
            if !days.is_empty() {
                draft.active_days = parse_days(&days)?;
            }
            if let Some(w) = repeat_weeks {
                draft.repeat_weeks = w;
            }

            let updated = update_medicine(&store, &id, draft)?
                .ok_or(format!("medicine not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        MedicineAction::Delete { id } => {
            let deleted = delete_medicine(&store, &id)?;
            let report = serde_json::json!({ "id": id, "deleted": deleted });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
