//! Intake commands: mark a dose taken, undo it, list a day's doses.

use clap::Subcommand;
use medicat_core::intake::intakes_on;
use medicat_core::{find_medicine, record_intake, remove_intake, Config, ScheduleTime};

use super::{day_or_today, local_now, open_store, with_local_offset};

#[derive(Subcommand)]
pub enum IntakeAction {
    /// Mark a scheduled dose as taken
    Take {
        /// Medicine ID
        medicine_id: String,
        /// Scheduled time being taken (HH:MM)
        time: String,
        /// Record as taken at this local time ("YYYY-MM-DD HH:MM")
        #[arg(long)]
        at: Option<String>,
    },
    /// Undo a recorded intake
    Undo {
        /// Medicine ID
        medicine_id: String,
        /// Intake ID
        intake_id: String,
    },
    /// List intakes recorded for a day
    List {
        /// Medicine ID
        medicine_id: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: IntakeAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store(&config)?;

    match action {
        IntakeAction::Take { medicine_id, time, at } => {
            let medicine = find_medicine(&store, &medicine_id)?
                .ok_or(format!("medicine not found: {medicine_id}"))?;
            let time: ScheduleTime = time.parse()?;
            if !medicine.schedule_times.contains(&time) {
                return Err(format!("{time} is not a scheduled time of '{}'", medicine.name).into());
            }

            let taken_at = with_local_offset(local_now(at.as_deref())?)?;
            let intake = record_intake(&store, &medicine.id, time, taken_at)?;
            println!("{}", serde_json::to_string_pretty(&intake)?);
        }
        IntakeAction::Undo { medicine_id, intake_id } => {
            let removed = remove_intake(&store, &medicine_id, &intake_id)?;
            let report = serde_json::json!({ "id": intake_id, "removed": removed });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        IntakeAction::List { medicine_id, date } => {
            let day = day_or_today(date.as_deref())?;
            let intakes = intakes_on(&store, &medicine_id, day)?;
            println!("{}", serde_json::to_string_pretty(&intakes)?);
        }
    }
    Ok(())
}
