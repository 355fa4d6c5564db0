use medicat_core::intake::load_intakes;
use medicat_core::{find_medicine, progress_for, Config};
use serde_json::json;

use super::{day_or_today, open_store};

pub fn run(medicine_id: &str, date: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store(&config)?;
    let day = day_or_today(date)?;

    let medicine = find_medicine(&store, medicine_id)?
        .ok_or(format!("medicine not found: {medicine_id}"))?;
    let intakes = load_intakes(&store, &medicine.id)?;
    let progress = progress_for(&medicine, &intakes, day);

    let report = json!({
        "medicineId": medicine.id,
        "date": day.format("%Y-%m-%d").to_string(),
        "taken": progress.taken,
        "total": progress.total,
        "complete": progress.is_complete(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
