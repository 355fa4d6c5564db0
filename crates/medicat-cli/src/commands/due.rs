use medicat_core::lifecycle::list_medicines_or_empty;
use medicat_core::{compute_relevant_with, Config};

use super::{local_now, open_store};

/// Print the doses due at `at` (default now), earliest first.
pub fn run(at: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store(&config)?;
    let now = local_now(at)?;

    let medicines = list_medicines_or_empty(&store);
    let due = compute_relevant_with(&store, &medicines, now, config.due_window());
    println!("{}", serde_json::to_string_pretty(&due)?);
    Ok(())
}
