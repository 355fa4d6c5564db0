//! Periodic reload loop.
//!
//! Each tick runs one full reload cycle and waits for it before the next
//! tick is taken. Missed ticks are delayed rather than replayed in a burst.

use std::time::Duration;

use chrono::Local;
use medicat_core::{Config, DueWindow, KvStore, Snapshot};
use tokio::time::{interval, MissedTickBehavior};

use super::open_store;

pub fn run(
    interval_secs: Option<u64>,
    ticks: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store(&config)?;
    let period = Duration::from_secs(interval_secs.unwrap_or(config.refresh.interval_secs).max(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let reloads = runtime.block_on(watch(&store, config.due_window(), period, ticks));
    tracing::debug!(reloads, "watch finished");
    Ok(())
}

/// Runs until `ticks` reloads have happened (forever if `None`) and returns
/// the number of reloads.
async fn watch<S: KvStore>(
    store: &S,
    window: DueWindow,
    period: Duration,
    ticks: Option<u64>,
) -> u64 {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut shown: Option<Snapshot> = None;
    let mut count = 0u64;
    while ticks.map_or(true, |limit| count < limit) {
        ticker.tick().await;
        let snapshot = Snapshot::reload(store, Local::now().naive_local(), window);
        if shown.as_ref().map_or(true, |prev| !prev.same_state_as(&snapshot)) {
            print!("{}", render(&snapshot));
        }
        shown = Some(snapshot);
        count += 1;
    }
    count
}

fn render(snapshot: &Snapshot) -> String {
    let due = snapshot.due();
    let mut out = format!("[{}] {} due\n", snapshot.at().format("%Y-%m-%d %H:%M"), due.len());
    for relevant in &due {
        let medicine = relevant.medicine;
        let progress = snapshot.progress_of(&medicine.id).unwrap_or_default();
        out.push_str(&format!(
            "  {} {}  {}  ({}/{} today)\n",
            medicine.icon,
            medicine.name,
            relevant.schedule_time.to_12h(),
            progress.taken,
            progress.total,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use medicat_core::{create_medicine, MedicineDraft, MemoryStore};

    #[test]
    fn render_lists_due_doses() {
        let store = MemoryStore::new();
        let draft = MedicineDraft::new("Aspirin").with_times(vec!["09:30".parse().unwrap()]);
        let created = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        create_medicine(&store, draft, created).unwrap();

        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let text = render(&Snapshot::reload(&store, now, DueWindow::default()));
        assert_eq!(text, "[2026-10-19 09:00] 1 due\n  💊 Aspirin  9:30 AM  (0/1 today)\n");
    }

    #[tokio::test]
    async fn watch_stops_after_tick_limit() {
        let store = MemoryStore::new();
        let reloads = watch(&store, DueWindow::default(), Duration::from_millis(10), Some(3)).await;
        assert_eq!(reloads, 3);
    }

    #[tokio::test]
    async fn zero_tick_limit_does_not_reload() {
        let store = MemoryStore::new();
        let reloads = watch(&store, DueWindow::default(), Duration::from_millis(10), Some(0)).await;
        assert_eq!(reloads, 0);
    }
}
