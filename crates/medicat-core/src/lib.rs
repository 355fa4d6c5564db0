//! # MediCat Core Library
//!
//! This library provides the core logic of the MediCat medicine reminder:
//! which doses are due right now, and the record of doses taken. The CLI
//! binary (and any GUI) is a thin layer that loads state, calls into these
//! functions, and renders the result.
//!
//! ## Architecture
//!
//! - **Model**: [`Medicine`] schedules and [`Intake`] records, persisted as
//!   JSON arrays in a key-value store
//! - **Storage**: the [`KvStore`] contract with SQLite and in-memory backends,
//!   plus TOML-based configuration
//! - **Relevance**: the due-window engine producing [`RelevantMedicine`]s
//! - **Tracking**: intake mutation, per-day [`Progress`], medicine lifecycle
//!   with cascade delete
//!
//! All time inputs are local wall-clock values passed in by the caller; the
//! core never reads the clock itself.
//!
//! ## Key Components
//!
//! - [`compute_relevant`]: due doses across all medicines
//! - [`record_intake`] / [`remove_intake`]: mark taken / undo
//! - [`progress_for`]: taken/total for a day
//! - [`Snapshot`]: one full reload cycle for a refreshing UI

pub mod error;
pub mod intake;
pub mod lifecycle;
pub mod medicine;
pub mod progress;
pub mod relevance;
pub mod snapshot;
pub mod storage;

pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use intake::{record_intake, remove_intake, Intake};
pub use lifecycle::{
    create_medicine, delete_medicine, find_medicine, list_medicines, update_medicine,
};
pub use medicine::{Icon, Medicine, MedicineDraft, RelevantMedicine, ScheduleTime};
pub use progress::{progress_for, Progress};
pub use relevance::{compute_relevant, compute_relevant_with, DueWindow};
pub use snapshot::{MedicineStatus, Snapshot};
pub use storage::{Config, KvStore, MemoryStore, SqliteStore};
