//! # Prosperity Core Library
//!
//! Core business logic for Prosperity, a personal daily-productivity
//! tracker: recurring tasks, XP and levels, a daily streak, historical day
//! records and milestone unlocks. The CLI binary and any GUI are thin
//! presentation layers over this library.
//!
//! ## Architecture
//!
//! - **Store**: single owner of the persisted state document; every
//!   mutation is a synchronous transform followed by a full atomic save
//! - **Rollover**: the once-per-calendar-day transition that snapshots the
//!   outgoing day, applies the streak rules and resets task state
//! - **Progression**: task-toggle accounting, XP/level math, milestone
//!   evaluation
//! - **Storage**: versioned JSON document with migrations applied on load
//! - **Clock**: injectable time source so day boundaries are testable
//!
//! ## Key Components
//!
//! - [`Store`]: controlled entry point for all state mutations
//! - [`Document`]: the persisted aggregate
//! - [`Clock`]: trait abstracting wall-clock time and the local calendar day

pub mod clock;
pub mod error;
pub mod history;
pub mod model;
pub mod progression;
pub mod rollover;
pub mod storage;
pub mod store;

pub use clock::{day_key, Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result, StorageError};
pub use model::{
    DayRecord, Document, Milestone, MilestoneKind, Objective, ObjectiveKind, Settings, Task,
    TaskCategory, TaskStatus, UserProgress,
};
pub use storage::StateFile;
pub use store::{SettingsUpdate, Store, TaskUpdate};
