//! The state store: single controlled entry point for all mutations.
//!
//! A [`Store`] owns the in-memory [`Document`], the clock, and the state
//! file. Every operation applies one synchronous transform to the document
//! and then rewrites the full file, so on-disk state always reflects the
//! last completed mutation.
//!
//! Callers must run [`Store::initialize_day`] to completion before exposing
//! the interactive operations, so toggles never act on a stale day's tasks.

use crate::clock::{day_key, Clock, SystemClock};
use crate::error::Result;
use crate::model::{Document, Objective, Settings, Task, TaskCategory};
use crate::progression;
use crate::rollover;
use crate::storage::StateFile;

/// Partial update for a task's editable fields.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub category: Option<TaskCategory>,
    pub xp_reward: Option<u32>,
}

/// Partial update for settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub sound_enabled: Option<bool>,
    pub notifications_enabled: Option<bool>,
    pub pomodoro_work: Option<u32>,
    pub pomodoro_short_break: Option<u32>,
    pub pomodoro_long_break: Option<u32>,
}

/// Owner of the persisted state document.
pub struct Store {
    doc: Document,
    file: StateFile,
    clock: Box<dyn Clock>,
}

impl Store {
    /// Open the store at the default state path with the system clock.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn open() -> Result<Self> {
        let file = StateFile::default_path()?;
        Ok(Self::with_parts(file, Box::new(SystemClock)))
    }

    /// Open the store over an explicit state file and clock.
    pub fn with_parts(file: StateFile, clock: Box<dyn Clock>) -> Self {
        let doc = file.load();
        Self { doc, file, clock }
    }

    /// Read-only view of the current document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    fn commit(&mut self) -> Result<()> {
        self.file.save(&self.doc)?;
        Ok(())
    }

    /// Run the day rollover if the calendar day has changed since the last
    /// rollover. Returns whether a transition happened.
    pub fn initialize_day(&mut self) -> Result<bool> {
        let changed = rollover::initialize_day(&mut self.doc, self.clock.today());
        if changed {
            self.commit()?;
        }
        Ok(changed)
    }

    /// Flip a task between pending and completed. Unknown ids are no-ops.
    pub fn toggle_task(&mut self, id: &str) -> Result<bool> {
        let changed = progression::toggle_task(&mut self.doc, id, self.clock.now());
        if changed {
            self.commit()?;
        }
        Ok(changed)
    }

    /// Add a new pending task and return its id.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        category: TaskCategory,
        xp_reward: u32,
    ) -> Result<String> {
        let task = Task::new(title, category, xp_reward);
        let id = task.id.clone();
        self.doc.tasks.push(task);
        self.commit()?;
        Ok(id)
    }

    /// Remove a task. Earned XP and history are unaffected.
    pub fn remove_task(&mut self, id: &str) -> Result<()> {
        self.doc.tasks.retain(|t| t.id != id);
        self.commit()
    }

    /// Apply a partial update to a task's editable fields.
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> Result<()> {
        if let Some(task) = self.doc.tasks.iter_mut().find(|t| t.id == id) {
            if let Some(title) = update.title {
                task.title = title;
            }
            if let Some(category) = update.category {
                task.category = category;
            }
            if let Some(xp_reward) = update.xp_reward {
                task.xp_reward = xp_reward;
            }
        }
        self.commit()
    }

    /// Add a user-defined objective.
    pub fn add_objective(&mut self, objective: Objective) -> Result<()> {
        self.doc.objectives.push(objective);
        self.commit()
    }

    /// Remove an objective.
    pub fn remove_objective(&mut self, id: &str) -> Result<()> {
        self.doc.objectives.retain(|o| o.id != id);
        self.commit()
    }

    /// Set an objective's current progress value.
    pub fn update_objective_progress(&mut self, id: &str, current: f64) -> Result<()> {
        if let Some(objective) = self.doc.objectives.iter_mut().find(|o| o.id == id) {
            objective.current = current;
        }
        self.commit()
    }

    /// Apply a partial settings update.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<()> {
        let settings: &mut Settings = &mut self.doc.settings;
        if let Some(v) = update.sound_enabled {
            settings.sound_enabled = v;
        }
        if let Some(v) = update.notifications_enabled {
            settings.notifications_enabled = v;
        }
        if let Some(v) = update.pomodoro_work {
            settings.pomodoro_work = v;
        }
        if let Some(v) = update.pomodoro_short_break {
            settings.pomodoro_short_break = v;
        }
        if let Some(v) = update.pomodoro_long_break {
            settings.pomodoro_long_break = v;
        }
        self.commit()
    }

    /// Mark the morning ritual done for today.
    pub fn complete_morning_ritual(&mut self) -> Result<()> {
        self.doc.user.morning_ritual_date = day_key(self.clock.today());
        self.commit()
    }

    /// Snapshot today into history and mark the day ended.
    ///
    /// Tasks are not reset; the next rollover does that. Repeated calls on
    /// the same day overwrite the day's record, last values win.
    pub fn end_day(&mut self, note: Option<&str>) -> Result<()> {
        let today = day_key(self.clock.today());
        progression::end_day(&mut self.doc, &today, note.map(str::to_string));
        self.commit()
    }

    /// Unlock any milestones whose thresholds are now met; returns the
    /// titles of milestones unlocked by this call.
    pub fn check_milestones(&mut self) -> Result<Vec<String>> {
        let unlocked = progression::check_milestones(&mut self.doc, self.clock.now());
        if !unlocked.is_empty() {
            self.commit()?;
        }
        Ok(unlocked)
    }

    /// Adjust XP by a signed delta, floor-clamped at zero.
    pub fn add_xp(&mut self, delta: i64) -> Result<()> {
        progression::add_xp(&mut self.doc, delta);
        self.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::TaskStatus;
    use chrono::{TimeZone, Utc};

    fn store_in(dir: &tempfile::TempDir) -> (Store, ManualClock) {
        let clock = ManualClock::at(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
        let file = StateFile::at(dir.path().join("state.json"));
        let store = Store::with_parts(file, Box::new(clock.clone()));
        (store, clock)
    }

    #[test]
    fn mutations_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, clock) = store_in(&dir);
        store.initialize_day().unwrap();

        let id = store.document().tasks[0].id.clone();
        store.toggle_task(&id).unwrap();

        let reopened = Store::with_parts(
            StateFile::at(dir.path().join("state.json")),
            Box::new(clock),
        );
        assert_eq!(reopened.document().tasks[0].status, TaskStatus::Completed);
        assert_eq!(reopened.document().user.xp, 50);
    }

    #[test]
    fn unknown_ids_do_not_disturb_state() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, _clock) = store_in(&dir);
        store.initialize_day().unwrap();

        assert!(!store.toggle_task("nope").unwrap());
        store.remove_task("nope").unwrap();
        store.update_task("nope", TaskUpdate::default()).unwrap();
        store.update_objective_progress("nope", 5.0).unwrap();

        assert_eq!(store.document().tasks.len(), 10);
        assert_eq!(store.document().user.xp, 0);
    }

    #[test]
    fn add_update_remove_task_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, _clock) = store_in(&dir);

        let id = store
            .add_task("Ship the release", TaskCategory::Strategic, 80)
            .unwrap();
        assert_eq!(store.document().tasks.len(), 11);

        store
            .update_task(
                &id,
                TaskUpdate {
                    xp_reward: Some(120),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();
        let task = store
            .document()
            .tasks
            .iter()
            .find(|t| t.id == id)
            .unwrap();
        assert_eq!(task.xp_reward, 120);
        assert_eq!(task.title, "Ship the release");

        store.remove_task(&id).unwrap();
        assert_eq!(store.document().tasks.len(), 10);
    }

    #[test]
    fn settings_partial_update_leaves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, _clock) = store_in(&dir);

        store
            .update_settings(SettingsUpdate {
                pomodoro_work: Some(50),
                ..SettingsUpdate::default()
            })
            .unwrap();

        let settings = &store.document().settings;
        assert_eq!(settings.pomodoro_work, 50);
        assert_eq!(settings.pomodoro_short_break, 5);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn morning_ritual_stamps_today() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, _clock) = store_in(&dir);

        store.complete_morning_ritual().unwrap();
        assert_eq!(store.document().user.morning_ritual_date, "2024-06-01");
    }
}
