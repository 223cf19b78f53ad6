//! Domain model: the persisted state document and everything inside it.
//!
//! The whole application state is a single [`Document`] aggregate
//! (tasks, objectives, user progression, settings, milestones) serialized
//! atomically after every mutation. Invariants:
//!
//! - `Task::completed_at` is `Some` iff `Task::status == Completed`
//! - `UserProgress::level` is always `xp / 1000 + 1`
//! - `UserProgress::history` holds at most one [`DayRecord`] per date
//! - `Milestone::unlocked_at` is set at most once and never cleared

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::migrations::CURRENT_VERSION;

/// Daily completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    Skipped,
    Failed,
}

/// Category a recurring task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Core,
    Technical,
    Expansion,
    Passive,
    Spiritual,
    Strategic,
}

/// A recurring daily task.
///
/// Tasks persist across days; only their `status`/`completed_at` are reset
/// by the day rollover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: TaskCategory,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub xp_reward: u32,
    /// Set iff `status == Completed`.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new pending task with a fresh id.
    pub fn new(title: impl Into<String>, category: TaskCategory, xp_reward: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            category,
            status: TaskStatus::Pending,
            xp_reward,
            completed_at: None,
        }
    }

    fn seed(id: &str, title: &str, category: TaskCategory, xp_reward: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category,
            status: TaskStatus::Pending,
            xp_reward,
            completed_at: None,
        }
    }
}

/// Time horizon of an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
    Daily,
    Weekly,
    Monthly,
    Life,
}

/// A user-defined numeric goal.
///
/// Progress percentage is derived from `current`/`target` on demand; it is
/// deliberately not stored to avoid a stale copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub title: String,
    pub kind: ObjectiveKind,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub unit: String,
}

impl Objective {
    /// Create a new objective at zero progress with a fresh id.
    pub fn new(
        title: impl Into<String>,
        kind: ObjectiveKind,
        target: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            kind,
            target,
            current: 0.0,
            unit: unit.into(),
        }
    }

    /// Completion percentage in `0.0..=100.0`, derived from current/target.
    pub fn progress_percent(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.current / self.target * 100.0).clamp(0.0, 100.0)
    }
}

/// Immutable snapshot of one day's outcome.
///
/// At most one record exists per date; writing a record for an existing
/// date replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: String,
    #[serde(default)]
    pub tasks_completed: u32,
    #[serde(default)]
    pub tasks_total: u32,
    #[serde(default)]
    pub xp_earned: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Metric a milestone threshold is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    Streak,
    Level,
    Xp,
    Tasks,
}

/// A one-time achievement unlocked when a tracked metric crosses a threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: MilestoneKind,
    pub target: u32,
    pub reward: String,
    /// Stamped exactly once when the threshold is first crossed.
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Milestone {
    fn catalog_entry(
        id: &str,
        title: &str,
        description: &str,
        kind: MilestoneKind,
        target: u32,
        reward: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            kind,
            target,
            reward: reward.to_string(),
            unlocked_at: None,
        }
    }
}

/// User progression counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub best_streak: u32,
    /// Day key of the most recent rollover; empty before the first run.
    #[serde(default)]
    pub last_active: String,
    #[serde(default)]
    pub history: Vec<DayRecord>,
    /// Day key of the last completed morning ritual; empty if never done.
    #[serde(default)]
    pub morning_ritual_date: String,
    #[serde(default)]
    pub total_tasks_completed: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            best_streak: 0,
            last_active: String::new(),
            history: Vec::new(),
            morning_ritual_date: String::new(),
            total_tasks_completed: 0,
        }
    }
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default)]
    pub notifications_enabled: bool,
    #[serde(default = "default_pomodoro_work")]
    pub pomodoro_work: u32,
    #[serde(default = "default_pomodoro_short_break")]
    pub pomodoro_short_break: u32,
    #[serde(default = "default_pomodoro_long_break")]
    pub pomodoro_long_break: u32,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_level() -> u32 {
    1
}
fn default_pomodoro_work() -> u32 {
    25
}
fn default_pomodoro_short_break() -> u32 {
    5
}
fn default_pomodoro_long_break() -> u32 {
    15
}
fn default_version() -> u32 {
    CURRENT_VERSION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            notifications_enabled: false,
            pomodoro_work: default_pomodoro_work(),
            pomodoro_short_break: default_pomodoro_short_break(),
            pomodoro_long_break: default_pomodoro_long_break(),
        }
    }
}

/// The whole persisted state document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub user: UserProgress,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Set by `end_day`, cleared by the next rollover.
    #[serde(default)]
    pub day_ended: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            tasks: seed_tasks(),
            objectives: Vec::new(),
            user: UserProgress::default(),
            settings: Settings::default(),
            milestones: milestone_catalog(),
            day_ended: false,
        }
    }
}

/// Default recurring tasks seeded at first run.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task::seed("1", "Morning exercise", TaskCategory::Core, 50),
        Task::seed("2", "Programming", TaskCategory::Core, 100),
        Task::seed("3", "Funnel / traffic / AI work", TaskCategory::Core, 100),
        Task::seed("4", "AI or Bitcoin study (rotating)", TaskCategory::Technical, 40),
        Task::seed("5", "English practice (20-30 min)", TaskCategory::Technical, 30),
        Task::seed("6", "Social media - one action", TaskCategory::Technical, 30),
        Task::seed("7", "Reading", TaskCategory::Expansion, 30),
        Task::seed("8", "Scripture study", TaskCategory::Expansion, 40),
        Task::seed("9", "Audio on the commute", TaskCategory::Passive, 10),
        Task::seed("10", "Fasting day", TaskCategory::Spiritual, 100),
    ]
}

/// Fixed milestone catalog, seeded at first run and by the v3 migration.
pub fn milestone_catalog() -> Vec<Milestone> {
    vec![
        Milestone::catalog_entry(
            "m1",
            "First Step",
            "Complete your first day",
            MilestoneKind::Streak,
            1,
            "You proved you can start.",
        ),
        Milestone::catalog_entry(
            "m2",
            "Iron Week",
            "Hold a 7-day streak",
            MilestoneKind::Streak,
            7,
            "A special meal or a well-earned rest.",
        ),
        Milestone::catalog_entry(
            "m3",
            "Unshakable Fortnight",
            "14 consecutive days",
            MilestoneKind::Streak,
            14,
            "Buy something you have wanted for a while.",
        ),
        Milestone::catalog_entry(
            "m4",
            "Month of Steel",
            "30 days without failing",
            MilestoneKind::Streak,
            30,
            "A full guilt-free day off.",
        ),
        Milestone::catalog_entry(
            "m5",
            "Soldier",
            "Reach level 5",
            MilestoneKind::Level,
            5,
            "You are no longer a recruit.",
        ),
        Milestone::catalog_entry(
            "m6",
            "Centurion",
            "Reach level 10",
            MilestoneKind::Level,
            10,
            "A valuable gift to yourself.",
        ),
        Milestone::catalog_entry(
            "m7",
            "General",
            "Reach level 25",
            MilestoneKind::Level,
            25,
            "You are an execution machine.",
        ),
        Milestone::catalog_entry(
            "m8",
            "Executor",
            "Complete 100 tasks in total",
            MilestoneKind::Tasks,
            100,
            "Discipline is part of you now.",
        ),
        Milestone::catalog_entry(
            "m9",
            "Relentless",
            "Complete 500 tasks in total",
            MilestoneKind::Tasks,
            500,
            "Nothing stops you anymore.",
        ),
        Milestone::catalog_entry(
            "m10",
            "10K XP",
            "Accumulate 10,000 XP",
            MilestoneKind::Xp,
            10000,
            "Invest in something for your growth.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_is_seeded() {
        let doc = Document::default();
        assert_eq!(doc.version, CURRENT_VERSION);
        assert_eq!(doc.tasks.len(), 10);
        assert_eq!(doc.milestones.len(), 10);
        assert!(doc.objectives.is_empty());
        assert!(doc.user.history.is_empty());
        assert_eq!(doc.user.level, 1);
        assert!(!doc.day_ended);
    }

    #[test]
    fn seed_tasks_are_pending_without_timestamps() {
        for task in seed_tasks() {
            assert_eq!(task.status, TaskStatus::Pending);
            assert!(task.completed_at.is_none());
        }
    }

    #[test]
    fn milestone_catalog_is_locked() {
        for m in milestone_catalog() {
            assert!(m.unlocked_at.is_none());
        }
    }

    #[test]
    fn objective_progress_is_derived() {
        let mut obj = Objective::new("Read books", ObjectiveKind::Monthly, 4.0, "books");
        assert_eq!(obj.progress_percent(), 0.0);

        obj.current = 1.0;
        assert_eq!(obj.progress_percent(), 25.0);

        obj.current = 8.0;
        assert_eq!(obj.progress_percent(), 100.0);
    }

    #[test]
    fn objective_with_zero_target_reports_zero_progress() {
        let mut obj = Objective::new("Undefined", ObjectiveKind::Life, 0.0, "");
        obj.current = 3.0;
        assert_eq!(obj.progress_percent(), 0.0);
    }

    #[test]
    fn document_roundtrips_through_json() {
        let doc = Document::default();
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, doc.version);
        assert_eq!(parsed.tasks.len(), doc.tasks.len());
        assert_eq!(parsed.settings, doc.settings);
    }

    #[test]
    fn task_status_serializes_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let json = serde_json::to_string(&TaskCategory::Spiritual).unwrap();
        assert_eq!(json, "\"spiritual\"");
    }

    #[test]
    fn empty_json_object_deserializes_to_bare_document() {
        // Defensive defaults: every field is optional on the wire.
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.version, CURRENT_VERSION);
        assert!(doc.tasks.is_empty());
        assert_eq!(doc.user.level, 1);
        assert_eq!(doc.settings, Settings::default());
    }
}
