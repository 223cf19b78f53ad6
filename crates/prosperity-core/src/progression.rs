//! Progression engine: task-toggle accounting, XP/level math, end-of-day
//! snapshotting and milestone evaluation.
//!
//! Every function here is a synchronous transform over the owned
//! [`Document`]; persistence happens in the store layer after the transform
//! completes. Unknown ids are silent no-ops.

use chrono::{DateTime, Utc};

use crate::history;
use crate::model::{DayRecord, Document, MilestoneKind, Task, TaskStatus};

/// XP required per level.
const XP_PER_LEVEL: u32 = 1000;

/// Level is a pure function of XP, never tracked independently.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Flip a task between pending and completed.
///
/// Completing adds the task's XP reward, stamps `completed_at` and bumps the
/// lifetime completion counter; uncompleting reverses all three. XP and the
/// counter are floor-clamped at zero, so a toggle sequence can never drive
/// them negative. Returns `false` (leaving the document untouched) for an
/// unknown id.
///
/// `last_active` is deliberately not touched here; only the rollover routine
/// advances it, so a late-night toggle cannot mask a pending rollover.
pub fn toggle_task(doc: &mut Document, id: &str, now: DateTime<Utc>) -> bool {
    let Some(task) = doc.tasks.iter_mut().find(|t| t.id == id) else {
        return false;
    };

    let was_completed = task.status == TaskStatus::Completed;
    if was_completed {
        task.status = TaskStatus::Pending;
        task.completed_at = None;
        doc.user.xp = doc.user.xp.saturating_sub(task.xp_reward);
        doc.user.total_tasks_completed = doc.user.total_tasks_completed.saturating_sub(1);
    } else {
        task.status = TaskStatus::Completed;
        task.completed_at = Some(now);
        doc.user.xp = doc.user.xp.saturating_add(task.xp_reward);
        doc.user.total_tasks_completed = doc.user.total_tasks_completed.saturating_add(1);
    }
    doc.user.level = level_for_xp(doc.user.xp);
    true
}

/// Adjust XP by a signed delta, floor-clamped at zero.
pub fn add_xp(doc: &mut Document, delta: i64) {
    let xp = i64::from(doc.user.xp) + delta;
    doc.user.xp = xp.clamp(0, i64::from(u32::MAX)) as u32;
    doc.user.level = level_for_xp(doc.user.xp);
}

/// Produce a day record from the current task list. Pure.
pub fn snapshot_day(tasks: &[Task], date: &str, note: Option<String>) -> DayRecord {
    let completed: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .collect();

    DayRecord {
        date: date.to_string(),
        tasks_completed: completed.len() as u32,
        tasks_total: tasks.len() as u32,
        xp_earned: completed.iter().map(|t| t.xp_reward).sum(),
        note,
    }
}

/// Snapshot today and upsert it into history, marking the day as ended.
///
/// Tasks stay visible and interactive until the next rollover, so calling
/// this again on the same day simply overwrites the day's record.
pub fn end_day(doc: &mut Document, today: &str, note: Option<String>) {
    let record = snapshot_day(&doc.tasks, today, note);
    history::upsert_record(&mut doc.user.history, record);
    doc.day_ended = true;
}

/// Evaluate locked milestones against the current metrics.
///
/// Any milestone whose metric has reached its target is stamped unlocked in
/// this pass; returns the titles of milestones unlocked on this specific
/// call. Unlocking is monotonic, so repeated calls never report a milestone
/// twice.
pub fn check_milestones(doc: &mut Document, now: DateTime<Utc>) -> Vec<String> {
    let mut newly_unlocked = Vec::new();

    for milestone in &mut doc.milestones {
        if milestone.unlocked_at.is_some() {
            continue;
        }

        let current = match milestone.kind {
            MilestoneKind::Streak => doc.user.streak,
            MilestoneKind::Level => doc.user.level,
            MilestoneKind::Xp => doc.user.xp,
            MilestoneKind::Tasks => doc.user.total_tasks_completed,
        };

        if current >= milestone.target {
            milestone.unlocked_at = Some(now);
            log::info!("milestone unlocked: {}", milestone.title);
            newly_unlocked.push(milestone.title.clone());
        }
    }

    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Milestone, TaskCategory};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn doc_with_tasks(rewards: &[u32]) -> Document {
        let mut doc = Document {
            tasks: Vec::new(),
            ..Document::default()
        };
        for (i, reward) in rewards.iter().enumerate() {
            let mut task = Task::new(format!("Task {i}"), TaskCategory::Core, *reward);
            task.id = format!("t{i}");
            doc.tasks.push(task);
        }
        doc
    }

    #[test]
    fn completing_a_task_awards_xp_and_stamps_timestamp() {
        let mut doc = doc_with_tasks(&[50]);
        assert!(toggle_task(&mut doc, "t0", now()));

        assert_eq!(doc.tasks[0].status, TaskStatus::Completed);
        assert_eq!(doc.tasks[0].completed_at, Some(now()));
        assert_eq!(doc.user.xp, 50);
        assert_eq!(doc.user.total_tasks_completed, 1);
    }

    #[test]
    fn double_toggle_restores_prior_values_exactly() {
        let mut doc = doc_with_tasks(&[120]);
        doc.user.xp = 300;
        doc.user.level = level_for_xp(300);
        doc.user.total_tasks_completed = 7;

        toggle_task(&mut doc, "t0", now());
        toggle_task(&mut doc, "t0", now());

        assert_eq!(doc.user.xp, 300);
        assert_eq!(doc.user.level, 1);
        assert_eq!(doc.user.total_tasks_completed, 7);
        assert_eq!(doc.tasks[0].status, TaskStatus::Pending);
        assert!(doc.tasks[0].completed_at.is_none());
    }

    #[test]
    fn unknown_task_id_is_a_no_op() {
        let mut doc = doc_with_tasks(&[50]);
        assert!(!toggle_task(&mut doc, "missing", now()));
        assert_eq!(doc.user.xp, 0);
        assert_eq!(doc.tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn uncompleting_never_drives_xp_negative() {
        let mut doc = doc_with_tasks(&[500]);
        // Complete, then drain XP out from under the toggle.
        toggle_task(&mut doc, "t0", now());
        add_xp(&mut doc, -400);
        toggle_task(&mut doc, "t0", now());

        assert_eq!(doc.user.xp, 0);
        assert_eq!(doc.user.level, 1);
    }

    #[test]
    fn level_crosses_at_thousand_xp_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(999), 1);
        assert_eq!(level_for_xp(1000), 2);
        assert_eq!(level_for_xp(4500), 5);
    }

    #[test]
    fn add_xp_clamps_at_zero() {
        let mut doc = doc_with_tasks(&[]);
        add_xp(&mut doc, -100);
        assert_eq!(doc.user.xp, 0);

        add_xp(&mut doc, 2500);
        assert_eq!(doc.user.xp, 2500);
        assert_eq!(doc.user.level, 3);
    }

    #[test]
    fn snapshot_counts_completed_tasks_and_xp() {
        let mut doc = doc_with_tasks(&[50, 100, 30]);
        toggle_task(&mut doc, "t0", now());
        toggle_task(&mut doc, "t2", now());

        let record = snapshot_day(&doc.tasks, "2024-06-01", Some("note".to_string()));
        assert_eq!(record.tasks_completed, 2);
        assert_eq!(record.tasks_total, 3);
        assert_eq!(record.xp_earned, 80);
        assert_eq!(record.note.as_deref(), Some("note"));
    }

    #[test]
    fn end_day_upserts_and_keeps_tasks_interactive() {
        let mut doc = doc_with_tasks(&[50, 100]);
        toggle_task(&mut doc, "t0", now());

        end_day(&mut doc, "2024-06-01", Some("first".to_string()));
        assert!(doc.day_ended);
        assert_eq!(doc.user.history.len(), 1);
        assert_eq!(doc.tasks[0].status, TaskStatus::Completed);

        // Ending again the same day overwrites, never duplicates.
        toggle_task(&mut doc, "t1", now());
        end_day(&mut doc, "2024-06-01", Some("second".to_string()));
        assert_eq!(doc.user.history.len(), 1);
        assert_eq!(doc.user.history[0].tasks_completed, 2);
        assert_eq!(doc.user.history[0].note.as_deref(), Some("second"));
    }

    #[test]
    fn milestones_unlock_once_and_report_only_new_titles() {
        let mut doc = doc_with_tasks(&[]);
        doc.user.streak = 7;

        let first = check_milestones(&mut doc, now());
        assert_eq!(first, vec!["First Step".to_string(), "Iron Week".to_string()]);

        let second = check_milestones(&mut doc, now());
        assert!(second.is_empty());

        let unlocked: Vec<&Milestone> = doc
            .milestones
            .iter()
            .filter(|m| m.unlocked_at.is_some())
            .collect();
        assert_eq!(unlocked.len(), 2);
    }

    #[test]
    fn xp_milestone_unlocks_at_threshold_and_timestamp_is_stable() {
        let mut doc = doc_with_tasks(&[]);
        add_xp(&mut doc, 9_999);
        assert!(check_milestones(&mut doc, now()).is_empty());

        add_xp(&mut doc, 1);
        let unlocked = check_milestones(&mut doc, now());
        assert_eq!(unlocked, vec!["10K XP".to_string()]);

        let stamped = doc
            .milestones
            .iter()
            .find(|m| m.id == "m10")
            .and_then(|m| m.unlocked_at);
        assert_eq!(stamped, Some(now()));

        let later = now() + chrono::Duration::days(3);
        assert!(check_milestones(&mut doc, later).is_empty());
        let still = doc
            .milestones
            .iter()
            .find(|m| m.id == "m10")
            .and_then(|m| m.unlocked_at);
        assert_eq!(still, stamped);
    }

    proptest! {
        /// Any toggle sequence keeps the level law and non-negative counters.
        #[test]
        fn toggle_sequences_preserve_invariants(
            rewards in proptest::collection::vec(0u32..500, 1..8),
            toggles in proptest::collection::vec(0usize..8, 0..50),
        ) {
            let mut doc = doc_with_tasks(&rewards);
            for idx in toggles {
                toggle_task(&mut doc, &format!("t{idx}"), now());

                prop_assert_eq!(doc.user.level, level_for_xp(doc.user.xp));
                for task in &doc.tasks {
                    prop_assert_eq!(
                        task.status == TaskStatus::Completed,
                        task.completed_at.is_some()
                    );
                }
            }
        }

        /// Toggling each touched task an even number of times restores XP.
        #[test]
        fn paired_toggles_cancel_out(
            rewards in proptest::collection::vec(0u32..500, 1..6),
            picks in proptest::collection::vec(0usize..6, 0..20),
        ) {
            let mut doc = doc_with_tasks(&rewards);
            for idx in &picks {
                toggle_task(&mut doc, &format!("t{idx}"), now());
            }
            for idx in picks.iter().rev() {
                toggle_task(&mut doc, &format!("t{idx}"), now());
            }
            prop_assert_eq!(doc.user.xp, 0);
            prop_assert_eq!(doc.user.total_tasks_completed, 0);
            prop_assert_eq!(doc.user.level, 1);
        }
    }
}
