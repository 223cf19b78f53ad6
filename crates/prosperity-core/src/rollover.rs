//! Day-rollover engine.
//!
//! Runs once per application start. Detects a calendar-day boundary crossing
//! against `user.last_active` and performs the transition exactly once:
//! snapshot the outgoing day (unless `end_day` already did), apply the
//! streak rules, reset task state, stamp the new day.

use chrono::NaiveDate;

use crate::clock::day_key;
use crate::history;
use crate::model::{Document, TaskStatus};
use crate::progression;

/// Perform the day transition if `today` differs from `user.last_active`.
///
/// Returns `true` if the document changed. Idempotent within a calendar
/// day: a second call with the same `today` is a no-op.
///
/// Streak rule: the streak extends only when `last_active` is exactly
/// yesterday and that day's record shows at least one completion. A gap of
/// two or more days, or a day with zero completions, resets it to 0. An
/// arbitrary gap still takes exactly one snapshot, for `last_active`.
pub fn initialize_day(doc: &mut Document, today: NaiveDate) -> bool {
    let today_key = day_key(today);
    if doc.user.last_active == today_key {
        return false;
    }

    // First run: nothing to snapshot, just anchor the day.
    if doc.user.last_active.is_empty() {
        doc.user.last_active = today_key;
        return true;
    }

    let last_active = doc.user.last_active.clone();
    log::info!("day rollover: {last_active} -> {today_key}");

    // end_day may have already saved a record for the outgoing day; if not,
    // snapshot the current task list now.
    let outgoing = match doc.user.history.iter().find(|r| r.date == last_active) {
        Some(record) => record.clone(),
        None => {
            let record = progression::snapshot_day(&doc.tasks, &last_active, None);
            history::upsert_record(&mut doc.user.history, record.clone());
            record
        }
    };

    let yesterday_key = day_key(today - chrono::Duration::days(1));
    let new_streak = if last_active == yesterday_key && outgoing.tasks_completed > 0 {
        doc.user.streak + 1
    } else {
        0
    };
    doc.user.streak = new_streak;
    doc.user.best_streak = doc.user.best_streak.max(new_streak);

    for task in &mut doc.tasks {
        task.status = TaskStatus::Pending;
        task.completed_at = None;
    }

    doc.day_ended = false;
    doc.user.last_active = today_key;
    true
}
