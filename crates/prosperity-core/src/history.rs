//! History ledger helpers and the legacy-format migrator.
//!
//! History is an append-only ledger of [`DayRecord`]s, deduplicated by date:
//! writing a record for an existing date replaces the old entry. Very old
//! documents stored history as a bare `{date: xp}` map, which
//! [`migrate_history`] normalizes into records.

use serde_json::Value;

use crate::model::DayRecord;

/// Insert a record, replacing any existing record for the same date.
///
/// Keeps the ledger ordered by date.
pub fn upsert_record(history: &mut Vec<DayRecord>, record: DayRecord) {
    history.retain(|r| r.date != record.date);
    history.push(record);
    history.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Normalize a raw history value into a record list.
///
/// - An array passes through; entries that do not parse as records are dropped.
/// - A legacy `{date: xp}` map becomes records with zero task counts.
/// - Any other shape yields an empty history.
///
/// Idempotent: re-running on already-migrated data is a no-op.
pub fn migrate_history(raw: &Value) -> Vec<DayRecord> {
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        Value::Object(map) => {
            let mut records: Vec<DayRecord> = map
                .iter()
                .filter_map(|(date, xp)| {
                    let xp_earned = xp
                        .as_u64()
                        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
                        .or_else(|| xp.as_f64().map(|f| f.max(0.0) as u32))?;
                    Some(DayRecord {
                        date: date.clone(),
                        tasks_completed: 0,
                        tasks_total: 0,
                        xp_earned,
                        note: None,
                    })
                })
                .collect();
            records.sort_by(|a, b| a.date.cmp(&b.date));
            records
        }
        _ => Vec::new(),
    }
}
