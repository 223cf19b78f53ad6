//! Schema migrations for the state document.
//!
//! The document carries an integer version. Upgrades run on load as pure
//! transforms over the raw JSON value, in order, never skipped, before the
//! typed [`Document`] is deserialized. A document created at version 1 goes
//! through every step in a single load.

use serde_json::{Map, Value};

use crate::history;
use crate::model::{milestone_catalog, Document, Settings};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const CURRENT_VERSION: u32 = 3;

/// Upgrade a raw document to the current schema and deserialize it.
///
/// A document that cannot be recognized even after upgrading degrades to
/// the default seeded document rather than failing the load.
pub fn migrate(mut raw: Value) -> Document {
    let version = raw
        .get("version")
        .and_then(Value::as_u64)
        .unwrap_or(1) as u32;

    if version < CURRENT_VERSION {
        log::info!("upgrading state document from version {version} to {CURRENT_VERSION}");
    }

    if version < 2 {
        migrate_v2(&mut raw);
    }
    if version < 3 {
        migrate_v3(&mut raw);
    }

    if let Some(root) = raw.as_object_mut() {
        root.insert("version".to_string(), Value::from(CURRENT_VERSION));
    }

    match serde_json::from_value(raw) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("unrecognized state document, starting fresh: {e}");
            Document::default()
        }
    }
}

fn user_object(root: &mut Map<String, Value>) -> Option<&mut Map<String, Value>> {
    root.get_mut("user").and_then(Value::as_object_mut)
}

/// Migration v2: settings block, best-streak counter, history record shape.
///
/// - `settings` gains defaults if absent
/// - `user.best_streak` defaults to the current streak (or 0)
/// - `user.history` is normalized from the legacy `{date: xp}` map shape
fn migrate_v2(raw: &mut Value) {
    let Some(root) = raw.as_object_mut() else {
        return;
    };

    if !root.contains_key("settings") {
        if let Ok(settings) = serde_json::to_value(Settings::default()) {
            root.insert("settings".to_string(), settings);
        }
    }

    if let Some(user) = user_object(root) {
        if !user.contains_key("best_streak") {
            let streak = user.get("streak").and_then(Value::as_u64).unwrap_or(0);
            user.insert("best_streak".to_string(), Value::from(streak));
        }

        let history_is_array = user.get("history").map(Value::is_array).unwrap_or(false);
        if !history_is_array {
            let migrated =
                history::migrate_history(user.get("history").unwrap_or(&Value::Null));
            if let Ok(value) = serde_json::to_value(migrated) {
                user.insert("history".to_string(), value);
            }
        }
    }
}

/// Migration v3: morning ritual, lifetime task counter, milestone catalog.
fn migrate_v3(raw: &mut Value) {
    let Some(root) = raw.as_object_mut() else {
        return;
    };

    if let Some(user) = user_object(root) {
        if !user.contains_key("morning_ritual_date") {
            user.insert("morning_ritual_date".to_string(), Value::from(""));
        }
        if !user.contains_key("total_tasks_completed") {
            user.insert("total_tasks_completed".to_string(), Value::from(0));
        }
    }

    if !root.contains_key("milestones") {
        if let Ok(catalog) = serde_json::to_value(milestone_catalog()) {
            root.insert("milestones".to_string(), catalog);
        }
    }
}
