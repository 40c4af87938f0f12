//! Task snapshot loading.
//!
//! A snapshot is the JSON export of one user's tasks, either a bare array or
//! an object with a `tasks` array. Ids must be unique within a snapshot.

use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{CoreError, Result, ValidationError};
use crate::task::Task;

/// Parse a snapshot from JSON text.
///
/// # Errors
///
/// Returns `CoreError::Json` for malformed JSON,
/// `ValidationError::InvalidSnapshot` naming the offending entry when the
/// document has the wrong shape or a task fails to decode, and
/// `ValidationError::DuplicateTaskId` when an id repeats.
pub fn parse_pool(json: &str) -> Result<Vec<Task>> {
    let (prefix, entries) = match serde_json::from_str::<Value>(json)? {
        Value::Array(entries) => ("", entries),
        Value::Object(mut root) => match root.remove("tasks") {
            Some(Value::Array(entries)) => ("tasks", entries),
            _ => return Err(invalid_snapshot("tasks", "expected an array of tasks")),
        },
        _ => {
            return Err(invalid_snapshot(
                "$",
                "expected an array or an object with a `tasks` array",
            ))
        }
    };

    let mut tasks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let task: Task = serde_json::from_value(entry)
            .map_err(|e| invalid_snapshot(&format!("{prefix}[{index}]"), &e.to_string()))?;
        tasks.push(task);
    }

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(ValidationError::DuplicateTaskId(task.id.clone()).into());
        }
    }

    tracing::debug!(count = tasks.len(), "parsed task snapshot");
    Ok(tasks)
}

fn invalid_snapshot(location: &str, message: &str) -> CoreError {
    ValidationError::InvalidSnapshot {
        location: location.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Read and parse a snapshot file.
pub fn load_pool(path: impl AsRef<Path>) -> Result<Vec<Task>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_pool(&content)
}
