//! Task model consumed by the relatedness and suggestion engines.
//!
//! Tasks are owned by the hosting application and arrive here as an already
//! materialized snapshot. Nothing in this crate mutates them.

pub mod dates;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Most urgent priority rank.
pub const PRIORITY_URGENT: u8 = 0;
/// High priority rank.
pub const PRIORITY_HIGH: u8 = 1;
/// Medium priority rank (default).
pub const PRIORITY_MEDIUM: u8 = 2;
/// Low priority rank.
pub const PRIORITY_LOW: u8 = 3;

/// Estimate used for tasks that carry no `estimated_time_minutes`.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 30;

/// Human-readable label for a priority rank.
pub fn priority_label(priority: u8) -> &'static str {
    match priority {
        PRIORITY_URGENT => "Urgent",
        PRIORITY_HIGH => "High",
        PRIORITY_MEDIUM => "Medium",
        _ => "Low",
    }
}

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet (initial state)
    #[default]
    Todo,
    /// Currently being worked on
    InProgress,
    /// Finished
    Done,
    /// Abandoned
    Cancelled,
}

impl TaskStatus {
    /// Done and cancelled tasks are closed; everything else is still open.
    pub fn is_closed(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Energy a task demands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Low energy (e.g., end of day)
    Low,
    /// Medium energy
    Medium,
    /// High energy (e.g., morning)
    High,
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(format!("unknown energy level: {other}")),
        }
    }
}

/// Typed view over the open metadata bag stored with each task.
///
/// Deserialization never fails: a non-object value yields empty metadata and
/// fields of the wrong shape are treated as absent. The legacy `blocked_by`
/// key is folded into `dependencies` here, so the rest of the crate only ever
/// looks at one field. Keys this type does not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskMetadata {
    /// Note the task was extracted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    /// Goal the task contributes to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Planned date/time, preferred over `due_date` for scheduling signals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    /// Ids of tasks that must be done first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Unmodelled keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskMetadata {
    /// Build metadata from an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let dependencies = string_list(map.get("dependencies"))
            .or_else(|| string_list(map.get("blocked_by")))
            .unwrap_or_default();

        let extra = map
            .iter()
            .filter(|(key, _)| {
                !matches!(
                    key.as_str(),
                    "note_id" | "goal" | "scheduled_at" | "dependencies" | "blocked_by"
                )
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            note_id: non_empty_string(map.get("note_id")),
            goal: non_empty_string(map.get("goal")),
            scheduled_at: non_empty_string(map.get("scheduled_at")),
            dependencies,
            extra,
        }
    }
}

impl<'de> Deserialize<'de> for TaskMetadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(TaskMetadata::from_value(&value))
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// A user's task as exported by the hosting application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within a snapshot
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle status
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority rank, 0 = Urgent ... 3 = Low
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Tags in insertion order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Due date, `YYYY-MM-DD` or RFC 3339
    #[serde(default)]
    pub due_date: Option<String>,
    /// Typed metadata
    #[serde(default)]
    pub metadata: TaskMetadata,
    /// Estimated effort in minutes
    #[serde(default)]
    pub estimated_time_minutes: Option<u32>,
    /// Energy the task demands
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
}

fn default_priority() -> u8 {
    PRIORITY_MEDIUM
}

impl Task {
    /// Create a new todo task with a random v4 id and medium priority.
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: PRIORITY_MEDIUM,
            tags: Vec::new(),
            due_date: None,
            metadata: TaskMetadata::default(),
            estimated_time_minutes: None,
            energy_level: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_due_date(mut self, due: impl Into<String>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_time_minutes = Some(minutes);
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy_level = Some(energy);
        self
    }

    pub fn with_metadata(mut self, metadata: TaskMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Ids this task depends on.
    pub fn dependencies(&self) -> &[String] {
        &self.metadata.dependencies
    }

    /// Whether `id` appears in this task's dependency list.
    pub fn depends_on(&self, id: &str) -> bool {
        self.metadata.dependencies.iter().any(|dep| dep == id)
    }

    /// Not done and not cancelled.
    pub fn is_open(&self) -> bool {
        !self.status.is_closed()
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == PRIORITY_URGENT
    }

    /// Estimate in minutes, falling back to [`DEFAULT_ESTIMATE_MINUTES`].
    pub fn estimated_minutes_or_default(&self) -> u32 {
        self.estimated_time_minutes.unwrap_or(DEFAULT_ESTIMATE_MINUTES)
    }

    /// Calendar day used by the schedule-proximity signals.
    ///
    /// `metadata.scheduled_at` wins over `due_date` when present. If the
    /// chosen string does not parse, the task has no schedule date.
    pub fn schedule_date(&self) -> Option<NaiveDate> {
        let raw = self
            .metadata
            .scheduled_at
            .as_deref()
            .or(self.due_date.as_deref())?;
        dates::parse_calendar_date(raw)
    }

    /// Whether the due date lies strictly before `now`.
    ///
    /// RFC 3339 due dates compare as instants. A date-only due date compares
    /// by calendar day against `now`'s local date, so a task due today is
    /// not overdue until the day after.
    pub fn is_overdue(&self, now: &DateTime<FixedOffset>) -> bool {
        self.due_date
            .as_deref()
            .is_some_and(|due| dates::is_before(due, now))
    }
}
