//! Suggestion options and their validation.
//!
//! Options are validated when they are built. Setters drop out-of-range
//! values and keep what was there before, which is also how query strings
//! from the web front end are treated.

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::task::EnergyLevel;

pub const DEFAULT_WORKING_HOURS: f64 = 8.0;
pub const MAX_WORKING_HOURS: f64 = 24.0;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;
pub const MAX_SUGGESTIONS_LIMIT: usize = 10;

/// Coarse part of the day used for energy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Before noon is morning, before 17:00 afternoon, the rest evening.
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            TimeOfDay::Morning
        } else if hour < 17 {
            TimeOfDay::Afternoon
        } else {
            TimeOfDay::Evening
        }
    }

    /// Part of the day at `now`'s local wall-clock hour.
    pub fn at(now: &DateTime<FixedOffset>) -> Self {
        Self::from_hour(now.hour())
    }

    /// Energy level a task should demand to suit this part of the day.
    pub fn expected_energy(&self) -> EnergyLevel {
        match self {
            TimeOfDay::Morning => EnergyLevel::High,
            TimeOfDay::Afternoon => EnergyLevel::Medium,
            TimeOfDay::Evening => EnergyLevel::Low,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            other => Err(format!("unknown time of day: {other}")),
        }
    }
}

/// Tunables for one suggestion run.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionOptions {
    working_hours: f64,
    max_suggestions: usize,
    consider_energy: bool,
    time_of_day: Option<TimeOfDay>,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            working_hours: DEFAULT_WORKING_HOURS,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            consider_energy: false,
            time_of_day: None,
        }
    }
}

impl SuggestionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the day's budget in hours. Ignored unless `0 < hours <= 24`.
    pub fn with_working_hours(mut self, hours: f64) -> Self {
        if hours.is_finite() && hours > 0.0 && hours <= MAX_WORKING_HOURS {
            self.working_hours = hours;
        } else {
            tracing::debug!(hours, "ignoring out-of-range working_hours");
        }
        self
    }

    /// Set the suggestion cap. Ignored unless `1 <= max <= 10`.
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        if (1..=MAX_SUGGESTIONS_LIMIT).contains(&max) {
            self.max_suggestions = max;
        } else {
            tracing::debug!(max, "ignoring out-of-range max_suggestions");
        }
        self
    }

    pub fn with_consider_energy(mut self, consider: bool) -> Self {
        self.consider_energy = consider;
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    /// Overlay options from an URL query string such as
    /// `working_hours=6&max_suggestions=5&consider_energy=true`.
    ///
    /// Unknown keys and invalid values are ignored; the current values stay.
    /// `consider_energy` is true only for `true` or `1` when present.
    pub fn apply_query(mut self, query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "working_hours" => match value.trim().parse::<f64>() {
                    Ok(hours) => self = self.with_working_hours(hours),
                    Err(_) => tracing::debug!(%value, "ignoring unparseable working_hours"),
                },
                "max_suggestions" => match value.trim().parse::<usize>() {
                    Ok(max) => self = self.with_max_suggestions(max),
                    Err(_) => tracing::debug!(%value, "ignoring unparseable max_suggestions"),
                },
                "consider_energy" => {
                    self.consider_energy = matches!(value.trim(), "true" | "1");
                }
                "time_of_day" => match value.parse::<TimeOfDay>() {
                    Ok(tod) => self.time_of_day = Some(tod),
                    Err(_) => tracing::debug!(%value, "ignoring unknown time_of_day"),
                },
                _ => {}
            }
        }
        self
    }

    /// Options built from defaults overlaid with `query`.
    pub fn from_query(query: &str) -> Self {
        Self::default().apply_query(query)
    }

    pub fn working_hours(&self) -> f64 {
        self.working_hours
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn consider_energy(&self) -> bool {
        self.consider_energy
    }

    pub fn time_of_day(&self) -> Option<TimeOfDay> {
        self.time_of_day
    }

    /// Minutes available today.
    pub fn budget_minutes(&self) -> f64 {
        self.working_hours * 60.0
    }

    /// Part of the day used for energy matching, or `None` when energy is
    /// not considered. Falls back to `now`'s hour when unset.
    pub fn effective_time_of_day(&self, now: &DateTime<FixedOffset>) -> Option<TimeOfDay> {
        if !self.consider_energy {
            return None;
        }
        Some(self.time_of_day.unwrap_or_else(|| TimeOfDay::at(now)))
    }
}
