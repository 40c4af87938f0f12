//! Daily task suggestions.
//!
//! Picks what to work on today from a task snapshot:
//! 1. Drop closed tasks and tasks blocked by an unfinished dependency
//! 2. Rank the rest: overdue first, then priority, then (optionally) energy fit
//! 3. Walk the ranking and take tasks while they fit the working-hours budget
//!
//! Workload insights are reported over the whole eligible set, not only the
//! selected tasks. The caller supplies `now`; nothing here reads the clock.

mod insights;
mod options;

pub use insights::{SuggestionInsights, Workload, HEAVY_WORKLOAD_RATIO, LIGHT_WORKLOAD_RATIO};
pub use options::{
    SuggestionOptions, TimeOfDay, DEFAULT_MAX_SUGGESTIONS, DEFAULT_WORKING_HOURS,
    MAX_SUGGESTIONS_LIMIT, MAX_WORKING_HOURS,
};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::task::{EnergyLevel, Task, TaskStatus};

/// Tasks chosen for today plus workload insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SuggestionResult {
    /// Selected tasks in ranking order
    pub suggestions: Vec<Task>,
    /// Aggregates over the eligible set
    pub insights: SuggestionInsights,
}

/// An eligible task with its precomputed sort keys.
struct Ranked<'a> {
    task: &'a Task,
    overdue: bool,
    energy_match: bool,
}

/// Suggestion engine over a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    options: SuggestionOptions,
}

impl SuggestionEngine {
    pub fn new(options: SuggestionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SuggestionOptions {
        &self.options
    }

    /// Select today's tasks from `pool`.
    pub fn suggest(&self, pool: &[Task], now: &DateTime<FixedOffset>) -> SuggestionResult {
        let statuses: HashMap<&str, TaskStatus> =
            pool.iter().map(|t| (t.id.as_str(), t.status)).collect();

        let expected_energy = self
            .options
            .effective_time_of_day(now)
            .map(|tod| tod.expected_energy());

        let mut blocked_count = 0;
        let mut ranked: Vec<Ranked<'_>> = Vec::new();
        for task in pool.iter().filter(|t| t.is_open()) {
            if is_blocked(task, &statuses) {
                tracing::debug!(task = %task.id, "task blocked by unfinished dependency");
                blocked_count += 1;
                continue;
            }
            ranked.push(Ranked {
                task,
                overdue: task.is_overdue(now),
                energy_match: energy_matches(task, expected_energy),
            });
        }

        // Stable: equal keys keep snapshot order.
        ranked.sort_by(|a, b| compare(a, b, expected_energy.is_some()));

        let budget = self.options.budget_minutes();
        let max = self.options.max_suggestions();
        let mut selected_minutes: u64 = 0;
        let mut suggestions = Vec::new();
        for entry in &ranked {
            if suggestions.len() >= max {
                break;
            }
            let minutes = u64::from(entry.task.estimated_minutes_or_default());
            if (selected_minutes + minutes) as f64 > budget {
                tracing::debug!(
                    task = %entry.task.id,
                    minutes,
                    remaining = budget - selected_minutes as f64,
                    "task does not fit remaining budget"
                );
                continue;
            }
            selected_minutes += minutes;
            suggestions.push(entry.task.clone());
        }

        let total_minutes: u64 = ranked
            .iter()
            .map(|r| u64::from(r.task.estimated_minutes_or_default()))
            .sum();

        let insights = SuggestionInsights {
            workload: Workload::classify(total_minutes, budget),
            total_minutes,
            selected_minutes,
            eligible_count: ranked.len(),
            blocked_count,
            urgent_count: ranked.iter().filter(|r| r.task.is_urgent()).count(),
            overdue_count: ranked.iter().filter(|r| r.overdue).count(),
        };

        tracing::debug!(
            pool = pool.len(),
            eligible = insights.eligible_count,
            blocked = blocked_count,
            selected = suggestions.len(),
            workload = %insights.workload,
            "computed suggestions"
        );

        SuggestionResult {
            suggestions,
            insights,
        }
    }
}

/// A task is blocked when any dependency names a pool task that is not done.
/// Ids missing from the pool count as satisfied.
fn is_blocked(task: &Task, statuses: &HashMap<&str, TaskStatus>) -> bool {
    task.dependencies()
        .iter()
        .any(|dep| matches!(statuses.get(dep.as_str()), Some(status) if *status != TaskStatus::Done))
}

fn energy_matches(task: &Task, expected: Option<EnergyLevel>) -> bool {
    match (task.energy_level, expected) {
        (Some(actual), Some(expected)) => actual == expected,
        _ => false,
    }
}

fn compare(a: &Ranked<'_>, b: &Ranked<'_>, consider_energy: bool) -> Ordering {
    b.overdue
        .cmp(&a.overdue)
        .then_with(|| a.task.priority.cmp(&b.task.priority))
        .then_with(|| {
            if consider_energy {
                b.energy_match.cmp(&a.energy_match)
            } else {
                Ordering::Equal
            }
        })
}

/// Select today's tasks from `pool` with the given options.
pub fn suggest(
    pool: &[Task],
    options: &SuggestionOptions,
    now: &DateTime<FixedOffset>,
) -> SuggestionResult {
    SuggestionEngine::new(options.clone()).suggest(pool, now)
}
