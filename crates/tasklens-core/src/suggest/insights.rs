//! Aggregate workload figures reported next to the suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this share of the budget the day is `light`.
pub const LIGHT_WORKLOAD_RATIO: f64 = 0.5;
/// Above this share of the budget the day is `heavy`.
pub const HEAVY_WORKLOAD_RATIO: f64 = 1.0;

/// Coarse label for total eligible effort against the day's budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    #[default]
    Light,
    Balanced,
    Heavy,
}

impl Workload {
    /// Bucket `total_minutes` against `budget_minutes`.
    ///
    /// `light` below 50% of the budget, `heavy` above 100%, `balanced`
    /// in between (both ends inclusive).
    pub fn classify(total_minutes: u64, budget_minutes: f64) -> Self {
        let total = total_minutes as f64;
        if total < budget_minutes * LIGHT_WORKLOAD_RATIO {
            Workload::Light
        } else if total > budget_minutes * HEAVY_WORKLOAD_RATIO {
            Workload::Heavy
        } else {
            Workload::Balanced
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Workload::Light => "light",
            Workload::Balanced => "balanced",
            Workload::Heavy => "heavy",
        };
        f.write_str(s)
    }
}

/// Counters over the eligible set of one suggestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SuggestionInsights {
    /// Workload bucket for `total_minutes`
    pub workload: Workload,
    /// Estimated minutes across all eligible tasks
    pub total_minutes: u64,
    /// Estimated minutes across the selected tasks
    pub selected_minutes: u64,
    /// Open, unblocked tasks
    pub eligible_count: usize,
    /// Open tasks waiting on an unfinished dependency
    pub blocked_count: usize,
    /// Eligible tasks at priority 0
    pub urgent_count: usize,
    /// Eligible tasks past their due date
    pub overdue_count: usize,
}
