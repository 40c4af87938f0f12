//! Task relatedness scoring.
//!
//! Scores how closely each task in a pool relates to one focal task using
//! additive, independent signals:
//! - Same note origin (`metadata.note_id`)
//! - Same goal (`metadata.goal`)
//! - Shared tags (per overlapping tag)
//! - Schedule proximity (same day, otherwise same ISO week)
//! - Dependency link in either direction
//!
//! Every signal that fires leaves a human-readable reason behind, so the
//! ranking can be explained back to the user.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::task::{dates, Task};

/// Default number of related tasks returned.
pub const DEFAULT_RELATED_LIMIT: usize = 5;

const REASON_SAME_NOTE: &str = "Same note origin";
const REASON_SAME_GOAL: &str = "Same goal";
const REASON_SAME_DAY: &str = "Scheduled on the same day";
const REASON_SAME_WEEK: &str = "Scheduled in the same week";
const REASON_DEPENDENCY: &str = "Dependency relationship";
const REASON_FALLBACK: &str = "Shared context";

/// Points awarded per signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatednessWeights {
    /// Both tasks come from the same note (default 10)
    #[serde(default = "default_same_note")]
    pub same_note: u32,
    /// Both tasks serve the same goal (default 8)
    #[serde(default = "default_same_goal")]
    pub same_goal: u32,
    /// Per tag present on both tasks (default 3)
    #[serde(default = "default_per_shared_tag")]
    pub per_shared_tag: u32,
    /// Scheduled on the same calendar day (default 5)
    #[serde(default = "default_same_day")]
    pub same_day: u32,
    /// Scheduled in the same week but not the same day (default 2)
    #[serde(default = "default_same_week")]
    pub same_week: u32,
    /// One task depends on the other (default 15)
    #[serde(default = "default_dependency")]
    pub dependency: u32,
}

fn default_same_note() -> u32 {
    10
}
fn default_same_goal() -> u32 {
    8
}
fn default_per_shared_tag() -> u32 {
    3
}
fn default_same_day() -> u32 {
    5
}
fn default_same_week() -> u32 {
    2
}
fn default_dependency() -> u32 {
    15
}

impl Default for RelatednessWeights {
    fn default() -> Self {
        Self {
            same_note: default_same_note(),
            same_goal: default_same_goal(),
            per_shared_tag: default_per_shared_tag(),
            same_day: default_same_day(),
            same_week: default_same_week(),
            dependency: default_dependency(),
        }
    }
}

/// A candidate task with its score relative to a focal task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTaskScore {
    /// The candidate task
    pub task: Task,
    /// Sum of all fired signals
    pub score: u32,
    /// One entry per fired signal, in evaluation order
    pub reasons: Vec<String>,
}

/// Relatedness scorer over a fixed set of weights.
#[derive(Debug, Clone, Default)]
pub struct RelatednessScorer {
    weights: RelatednessWeights,
}

impl RelatednessScorer {
    /// Create a scorer with default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights
    pub fn with_weights(weights: RelatednessWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RelatednessWeights {
        &self.weights
    }

    /// Score `candidate` relative to `focal`.
    ///
    /// Signal points saturate at `u32::MAX`, so oversized configured weights
    /// never wrap a real match back to zero.
    pub fn score(&self, focal: &Task, candidate: &Task) -> RelatedTaskScore {
        let w = &self.weights;
        let mut score = 0u32;
        let mut reasons = Vec::new();

        if shared_value(&focal.metadata.note_id, &candidate.metadata.note_id) {
            score = score.saturating_add(w.same_note);
            reasons.push(REASON_SAME_NOTE.to_string());
        }

        if shared_value(&focal.metadata.goal, &candidate.metadata.goal) {
            score = score.saturating_add(w.same_goal);
            reasons.push(REASON_SAME_GOAL.to_string());
        }

        let common = common_tags(focal, candidate);
        if !common.is_empty() {
            let shared = u32::try_from(common.len()).unwrap_or(u32::MAX);
            score = score.saturating_add(w.per_shared_tag.saturating_mul(shared));
            reasons.push(format!("Common tags: {}", common.join(", ")));
        }

        if let (Some(a), Some(b)) = (focal.schedule_date(), candidate.schedule_date()) {
            if dates::same_day(a, b) {
                score = score.saturating_add(w.same_day);
                reasons.push(REASON_SAME_DAY.to_string());
            } else if dates::same_week(a, b) {
                score = score.saturating_add(w.same_week);
                reasons.push(REASON_SAME_WEEK.to_string());
            }
        }

        if candidate.depends_on(&focal.id) || focal.depends_on(&candidate.id) {
            score = score.saturating_add(w.dependency);
            reasons.push(REASON_DEPENDENCY.to_string());
        }

        RelatedTaskScore {
            task: candidate.clone(),
            score,
            reasons,
        }
    }

    /// Rank `pool` by relatedness to `focal`.
    ///
    /// The focal task itself (matched by id) and zero scores are dropped.
    /// Ties keep pool order. At most `limit` entries are returned.
    pub fn rank(&self, focal: &Task, pool: &[Task], limit: usize) -> Vec<RelatedTaskScore> {
        if limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<RelatedTaskScore> = pool
            .iter()
            .filter(|candidate| candidate.id != focal.id)
            .map(|candidate| self.score(focal, candidate))
            .filter(|related| related.score > 0)
            .collect();

        // sort_by is stable, so pool order breaks ties
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);

        tracing::debug!(
            focal = %focal.id,
            pool = pool.len(),
            related = scored.len(),
            "ranked related tasks"
        );

        scored
    }
}

fn shared_value(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// Tags present on both tasks, in the focal task's order, without repeats.
fn common_tags<'a>(focal: &'a Task, candidate: &Task) -> Vec<&'a str> {
    let other: HashSet<&str> = candidate.tags.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    focal
        .tags
        .iter()
        .map(String::as_str)
        .filter(|tag| other.contains(tag) && seen.insert(*tag))
        .collect()
}

/// Score `candidate` relative to `focal` with default weights.
pub fn score_relatedness(focal: &Task, candidate: &Task) -> RelatedTaskScore {
    RelatednessScorer::new().score(focal, candidate)
}

/// Rank `pool` against `focal` with default weights.
pub fn rank_related(focal: &Task, pool: &[Task], limit: usize) -> Vec<RelatedTaskScore> {
    RelatednessScorer::new().rank(focal, pool, limit)
}

/// Render a ranked list as a short explanation.
pub fn explain(ranked: &[RelatedTaskScore]) -> String {
    if ranked.is_empty() {
        return "No related tasks found.".to_string();
    }

    let noun = if ranked.len() == 1 { "task" } else { "tasks" };
    let mut out = format!(
        "Found {} related {} based on shared context:",
        ranked.len(),
        noun
    );
    for related in ranked {
        let reasons = if related.reasons.is_empty() {
            REASON_FALLBACK.to_string()
        } else {
            related.reasons.join("; ")
        };
        out.push_str(&format!("\n- {}: {}", related.task.title, reasons));
    }
    out
}
