//! Request-level operations around the engines.
//!
//! These mirror the `/suggestions` and `/tasks/related/{id}` endpoints of the
//! web application without tying the crate to any HTTP framework: callers
//! hand in an access-filtered task snapshot and get serializable responses.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::{Uuid, Variant};

use crate::error::{CoreError, Result, ValidationError};
use crate::related::{explain, RelatednessScorer};
use crate::suggest::{SuggestionEngine, SuggestionInsights, SuggestionOptions};
use crate::task::Task;

/// Response body of the suggestions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Task>,
    pub insights: SuggestionInsights,
}

/// Response body of the related-tasks endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTasksResponse {
    pub related_tasks: Vec<Task>,
    pub reasoning: String,
}

/// Check that `id` is a hyphenated RFC 4122 UUID of version 1 to 5.
pub fn validate_task_id(id: &str) -> Result<Uuid, ValidationError> {
    let invalid = || ValidationError::InvalidTaskId(id.to_string());

    // Uuid::try_parse also takes simple, braced and urn forms.
    if id.len() != 36 {
        return Err(invalid());
    }
    let uuid = Uuid::try_parse(id).map_err(|_| invalid())?;
    if !(1..=5).contains(&uuid.get_version_num()) || uuid.get_variant() != Variant::RFC4122 {
        return Err(invalid());
    }
    Ok(uuid)
}

/// Suggestions for today.
pub fn suggestions(
    pool: &[Task],
    options: &SuggestionOptions,
    now: &DateTime<FixedOffset>,
) -> SuggestionsResponse {
    let result = SuggestionEngine::new(options.clone()).suggest(pool, now);
    SuggestionsResponse {
        suggestions: result.suggestions,
        insights: result.insights,
    }
}

/// Tasks related to the task with `id`, ranked with `scorer`.
///
/// # Errors
///
/// `ValidationError::InvalidTaskId` when `id` is not a v1-v5 UUID,
/// `CoreError::NotFound` when no task in `pool` has that id.
pub fn related_tasks_with(
    scorer: &RelatednessScorer,
    pool: &[Task],
    id: &str,
    limit: usize,
) -> Result<RelatedTasksResponse> {
    validate_task_id(id)?;

    let focal = pool
        .iter()
        .find(|task| task.id == id)
        .ok_or_else(|| CoreError::task_not_found(id))?;

    let ranked = scorer.rank(focal, pool, limit);
    let reasoning = explain(&ranked);

    Ok(RelatedTasksResponse {
        related_tasks: ranked.into_iter().map(|related| related.task).collect(),
        reasoning,
    })
}

/// Tasks related to the task with `id`, using default weights.
pub fn related_tasks(pool: &[Task], id: &str, limit: usize) -> Result<RelatedTasksResponse> {
    related_tasks_with(&RelatednessScorer::new(), pool, id, limit)
}
