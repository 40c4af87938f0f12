//! # TaskLens Core Library
//!
//! Deterministic task intelligence for a personal productivity app. The
//! hosting application snapshots a user's tasks and hands them to one of two
//! pure engines; neither performs I/O or keeps state between calls.
//!
//! ## Architecture
//!
//! - **Relatedness**: weighted, explainable similarity between a focal task
//!   and every other task in the snapshot
//! - **Suggestions**: dependency-aware filtering, urgency/priority/energy
//!   ranking and budgeted selection of what to work on today
//! - **Service**: request-level validation and response shaping around both
//! - **Storage**: TOML configuration and JSON task snapshots
//!
//! ## Key Components
//!
//! - [`RelatednessScorer`]: Relatedness scoring and ranking
//! - [`SuggestionEngine`]: Daily suggestion selection
//! - [`Task`]: Task record with typed metadata
//! - [`Config`]: Application configuration management

pub mod error;
pub mod related;
pub mod service;
pub mod storage;
pub mod suggest;
pub mod task;

pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use related::{
    explain, rank_related, score_relatedness, RelatedTaskScore, RelatednessScorer,
    RelatednessWeights,
};
pub use service::{RelatedTasksResponse, SuggestionsResponse};
pub use storage::{load_pool, parse_pool, Config};
pub use suggest::{
    suggest, SuggestionEngine, SuggestionInsights, SuggestionOptions, SuggestionResult, TimeOfDay,
    Workload,
};
pub use task::{EnergyLevel, Task, TaskMetadata, TaskStatus};
