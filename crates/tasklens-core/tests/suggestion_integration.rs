//! Integration tests for daily suggestions.

use chrono::{DateTime, FixedOffset};
use proptest::prelude::*;
use std::collections::HashSet;
use tasklens_core::service;
use tasklens_core::{
    parse_pool, suggest, Config, EnergyLevel, SuggestionOptions, Task, TaskMetadata, TaskStatus,
    TimeOfDay, Workload,
};

const DUE_DATES: &[&str] = &["2024-06-01", "2024-06-20"];

fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-06-12T14:30:00+02:00").unwrap()
}

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        3 => Just(TaskStatus::Todo),
        2 => Just(TaskStatus::InProgress),
        1 => Just(TaskStatus::Done),
        1 => Just(TaskStatus::Cancelled),
    ]
}

fn arb_pool() -> impl Strategy<Value = Vec<Task>> {
    proptest::collection::vec(
        (
            arb_status(),
            0u8..4,
            proptest::option::of(5u32..400),
            proptest::option::of(proptest::sample::select(DUE_DATES)),
            proptest::collection::vec(0usize..20, 0..2),
        ),
        0..15,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (status, priority, estimate, due, deps))| {
                let mut task = Task::new(format!("Task {i}"))
                    .with_id(format!("t{i}"))
                    .with_status(status)
                    .with_priority(priority)
                    .with_metadata(TaskMetadata {
                        dependencies: deps
                            .into_iter()
                            .filter(|d| *d != i)
                            .map(|d| format!("t{d}"))
                            .collect(),
                        ..Default::default()
                    });
                task.estimated_time_minutes = estimate;
                if let Some(due) = due {
                    task = task.with_due_date(due);
                }
                task
            })
            .collect()
    })
}

fn arb_options() -> impl Strategy<Value = SuggestionOptions> {
    (0.5f64..12.0, 1usize..=10, any::<bool>()).prop_map(|(hours, max, energy)| {
        SuggestionOptions::new()
            .with_working_hours(hours)
            .with_max_suggestions(max)
            .with_consider_energy(energy)
    })
}

proptest! {
    #[test]
    fn selection_respects_budget_and_cap(pool in arb_pool(), opts in arb_options()) {
        let result = suggest(&pool, &opts, &now());

        let selected: u64 = result
            .suggestions
            .iter()
            .map(|t| u64::from(t.estimated_minutes_or_default()))
            .sum();
        prop_assert!(selected as f64 <= opts.budget_minutes());
        prop_assert_eq!(selected, result.insights.selected_minutes);
        prop_assert!(result.suggestions.len() <= opts.max_suggestions());
        prop_assert!(result.suggestions.len() <= result.insights.eligible_count);
    }

    #[test]
    fn selection_contains_only_open_unblocked_tasks(pool in arb_pool(), opts in arb_options()) {
        let result = suggest(&pool, &opts, &now());
        let unfinished: HashSet<&str> = pool
            .iter()
            .filter(|t| t.status != TaskStatus::Done)
            .map(|t| t.id.as_str())
            .collect();

        for task in &result.suggestions {
            prop_assert!(task.is_open());
            prop_assert!(task.dependencies().iter().all(|d| !unfinished.contains(d.as_str())));
        }

        let open = pool.iter().filter(|t| t.is_open()).count();
        prop_assert_eq!(
            result.insights.eligible_count + result.insights.blocked_count,
            open
        );
    }
}

#[test]
fn snapshot_end_to_end() {
    let pool = parse_pool(
        r#"{"tasks": [
        {"id":"a","title":"Fix prod bug","priority":0,"estimated_time_minutes":120,"energy_level":"high"},
        {"id":"b","title":"Reply to email","priority":2,"due_date":"2024-06-11","estimated_time_minutes":15},
        {"id":"c","title":"Deploy fix","priority":0,"metadata":{"dependencies":["a"]}},
        {"id":"d","title":"Old chore","status":"done"},
        {"id":"e","title":"Write notes","priority":1,"metadata":{"blocked_by":["d"]},"estimated_time_minutes":400},
        {"id":"f","title":"Tidy desk","priority":3,"metadata":"not an object"}
    ]}"#,
    )
    .unwrap();

    let opts = SuggestionOptions::from_query("working_hours=4&max_suggestions=5");
    let response = service::suggestions(&pool, &opts, &now());

    let ids: Vec<_> = response.suggestions.iter().map(|t| t.id.as_str()).collect();
    // b overdue first; a urgent; e (400 min) no longer fits; f fits.
    assert_eq!(ids, vec!["b", "a", "f"]);
    assert_eq!(response.insights.blocked_count, 1);
    assert_eq!(response.insights.eligible_count, 4);
    assert_eq!(response.insights.urgent_count, 1);
    assert_eq!(response.insights.overdue_count, 1);
    assert_eq!(response.insights.total_minutes, 120 + 15 + 400 + 30);
    assert_eq!(response.insights.selected_minutes, 165);
    assert_eq!(response.insights.workload, Workload::Heavy);
}

#[test]
fn five_tasks_two_eligible_never_padded() {
    let pool = vec![
        Task::new("a").with_id("a").with_status(TaskStatus::Done),
        Task::new("b").with_id("b"),
        Task::new("c").with_id("c").with_status(TaskStatus::Cancelled),
        Task::new("d").with_id("d").with_status(TaskStatus::InProgress),
        Task::new("e").with_id("e").with_metadata(TaskMetadata {
            dependencies: vec!["d".into()],
            ..Default::default()
        }),
    ];
    let opts = SuggestionOptions::new().with_max_suggestions(3);
    let result = suggest(&pool, &opts, &now());
    assert_eq!(result.suggestions.len(), 2);
}

#[test]
fn config_seeds_options_and_energy_tiebreak() {
    let mut cfg = Config::default();
    cfg.set("suggestions.consider_energy", "true").unwrap();
    let opts = cfg
        .suggestion_options()
        .with_time_of_day(TimeOfDay::Evening);

    let pool = vec![
        Task::new("deep").with_id("deep").with_energy(EnergyLevel::High),
        Task::new("light").with_id("light").with_energy(EnergyLevel::Low),
    ];
    let result = suggest(&pool, &opts, &now());
    assert_eq!(result.suggestions[0].id, "light");
}

#[test]
fn empty_pool_yields_zeroed_insights() {
    let result = suggest(&[], &SuggestionOptions::default(), &now());
    assert!(result.suggestions.is_empty());
    assert_eq!(result.insights.total_minutes, 0);
    assert_eq!(result.insights.blocked_count, 0);
    assert_eq!(result.insights.urgent_count, 0);
    assert_eq!(result.insights.overdue_count, 0);
    assert_eq!(result.insights.workload, Workload::Light);
}

#[test]
fn engine_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Task>();
    assert_send_sync::<SuggestionOptions>();
    assert_send_sync::<tasklens_core::SuggestionResult>();
    assert_send_sync::<tasklens_core::RelatedTaskScore>();
}
