//! Integration tests for related-task ranking.

use proptest::prelude::*;
use tasklens_core::service::related_tasks_with;
use tasklens_core::{
    explain, parse_pool, rank_related, score_relatedness, Config, RelatednessScorer, Task,
    TaskMetadata,
};

const DATES: &[&str] = &["2024-06-10", "2024-06-12", "2024-06-16", "2024-06-17", "junk"];

fn arb_task(index: usize, pool_size: usize) -> impl Strategy<Value = Task> {
    (
        proptest::sample::subsequence(vec!["a", "b", "c", "d", "e"], 0..4),
        proptest::option::of(prop_oneof![Just("n1"), Just("n2")]),
        proptest::option::of(prop_oneof![Just("g1"), Just("g2")]),
        proptest::option::of(proptest::sample::select(DATES)),
        proptest::sample::subsequence(
            (0..pool_size).collect::<Vec<_>>(),
            0..=pool_size.min(2),
        ),
    )
        .prop_map(move |(tags, note, goal, due, deps)| {
            let mut task = Task::new(format!("Task {index}"))
                .with_id(format!("t{index}"))
                .with_tags(tags)
                .with_metadata(TaskMetadata {
                    note_id: note.map(str::to_string),
                    goal: goal.map(str::to_string),
                    dependencies: deps
                        .into_iter()
                        .filter(|d| *d != index)
                        .map(|d| format!("t{d}"))
                        .collect(),
                    ..Default::default()
                });
            if let Some(due) = due {
                task = task.with_due_date(due);
            }
            task
        })
}

fn arb_pool() -> impl Strategy<Value = Vec<Task>> {
    (1usize..12).prop_flat_map(|size| {
        (0..size)
            .map(|i| arb_task(i, size).boxed())
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn ranking_never_returns_focal_or_exceeds_limit(
        pool in arb_pool(),
        focal_index in any::<prop::sample::Index>(),
        limit in 0usize..8,
    ) {
        let focal = &pool[focal_index.index(pool.len())];
        let ranked = rank_related(focal, &pool, limit);

        prop_assert!(ranked.len() <= limit);
        for related in &ranked {
            prop_assert_ne!(&related.task.id, &focal.id);
            prop_assert!(related.score > 0);
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn scores_are_symmetric(pool in arb_pool()) {
        for a in &pool {
            for b in &pool {
                if a.id == b.id {
                    continue;
                }
                prop_assert_eq!(
                    score_relatedness(a, b).score,
                    score_relatedness(b, a).score
                );
            }
        }
    }

    #[test]
    fn ranking_is_deterministic(pool in arb_pool()) {
        let focal = &pool[0];
        prop_assert_eq!(rank_related(focal, &pool, 5), rank_related(focal, &pool, 5));
    }
}

#[test]
fn snapshot_end_to_end() {
    let pool = parse_pool(
        r#"[
        {"id":"6f1c2a4e-3b5d-4c7e-8f90-a1b2c3d4e5f6","title":"Draft outline",
         "tags":["writing","q3"],"metadata":{"note_id":"n-1","goal":"publish"}},
        {"id":"0d9e8f7a-6b5c-4d3e-9f2a-1b0c9d8e7f6a","title":"Write chapter one",
         "tags":["writing"],"metadata":{"note_id":"n-1","blocked_by":["6f1c2a4e-3b5d-4c7e-8f90-a1b2c3d4e5f6"]}},
        {"id":"1a2b3c4d-5e6f-4a1b-8c2d-3e4f5a6b7c8d","title":"Book dentist","tags":["errand"]},
        {"id":"9f8e7d6c-5b4a-4c3d-a2e1-f0e9d8c7b6a5","title":"Plan launch",
         "metadata":{"goal":"publish"}}
    ]"#,
    )
    .unwrap();

    let scorer = RelatednessScorer::with_weights(Config::default().relatedness_weights());
    let response =
        related_tasks_with(&scorer, &pool, "6f1c2a4e-3b5d-4c7e-8f90-a1b2c3d4e5f6", 5).unwrap();

    let titles: Vec<_> = response
        .related_tasks
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    // 10 (note) + 3 (tag) + 15 (dependency via blocked_by) = 28, then goal-only = 8
    assert_eq!(titles, vec!["Write chapter one", "Plan launch"]);
    assert_eq!(
        response.reasoning,
        "Found 2 related tasks based on shared context:\n\
         - Write chapter one: Same note origin; Common tags: writing; Dependency relationship\n\
         - Plan launch: Same goal"
    );
}

#[test]
fn explain_matches_rank_output() {
    let focal = Task::new("Focal").with_id("f").with_tags(["x"]);
    let pool = vec![focal.clone(), Task::new("Peer").with_id("p").with_tags(["x"])];
    let ranked = rank_related(&focal, &pool, 5);
    assert_eq!(
        explain(&ranked),
        "Found 1 related task based on shared context:\n- Peer: Common tags: x"
    );
}
