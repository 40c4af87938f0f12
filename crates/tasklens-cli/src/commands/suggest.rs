//! Daily suggestion command.

use std::path::PathBuf;

use chrono::Local;
use clap::Args;

use tasklens_core::service;
use tasklens_core::task::priority_label;
use tasklens_core::{load_pool, Config, TimeOfDay};

#[derive(Args)]
pub struct SuggestArgs {
    /// Task snapshot (JSON array or {"tasks": [...]})
    #[arg(long)]
    tasks: PathBuf,
    /// Hours available today (0 < h <= 24)
    #[arg(long)]
    working_hours: Option<f64>,
    /// Maximum number of suggestions (1-10)
    #[arg(long = "max")]
    max_suggestions: Option<usize>,
    /// Prefer tasks whose energy level suits the time of day
    #[arg(long)]
    consider_energy: bool,
    /// morning, afternoon or evening (defaults to the current hour)
    #[arg(long)]
    time_of_day: Option<TimeOfDay>,
    /// Raw query string, e.g. "working_hours=6&max_suggestions=5"
    #[arg(long)]
    query: Option<String>,
    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let pool = load_pool(&args.tasks)?;
    tracing::debug!(path = %args.tasks.display(), tasks = pool.len(), "loaded task snapshot");

    let mut options = config.suggestion_options();
    if let Some(query) = &args.query {
        options = options.apply_query(query);
    }
    if let Some(hours) = args.working_hours {
        options = options.with_working_hours(hours);
    }
    if let Some(max) = args.max_suggestions {
        options = options.with_max_suggestions(max);
    }
    if args.consider_energy {
        options = options.with_consider_energy(true);
    }
    if let Some(tod) = args.time_of_day {
        options = options.with_time_of_day(tod);
    }

    let now = Local::now().fixed_offset();
    let response = service::suggestions(&pool, &options, &now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.suggestions.is_empty() {
        println!("No task suggestions available.");
        println!("  Make sure you have open, unblocked tasks that fit your working hours.");
    } else {
        println!("=== Suggestions for Today ===\n");
        for (i, task) in response.suggestions.iter().enumerate() {
            println!("{}. {}", i + 1, task.title);
            println!("   Priority: {}", priority_label(task.priority));
            println!("   Estimate: {} min", task.estimated_minutes_or_default());
            if let Some(due) = &task.due_date {
                let marker = if task.is_overdue(&now) { " (overdue)" } else { "" };
                println!("   Due: {due}{marker}");
            }
            if let Some(energy) = task.energy_level {
                println!("   Energy: {energy}");
            }
            println!();
        }
    }

    let insights = &response.insights;
    println!("Insights:");
    println!("  Workload: {}", insights.workload);
    println!(
        "  Planned: {} of {} min ({} min across {} eligible tasks)",
        insights.selected_minutes,
        options.budget_minutes(),
        insights.total_minutes,
        insights.eligible_count
    );
    println!("  Blocked: {}", insights.blocked_count);
    println!("  Urgent: {}", insights.urgent_count);
    println!("  Overdue: {}", insights.overdue_count);
    Ok(())
}
