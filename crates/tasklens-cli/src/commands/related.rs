//! Related task lookup command.

use std::path::PathBuf;

use clap::Args;

use tasklens_core::service;
use tasklens_core::{load_pool, Config, RelatednessScorer};

#[derive(Args)]
pub struct RelatedArgs {
    /// Id (UUID) of the focal task
    id: String,
    /// Task snapshot (JSON array or {"tasks": [...]})
    #[arg(long)]
    tasks: PathBuf,
    /// Maximum number of related tasks (defaults to related.limit)
    #[arg(long)]
    limit: Option<usize>,
    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RelatedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let pool = load_pool(&args.tasks)?;
    tracing::debug!(path = %args.tasks.display(), tasks = pool.len(), "loaded task snapshot");

    let scorer = RelatednessScorer::with_weights(config.relatedness_weights());
    let limit = args.limit.unwrap_or(config.related.limit);
    let response = service::related_tasks_with(&scorer, &pool, &args.id, limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.reasoning);
    }
    Ok(())
}
