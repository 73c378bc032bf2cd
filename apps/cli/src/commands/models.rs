//! Models command implementation.

use anyhow::Context;
use colored::Colorize;
use modelpack_core::Config;
use modelpack_training::JobId;
use serde_json::json;

use super::open_coordinator;

/// Execute the models command.
pub async fn execute(config: &Config, job_id: i64, json_output: bool) -> anyhow::Result<()> {
    let coordinator = open_coordinator(config)?;
    let candidates = tokio::task::spawn_blocking(move || coordinator.list_models(JobId(job_id)))
        .await
        .context("Manifest lookup task failed")?;

    let candidates = match candidates {
        Ok(candidates) => candidates,
        Err(report) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&json!({ "error": report }))?);
            }
            return Err(report.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    println!();
    println!("{}", format!("Models for job {job_id} ({})", candidates.len()).bold().cyan());
    println!();

    if candidates.is_empty() {
        println!("  {}", "Manifest has no entries.".dimmed());
        return Ok(());
    }

    println!("{:<15} {:<15} {:<10} {:<20} {}", "Category", "Stage", "Metric", "Model", "Path");
    println!("{}", "─".repeat(80));

    for candidate in &candidates {
        let model = candidate.model_name.as_deref().unwrap_or("-");
        println!(
            "{:<15} {:<15} {:<10.4} {:<20} {}",
            candidate.category,
            candidate.stage,
            candidate.metric,
            model.cyan(),
            candidate.path.dimmed()
        );
    }
    println!();

    Ok(())
}
