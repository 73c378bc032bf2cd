//! Package command implementation.

use anyhow::Context;
use colored::Colorize;
use modelpack_core::Config;
use modelpack_training::JobId;
use serde_json::json;

use super::open_coordinator;

/// Execute the package command.
///
/// Archive building is blocking file I/O, so it runs on the blocking pool.
pub async fn execute(
    config: &Config,
    job_id: i64,
    model_name: String,
    json_output: bool,
) -> anyhow::Result<()> {
    let coordinator = open_coordinator(config)?;
    let name = model_name.clone();
    let result =
        tokio::task::spawn_blocking(move || coordinator.get_packaged_model(JobId(job_id), &name))
            .await
            .context("Packaging task failed")?;

    match result {
        Ok(path) => {
            if json_output {
                let output = json!({
                    "job_id": job_id,
                    "model_name": model_name,
                    "archive": path,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", format!("✓ Packaged {model_name} from job {job_id}").green().bold());
                println!("  {}", path.display().to_string().cyan());
            }
            Ok(())
        }
        Err(report) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&json!({ "error": report }))?);
            }
            Err(report.into())
        }
    }
}
