//! Modelpack CLI - packages trained models for download.
//!
//! Provides the `modelpack` command, a thin shell over `modelpack_core`'s
//! `DownloadCoordinator`.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modelpack_core::Config;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::filter::LevelFilter;

use commands::{models, package};

/// Modelpack - trained model packaging
#[derive(Parser, Debug)]
#[command(
    name = "modelpack",
    author,
    version,
    about = "Package trained models into downloadable zip archives"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (defaults to ./modelpack.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides config and MODELPACK_DATABASE)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the download archive for a trained model
    ///
    /// Looks the model up in the job's best-model manifest, bundles its
    /// companion files and prints the absolute archive path.
    Package {
        /// Training job ID
        job_id: i64,

        /// Model name without the .kaier extension
        model_name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the models recorded in a job's best-model manifest
    Models {
        /// Training job ID
        job_id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // MODELPACK_LOG directives take precedence over --log-level.
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .with_env_var("MODELPACK_LOG")
        .from_env_lossy();

    // Logs go to stderr so `--json` output stays parseable.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load_with(args.config.as_deref(), |key| std::env::var(key).ok())?;
    if let Some(database) = args.database {
        config.database.path = database;
    }

    match args.command {
        Command::Package { job_id, model_name, json } => {
            package::execute(&config, job_id, model_name, json).await
        }
        Command::Models { job_id, json } => models::execute(&config, job_id, json).await,
    }
}
