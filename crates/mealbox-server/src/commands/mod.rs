//! CLI command definitions and dispatch.

pub mod plan;
pub mod serve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mealbox_common::config::MealboxConfig;
use mealbox_common::constants::BIN_NAME;

/// mealbox — senior food box meal planner.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file.
    #[arg(long, global = true, env = "MEALBOX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the workbooks.
    #[arg(long, global = true, env = "MEALBOX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "MEALBOX_LOG_JSON")]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service.
    Serve(serve::ServeArgs),
    /// Print one monthly plan as JSON.
    Plan(plan::PlanArgs),
}

/// Loads the configuration and dispatches the parsed command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command
/// fails.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.data_dir)?;
    match cli.command {
        Command::Serve(args) => serve::execute(args, config).await,
        Command::Plan(args) => plan::execute(&args, &config),
    }
}

fn load_config(
    path: Option<&std::path::Path>,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<MealboxConfig> {
    let mut config = match path {
        Some(path) => MealboxConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => MealboxConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data.dir = dir;
    }
    Ok(config)
}
