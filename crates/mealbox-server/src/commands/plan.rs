//! `mealbox plan` — Print one monthly plan.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use mealbox_common::config::MealboxConfig;
use mealbox_common::types::Month;
use mealbox_server::service::{PlanService, WorkbookPlanner};

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Month to plan (1-12).
    #[arg(short, long, default_value_t = 1)]
    pub month: i64,
}

/// Executes the `plan` command, writing pretty JSON to stdout.
///
/// # Errors
///
/// Returns an error if the month is invalid or the workbooks cannot be read.
pub fn execute(args: &PlanArgs, config: &MealboxConfig) -> anyhow::Result<()> {
    let month = Month::new(args.month)?;
    let plan = WorkbookPlanner::from_config(config)
        .monthly_plan(month)
        .with_context(|| format!("failed to plan month {month}"))?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &plan)?;
    writeln!(stdout)?;
    Ok(())
}
