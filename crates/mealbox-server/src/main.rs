//! # mealbox — senior food box meal planner
//!
//! Serves 30-day meal plans over HTTP, or prints one plan from the command
//! line.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

mod commands;

use clap::Parser;

use crate::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mealbox_server::telemetry::init(cli.log_json);
    commands::execute(cli).await
}
