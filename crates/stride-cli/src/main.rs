//! Stride CLI Application
//!
//! Command-line interface for the stride goal coaching tool.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use stride_core::CoordinatorBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let coordinator = CoordinatorBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize coordinator")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Stride started");

    let cli = Cli::new(coordinator, renderer);
    match command {
        Some(Goal { command }) => cli.handle_goal_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(Chat(chat)) => cli.handle_chat(chat).await,
        None => cli.list_goals().await,
    }
}
