use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ChatArgs, GoalCommands, PlanCommands, StepCommands};

/// Main command-line interface for the Stride goal coaching tool
///
/// Stride is a conversational goal coaching system: each goal gets a coach
/// persona, a chat-driven onboarding, and a step-by-step plan that the coach
/// adjusts as the conversation evolves. The CLI covers goal management, plan
/// inspection and tweaking, step completion, and the chat itself.
#[derive(Parser)]
#[command(version, about, name = "stride")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stride/stride.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Stride CLI
///
/// The CLI is organized into four command categories:
/// - `goal`: create, list, inspect, accept, and complete goals
/// - `plan`: show or directly tweak a goal's plan
/// - `step`: toggle step completion
/// - `chat`: talk to a goal's coach
#[derive(Subcommand)]
pub enum Commands {
    /// Manage goals
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Work with a goal's plan
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Toggle step completion within a goal's plan
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Send a message to a goal's coach (omit the message for a welcome)
    #[command(alias = "c")]
    Chat(ChatArgs),
}
