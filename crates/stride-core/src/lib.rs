//! Core library for the Stride goal coaching application.
//!
//! This crate provides the business logic for managing coached goals: the goal
//! lifecycle state machine, the plan step list and its reconciliation rules,
//! conversational turn processing, and SQLite persistence.
//!
//! # Architecture
//!
//! - **Domain Models** ([`models`]): goals, plans, steps, and chat messages,
//!   with [`std::fmt::Display`] implementations in [`display`]
//! - **Pure Mutators** ([`reconcile`], [`skip`], [`steps`]): step-list
//!   transformations with no I/O
//! - **Lifecycle** ([`lifecycle`]): the closed stage transition table
//! - **Agent Boundary** ([`agent`], [`generate`]): traits isolating turn
//!   classification and step generation behind swappable implementations
//! - **Coordinator** ([`coordinator`]): serializes work per goal and commits
//!   each turn's plan, stage, and messages atomically
//!
//! # Quick Start
//!
//! ```rust
//! use stride_core::{CoordinatorBuilder, params::{CreateGoal, Turn}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = CoordinatorBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let goal = coordinator
//!     .create_goal(&CreateGoal {
//!         coach_name: "Maya".to_string(),
//!         goal_description: "learning guitar".to_string(),
//!     })
//!     .await?;
//!
//! let outcome = coordinator
//!     .process_turn(&Turn {
//!         goal_id: goal.id,
//!         message: "I practice twice a week".to_string(),
//!     })
//!     .await?;
//! println!("{}", outcome.reply);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod coordinator;
pub mod db;
pub mod display;
pub mod error;
pub mod generate;
pub mod lifecycle;
pub mod models;
pub mod params;
pub mod reconcile;
pub mod skip;
pub mod steps;

// Re-export commonly used types
pub use agent::{AgentAction, AgentClassifier, KeywordClassifier};
pub use coordinator::{
    CompletionUpdate, Coordinator, CoordinatorBuilder, ResponseKind, StageOutcome, TurnOutcome,
};
pub use db::Database;
pub use display::{GoalSummaries, LocalDateTime, Messages};
pub use error::{CoachError, Result};
pub use generate::{GeneratedPlan, GeneratorError, HeuristicGenerator, StepGenerator};
pub use models::{ChatMessage, Goal, GoalStage, GoalSummary, MessageRole, Plan, PlanStatus, Step};
pub use params::{CreateGoal, Id, SetStepCompletion, Turn, TweakPlan};
