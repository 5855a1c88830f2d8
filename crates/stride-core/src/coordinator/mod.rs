//! High-level session coordinator for the coaching engine.
//!
//! This module provides the main [`Coordinator`] interface. It routes
//! classified agent actions to the right mutator (reconciliation, skip, or a
//! pass-through view), applies the goal lifecycle transition implied by the
//! outcome, and commits the resulting plan and goal stage atomically.
//!
//! # Concurrency
//!
//! Each goal is the unit of mutual exclusion: every mutating operation holds
//! that goal's async mutex across its read-then-write cycle, so at most one
//! mutation per goal is in flight. Operations on different goals run freely in
//! parallel. Database work runs on the blocking pool with a fresh connection
//! per operation; only the generative producer call can suspend for a
//! non-trivial time, and it is time-bounded by the builder's generation
//! timeout.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task;

use crate::{
    agent::AgentClassifier,
    db::Database,
    error::{CoachError, Result},
    generate::StepGenerator,
    models::{GoalStage, Plan},
};

pub mod builder;
pub mod goal_ops;
pub mod turn;

pub use builder::CoordinatorBuilder;

/// Whether a turn's result should land on the conversation surface or the
/// plan screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Plain conversational reply
    Conversation,
    /// The plan was produced, updated, or explicitly requested
    PlanScreen,
}

/// Result of processing one conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Assistant reply text for the user
    pub reply: String,
    /// Which surface the caller should show
    pub kind: ResponseKind,
    /// Goal stage after the turn
    pub stage: GoalStage,
    /// Plan data when the turn touched or surfaced the plan
    pub plan: Option<Plan>,
}

/// Result of toggling a step's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionUpdate {
    /// Recomputed progress cursor
    pub new_cursor: u32,
    /// Step count of the plan, for progress display
    pub total_steps: usize,
}

/// Result of a pure stage transition (accept / complete).
///
/// Illegal transitions are advisory: the goal comes back unchanged with a
/// note explaining why nothing happened.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// The goal after the operation
    pub goal: crate::models::Goal,
    /// Present when the transition was rejected as a no-op
    pub rejection: Option<String>,
}

/// Main coordinator interface for goals, plans, and conversation turns.
pub struct Coordinator {
    pub(crate) db_path: PathBuf,
    pub(crate) classifier: Arc<dyn AgentClassifier>,
    pub(crate) generator: Arc<dyn StepGenerator>,
    pub(crate) generation_timeout: Duration,
    locks: Mutex<HashMap<u64, Arc<tokio::sync::Mutex<()>>>>,
}

impl Coordinator {
    /// Creates a new coordinator with the given configuration.
    pub(crate) fn new(
        db_path: PathBuf,
        classifier: Arc<dyn AgentClassifier>,
        generator: Arc<dyn StepGenerator>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            db_path,
            classifier,
            generator,
            generation_timeout,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the serialization lock for a goal, creating it on first use.
    pub(crate) fn goal_lock(&self, goal_id: u64) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        locks.entry(goal_id).or_default().clone()
    }

    /// Runs a closure against a fresh database connection on the blocking
    /// pool.
    pub(crate) async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(|e| CoachError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
