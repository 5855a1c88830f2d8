//! Plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{PlanStatus, Step};

/// The ordered step list attached to a goal.
///
/// A goal owns at most one plan. The plan is created the first time a goal
/// reaches plan creation and is afterwards only ever replaced in place by the
/// reconciliation engine or the skip mutator, never deleted on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// ID of the owning goal
    pub goal_id: u64,

    /// Title of the plan
    pub title: String,

    /// Status of the plan (pending acceptance or accepted)
    #[serde(default)]
    pub status: PlanStatus,

    /// Note describing the most recent modification, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modification_note: Option<String>,

    /// Ordered steps; ids are always contiguous 1..len
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Total number of steps in the plan.
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }
}
