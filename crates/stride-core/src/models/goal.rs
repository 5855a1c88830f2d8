//! Goal model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::GoalStage;

/// A tracked objective with a lifecycle stage and progress cursor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique identifier for the goal
    pub id: u64,

    /// Name of the coach persona attached to this goal
    pub coach_name: String,

    /// What the user wants to achieve
    pub goal_description: String,

    /// Current lifecycle stage
    #[serde(default)]
    pub stage: GoalStage,

    /// 0-based index of the first incomplete step in the current plan, or the
    /// step count when every step is done. Always recomputed, never hand-set
    /// except to 0 at creation.
    pub current_step: u32,

    /// Timestamp when the goal was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the goal was last modified (UTC)
    pub updated_at: Timestamp,
}

/// Compact goal representation for list views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalSummary {
    /// Unique identifier for the goal
    pub id: u64,

    /// Name of the coach persona
    pub coach_name: String,

    /// What the user wants to achieve
    pub goal_description: String,

    /// Current lifecycle stage
    pub stage: GoalStage,

    /// Progress cursor into the plan's step list
    pub current_step: u32,

    /// Whether a plan has been produced for this goal
    pub has_plan: bool,

    /// Number of steps in the plan, 0 when no plan exists
    pub total_steps: usize,
}
