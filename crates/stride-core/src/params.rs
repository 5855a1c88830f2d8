//! Parameter structures for coordinator operations.
//!
//! Interface-agnostic parameter structs shared between the CLI and any future
//! surface. They carry plain serde derives only; framework-specific wrappers
//! (clap arg structs) live in the interface crates and convert into these via
//! `From` impls.

use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just a goal ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the goal to operate on
    pub id: u64,
}

/// Parameters for creating a new goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGoal {
    /// Name of the coach persona (required)
    pub coach_name: String,
    /// What the user wants to achieve (required)
    pub goal_description: String,
}

/// Parameters for processing one conversational turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Turn {
    /// The goal the conversation belongs to
    pub goal_id: u64,
    /// The user's message text
    pub message: String,
}

/// Parameters for the direct plan tweak operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweakPlan {
    /// The goal whose plan should be tweaked
    pub goal_id: u64,
    /// Free-form edit request handed to the generative producer
    pub tweak_message: String,
}

/// Parameters for toggling a step's completion flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetStepCompletion {
    /// The goal whose plan contains the step
    pub goal_id: u64,
    /// 1-based ordinal id of the step, as currently displayed
    pub step_id: u32,
    /// New value for the completion flag
    pub completed: bool,
}
