//! Data models for goals, plans, steps, and chat history.
//!
//! This module contains the core domain models of the coaching engine. Display
//! implementations live in [`crate::display`] to keep data structures separate
//! from presentation logic.

pub mod goal;
pub mod message;
pub mod plan;
pub mod status;
pub mod step;

// Re-export all public types at the models level
pub use goal::{Goal, GoalSummary};
pub use message::ChatMessage;
pub use plan::Plan;
pub use status::{GoalStage, MessageRole, PlanStatus};
pub use step::Step;
