//! Display formatting for domain models.
//!
//! Combines direct `Display` implementations on the domain models with newtype
//! wrappers for collections, producing markdown suitable for rich terminal
//! rendering.
//!
//! - [`models`]: Display implementations for goals, plans, and steps
//! - [`collections`]: Collection wrapper types (GoalSummaries, Messages)
//! - [`datetime`]: Date/time formatting utilities

pub mod collections;
pub mod datetime;
pub mod models;

pub use collections::{GoalSummaries, Messages};
pub use datetime::LocalDateTime;

use crate::models::{Goal, GoalStage};

/// Builds the contextual welcome line for a goal's chat screen.
///
/// The very first visit gets an introduction from the coach; afterwards the
/// greeting tracks the goal's stage and progress.
pub fn welcome_message(goal: &Goal, total_steps: usize, has_messages: bool) -> String {
    if !has_messages {
        return format!(
            "Hi! I'm {}, and I'm excited to help you with {}! \
             Let's get to know each other better. Tell me a bit about yourself and your goals.",
            goal.coach_name, goal.goal_description
        );
    }

    match goal.stage {
        GoalStage::Onboarding | GoalStage::Confirming => format!(
            "Welcome back! Let's continue our conversation about your {} goal.",
            goal.goal_description
        ),
        GoalStage::PendingAcceptance => format!(
            "Hey! I've created a plan for your {} journey. \
             Take a look and let me know if you'd like to adjust anything!",
            goal.goal_description
        ),
        GoalStage::Active => {
            let percent = if total_steps > 0 {
                (goal.current_step as usize * 100) / total_steps
            } else {
                0
            };
            format!(
                "Welcome back! You're {percent}% through your {} journey \
                 (step {} of {total_steps}). How can I support you today?",
                goal.goal_description, goal.current_step
            )
        }
        GoalStage::Completed => format!(
            "Congratulations on completing your {} goal! \
             How are you feeling? Want to set a new goal?",
            goal.goal_description
        ),
    }
}
