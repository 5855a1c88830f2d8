//! Status enumerations for goals, plans, and chat messages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of goal lifecycle stages.
///
/// A goal moves through the stages in order: `onboarding` and `confirming` are
/// conversational-only, `pending_acceptance` means a plan is awaiting the
/// user's acceptance, `active` means the accepted plan is being worked, and
/// `completed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStage {
    /// Coach is still gathering context; no plan exists yet
    #[default]
    Onboarding,

    /// Conversation has converged and the goal is being finalized
    Confirming,

    /// A plan has been produced and awaits explicit user acceptance
    PendingAcceptance,

    /// The plan was accepted and the user is working through it
    Active,

    /// The goal is done; no transition leaves this stage
    Completed,
}

impl FromStr for GoalStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "onboarding" => Ok(GoalStage::Onboarding),
            "confirming" => Ok(GoalStage::Confirming),
            "pending_acceptance" => Ok(GoalStage::PendingAcceptance),
            "active" => Ok(GoalStage::Active),
            "completed" => Ok(GoalStage::Completed),
            _ => Err(format!("Invalid goal stage: {s}")),
        }
    }
}

impl GoalStage {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStage::Onboarding => "onboarding",
            GoalStage::Confirming => "confirming",
            GoalStage::PendingAcceptance => "pending_acceptance",
            GoalStage::Active => "active",
            GoalStage::Completed => "completed",
        }
    }
}

/// Type-safe enumeration of plan statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan has been produced but not yet accepted by the user
    #[default]
    PendingAcceptance,

    /// Plan was explicitly accepted
    Accepted,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending_acceptance" => Ok(PlanStatus::PendingAcceptance),
            "accepted" => Ok(PlanStatus::Accepted),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::PendingAcceptance => "pending_acceptance",
            PlanStatus::Accepted => "accepted",
        }
    }
}

/// Role of a chat history entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message written by the user
    User,

    /// Message produced by the coaching assistant
    Assistant,
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            _ => Err(format!("Invalid message role: {s}")),
        }
    }
}

impl MessageRole {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_stage_round_trip() {
        for stage in [
            GoalStage::Onboarding,
            GoalStage::Confirming,
            GoalStage::PendingAcceptance,
            GoalStage::Active,
            GoalStage::Completed,
        ] {
            assert_eq!(stage.as_str().parse::<GoalStage>(), Ok(stage));
        }
    }

    #[test]
    fn test_goal_stage_rejects_unknown() {
        assert!("archived".parse::<GoalStage>().is_err());
    }

    #[test]
    fn test_plan_status_defaults_to_pending() {
        assert_eq!(PlanStatus::default(), PlanStatus::PendingAcceptance);
    }
}
