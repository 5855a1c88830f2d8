//! Conversational agent boundary.
//!
//! The external agent turns free user text into either a plain reply or a tool
//! invocation. The engine consumes it through the [`AgentClassifier`] trait and
//! a closed [`AgentAction`] variant type, dispatched by exhaustive match in the
//! session coordinator.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ChatMessage, Goal, GoalStage};

/// Classified outcome of one inbound user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentAction {
    /// Plain conversation; no tool was invoked
    Reply { text: String },
    /// The agent invoked the `create_plan` tool
    CreatePlan { reply: String },
    /// The agent invoked the `modify_plan` tool with a natural-language
    /// modification request
    ModifyPlan { request: String, reply: String },
}

/// Classifier turning user text plus context into an [`AgentAction`].
///
/// The production implementation wraps an LLM agent with tool calling; the
/// engine only requires that the outcome arrives as a closed variant.
#[async_trait]
pub trait AgentClassifier: Send + Sync {
    /// Classifies one user message given the goal and its chat history.
    async fn classify(
        &self,
        goal: &Goal,
        history: &[ChatMessage],
        user_text: &str,
    ) -> Result<AgentAction>;
}

/// Fixed phrasings that mean "show me the plan" rather than "change it".
///
/// A modify request matching one of these must not mutate state or call the
/// generative producer; it only surfaces the current plan.
const SHOW_ONLY_PHRASES: &[&str] = &[
    "show the plan",
    "show plan",
    "see the plan",
    "view the plan",
    "let's see",
    "show me",
    "display the plan",
];

/// Returns true when a modification request only asks to view the plan.
///
/// An empty request counts as show-only: there is nothing to apply.
pub fn is_show_only_request(request: &str) -> bool {
    let normalized = request.trim().to_lowercase();
    normalized.is_empty()
        || SHOW_ONLY_PHRASES
            .iter()
            .any(|phrase| normalized.contains(phrase))
}

/// Deterministic keyword stand-in for the external agent.
///
/// Classifies by simple phrase matching so that the engine can be exercised
/// end to end without a model call: "plan"-related requests become tool
/// invocations, everything else is conversation. During onboarding, a user
/// signalling readiness gets the finalize-confirmation reply that advances the
/// stage machine.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

#[async_trait]
impl AgentClassifier for KeywordClassifier {
    async fn classify(
        &self,
        goal: &Goal,
        _history: &[ChatMessage],
        user_text: &str,
    ) -> Result<AgentAction> {
        let text = user_text.to_lowercase();

        if crate::skip::is_skip_request(&text) || is_show_only_request(&text) {
            return Ok(AgentAction::ModifyPlan {
                request: user_text.to_string(),
                reply: "Let me update that for you.".to_string(),
            });
        }

        if text.contains("plan") {
            return Ok(match goal.stage {
                GoalStage::Onboarding | GoalStage::Confirming => AgentAction::CreatePlan {
                    reply: format!(
                        "Here is a plan for your {} journey!",
                        goal.goal_description
                    ),
                },
                _ => AgentAction::ModifyPlan {
                    request: user_text.to_string(),
                    reply: "Let me rework the plan.".to_string(),
                },
            });
        }

        let reply = if goal.stage == GoalStage::Onboarding
            && (text.contains("ready") || text.contains("yes"))
        {
            format!(
                "Great! I have what I need about {}. Shall we finalize your goal?",
                goal.goal_description
            )
        } else {
            format!(
                "Thanks for sharing! Tell me more about {} so I can tailor your coaching.",
                goal.goal_description
            )
        };

        Ok(AgentAction::Reply { text: reply })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn goal(stage: GoalStage) -> Goal {
        Goal {
            id: 1,
            coach_name: "Maya".to_string(),
            goal_description: "running a marathon".to_string(),
            stage,
            current_step: 0,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_show_only_phrases_match() {
        assert!(is_show_only_request("Could you show me the plan?"));
        assert!(is_show_only_request("let's see where we are"));
        assert!(is_show_only_request("  "));
        assert!(!is_show_only_request("drop the rest day"));
    }

    #[tokio::test]
    async fn test_plan_request_during_confirming_creates() {
        let action = KeywordClassifier
            .classify(&goal(GoalStage::Confirming), &[], "build my plan")
            .await
            .expect("keyword classifier is infallible");
        assert!(matches!(action, AgentAction::CreatePlan { .. }));
    }

    #[tokio::test]
    async fn test_plan_request_during_active_modifies() {
        let action = KeywordClassifier
            .classify(&goal(GoalStage::Active), &[], "update the plan please")
            .await
            .expect("keyword classifier is infallible");
        assert!(matches!(action, AgentAction::ModifyPlan { .. }));
    }

    #[tokio::test]
    async fn test_skip_request_is_a_modify_action() {
        let action = KeywordClassifier
            .classify(&goal(GoalStage::Active), &[], "skip the next 2 steps")
            .await
            .expect("keyword classifier is infallible");
        match action {
            AgentAction::ModifyPlan { request, .. } => {
                assert!(request.contains("skip"));
            }
            other => panic!("expected ModifyPlan, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ready_during_onboarding_offers_finalize() {
        let action = KeywordClassifier
            .classify(&goal(GoalStage::Onboarding), &[], "I'm ready to start")
            .await
            .expect("keyword classifier is infallible");
        match action {
            AgentAction::Reply { text } => {
                assert!(crate::lifecycle::mentions_finalize(&text));
            }
            other => panic!("expected Reply, got {other:?}"),
        }
    }
}
