//! Goal lifecycle state machine.
//!
//! Stages advance `onboarding → confirming → pending_acceptance → active →
//! completed`. The machine is advisory for illegal triggers: a request made in
//! a stage that forbids it is rejected as a no-op with an explanation, never a
//! hard failure. `completed` is terminal.

use crate::models::GoalStage;

/// Finalize-confirmation phrase the onboarding transition keys on.
///
/// Matching assistant free text is inherently fragile, so the predicate is
/// kept isolated here where it can be swapped for a structured signal without
/// touching any reconciliation logic.
const FINALIZE_PHRASE: &str = "shall we finalize";

/// Returns true when assistant reply text signals the onboarding conversation
/// is ready to be finalized.
pub fn mentions_finalize(reply: &str) -> bool {
    reply.to_lowercase().contains(FINALIZE_PHRASE)
}

/// Stage reached after an assistant reply, given the current stage.
///
/// Only the onboarding stage reacts to conversational output; everywhere else
/// plain replies leave the stage unchanged.
pub fn after_reply(stage: GoalStage, reply: &str) -> GoalStage {
    if stage == GoalStage::Onboarding && mentions_finalize(reply) {
        GoalStage::Confirming
    } else {
        stage
    }
}

/// Whether `create_plan` / `modify_plan` tool invocations may mutate the plan
/// in this stage.
///
/// Onboarding is conversational-only and `completed` is terminal; everything
/// in between may produce or rework a plan.
pub fn allows_plan_mutation(stage: GoalStage) -> bool {
    matches!(
        stage,
        GoalStage::Confirming | GoalStage::PendingAcceptance | GoalStage::Active
    )
}

/// Stage reached once a plan has been produced or updated.
pub fn after_plan_update(_stage: GoalStage) -> GoalStage {
    GoalStage::PendingAcceptance
}

/// Stage reached by explicit user acceptance, or `None` when acceptance is
/// illegal in the current stage.
pub fn accept(stage: GoalStage) -> Option<GoalStage> {
    (stage == GoalStage::PendingAcceptance).then_some(GoalStage::Active)
}

/// Stage reached by the explicit completion action, or `None` when the goal
/// cannot be completed from the current stage.
pub fn complete(stage: GoalStage) -> Option<GoalStage> {
    (stage == GoalStage::Active).then_some(GoalStage::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_phrase_is_case_insensitive() {
        assert!(mentions_finalize("Great progress. Shall we finalize your goal?"));
        assert!(!mentions_finalize("Tell me more about your routine."));
    }

    #[test]
    fn test_reply_advances_onboarding_only() {
        let reply = "shall we finalize this?";
        assert_eq!(
            after_reply(GoalStage::Onboarding, reply),
            GoalStage::Confirming
        );
        assert_eq!(after_reply(GoalStage::Active, reply), GoalStage::Active);
        assert_eq!(
            after_reply(GoalStage::Onboarding, "keep going"),
            GoalStage::Onboarding
        );
    }

    #[test]
    fn test_plan_mutation_legality() {
        assert!(!allows_plan_mutation(GoalStage::Onboarding));
        assert!(allows_plan_mutation(GoalStage::Confirming));
        assert!(allows_plan_mutation(GoalStage::PendingAcceptance));
        assert!(allows_plan_mutation(GoalStage::Active));
        assert!(!allows_plan_mutation(GoalStage::Completed));
    }

    #[test]
    fn test_plan_update_lands_in_pending_acceptance() {
        assert_eq!(
            after_plan_update(GoalStage::Active),
            GoalStage::PendingAcceptance
        );
        assert_eq!(
            after_plan_update(GoalStage::Confirming),
            GoalStage::PendingAcceptance
        );
    }

    #[test]
    fn test_accept_requires_pending_acceptance() {
        assert_eq!(accept(GoalStage::PendingAcceptance), Some(GoalStage::Active));
        assert_eq!(accept(GoalStage::Onboarding), None);
        assert_eq!(accept(GoalStage::Completed), None);
    }

    #[test]
    fn test_completed_is_terminal() {
        assert_eq!(complete(GoalStage::Active), Some(GoalStage::Completed));
        assert_eq!(complete(GoalStage::Completed), None);
        assert_eq!(accept(GoalStage::Completed), None);
    }
}
