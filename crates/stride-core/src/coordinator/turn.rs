//! Conversational turn processing.
//!
//! One inbound user message is classified by the agent boundary into a plain
//! reply or a tool invocation, dispatched to the reconciliation engine, the
//! skip mutator, or a pass-through view, and committed together with the
//! implied stage transition and both chat messages as a single transaction.

use std::future::Future;

use log::{debug, warn};

use super::{Coordinator, ResponseKind, TurnOutcome};
use crate::{
    agent::{self, AgentAction},
    db::PlanWrite,
    error::{CoachError, Result},
    generate::GenerateResult,
    lifecycle,
    models::{Goal, GoalStage, MessageRole, Plan, PlanStatus},
    params::{Turn, TweakPlan},
    reconcile, skip, steps,
};

impl Coordinator {
    /// Processes one conversational turn for a goal.
    ///
    /// Never fails on generative-producer errors: those degrade to the
    /// unmodified plan annotated with a note. Hard errors are reserved for a
    /// missing goal or storage failures.
    pub async fn process_turn(&self, turn: &Turn) -> Result<TurnOutcome> {
        let lock = self.goal_lock(turn.goal_id);
        let _guard = lock.lock().await;

        let goal_id = turn.goal_id;
        let (goal, history, plan) = self
            .with_db(move |db| {
                let goal = db
                    .get_goal(goal_id)?
                    .ok_or(CoachError::GoalNotFound { id: goal_id })?;
                let history = db.get_messages(goal_id)?;
                let plan = db.get_plan(goal_id)?;
                Ok((goal, history, plan))
            })
            .await?;

        let action = self
            .classifier
            .classify(&goal, &history, &turn.message)
            .await?;
        debug!("Goal {goal_id}: classified turn as {action:?}");

        match action {
            AgentAction::Reply { text } => self.handle_reply(&goal, &turn.message, text).await,
            AgentAction::CreatePlan { reply } => {
                self.handle_create_plan(&goal, plan, &turn.message, reply)
                    .await
            }
            AgentAction::ModifyPlan { request, reply } => {
                self.handle_modify_plan(&goal, plan, &turn.message, &request, reply)
                    .await
            }
        }
    }

    /// Direct plan tweak outside the conversational flow.
    ///
    /// Hands only the remaining steps to the generative producer; its output
    /// is merged through the completed-prefix rule. Failure returns the plan
    /// unchanged with a note, stage untouched. Stages that forbid plan
    /// mutation get the plan back unmodified with an advisory note.
    pub async fn tweak_plan(&self, params: &TweakPlan) -> Result<Plan> {
        let lock = self.goal_lock(params.goal_id);
        let _guard = lock.lock().await;

        let goal_id = params.goal_id;
        let (goal, plan) = self
            .with_db(move |db| {
                let goal = db
                    .get_goal(goal_id)?
                    .ok_or(CoachError::GoalNotFound { id: goal_id })?;
                let plan = db
                    .get_plan(goal_id)?
                    .ok_or(CoachError::PlanNotFound { goal_id })?;
                Ok((goal, plan))
            })
            .await?;

        if !lifecycle::allows_plan_mutation(goal.stage) {
            let write = PlanWrite {
                title: plan.title,
                status: plan.status,
                modification_note: Some(format!(
                    "Cannot modify the plan of a {} goal",
                    goal.stage.as_str()
                )),
                steps: plan.steps,
            };
            let stage = goal.stage;
            let cursor = goal.current_step;
            let committed = self
                .with_db(move |db| db.commit_turn(goal_id, stage, cursor, Some(&write), &[]))
                .await?;
            return committed.ok_or(CoachError::PlanNotFound { goal_id });
        }

        let (_, remaining) = steps::partition(plan.steps.clone());
        let generated = self
            .bounded_generation(self.generator.tweak(
                &goal.goal_description,
                &remaining,
                &params.tweak_message,
            ))
            .await;

        let (stage, cursor, write) = match generated {
            Ok(generated) => {
                let merged = reconcile::reconcile_tweak(&plan.steps, generated.steps);
                let cursor = steps::progress_cursor(&merged);
                let write = PlanWrite {
                    title: generated.title.unwrap_or_else(|| plan.title.clone()),
                    status: PlanStatus::PendingAcceptance,
                    modification_note: Some(generated.modification_note.unwrap_or_else(|| {
                        "Plan updated based on your request".to_string()
                    })),
                    steps: merged,
                };
                (lifecycle::after_plan_update(goal.stage), cursor, write)
            }
            Err(reason) => {
                warn!("Goal {goal_id}: tweak generation failed: {reason}");
                (goal.stage, goal.current_step, failure_write(&plan, &reason))
            }
        };

        let committed = self
            .with_db(move |db| db.commit_turn(goal_id, stage, cursor, Some(&write), &[]))
            .await?;
        committed.ok_or(CoachError::PlanNotFound { goal_id })
    }

    async fn handle_reply(&self, goal: &Goal, user_text: &str, reply: String) -> Result<TurnOutcome> {
        let stage = lifecycle::after_reply(goal.stage, &reply);
        if stage != goal.stage {
            debug!("Goal {}: onboarding conversation converged", goal.id);
        }

        self.commit_messages(goal.id, stage, goal.current_step, user_text, &reply)
            .await?;
        Ok(TurnOutcome {
            reply,
            kind: ResponseKind::Conversation,
            stage,
            plan: None,
        })
    }

    async fn handle_create_plan(
        &self,
        goal: &Goal,
        plan: Option<Plan>,
        user_text: &str,
        reply: String,
    ) -> Result<TurnOutcome> {
        if !lifecycle::allows_plan_mutation(goal.stage) {
            return self.reject_turn(goal, user_text).await;
        }

        let generated = self
            .bounded_generation(
                self.generator
                    .generate(&goal.coach_name, &goal.goal_description),
            )
            .await;

        match generated {
            Ok(generated) => {
                // A regeneration can only ever replace not-yet-done work: the
                // completed prefix of any existing plan is always retained.
                let merged = reconcile::reconcile_create(
                    plan.as_ref().map(|p| p.steps.as_slice()),
                    generated.steps,
                );
                let cursor = steps::progress_cursor(&merged);
                let title = generated
                    .title
                    .or_else(|| plan.as_ref().map(|p| p.title.clone()))
                    .unwrap_or_else(|| format!("Your {} Plan", goal.goal_description));
                let write = PlanWrite {
                    title,
                    status: PlanStatus::PendingAcceptance,
                    modification_note: generated.modification_note,
                    steps: merged,
                };

                let stage = lifecycle::after_plan_update(goal.stage);
                let committed = self
                    .commit_plan(goal.id, stage, cursor, write, user_text, &reply)
                    .await?;
                Ok(TurnOutcome {
                    reply,
                    kind: ResponseKind::PlanScreen,
                    stage,
                    plan: committed,
                })
            }
            Err(reason) => self.degrade_turn(goal, plan, user_text, &reason).await,
        }
    }

    async fn handle_modify_plan(
        &self,
        goal: &Goal,
        plan: Option<Plan>,
        user_text: &str,
        request: &str,
        reply: String,
    ) -> Result<TurnOutcome> {
        let Some(plan) = plan else {
            return self.reject_turn(goal, user_text).await;
        };

        // Show-only requests surface current state without mutating anything
        // or touching the generative producer.
        if agent::is_show_only_request(request) {
            self.commit_messages(goal.id, goal.stage, goal.current_step, user_text, &reply)
                .await?;
            return Ok(TurnOutcome {
                reply,
                kind: ResponseKind::PlanScreen,
                stage: goal.stage,
                plan: Some(plan),
            });
        }

        if !lifecycle::allows_plan_mutation(goal.stage) {
            return self.reject_turn(goal, user_text).await;
        }

        if skip::is_skip_request(request) {
            return self.handle_skip(goal, plan, user_text, request, reply).await;
        }

        // Free-form tweak: only the remaining steps are visible to the
        // producer, and its output goes through the same merge rule.
        let (_, remaining) = steps::partition(plan.steps.clone());
        let generated = self
            .bounded_generation(
                self.generator
                    .tweak(&goal.goal_description, &remaining, request),
            )
            .await;

        match generated {
            Ok(generated) => {
                let merged = reconcile::reconcile_tweak(&plan.steps, generated.steps);
                let cursor = steps::progress_cursor(&merged);
                let write = PlanWrite {
                    title: generated.title.unwrap_or_else(|| plan.title.clone()),
                    status: PlanStatus::PendingAcceptance,
                    modification_note: Some(generated.modification_note.unwrap_or_else(|| {
                        "Plan updated based on your request".to_string()
                    })),
                    steps: merged,
                };

                let stage = lifecycle::after_plan_update(goal.stage);
                let committed = self
                    .commit_plan(goal.id, stage, cursor, write, user_text, &reply)
                    .await?;
                Ok(TurnOutcome {
                    reply,
                    kind: ResponseKind::PlanScreen,
                    stage,
                    plan: committed,
                })
            }
            Err(reason) => self.degrade_turn(goal, Some(plan), user_text, &reason).await,
        }
    }

    async fn handle_skip(
        &self,
        goal: &Goal,
        plan: Plan,
        user_text: &str,
        request: &str,
        reply: String,
    ) -> Result<TurnOutcome> {
        let outcome = skip::skip(&plan.steps, request);

        // Nothing left to skip: the list comes back unmodified with a note
        // and the stage stays put.
        let (stage, status) = if outcome.skipped == 0 && outcome.steps == plan.steps {
            (goal.stage, plan.status)
        } else {
            (
                lifecycle::after_plan_update(goal.stage),
                PlanStatus::PendingAcceptance,
            )
        };

        let cursor = steps::progress_cursor(&outcome.steps);
        let write = PlanWrite {
            title: plan.title,
            status,
            modification_note: Some(outcome.note),
            steps: outcome.steps,
        };

        let committed = self
            .commit_plan(goal.id, stage, cursor, write, user_text, &reply)
            .await?;
        Ok(TurnOutcome {
            reply,
            kind: ResponseKind::PlanScreen,
            stage,
            plan: committed,
        })
    }

    /// Rejects an action that is illegal in the current stage: advisory no-op
    /// with an explanation, stage unchanged.
    async fn reject_turn(&self, goal: &Goal, user_text: &str) -> Result<TurnOutcome> {
        let reply = match goal.stage {
            GoalStage::Onboarding => format!(
                "Let's finish getting to know your {} goal before working on a plan.",
                goal.goal_description
            ),
            GoalStage::Completed => {
                "This goal is already completed. Start a new goal to keep going!".to_string()
            }
            _ => "There is no plan for this goal yet. Ask me to create one first.".to_string(),
        };

        self.commit_messages(goal.id, goal.stage, goal.current_step, user_text, &reply)
            .await?;
        Ok(TurnOutcome {
            reply,
            kind: ResponseKind::Conversation,
            stage: goal.stage,
            plan: None,
        })
    }

    /// Degrades a failed generation to the unmodified plan plus a note, or to
    /// a conversational explanation when no plan exists to fall back on.
    async fn degrade_turn(
        &self,
        goal: &Goal,
        plan: Option<Plan>,
        user_text: &str,
        reason: &str,
    ) -> Result<TurnOutcome> {
        warn!("Goal {}: generation failed: {reason}", goal.id);

        match plan {
            Some(plan) => {
                let reply =
                    "I couldn't apply that change, so your plan is unchanged.".to_string();
                let write = failure_write(&plan, reason);
                let committed = self
                    .commit_plan(
                        goal.id,
                        goal.stage,
                        goal.current_step,
                        write,
                        user_text,
                        &reply,
                    )
                    .await?;
                Ok(TurnOutcome {
                    reply,
                    kind: ResponseKind::PlanScreen,
                    stage: goal.stage,
                    plan: committed,
                })
            }
            None => {
                let reply =
                    "I couldn't put a plan together just now. Let's try again in a moment."
                        .to_string();
                self.commit_messages(goal.id, goal.stage, goal.current_step, user_text, &reply)
                    .await?;
                Ok(TurnOutcome {
                    reply,
                    kind: ResponseKind::Conversation,
                    stage: goal.stage,
                    plan: None,
                })
            }
        }
    }

    /// Bounds a generator call by the configured timeout, flattening both
    /// failure modes into a printable reason.
    async fn bounded_generation<T, F>(&self, fut: F) -> std::result::Result<T, String>
    where
        F: Future<Output = GenerateResult<T>>,
    {
        match tokio::time::timeout(self.generation_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err("generation timed out".to_string()),
        }
    }

    async fn commit_messages(
        &self,
        goal_id: u64,
        stage: GoalStage,
        cursor: u32,
        user_text: &str,
        reply: &str,
    ) -> Result<()> {
        let user_text = user_text.to_string();
        let reply = reply.to_string();
        self.with_db(move |db| {
            db.commit_turn(
                goal_id,
                stage,
                cursor,
                None,
                &[
                    (MessageRole::User, user_text.as_str()),
                    (MessageRole::Assistant, reply.as_str()),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn commit_plan(
        &self,
        goal_id: u64,
        stage: GoalStage,
        cursor: u32,
        write: PlanWrite,
        user_text: &str,
        reply: &str,
    ) -> Result<Option<Plan>> {
        let user_text = user_text.to_string();
        let reply = reply.to_string();
        self.with_db(move |db| {
            db.commit_turn(
                goal_id,
                stage,
                cursor,
                Some(&write),
                &[
                    (MessageRole::User, user_text.as_str()),
                    (MessageRole::Assistant, reply.as_str()),
                ],
            )
        })
        .await
    }
}

/// Plan write that keeps everything as-is and records why nothing changed.
fn failure_write(plan: &Plan, reason: &str) -> PlanWrite {
    PlanWrite {
        title: plan.title.clone(),
        status: plan.status,
        modification_note: Some(format!("Could not apply modification: {reason}")),
        steps: plan.steps.clone(),
    }
}
