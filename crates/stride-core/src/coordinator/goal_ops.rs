//! Goal operations: CRUD, pure stage transitions, and completion tracking.

use log::{debug, info};

use super::{CompletionUpdate, Coordinator, StageOutcome};
use crate::{
    db::PlanWrite,
    error::{CoachError, Result},
    lifecycle,
    models::{ChatMessage, Goal, GoalSummary, Plan},
    params::{CreateGoal, Id, SetStepCompletion},
    steps,
};

impl Coordinator {
    /// Creates a new goal in the onboarding stage.
    pub async fn create_goal(&self, params: &CreateGoal) -> Result<Goal> {
        let coach_name = params.coach_name.clone();
        let goal_description = params.goal_description.clone();

        let goal = self
            .with_db(move |db| db.create_goal(&coach_name, &goal_description))
            .await?;
        info!("Created goal {} ({})", goal.id, goal.goal_description);
        Ok(goal)
    }

    /// Retrieves a goal by its ID.
    pub async fn get_goal(&self, params: &Id) -> Result<Option<Goal>> {
        let id = params.id;
        self.with_db(move |db| db.get_goal(id)).await
    }

    /// Lists all goals as summaries, newest first.
    pub async fn list_goals(&self) -> Result<Vec<GoalSummary>> {
        self.with_db(|db| db.list_goal_summaries()).await
    }

    /// Retrieves the plan for a goal, if one has been produced.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let goal_id = params.id;
        self.with_db(move |db| db.get_plan(goal_id)).await
    }

    /// Retrieves the chat history for a goal in append order.
    pub async fn history(&self, params: &Id) -> Result<Vec<ChatMessage>> {
        let goal_id = params.id;
        self.with_db(move |db| db.get_messages(goal_id)).await
    }

    /// Generates the contextual welcome message for a goal's chat screen.
    pub async fn welcome_message(&self, params: &Id) -> Result<String> {
        let goal_id = params.id;
        let (goal, plan, has_messages) = self
            .with_db(move |db| {
                let goal = db
                    .get_goal(goal_id)?
                    .ok_or(CoachError::GoalNotFound { id: goal_id })?;
                let plan = db.get_plan(goal_id)?;
                let has_messages = db.has_messages(goal_id)?;
                Ok((goal, plan, has_messages))
            })
            .await?;

        let total_steps = plan.map_or(0, |p| p.total_steps());
        Ok(crate::display::welcome_message(
            &goal,
            total_steps,
            has_messages,
        ))
    }

    /// Toggles one step's completion flag and recomputes the progress cursor.
    ///
    /// This is the only operation allowed to flip a `completed` flag, and only
    /// for the step explicitly named.
    pub async fn set_step_completion(
        &self,
        params: &SetStepCompletion,
    ) -> Result<CompletionUpdate> {
        let lock = self.goal_lock(params.goal_id);
        let _guard = lock.lock().await;

        let goal_id = params.goal_id;
        let step_id = params.step_id;
        let completed = params.completed;

        let update = self
            .with_db(move |db| {
                let goal = db
                    .get_goal(goal_id)?
                    .ok_or(CoachError::GoalNotFound { id: goal_id })?;
                let plan = db
                    .get_plan(goal_id)?
                    .ok_or(CoachError::PlanNotFound { goal_id })?;

                let mut step_list = plan.steps;
                let step = step_list
                    .iter_mut()
                    .find(|step| step.id == step_id)
                    .ok_or(CoachError::StepNotFound { id: step_id })?;
                step.completed = completed;

                let new_cursor = steps::progress_cursor(&step_list);
                let total_steps = step_list.len();
                let write = PlanWrite {
                    title: plan.title,
                    status: plan.status,
                    modification_note: plan.modification_note,
                    steps: step_list,
                };
                db.commit_turn(goal_id, goal.stage, new_cursor, Some(&write), &[])?;

                Ok(CompletionUpdate {
                    new_cursor,
                    total_steps,
                })
            })
            .await?;

        debug!(
            "Goal {goal_id}: step {step_id} completed={completed}, cursor now {}",
            update.new_cursor
        );
        Ok(update)
    }

    /// Explicit user acceptance of a pending plan: `pending_acceptance` →
    /// `active`. Pure stage transition; no step mutation.
    pub async fn accept_plan(&self, params: &Id) -> Result<StageOutcome> {
        let lock = self.goal_lock(params.id);
        let _guard = lock.lock().await;

        let goal_id = params.id;
        self.with_db(move |db| {
            let goal = db
                .get_goal(goal_id)?
                .ok_or(CoachError::GoalNotFound { id: goal_id })?;

            if lifecycle::accept(goal.stage).is_none() {
                let rejection = format!(
                    "There is no plan awaiting acceptance (goal is {})",
                    goal.stage.as_str()
                );
                return Ok(StageOutcome {
                    goal,
                    rejection: Some(rejection),
                });
            }

            let plan = db
                .get_plan(goal_id)?
                .ok_or(CoachError::PlanNotFound { goal_id })?;
            let cursor = steps::progress_cursor(&plan.steps);
            let goal = db.accept_plan(goal_id, cursor)?;
            info!("Goal {goal_id}: plan accepted, goal is now active");

            Ok(StageOutcome {
                goal,
                rejection: None,
            })
        })
        .await
    }

    /// Explicit user completion of an active goal: `active` → `completed`.
    /// Terminal; pure stage transition with no step mutation.
    pub async fn complete_goal(&self, params: &Id) -> Result<StageOutcome> {
        let lock = self.goal_lock(params.id);
        let _guard = lock.lock().await;

        let goal_id = params.id;
        self.with_db(move |db| {
            let goal = db
                .get_goal(goal_id)?
                .ok_or(CoachError::GoalNotFound { id: goal_id })?;

            let Some(next) = lifecycle::complete(goal.stage) else {
                return Ok(StageOutcome {
                    goal: goal.clone(),
                    rejection: Some(format!(
                        "Only an active goal can be completed (goal is {})",
                        goal.stage.as_str()
                    )),
                });
            };

            db.update_goal(goal_id, next, goal.current_step)?;
            let goal = db
                .get_goal(goal_id)?
                .ok_or(CoachError::GoalNotFound { id: goal_id })?;
            info!("Goal {goal_id} marked completed");

            Ok(StageOutcome {
                goal,
                rejection: None,
            })
        })
        .await
    }
}
