//! Command definitions and handlers using clap's derive API.
//!
//! Argument structs carry the clap-specific surface (aliases, help text) and
//! convert into the interface-agnostic core parameter types via `From`, so the
//! core stays free of CLI framework concerns.

use anyhow::Result;
use clap::Args;
use stride_core::{
    Coordinator, GoalSummaries, Messages, ResponseKind,
    params::{CreateGoal, Id, SetStepCompletion, Turn, TweakPlan},
};

use crate::renderer::TerminalRenderer;

/// Create a new goal with a coach persona
#[derive(Args)]
pub struct CreateGoalArgs {
    /// Name of the coach persona for this goal
    pub coach_name: String,
    /// What you want to achieve
    pub goal_description: String,
}

impl From<CreateGoalArgs> for CreateGoal {
    fn from(val: CreateGoalArgs) -> Self {
        CreateGoal {
            coach_name: val.coach_name,
            goal_description: val.goal_description,
        }
    }
}

/// Reference a goal by its ID
#[derive(Args)]
pub struct GoalIdArgs {
    /// Unique identifier of the goal
    pub id: u64,
}

impl From<GoalIdArgs> for Id {
    fn from(val: GoalIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(clap::Subcommand)]
pub enum GoalCommands {
    /// Create a new goal
    #[command(alias = "c")]
    Create(CreateGoalArgs),
    /// List all goals
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific goal
    #[command(alias = "s")]
    Show(GoalIdArgs),
    /// Accept the pending plan, activating the goal
    #[command(alias = "a")]
    Accept(GoalIdArgs),
    /// Mark an active goal as completed
    Complete(GoalIdArgs),
}

/// Directly request a plan adjustment without going through chat
#[derive(Args)]
pub struct TweakPlanArgs {
    /// Unique identifier of the goal whose plan to adjust
    pub goal_id: u64,
    /// What to change, in plain language
    pub message: String,
}

impl From<TweakPlanArgs> for TweakPlan {
    fn from(val: TweakPlanArgs) -> Self {
        TweakPlan {
            goal_id: val.goal_id,
            tweak_message: val.message,
        }
    }
}

/// Reference a goal's plan by the goal ID
#[derive(Args)]
pub struct ShowPlanArgs {
    /// Unique identifier of the goal whose plan to show
    pub goal_id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.goal_id }
    }
}

#[derive(clap::Subcommand)]
pub enum PlanCommands {
    /// Show the plan for a goal
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Adjust the plan with a plain-language request
    #[command(alias = "t")]
    Tweak(TweakPlanArgs),
}

/// Reference one step of a goal's plan
#[derive(Args)]
pub struct StepRefArgs {
    /// Unique identifier of the goal
    pub goal_id: u64,
    /// 1-based step number within the plan
    pub step_id: u32,
}

impl StepRefArgs {
    fn into_params(self, completed: bool) -> SetStepCompletion {
        SetStepCompletion {
            goal_id: self.goal_id,
            step_id: self.step_id,
            completed,
        }
    }
}

#[derive(clap::Subcommand)]
pub enum StepCommands {
    /// Mark a step as done
    #[command(alias = "d")]
    Done(StepRefArgs),
    /// Mark a step as not done
    #[command(alias = "u")]
    Undo(StepRefArgs),
}

/// Talk to a goal's coach
#[derive(Args)]
pub struct ChatArgs {
    /// Unique identifier of the goal
    pub goal_id: u64,
    /// Message for the coach; omit to see the welcome and transcript
    pub message: Option<String>,
}

/// Command handler wiring the coordinator to the terminal renderer.
pub struct Cli {
    coordinator: Coordinator,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(coordinator: Coordinator, renderer: TerminalRenderer) -> Self {
        Self {
            coordinator,
            renderer,
        }
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::Create(args) => self.create_goal(args).await,
            GoalCommands::List => self.list_goals().await,
            GoalCommands::Show(args) => self.show_goal(args).await,
            GoalCommands::Accept(args) => self.accept_plan(args).await,
            GoalCommands::Complete(args) => self.complete_goal(args).await,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Show(args) => self.show_plan(args).await,
            PlanCommands::Tweak(args) => self.tweak_plan(args).await,
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Done(args) => self.set_step(args, true).await,
            StepCommands::Undo(args) => self.set_step(args, false).await,
        }
    }

    pub async fn handle_chat(&self, args: ChatArgs) -> Result<()> {
        match args.message {
            Some(message) => {
                let outcome = self
                    .coordinator
                    .process_turn(&Turn {
                        goal_id: args.goal_id,
                        message,
                    })
                    .await?;

                self.renderer.render(&format!("{}\n", outcome.reply))?;
                if outcome.kind == ResponseKind::PlanScreen {
                    if let Some(plan) = outcome.plan {
                        self.renderer.render(&format!("\n{plan}"))?;
                    }
                }
                Ok(())
            }
            None => {
                let id = Id { id: args.goal_id };
                let welcome = self.coordinator.welcome_message(&id).await?;
                let history = self.coordinator.history(&id).await?;

                self.renderer.render(&format!("{welcome}\n\n"))?;
                self.renderer.render(&Messages(history).to_string())
            }
        }
    }

    pub async fn list_goals(&self) -> Result<()> {
        let goals = self.coordinator.list_goals().await?;
        self.renderer.render("# Goals\n\n")?;
        self.renderer.render(&GoalSummaries(goals).to_string())
    }

    async fn create_goal(&self, args: CreateGoalArgs) -> Result<()> {
        let goal = self.coordinator.create_goal(&args.into()).await?;
        self.renderer
            .render(&format!("Created goal with ID: {}\n\n{goal}", goal.id))
    }

    async fn show_goal(&self, args: GoalIdArgs) -> Result<()> {
        let id: Id = args.into();
        let Some(goal) = self.coordinator.get_goal(&id).await? else {
            return self.renderer.render(&format!("Goal {} not found.\n", id.id));
        };

        self.renderer.render(&goal.to_string())?;
        if let Some(plan) = self.coordinator.get_plan(&id).await? {
            self.renderer.render(&format!("\n{plan}"))?;
        }
        Ok(())
    }

    async fn accept_plan(&self, args: GoalIdArgs) -> Result<()> {
        let outcome = self.coordinator.accept_plan(&args.into()).await?;
        match outcome.rejection {
            Some(reason) => self.renderer.render(&format!("{reason}\n")),
            None => self.renderer.render(&format!(
                "Plan accepted! Goal {} is now active.\n",
                outcome.goal.id
            )),
        }
    }

    async fn complete_goal(&self, args: GoalIdArgs) -> Result<()> {
        let outcome = self.coordinator.complete_goal(&args.into()).await?;
        match outcome.rejection {
            Some(reason) => self.renderer.render(&format!("{reason}\n")),
            None => self.renderer.render(&format!(
                "Congratulations! Goal {} is completed.\n",
                outcome.goal.id
            )),
        }
    }

    async fn show_plan(&self, args: ShowPlanArgs) -> Result<()> {
        let id: Id = args.into();
        match self.coordinator.get_plan(&id).await? {
            Some(plan) => self.renderer.render(&plan.to_string()),
            None => self
                .renderer
                .render(&format!("No plan yet for goal {}.\n", id.id)),
        }
    }

    async fn tweak_plan(&self, args: TweakPlanArgs) -> Result<()> {
        let plan = self.coordinator.tweak_plan(&args.into()).await?;
        self.renderer.render(&plan.to_string())
    }

    async fn set_step(&self, args: StepRefArgs, completed: bool) -> Result<()> {
        let step_id = args.step_id;
        let update = self
            .coordinator
            .set_step_completion(&args.into_params(completed))
            .await?;

        let verb = if completed { "done" } else { "not done" };
        self.renderer.render(&format!(
            "Step {step_id} marked {verb}. Progress: step {} of {}.\n",
            update.new_cursor, update.total_steps
        ))
    }
}
