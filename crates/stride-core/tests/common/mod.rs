use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use stride_core::{
    AgentAction, AgentClassifier, ChatMessage, Coordinator, CoordinatorBuilder, GeneratedPlan,
    GeneratorError, Goal, StepGenerator,
    generate::GenerateResult,
    params::{CreateGoal, Turn},
};
use tempfile::TempDir;

/// Creates a temporary directory and a database path inside it.
pub fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test_stride.db");
    (temp_dir, db_path)
}

/// Builds a coordinator on the given database path with the default
/// deterministic classifier and generator.
pub async fn create_coordinator(db_path: &Path) -> Coordinator {
    CoordinatorBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create coordinator")
}

/// Generator whose every call fails, for exercising the degraded turn path.
pub struct FailingGenerator;

#[async_trait]
impl StepGenerator for FailingGenerator {
    async fn generate(
        &self,
        _coach_name: &str,
        _goal_description: &str,
    ) -> GenerateResult<GeneratedPlan> {
        Err(GeneratorError("model unavailable".to_string()))
    }

    async fn tweak(
        &self,
        _goal_description: &str,
        _remaining: &[stride_core::Step],
        _instruction: &str,
    ) -> GenerateResult<GeneratedPlan> {
        Err(GeneratorError("model unavailable".to_string()))
    }
}

/// Classifier that turns every message into a fresh plan creation, regardless
/// of stage or phrasing.
pub struct AlwaysCreateClassifier;

#[async_trait]
impl AgentClassifier for AlwaysCreateClassifier {
    async fn classify(
        &self,
        _goal: &Goal,
        _history: &[ChatMessage],
        _user_text: &str,
    ) -> stride_core::Result<AgentAction> {
        Ok(AgentAction::CreatePlan {
            reply: "Here is a fresh plan!".to_string(),
        })
    }
}

/// Builds a coordinator with a generator override on the given database path.
pub async fn create_coordinator_with_generator(
    db_path: &Path,
    generator: Arc<dyn StepGenerator>,
) -> Coordinator {
    CoordinatorBuilder::new()
        .with_database_path(Some(db_path))
        .with_generator(generator)
        .build()
        .await
        .expect("Failed to create coordinator")
}

/// Creates a goal and drives it through conversation to a pending plan:
/// onboarding, then confirming, then an 8-step plan awaiting acceptance.
pub async fn setup_pending_goal(coordinator: &Coordinator) -> Goal {
    let goal = coordinator
        .create_goal(&CreateGoal {
            coach_name: "Maya".to_string(),
            goal_description: "learning guitar".to_string(),
        })
        .await
        .expect("Failed to create goal");

    coordinator
        .process_turn(&Turn {
            goal_id: goal.id,
            message: "Yes, I'm ready to get going".to_string(),
        })
        .await
        .expect("Onboarding turn failed");

    coordinator
        .process_turn(&Turn {
            goal_id: goal.id,
            message: "Let's build my plan".to_string(),
        })
        .await
        .expect("Plan creation turn failed");

    coordinator
        .get_goal(&stride_core::params::Id { id: goal.id })
        .await
        .expect("Failed to reload goal")
        .expect("Goal should exist")
}

/// Like [`setup_pending_goal`] but also accepts the plan, leaving the goal
/// active.
pub async fn setup_active_goal(coordinator: &Coordinator) -> Goal {
    let goal = setup_pending_goal(coordinator).await;
    let outcome = coordinator
        .accept_plan(&stride_core::params::Id { id: goal.id })
        .await
        .expect("Failed to accept plan");
    assert!(outcome.rejection.is_none(), "acceptance should be legal");
    outcome.goal
}
