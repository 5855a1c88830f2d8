//! Goal CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Goal, GoalStage, GoalSummary},
};

const INSERT_GOAL_SQL: &str = "INSERT INTO goals (coach_name, goal_description, stage, current_step, created_at, updated_at) VALUES (?1, ?2, ?3, 0, ?4, ?4)";
const SELECT_GOAL_SQL: &str = "SELECT id, coach_name, goal_description, stage, current_step, created_at, updated_at FROM goals WHERE id = ?1";
const SELECT_GOAL_SUMMARIES_SQL: &str = "SELECT g.id, g.coach_name, g.goal_description, g.stage, g.current_step, p.steps FROM goals g LEFT JOIN plans p ON p.goal_id = g.id ORDER BY g.created_at DESC";
const UPDATE_GOAL_PROGRESS_SQL: &str =
    "UPDATE goals SET stage = ?1, current_step = ?2, updated_at = ?3 WHERE id = ?4";

/// Helper to construct a Goal from a database row.
fn build_goal_from_row(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
    let stage_str: String = row.get(3)?;
    let stage = stage_str.parse::<GoalStage>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("Invalid stage: {stage_str}").into(),
        )
    })?;

    Ok(Goal {
        id: row.get::<_, i64>(0)? as u64,
        coach_name: row.get(1)?,
        goal_description: row.get(2)?,
        stage,
        current_step: row.get::<_, i64>(4)? as u32,
        created_at: row.get::<_, String>(5)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
        })?,
        updated_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
        })?,
    })
}

/// Writes the stage and progress cursor of a goal. Shared with the turn
/// commit path, which runs it inside a larger transaction.
pub(super) fn update_goal_progress(
    conn: &Connection,
    goal_id: u64,
    stage: GoalStage,
    current_step: u32,
) -> Result<()> {
    let updated = conn
        .execute(
            UPDATE_GOAL_PROGRESS_SQL,
            params![
                stage.as_str(),
                current_step as i64,
                Timestamp::now().to_string(),
                goal_id as i64
            ],
        )
        .db_context("Failed to update goal progress")?;

    if updated == 0 {
        return Err(crate::error::CoachError::GoalNotFound { id: goal_id });
    }
    Ok(())
}

impl super::Database {
    /// Creates a new goal in the onboarding stage with a zero cursor.
    pub fn create_goal(&mut self, coach_name: &str, goal_description: &str) -> Result<Goal> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(
                INSERT_GOAL_SQL,
                params![coach_name, goal_description, GoalStage::Onboarding.as_str(), now],
            )
            .db_context("Failed to insert goal")?;

        let id = self.connection.last_insert_rowid() as u64;
        self.get_goal(id)?
            .ok_or(crate::error::CoachError::GoalNotFound { id })
    }

    /// Retrieves a goal by its ID.
    pub fn get_goal(&self, id: u64) -> Result<Option<Goal>> {
        self.connection
            .query_row(SELECT_GOAL_SQL, params![id as i64], build_goal_from_row)
            .optional()
            .db_context("Failed to query goal")
    }

    /// Lists all goals as summaries, newest first, with plan presence and
    /// step counts resolved.
    pub fn list_goal_summaries(&self) -> Result<Vec<GoalSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_GOAL_SUMMARIES_SQL)
            .db_context("Failed to prepare goal summary query")?;

        let rows = stmt
            .query_map([], |row| {
                let stage_str: String = row.get(3)?;
                let stage = stage_str.parse::<GoalStage>().map_err(|_| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        Type::Text,
                        format!("Invalid stage: {stage_str}").into(),
                    )
                })?;
                let steps_json: Option<String> = row.get(5)?;

                Ok((
                    GoalSummary {
                        id: row.get::<_, i64>(0)? as u64,
                        coach_name: row.get(1)?,
                        goal_description: row.get(2)?,
                        stage,
                        current_step: row.get::<_, i64>(4)? as u32,
                        has_plan: steps_json.is_some(),
                        total_steps: 0,
                    },
                    steps_json,
                ))
            })
            .db_context("Failed to query goal summaries")?;

        let mut summaries = Vec::new();
        for row in rows {
            let (mut summary, steps_json) = row.db_context("Failed to read goal summary row")?;
            if let Some(json) = steps_json {
                let steps: Vec<crate::models::Step> = serde_json::from_str(&json)?;
                summary.total_steps = steps.len();
            }
            summaries.push(summary);
        }
        Ok(summaries)
    }

    /// Updates a goal's stage and progress cursor.
    pub fn update_goal(&mut self, goal_id: u64, stage: GoalStage, current_step: u32) -> Result<()> {
        update_goal_progress(&self.connection, goal_id, stage, current_step)
    }
}
