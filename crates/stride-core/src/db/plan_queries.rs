//! Plan queries and the atomic turn commit.
//!
//! A goal owns at most one plan row; replacing the plan, updating the goal's
//! stage and cursor, and appending the turn's messages form one logical
//! transaction, committed together or not at all.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{CoachError, DatabaseResultExt, Result},
    models::{Goal, GoalStage, MessageRole, Plan, PlanStatus, Step},
};

use super::{goal_queries, message_queries};

const SELECT_PLAN_SQL: &str = "SELECT id, goal_id, title, status, modification_note, steps, created_at, updated_at FROM plans WHERE goal_id = ?1";
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (goal_id, title, status, modification_note, steps, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET title = ?1, status = ?2, modification_note = ?3, steps = ?4, updated_at = ?5 WHERE goal_id = ?6";
const UPDATE_PLAN_STATUS_SQL: &str =
    "UPDATE plans SET status = ?1, updated_at = ?2 WHERE goal_id = ?3";

/// Full plan content written on every plan replacement.
#[derive(Debug, Clone)]
pub struct PlanWrite {
    /// Plan title
    pub title: String,
    /// Status after this write
    pub status: PlanStatus,
    /// Note describing the change, cleared when None
    pub modification_note: Option<String>,
    /// Complete step list, already renumbered
    pub steps: Vec<Step>,
}

/// Helper to construct a Plan from a database row.
fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
    let status_str: String = row.get(3)?;
    let status = status_str.parse::<PlanStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("Invalid status: {status_str}").into(),
        )
    })?;

    let steps_json: String = row.get(5)?;
    let steps: Vec<Step> = serde_json::from_str(&steps_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
    })?;

    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        goal_id: row.get::<_, i64>(1)? as u64,
        title: row.get(2)?,
        status,
        modification_note: row.get(4)?,
        steps,
        created_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
        })?,
        updated_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
        })?,
    })
}

fn query_plan(conn: &Connection, goal_id: u64) -> Result<Option<Plan>> {
    conn.query_row(SELECT_PLAN_SQL, params![goal_id as i64], build_plan_from_row)
        .optional()
        .db_context("Failed to query plan")
}

/// Inserts or replaces the plan row for a goal.
fn upsert_plan(conn: &Connection, goal_id: u64, write: &PlanWrite) -> Result<Plan> {
    let steps_json = serde_json::to_string(&write.steps)?;
    let now = Timestamp::now().to_string();

    let updated = conn
        .execute(
            UPDATE_PLAN_SQL,
            params![
                write.title,
                write.status.as_str(),
                write.modification_note,
                steps_json,
                now,
                goal_id as i64
            ],
        )
        .db_context("Failed to update plan")?;

    if updated == 0 {
        conn.execute(
            INSERT_PLAN_SQL,
            params![
                goal_id as i64,
                write.title,
                write.status.as_str(),
                write.modification_note,
                steps_json,
                now
            ],
        )
        .db_context("Failed to insert plan")?;
    }

    query_plan(conn, goal_id)?.ok_or(CoachError::PlanNotFound { goal_id })
}

impl super::Database {
    /// Retrieves the plan for a goal, if one has been produced.
    pub fn get_plan(&self, goal_id: u64) -> Result<Option<Plan>> {
        query_plan(&self.connection, goal_id)
    }

    /// Commits the outcome of one mutation as a single transaction: the
    /// optional plan replacement, the goal's stage and cursor, and any
    /// messages to append.
    pub fn commit_turn(
        &mut self,
        goal_id: u64,
        stage: GoalStage,
        current_step: u32,
        plan: Option<&PlanWrite>,
        messages: &[(MessageRole, &str)],
    ) -> Result<Option<Plan>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let committed_plan = match plan {
            Some(write) => Some(upsert_plan(&tx, goal_id, write)?),
            None => None,
        };

        goal_queries::update_goal_progress(&tx, goal_id, stage, current_step)?;

        for (role, content) in messages {
            message_queries::insert_message(&tx, goal_id, *role, content)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(committed_plan)
    }

    /// Marks the plan accepted and activates the goal as one unit.
    pub fn accept_plan(&mut self, goal_id: u64, cursor: u32) -> Result<Goal> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let updated = tx
            .execute(
                UPDATE_PLAN_STATUS_SQL,
                params![
                    PlanStatus::Accepted.as_str(),
                    Timestamp::now().to_string(),
                    goal_id as i64
                ],
            )
            .db_context("Failed to update plan status")?;
        if updated == 0 {
            return Err(CoachError::PlanNotFound { goal_id });
        }

        goal_queries::update_goal_progress(&tx, goal_id, GoalStage::Active, cursor)?;
        tx.commit().db_context("Failed to commit transaction")?;

        self.get_goal(goal_id)?
            .ok_or(CoachError::GoalNotFound { id: goal_id })
    }
}
