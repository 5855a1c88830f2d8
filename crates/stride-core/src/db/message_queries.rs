//! Chat history queries. The history is append-only.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{ChatMessage, MessageRole},
};

const INSERT_MESSAGE_SQL: &str =
    "INSERT INTO messages (goal_id, role, content, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_MESSAGES_SQL: &str = "SELECT id, goal_id, role, content, created_at FROM messages WHERE goal_id = ?1 ORDER BY created_at, id";
const COUNT_MESSAGES_SQL: &str = "SELECT COUNT(*) FROM messages WHERE goal_id = ?1";

/// Appends one message. Shared with the turn commit path, which runs it
/// inside a larger transaction.
pub(super) fn insert_message(
    conn: &Connection,
    goal_id: u64,
    role: MessageRole,
    content: &str,
) -> Result<()> {
    conn.execute(
        INSERT_MESSAGE_SQL,
        params![
            goal_id as i64,
            role.as_str(),
            content,
            Timestamp::now().to_string()
        ],
    )
    .db_context("Failed to insert message")?;
    Ok(())
}

impl super::Database {
    /// Retrieves the full chat history for a goal in append order.
    pub fn get_messages(&self, goal_id: u64) -> Result<Vec<ChatMessage>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_MESSAGES_SQL)
            .db_context("Failed to prepare message query")?;

        let rows = stmt
            .query_map(params![goal_id as i64], |row| {
                let role_str: String = row.get(2)?;
                let role = role_str.parse::<MessageRole>().map_err(|_| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        Type::Text,
                        format!("Invalid role: {role_str}").into(),
                    )
                })?;

                Ok(ChatMessage {
                    id: row.get::<_, i64>(0)? as u64,
                    goal_id: row.get::<_, i64>(1)? as u64,
                    role,
                    content: row.get(3)?,
                    created_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(
                        |e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)),
                    )?,
                })
            })
            .db_context("Failed to query messages")?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row.db_context("Failed to read message row")?);
        }
        Ok(messages)
    }

    /// Whether any history exists for a goal.
    pub fn has_messages(&self, goal_id: u64) -> Result<bool> {
        let count: i64 = self
            .connection
            .query_row(COUNT_MESSAGES_SQL, params![goal_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to count messages")?;
        Ok(count > 0)
    }
}
