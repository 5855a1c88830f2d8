//! Chat history model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::MessageRole;

/// One entry in a goal's append-only chat history.
///
/// History is owned by the goal and consumed as read-only context by the
/// external agent classifier; the engine never rewrites past entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Unique identifier for the message
    pub id: u64,

    /// ID of the owning goal
    pub goal_id: u64,

    /// Who produced the message
    pub role: MessageRole,

    /// Message text
    pub content: String,

    /// Timestamp when the message was appended (UTC)
    pub created_at: Timestamp,
}
