//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::{ChatMessage, GoalSummary, MessageRole};

/// Newtype wrapper for displaying collections of goal summaries.
///
/// Handles empty collections gracefully and leaves title handling to the
/// consumer.
pub struct GoalSummaries(pub Vec<GoalSummary>);

impl GoalSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of goal summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for GoalSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No goals found.")
        } else {
            for goal in &self.0 {
                write!(f, "{goal}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a chat transcript.
pub struct Messages(pub Vec<ChatMessage>);

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No messages yet.");
        }

        for message in &self.0 {
            let speaker = match message.role {
                MessageRole::User => "You",
                MessageRole::Assistant => "Coach",
            };
            writeln!(f, "**{speaker}**: {}", message.content)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::GoalStage;

    fn summary(id: u64, description: &str) -> GoalSummary {
        GoalSummary {
            id,
            coach_name: "Maya".to_string(),
            goal_description: description.to_string(),
            stage: GoalStage::Active,
            current_step: 1,
            has_plan: true,
            total_steps: 8,
        }
    }

    #[test]
    fn goal_summaries_display() {
        let output = GoalSummaries(vec![summary(1, "learning guitar"), summary(2, "running")])
            .to_string();
        assert!(output.contains("## 1. learning guitar"));
        assert!(output.contains("## 2. running"));
        assert!(output.contains("1/8 steps"));

        let empty = GoalSummaries(vec![]).to_string();
        assert_eq!(empty, "No goals found.\n");
    }

    #[test]
    fn messages_display_labels_speakers() {
        let messages = Messages(vec![ChatMessage {
            id: 1,
            goal_id: 1,
            role: MessageRole::User,
            content: "hello".to_string(),
            created_at: Timestamp::now(),
        }]);
        let output = messages.to_string();
        assert!(output.contains("**You**: hello"));
    }
}
