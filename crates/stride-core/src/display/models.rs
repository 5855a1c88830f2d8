//! Display implementations for domain models.
//!
//! All implementations produce markdown for rich terminal display. Plans are
//! rendered as a header plus one section per step; summaries are compact
//! single-entry blocks for list views.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Goal, GoalStage, GoalSummary, Plan, PlanStatus, Step};

impl fmt::Display for GoalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Step {
    /// Completion marker used in step listings.
    pub fn icon(&self) -> &'static str {
        if self.completed {
            "✓"
        } else {
            "○"
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} ({})", self.id, self.title, self.icon())?;
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }

        if !self.duration.is_empty() {
            writeln!(f, "- Duration: {}", self.duration)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.as_str())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(note) = &self.modification_note {
            writeln!(f)?;
            writeln!(f, "> {note}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this plan.")?;
        } else {
            let done = self.steps.iter().filter(|s| s.completed).count();
            writeln!(f, "\n## Steps ({done}/{} done)", self.steps.len())?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.goal_description)?;
        writeln!(f)?;
        writeln!(f, "- Coach: {}", self.coach_name)?;
        writeln!(f, "- Stage: {}", self.stage.as_str())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        Ok(())
    }
}

impl fmt::Display for GoalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.has_plan {
            format!("{}/{} steps", self.current_step, self.total_steps)
        } else {
            "no plan".to_string()
        };

        writeln!(f, "## {}. {}", self.id, self.goal_description)?;
        writeln!(f)?;
        writeln!(f, "- Coach: {}", self.coach_name)?;
        writeln!(f, "- Stage: {}", self.stage.as_str())?;
        writeln!(f, "- Progress: {progress}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::models::{Plan, PlanStatus, Step};

    fn step(id: u32, title: &str, completed: bool) -> Step {
        Step {
            id,
            title: title.to_string(),
            description: String::new(),
            duration: "1 week".to_string(),
            completed,
        }
    }

    #[test]
    fn plan_display_shows_progress_and_icons() {
        let plan = Plan {
            id: 1,
            goal_id: 1,
            title: "Your Guitar Journey".to_string(),
            status: PlanStatus::Accepted,
            modification_note: None,
            steps: vec![step(1, "Getting Started", true), step(2, "Foundation", false)],
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };

        let output = plan.to_string();
        assert!(output.contains("# Your Guitar Journey"));
        assert!(output.contains("Steps (1/2 done)"));
        assert!(output.contains("### 1. Getting Started (✓)"));
        assert!(output.contains("### 2. Foundation (○)"));
    }

    #[test]
    fn plan_display_surfaces_modification_note() {
        let plan = Plan {
            id: 1,
            goal_id: 1,
            title: "Plan".to_string(),
            status: PlanStatus::PendingAcceptance,
            modification_note: Some("Skipped 2 step(s) as requested".to_string()),
            steps: vec![],
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };

        let output = plan.to_string();
        assert!(output.contains("> Skipped 2 step(s) as requested"));
        assert!(output.contains("No steps in this plan."));
    }
}
